// Dweve YML - Streaming catalog feed reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI command definitions and argument parsing.

use crate::commands::{self, StreamOptions};
use crate::error::CliResult;
use clap::Subcommand;
use std::time::Duration;
use yml_stream::DEFAULT_QUEUE_CAPACITY;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use yml_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Print every offer as a JSON line
    ///
    /// Drives the reader on a producer thread while the main thread prints
    /// offers in document order. A summary goes to stderr.
    Stream {
        /// Input catalog file
        #[arg(value_name = "FILE")]
        file: String,

        /// Maximum number of decoded offers buffered ahead of output
        #[arg(short, long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
        capacity: usize,

        /// Stop after printing this many offers
        #[arg(short, long)]
        limit: Option<usize>,

        /// Abort if reading takes longer than this many milliseconds
        #[arg(short, long, value_name = "MS")]
        timeout: Option<u64>,

        /// Pretty-print each offer
        #[arg(short, long)]
        pretty: bool,
    },

    /// Count the offers in a catalog file
    Count {
        /// Input catalog file
        #[arg(value_name = "FILE")]
        file: String,

        /// Maximum number of decoded offers buffered ahead of counting
        #[arg(short, long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
        capacity: usize,
    },

    /// Decode a whole catalog and print a shop summary
    ///
    /// Loads the entire document into memory.
    Inspect {
        /// Input catalog file
        #[arg(value_name = "FILE")]
        file: String,

        /// Print the decoded catalog as JSON instead
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be opened, the document is malformed,
    /// or writing the output fails.
    pub fn execute(self) -> CliResult<()> {
        match self {
            Commands::Stream {
                file,
                capacity,
                limit,
                timeout,
                pretty,
            } => {
                let options = StreamOptions {
                    capacity,
                    limit,
                    timeout: timeout.map(Duration::from_millis),
                    pretty,
                };
                let summary = commands::stream(&file, &options)?;
                eprintln!("{}", summary);
                Ok(())
            }
            Commands::Count { file, capacity } => {
                let total = commands::count(&file, capacity)?;
                println!("{}", total);
                Ok(())
            }
            Commands::Inspect { file, json } => commands::inspect(&file, json),
        }
    }
}
