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

//! YML CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **stream**: print every offer as one JSON line, driving the reader on a
//!   producer thread while the main thread consumes
//! - **count**: stream the feed and print the number of offers
//! - **inspect**: decode the whole document and print a shop summary
//!
//! # Examples
//!
//! ```no_run
//! use yml_cli::commands::{count, StreamOptions};
//!
//! # fn main() -> Result<(), yml_cli::CliError> {
//! let offers = count("feed.xml", 10)?;
//! println!("{} offers", offers);
//!
//! let summary = yml_cli::commands::stream("feed.xml", &StreamOptions::default())?;
//! assert!(summary.printed <= summary.decoded);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;

pub use error::{CliError, CliResult};
