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

//! Stream command - offers as JSON lines

use super::reader_config;
use crate::error::{CliError, CliResult};
use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tracing::debug;
use yml_stream::{ReaderError, ReaderHandle, DEFAULT_QUEUE_CAPACITY};

/// Options for [`stream`].
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Relay queue capacity.
    pub capacity: usize,
    /// Stop after this many offers.
    pub limit: Option<usize>,
    /// Wall-clock limit for the drive.
    pub timeout: Option<Duration>,
    /// Pretty-print each offer.
    pub pretty: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            limit: None,
            timeout: None,
            pretty: false,
        }
    }
}

/// What a [`stream`] run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    /// Offers written to the output.
    pub printed: usize,
    /// Offers decoded from the input (may exceed `printed` under `--limit`).
    pub decoded: usize,
    /// Whether the reader reached the end of the input.
    pub complete: bool,
}

impl fmt::Display for StreamSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Streamed {} offer(s), {} decoded", self.printed, self.decoded)?;
        if !self.complete {
            write!(f, " (stopped early)")?;
        }
        Ok(())
    }
}

/// Stream every offer of `file` to stdout as one JSON document per line.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened, the input is malformed, the
/// drive times out, or stdout cannot be written.
///
/// # Examples
///
/// ```no_run
/// use yml_cli::commands::{stream, StreamOptions};
///
/// # fn main() -> Result<(), yml_cli::CliError> {
/// let options = StreamOptions { limit: Some(10), ..Default::default() };
/// let summary = stream("feed.xml", &options)?;
/// eprintln!("{}", summary);
/// # Ok(())
/// # }
/// ```
pub fn stream(file: &str, options: &StreamOptions) -> CliResult<StreamSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    stream_to(file, options, &mut out)
}

/// [`stream`] into any writer.
pub fn stream_to<W: Write>(file: &str, options: &StreamOptions, out: &mut W) -> CliResult<StreamSummary> {
    let mut config = reader_config(options.capacity)?;
    config.timeout = options.timeout;
    let handle = ReaderHandle::from_file_with_config(file, config)?;

    let (written, drive) = thread::scope(|s| {
        let producer = s.spawn(|| handle.drive_to_completion());
        let written = write_offers(&handle, options, out);
        // Stops a producer still parked on a full queue once we stop reading.
        handle.cancel();
        (written, producer.join())
    });

    let printed = written?;
    match drive.map_err(|_| CliError::ProducerPanicked)? {
        Ok(decoded) => debug!(file, decoded, "stream finished"),
        Err(ReaderError::Cancelled) if options.limit.is_some() => {
            debug!(file, printed, "stream stopped at limit")
        }
        Err(e) => return Err(e.into()),
    }

    let summary = StreamSummary {
        printed,
        decoded: handle.consumed_count(),
        complete: handle.is_complete(),
    };
    handle.close()?;
    Ok(summary)
}

fn write_offers<W: Write>(handle: &ReaderHandle, options: &StreamOptions, out: &mut W) -> CliResult<usize> {
    let mut printed = 0;
    while options.limit.map_or(true, |max| printed < max) {
        let Some(offer) = handle.next_offer() else {
            break;
        };
        if options.pretty {
            serde_json::to_writer_pretty(&mut *out, &offer)?;
        } else {
            serde_json::to_writer(&mut *out, &offer)?;
        }
        out.write_all(b"\n")?;
        printed += 1;
    }
    out.flush()?;
    Ok(printed)
}
