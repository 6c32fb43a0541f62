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

//! Count command - offers in a feed

use super::reader_config;
use crate::error::{CliError, CliResult};
use std::thread;
use tracing::debug;
use yml_stream::ReaderHandle;

/// Count the offers in `file` without holding more than `capacity` of them.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or the input is malformed.
pub fn count(file: &str, capacity: usize) -> CliResult<usize> {
    let handle = ReaderHandle::from_file_with_config(file, reader_config(capacity)?)?;

    let (counted, drive) = thread::scope(|s| {
        let producer = s.spawn(|| handle.drive_to_completion());
        let counted = handle.offers().count();
        (counted, producer.join())
    });

    let decoded = drive.map_err(|_| CliError::ProducerPanicked)??;
    debug!(file, decoded, counted, "count finished");
    handle.close()?;
    Ok(counted)
}
