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

//! CLI command implementations

mod count;
mod inspect;
mod stream;

pub use count::count;
pub use inspect::inspect;
pub use stream::{stream, stream_to, StreamOptions, StreamSummary};

use crate::error::{CliError, CliResult};
use yml_stream::ReaderConfig;

/// Reader config for a command, rejecting a zero capacity up front.
fn reader_config(capacity: usize) -> CliResult<ReaderConfig> {
    if capacity == 0 {
        return Err(CliError::InvalidArgument(
            "--capacity must be at least 1".to_string(),
        ));
    }
    Ok(ReaderConfig::with_capacity(capacity))
}
