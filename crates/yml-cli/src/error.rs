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

//! CLI error type.

use thiserror::Error;
use yml_core::DecodeError;
use yml_stream::ReaderError;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Opening or driving the streaming reader failed.
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// Whole-document decode failed.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Writing an offer as JSON failed.
    #[error("JSON format error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A flag value is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The producer thread panicked.
    #[error("Reader thread panicked")]
    ProducerPanicked,
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
