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

//! Error types for the streaming reader.
//!
//! # Error Categories
//!
//! - **Construction**: `NotFound`, `PermissionDenied`, `InvalidArgument`
//! - **Lifecycle**: `NotInitialized`, `Busy`
//! - **Input**: `MalformedInput`, `DecodeFailure`, `Io`
//! - **Interruption**: `Cancelled`, `Timeout`
//!
//! The drive loop stops at the first error; nothing is retried or skipped.
//!
//! ```rust
//! use std::io::Cursor;
//! use yml_stream::{ReaderError, ReaderHandle};
//!
//! let handle = ReaderHandle::from_reader(Cursor::new("<offers><offer></offers>")).unwrap();
//! match handle.drive_to_completion() {
//!     Err(ReaderError::MalformedInput { position, message }) => {
//!         eprintln!("broken feed at byte {}: {}", position, message);
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use yml_core::DecodeError;

/// Errors that can occur while opening, driving or closing a reader.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The input file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The input file cannot be opened for reading.
    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// A constructor argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The reader has no input stream (already closed).
    #[error("Reader is not initialized")]
    NotInitialized,

    /// The reader is already being driven, or has been driven before.
    #[error("Reader is busy: {0}")]
    Busy(&'static str),

    /// The input is not well-formed markup.
    #[error("Malformed input at position {position}: {message}")]
    MalformedInput { position: usize, message: String },

    /// An offer element could not be mapped onto the record schema.
    #[error("Cannot decode <{element}>: {message}")]
    DecodeFailure { element: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The drive was cancelled through its cancellation token.
    #[error("Reader cancelled")]
    Cancelled,

    /// The drive exceeded its configured time limit.
    #[error("Reader timeout: elapsed {elapsed:?} exceeded limit {limit:?}")]
    Timeout { elapsed: Duration, limit: Duration },
}

impl ReaderError {
    /// Map an `io::Error` from opening `path` onto the construction taxonomy.
    pub fn open_failed(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path: path.into() },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path: path.into() },
            _ => Self::Io(err),
        }
    }

    /// Whether the drive was interrupted rather than failing on its input.
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Timeout { .. })
    }
}

impl From<DecodeError> for ReaderError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Io(e) => Self::Io(e),
            DecodeError::MalformedInput { position, message } => {
                Self::MalformedInput { position, message }
            }
            DecodeError::DecodeFailure { element, message } => {
                Self::DecodeFailure { element, message }
            }
        }
    }
}

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_open_failed_not_found() {
        let err = ReaderError::open_failed(
            "/missing.yml",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        match err {
            ReaderError::NotFound { path } => assert_eq!(path, PathBuf::from("/missing.yml")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_open_failed_permission_denied() {
        let err = ReaderError::open_failed(
            "/root.yml",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ReaderError::PermissionDenied { .. }));
        assert_eq!(err.to_string(), "Permission denied: /root.yml");
    }

    #[test]
    fn test_open_failed_other_is_io() {
        let err = ReaderError::open_failed("/x", io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(err, ReaderError::Io(_)));
    }

    #[test]
    fn test_from_decode_error() {
        let err: ReaderError = DecodeError::malformed(9, "bad").into();
        match err {
            ReaderError::MalformedInput { position, message } => {
                assert_eq!(position, 9);
                assert_eq!(message, "bad");
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }

        let err: ReaderError = DecodeError::decode("offer", "bad rate").into();
        assert!(matches!(err, ReaderError::DecodeFailure { .. }));
    }

    #[test]
    fn test_is_interrupted() {
        assert!(ReaderError::Cancelled.is_interrupted());
        assert!(ReaderError::Timeout {
            elapsed: Duration::from_millis(20),
            limit: Duration::from_millis(10),
        }
        .is_interrupted());
        assert!(!ReaderError::NotInitialized.is_interrupted());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ReaderError::NotInitialized.to_string(),
            "Reader is not initialized"
        );
        assert_eq!(
            ReaderError::InvalidArgument("queue capacity must be at least 1".to_string())
                .to_string(),
            "Invalid argument: queue capacity must be at least 1"
        );
    }
}
