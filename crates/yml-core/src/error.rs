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

//! Error types for catalog decoding.
//!
//! Two failure classes matter to callers: the markup itself is broken
//! ([`DecodeError::MalformedInput`]) or the markup is fine but an element cannot
//! be mapped onto its record ([`DecodeError::DecodeFailure`]). I/O errors from the
//! underlying stream pass through unchanged.

use thiserror::Error;

/// Errors that can occur while scanning or decoding a catalog.
///
/// # Examples
///
/// ```rust
/// use yml_core::DecodeError;
///
/// let err = DecodeError::malformed(42, "unexpected end of input");
/// assert_eq!(err.position(), Some(42));
/// assert!(err.to_string().contains("position 42"));
/// ```
#[derive(Error, Debug)]
pub enum DecodeError {
    /// IO error from the input stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well-formed markup.
    #[error("Malformed input at position {position}: {message}")]
    MalformedInput { position: usize, message: String },

    /// A well-formed element could not be mapped onto its record.
    #[error("Cannot decode <{element}>: {message}")]
    DecodeFailure { element: String, message: String },
}

impl DecodeError {
    /// Create a malformed input error.
    #[inline]
    pub fn malformed(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            position,
            message: message.into(),
        }
    }

    /// Create a decode failure for `element`.
    #[inline]
    pub fn decode(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            element: element.into(),
            message: message.into(),
        }
    }

    /// Create a decode failure for a subtree nested deeper than `max`.
    pub fn depth_exceeded(element: impl Into<String>, max: usize) -> Self {
        Self::decode(element, format!("nesting depth exceeded (max: {})", max))
    }

    /// Byte offset of the error, if the scanner recorded one.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::MalformedInput { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_malformed_display() {
        let err = DecodeError::malformed(17, "expected </offer>, found </shop>");
        assert_eq!(
            err.to_string(),
            "Malformed input at position 17: expected </offer>, found </shop>"
        );
    }

    #[test]
    fn test_decode_failure_display() {
        let err = DecodeError::decode("category", "field `id`: invalid integer \"x\"");
        assert_eq!(
            err.to_string(),
            "Cannot decode <category>: field `id`: invalid integer \"x\""
        );
    }

    #[test]
    fn test_depth_exceeded() {
        let err = DecodeError::depth_exceeded("offer", 3);
        match err {
            DecodeError::DecodeFailure { element, message } => {
                assert_eq!(element, "offer");
                assert!(message.contains("max: 3"));
            }
            other => panic!("Expected DecodeFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_io_from() {
        let err: DecodeError = io::Error::new(io::ErrorKind::UnexpectedEof, "short read").into();
        assert!(err.to_string().contains("IO error"));
        assert_eq!(err.position(), None);
    }
}
