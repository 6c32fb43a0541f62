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

//! Forward-only token scanner over a byte stream.
//!
//! The scanner turns raw markup into a flat sequence of [`Token`]s: element
//! opens (with their attributes), element closes, and character data. Comments,
//! processing instructions and the XML declaration are skipped. Self-closing
//! elements are reported as an open immediately followed by a close, so callers
//! only ever see balanced pairs.
//!
//! Well-formedness is checked as tokens are pulled: a close tag that does not
//! match the innermost open element, a stray close tag, or end-of-input while
//! elements are still open all fail with [`DecodeError::MalformedInput`].
//!
//! # Examples
//!
//! ```rust
//! use yml_core::{ScanConfig, Token, TokenScanner};
//!
//! let mut scanner = TokenScanner::new("<shop><name>Books</name></shop>".as_bytes(), &ScanConfig::default());
//!
//! let mut names = Vec::new();
//! while let Some(token) = scanner.next_token().unwrap() {
//!     if let Token::Open { name, .. } = token {
//!         names.push(name);
//!     }
//! }
//! assert_eq!(names, vec!["shop", "name"]);
//! ```

use crate::error::{DecodeError, DecodeResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{BufReader, Read};

/// Configuration for token scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Buffer size for reading chunks (default: 64KB)
    pub buffer_size: usize,
    /// Maximum element nesting inside one decoded subtree (default: 100)
    pub max_depth: usize,
    /// Trim leading and trailing whitespace from character data (default: true)
    ///
    /// With the default, `<name>  Book </name>` decodes to `"Book"` and
    /// whitespace-only text between elements is dropped. Set to `false` to
    /// keep character data byte for byte, as a plain XML decoder would.
    pub trim_text: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            buffer_size: 65536, // 64KB
            max_depth: 100,
            trim_text: true,
        }
    }
}

/// An attribute of an element-open token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local attribute name (namespace prefix stripped)
    pub name: String,
    /// Unescaped attribute value
    pub value: String,
}

/// A lexical token pulled from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Start of an element.
    Open {
        /// Local element name (namespace prefix stripped)
        name: String,
        /// Attributes in document order
        attributes: Vec<Attribute>,
    },
    /// End of the innermost open element.
    Close {
        /// Local element name
        name: String,
    },
    /// Character data, with entities unescaped. CDATA sections arrive verbatim.
    Text(String),
}

/// A streaming token scanner backed by `quick-xml`.
///
/// Memory usage is bounded by `buffer_size` plus the size of the largest single
/// token; nothing outside the current token is retained.
pub struct TokenScanner<R: Read> {
    reader: Reader<BufReader<R>>,
    buf: Vec<u8>,
    depth: usize,
    exhausted: bool,
}

impl<R: Read> TokenScanner<R> {
    /// Create a scanner over `input`.
    pub fn new(input: R, config: &ScanConfig) -> Self {
        let buf_reader = BufReader::with_capacity(config.buffer_size, input);
        let mut reader = Reader::from_reader(buf_reader);
        reader.trim_text(config.trim_text);
        reader.expand_empty_elements(true);
        reader.check_end_names(true);

        TokenScanner {
            reader,
            buf: Vec::with_capacity(8192),
            depth: 0,
            exhausted: false,
        }
    }

    /// Number of currently open elements.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Byte offset of the scanner in the input.
    #[inline]
    pub fn byte_position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Pull the next token.
    ///
    /// Returns `Ok(None)` at a clean end-of-input. Once `None` or an error has
    /// been returned, every later call returns `Ok(None)`.
    pub fn next_token(&mut self) -> DecodeResult<Option<Token>> {
        if self.exhausted {
            return Ok(None);
        }

        match self.pull() {
            Ok(token) => {
                if token.is_none() {
                    self.exhausted = true;
                }
                Ok(token)
            }
            Err(e) => {
                self.exhausted = true;
                Err(e)
            }
        }
    }

    fn pull(&mut self) -> DecodeResult<Option<Token>> {
        loop {
            self.buf.clear();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| scan_error(e, self.reader.buffer_position()))?;

            match event {
                Event::Start(e) => {
                    let token = open_token(&e, self.reader.buffer_position())?;
                    self.depth += 1;
                    return Ok(Some(token));
                }
                Event::End(e) => {
                    let name = utf8(
                        e.local_name().as_ref(),
                        self.reader.buffer_position(),
                        "element name",
                    )?;
                    if self.depth == 0 {
                        return Err(DecodeError::malformed(
                            self.reader.buffer_position(),
                            format!("unexpected closing tag </{}>", name),
                        ));
                    }
                    self.depth -= 1;
                    return Ok(Some(Token::Close { name }));
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|e| {
                        DecodeError::malformed(
                            self.reader.buffer_position(),
                            format!("text unescape error: {}", e),
                        )
                    })?;
                    if !text.is_empty() {
                        return Ok(Some(Token::Text(text.into_owned())));
                    }
                }
                Event::CData(e) => {
                    let text = utf8(&e, self.reader.buffer_position(), "CDATA section")?;
                    if !text.is_empty() {
                        return Ok(Some(Token::Text(text)));
                    }
                }
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(DecodeError::malformed(
                            self.reader.buffer_position(),
                            format!("unexpected end of input: {} element(s) left open", self.depth),
                        ));
                    }
                    return Ok(None);
                }
                // Declarations, comments, processing instructions and doctypes
                // carry nothing a catalog record maps.
                _ => {}
            }
        }
    }
}

impl<R: Read> Iterator for TokenScanner<R> {
    type Item = DecodeResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn open_token(elem: &BytesStart<'_>, position: usize) -> DecodeResult<Token> {
    let name = utf8(elem.local_name().as_ref(), position, "element name")?;

    let mut attributes = Vec::new();
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| {
            DecodeError::malformed(position, format!("bad attribute in <{}>: {}", name, e))
        })?;
        let key = utf8(attr.key.local_name().as_ref(), position, "attribute name")?;
        let value = attr.unescape_value().map_err(|e| {
            DecodeError::malformed(
                position,
                format!("bad value for attribute `{}` in <{}>: {}", key, name, e),
            )
        })?;
        attributes.push(Attribute {
            name: key,
            value: value.into_owned(),
        });
    }

    Ok(Token::Open { name, attributes })
}

/// Same strictness as `unescape()` applies to text: invalid UTF-8 is malformed input.
fn utf8(bytes: &[u8], position: usize, what: &str) -> DecodeResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| DecodeError::malformed(position, format!("invalid UTF-8 in {}: {}", what, e)))
}

fn scan_error(err: quick_xml::Error, position: usize) -> DecodeError {
    match err {
        quick_xml::Error::Io(e) => DecodeError::Io(std::io::Error::new(e.kind(), e.to_string())),
        other => DecodeError::malformed(position, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(xml: &str) -> DecodeResult<Vec<Token>> {
        TokenScanner::new(xml.as_bytes(), &ScanConfig::default()).collect()
    }

    fn open(name: &str) -> Token {
        Token::Open {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    fn close(name: &str) -> Token {
        Token::Close {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();
        assert_eq!(config.buffer_size, 65536);
        assert_eq!(config.max_depth, 100);
        assert!(config.trim_text);
    }

    #[test]
    fn test_scan_simple_element() {
        let tokens = scan_all("<name>Test Book</name>").unwrap();
        assert_eq!(
            tokens,
            vec![open("name"), Token::Text("Test Book".to_string()), close("name")]
        );
    }

    #[test]
    fn test_scan_skips_declaration_and_comments() {
        let tokens =
            scan_all(r#"<?xml version="1.0" encoding="UTF-8"?><!-- feed --><a/>"#).unwrap();
        assert_eq!(tokens, vec![open("a"), close("a")]);
    }

    #[test]
    fn test_scan_self_closing_expands() {
        let tokens = scan_all(r#"<option cost="300" days="1"/>"#).unwrap();
        assert_eq!(tokens.len(), 2);
        match &tokens[0] {
            Token::Open { name, attributes } => {
                assert_eq!(name, "option");
                assert_eq!(attributes.len(), 2);
                assert_eq!(attributes[0].name, "cost");
                assert_eq!(attributes[0].value, "300");
                assert_eq!(attributes[1].name, "days");
            }
            other => panic!("Expected open token, got {:?}", other),
        }
        assert_eq!(tokens[1], close("option"));
    }

    #[test]
    fn test_scan_unescapes_text_and_attributes() {
        let tokens = scan_all(r#"<p title="a &amp; b">x &lt; y</p>"#).unwrap();
        match &tokens[0] {
            Token::Open { attributes, .. } => assert_eq!(attributes[0].value, "a & b"),
            other => panic!("Expected open token, got {:?}", other),
        }
        assert_eq!(tokens[1], Token::Text("x < y".to_string()));
    }

    #[test]
    fn test_scan_invalid_utf8_cdata_is_malformed() {
        let input: &[u8] = b"<d><![CDATA[ok \xff\xfe]]></d>";
        let mut scanner = TokenScanner::new(input, &ScanConfig::default());
        assert_eq!(scanner.next_token().unwrap(), Some(open("d")));
        let err = scanner.next_token().unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
        assert!(err.to_string().contains("CDATA"));
        assert_eq!(scanner.next_token().unwrap(), None);
    }

    #[test]
    fn test_scan_invalid_utf8_text_is_malformed() {
        let input: &[u8] = b"<d>ok \xff\xfe</d>";
        let result: DecodeResult<Vec<Token>> =
            TokenScanner::new(input, &ScanConfig::default()).collect();
        assert!(matches!(result, Err(DecodeError::MalformedInput { .. })));
    }

    #[test]
    fn test_byte_position_through_mut_ref() {
        let mut scanner = TokenScanner::new("<a>x</a>".as_bytes(), &ScanConfig::default());
        let scanner = &mut scanner;
        assert_eq!(scanner.byte_position(), 0);
        scanner.next_token().unwrap();
        assert_eq!(scanner.byte_position(), 3);
    }

    #[test]
    fn test_scan_cdata_verbatim() {
        let tokens = scan_all("<description><![CDATA[<b>bold</b>]]></description>").unwrap();
        assert_eq!(tokens[1], Token::Text("<b>bold</b>".to_string()));
    }

    #[test]
    fn test_scan_strips_namespace_prefix() {
        let tokens = scan_all(r#"<y:offer xmlns:y="urn:yml" y:id="7"></y:offer>"#).unwrap();
        match &tokens[0] {
            Token::Open { name, attributes } => {
                assert_eq!(name, "offer");
                assert!(attributes.iter().any(|a| a.name == "id" && a.value == "7"));
            }
            other => panic!("Expected open token, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_mismatched_close_is_malformed() {
        let err = scan_all("<offer><name>x</offer>").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
    }

    #[test]
    fn test_scan_unclosed_at_eof_is_malformed() {
        let err = scan_all("<offers><offer id=\"1\"><name>x</name>").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
    }

    #[test]
    fn test_scan_stray_close_is_malformed() {
        let err = scan_all("<a></a></b>").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
    }

    #[test]
    fn test_scan_exhausted_after_error() {
        let mut scanner = TokenScanner::new("<a></b>".as_bytes(), &ScanConfig::default());
        assert!(scanner.next_token().is_ok());
        assert!(scanner.next_token().is_err());
        assert!(matches!(scanner.next_token(), Ok(None)));
    }

    #[test]
    fn test_scan_depth_tracking() {
        let mut scanner = TokenScanner::new("<a><b></b></a>".as_bytes(), &ScanConfig::default());
        scanner.next_token().unwrap();
        scanner.next_token().unwrap();
        assert_eq!(scanner.depth(), 2);
        scanner.next_token().unwrap();
        assert_eq!(scanner.depth(), 1);
        scanner.next_token().unwrap();
        assert_eq!(scanner.depth(), 0);
        assert!(scanner.next_token().unwrap().is_none());
    }

    #[test]
    fn test_scan_keeps_whitespace_when_not_trimming() {
        let config = ScanConfig {
            trim_text: false,
            ..Default::default()
        };
        let tokens: Vec<_> = TokenScanner::new("<a> x </a>".as_bytes(), &config)
            .collect::<DecodeResult<_>>()
            .unwrap();
        assert_eq!(tokens[1], Token::Text(" x ".to_string()));
    }
}
