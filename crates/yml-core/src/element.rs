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

//! Materialized element subtrees.
//!
//! Records are decoded from a small in-memory tree rather than directly from
//! tokens: the mapping table can then look up attributes, children and wrapped
//! children in any order. Only one subtree (one offer, or the whole document on
//! the load-everything path) is ever held at a time.

use crate::error::{DecodeError, DecodeResult};
use crate::scanner::{Attribute, Token, TokenScanner};
use std::io::Read;

/// An element with its attributes, direct character data and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local element name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Concatenated character data directly inside this element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no content.
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Element {
            name: name.into(),
            attributes,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Value of attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Direct children called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Read the rest of an element whose open token was just pulled.
    ///
    /// Consumes tokens up to and including the matching close. Nesting below
    /// the element is limited to `max_depth` levels (the element itself is
    /// level 1).
    ///
    /// # Errors
    ///
    /// - `MalformedInput` if the scanner detects broken markup
    /// - `DecodeFailure` if the subtree nests deeper than `max_depth`
    pub fn read<R: Read>(
        scanner: &mut TokenScanner<R>,
        name: String,
        attributes: Vec<Attribute>,
        max_depth: usize,
    ) -> DecodeResult<Element> {
        read_element(scanner, Element::new(name, attributes), 1, max_depth)
    }
}

fn read_element<R: Read>(
    scanner: &mut TokenScanner<R>,
    mut element: Element,
    depth: usize,
    max_depth: usize,
) -> DecodeResult<Element> {
    if depth > max_depth {
        return Err(DecodeError::depth_exceeded(element.name, max_depth));
    }

    loop {
        match scanner.next_token()? {
            Some(Token::Open { name, attributes }) => {
                let child = read_element(
                    scanner,
                    Element::new(name, attributes),
                    depth + 1,
                    max_depth,
                )?;
                element.children.push(child);
            }
            Some(Token::Text(text)) => element.text.push_str(&text),
            Some(Token::Close { name }) => {
                if name != element.name {
                    return Err(DecodeError::malformed(
                        scanner.byte_position(),
                        format!("expected </{}>, found </{}>", element.name, name),
                    ));
                }
                return Ok(element);
            }
            None => {
                return Err(DecodeError::malformed(
                    scanner.byte_position(),
                    format!("unexpected end of input inside <{}>", element.name),
                ))
            }
        }
    }
}
