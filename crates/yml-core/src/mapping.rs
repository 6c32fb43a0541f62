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

//! Declarative field mapping.
//!
//! Every record type publishes a table of [`FieldMapping`]s: which field it
//! fills, where in the element the value comes from ([`FieldPath`]) and how the
//! raw value becomes a field value ([`DecodeRule`]). [`decode_record`] walks the
//! table against one [`Element`]; there is no per-type decoding code.
//!
//! Matching follows document order. A single-valued field takes the last match;
//! a repeated field's setter appends, so it collects every match.
//!
//! # Examples
//!
//! ```rust
//! use yml_core::{decode_record, DecodeRule, Element, FieldMapping, FieldPath, Record};
//!
//! #[derive(Default)]
//! struct Note {
//!     title: String,
//! }
//!
//! impl Record for Note {
//!     const ELEMENT: &'static str = "note";
//!
//!     fn mappings() -> &'static [FieldMapping<Self>] {
//!         static FIELDS: &[FieldMapping<Note>] = &[FieldMapping {
//!             field: "title",
//!             path: FieldPath::Attr("title"),
//!             rule: DecodeRule::Text(|n, v| n.title = v),
//!         }];
//!         FIELDS
//!     }
//! }
//!
//! let mut el = Element::new("note", Vec::new());
//! el.attributes.push(yml_core::Attribute { name: "title".into(), value: "hi".into() });
//! let note: Note = decode_record(&el).unwrap();
//! assert_eq!(note.title, "hi");
//! ```

use crate::element::Element;
use crate::error::{DecodeError, DecodeResult};
use crate::schema::CatalogDate;

/// Where a field's value is found, relative to the record's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    /// An attribute of the element.
    Attr(&'static str),
    /// Each direct child element with this name.
    Child(&'static str),
    /// Each `inner` child of each `outer` child (`outer>inner`).
    Wrapped(&'static str, &'static str),
    /// The element's own character data.
    CharData,
}

/// How a matched value is turned into a field value.
pub enum DecodeRule<T> {
    /// Raw string.
    Text(fn(&mut T, String)),
    /// Base-10 integer; empty decodes to 0, anything else non-numeric fails.
    Int(fn(&mut T, i64)),
    /// Catalog timestamp; never fails, see [`CatalogDate`].
    Date(fn(&mut T, CatalogDate)),
    /// Nested record decoded from a matched element.
    Nested(fn(&mut T, &Element) -> DecodeResult<()>),
}

/// One row of a record's mapping table.
pub struct FieldMapping<T> {
    /// Field name, used in error messages
    pub field: &'static str,
    /// Source of the value
    pub path: FieldPath,
    /// Decode rule applied to each match
    pub rule: DecodeRule<T>,
}

/// A record type that can be decoded from an element through its mapping table.
pub trait Record: Default + Sized + 'static {
    /// Local name of the element this record is usually read from.
    const ELEMENT: &'static str;

    /// The record's mapping table.
    fn mappings() -> &'static [FieldMapping<Self>];
}

/// Decode `element` into `T` by evaluating `T`'s mapping table.
///
/// # Errors
///
/// Returns `DecodeFailure` if an integer field holds a non-integer value, if a
/// nested record fails, or if the table maps an attribute or character data onto
/// a nested record.
pub fn decode_record<T: Record>(element: &Element) -> DecodeResult<T> {
    let mut record = T::default();

    for mapping in T::mappings() {
        match mapping.path {
            FieldPath::Attr(name) => {
                if let Some(value) = element.attribute(name) {
                    apply(&mut record, mapping, element, Matched::Value(value))?;
                }
            }
            FieldPath::CharData => {
                apply(&mut record, mapping, element, Matched::Value(&element.text))?;
            }
            FieldPath::Child(name) => {
                for child in element.children_named(name) {
                    apply(&mut record, mapping, element, Matched::Node(child))?;
                }
            }
            FieldPath::Wrapped(outer, inner) => {
                for wrapper in element.children_named(outer) {
                    for child in wrapper.children_named(inner) {
                        apply(&mut record, mapping, element, Matched::Node(child))?;
                    }
                }
            }
        }
    }

    Ok(record)
}

enum Matched<'a> {
    Value(&'a str),
    Node(&'a Element),
}

impl Matched<'_> {
    fn text(&self) -> &str {
        match self {
            Matched::Value(v) => v,
            Matched::Node(node) => &node.text,
        }
    }
}

fn apply<T>(
    record: &mut T,
    mapping: &FieldMapping<T>,
    parent: &Element,
    matched: Matched<'_>,
) -> DecodeResult<()> {
    match &mapping.rule {
        DecodeRule::Text(set) => set(record, matched.text().to_string()),
        DecodeRule::Int(set) => set(record, parse_int(parent, mapping.field, matched.text())?),
        DecodeRule::Date(set) => set(record, CatalogDate::parse(matched.text())),
        DecodeRule::Nested(set) => match matched {
            Matched::Node(node) => set(record, node)?,
            Matched::Value(_) => {
                return Err(DecodeError::decode(
                    &parent.name,
                    format!("field `{}` maps a plain value onto a nested record", mapping.field),
                ))
            }
        },
    }
    Ok(())
}

fn parse_int(parent: &Element, field: &str, raw: &str) -> DecodeResult<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i64>().map_err(|_| {
        DecodeError::decode(
            &parent.name,
            format!("field `{}`: invalid integer {:?}", field, raw),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Attribute;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        label: Option<String>,
        count: i64,
        tags: Vec<String>,
        body: String,
        parts: Vec<Part>,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Part {
        code: String,
    }

    impl Record for Part {
        const ELEMENT: &'static str = "part";

        fn mappings() -> &'static [FieldMapping<Self>] {
            static FIELDS: &[FieldMapping<Part>] = &[FieldMapping {
                field: "code",
                path: FieldPath::Attr("code"),
                rule: DecodeRule::Text(|p, v| p.code = v),
            }];
            FIELDS
        }
    }

    impl Record for Sample {
        const ELEMENT: &'static str = "sample";

        fn mappings() -> &'static [FieldMapping<Self>] {
            static FIELDS: &[FieldMapping<Sample>] = &[
                FieldMapping {
                    field: "label",
                    path: FieldPath::Child("label"),
                    rule: DecodeRule::Text(|s, v| s.label = Some(v)),
                },
                FieldMapping {
                    field: "count",
                    path: FieldPath::Attr("count"),
                    rule: DecodeRule::Int(|s, v| s.count = v),
                },
                FieldMapping {
                    field: "tags",
                    path: FieldPath::Wrapped("tags", "tag"),
                    rule: DecodeRule::Text(|s, v| s.tags.push(v)),
                },
                FieldMapping {
                    field: "body",
                    path: FieldPath::CharData,
                    rule: DecodeRule::Text(|s, v| s.body = v),
                },
                FieldMapping {
                    field: "parts",
                    path: FieldPath::Child("part"),
                    rule: DecodeRule::Nested(|s, el| {
                        s.parts.push(decode_record(el)?);
                        Ok(())
                    }),
                },
            ];
            FIELDS
        }
    }

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn text_child(name: &str, text: &str) -> Element {
        let mut el = Element::new(name, Vec::new());
        el.text = text.to_string();
        el
    }

    #[test]
    fn test_decode_all_paths() {
        let mut tags = Element::new("tags", Vec::new());
        tags.children.push(text_child("tag", "a"));
        tags.children.push(text_child("tag", "b"));

        let mut el = Element::new("sample", vec![attr("count", " 12 ")]);
        el.text = "body text".to_string();
        el.children.push(text_child("label", "first"));
        el.children.push(tags);
        el.children.push(Element::new("part", vec![attr("code", "x1")]));
        el.children.push(text_child("label", "second"));
        el.children.push(Element::new("part", vec![attr("code", "x2")]));

        let sample: Sample = decode_record(&el).unwrap();
        assert_eq!(sample.label.as_deref(), Some("second"));
        assert_eq!(sample.count, 12);
        assert_eq!(sample.tags, vec!["a", "b"]);
        assert_eq!(sample.body, "body text");
        assert_eq!(
            sample.parts,
            vec![
                Part {
                    code: "x1".to_string()
                },
                Part {
                    code: "x2".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_decode_missing_fields_stay_default() {
        let sample: Sample = decode_record(&Element::new("sample", Vec::new())).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_decode_empty_int_is_zero() {
        let el = Element::new("sample", vec![attr("count", "")]);
        let sample: Sample = decode_record(&el).unwrap();
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_decode_invalid_int_fails() {
        let el = Element::new("sample", vec![attr("count", "many")]);
        match decode_record::<Sample>(&el).unwrap_err() {
            DecodeError::DecodeFailure { element, message } => {
                assert_eq!(element, "sample");
                assert!(message.contains("count"));
                assert!(message.contains("many"));
            }
            other => panic!("Expected DecodeFailure, got {:?}", other),
        }
    }

    #[derive(Debug, Default)]
    struct Misconfigured {
        part: Option<Part>,
    }

    impl Record for Misconfigured {
        const ELEMENT: &'static str = "misconfigured";

        fn mappings() -> &'static [FieldMapping<Self>] {
            static FIELDS: &[FieldMapping<Misconfigured>] = &[FieldMapping {
                field: "part",
                path: FieldPath::Attr("part"),
                rule: DecodeRule::Nested(|m, el| {
                    m.part = Some(decode_record(el)?);
                    Ok(())
                }),
            }];
            FIELDS
        }
    }

    #[test]
    fn test_decode_nested_from_attribute_fails() {
        let el = Element::new("misconfigured", vec![attr("part", "x")]);
        let err = decode_record::<Misconfigured>(&el).unwrap_err();
        assert!(matches!(err, DecodeError::DecodeFailure { .. }));
    }

    #[test]
    fn test_decode_nested_absent_is_none() {
        let m: Misconfigured = decode_record(&Element::new("misconfigured", Vec::new())).unwrap();
        assert!(m.part.is_none());
    }
}
