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

//! Whole-document decode.
//!
//! Loads a complete catalog in one call. Memory grows with the number of
//! offers, so this path suits small feeds; large feeds should go through the
//! streaming reader in `yml-stream`.

use crate::element::Element;
use crate::error::{DecodeError, DecodeResult};
use crate::mapping::decode_record;
use crate::scanner::{ScanConfig, Token, TokenScanner};
use crate::schema::Catalog;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Decode a catalog held in memory.
pub fn catalog_from_str(xml: &str) -> DecodeResult<Catalog> {
    catalog_from_reader(xml.as_bytes(), &ScanConfig::default())
}

/// Decode a catalog from any byte stream.
///
/// The first top-level element is taken as the catalog root whatever its name;
/// anything after it is not read.
///
/// # Errors
///
/// - `Io` if reading the stream fails
/// - `MalformedInput` if the markup is broken or there is no root element
/// - `DecodeFailure` if an element cannot be mapped onto its record
pub fn catalog_from_reader<R: Read>(reader: R, config: &ScanConfig) -> DecodeResult<Catalog> {
    let mut scanner = TokenScanner::new(reader, config);

    loop {
        match scanner.next_token()? {
            Some(Token::Open { name, attributes }) => {
                let root = Element::read(&mut scanner, name, attributes, config.max_depth)?;
                let catalog: Catalog = decode_record(&root)?;
                debug!(
                    root = %root.name,
                    offers = catalog.shop.offers.len(),
                    categories = catalog.shop.categories.len(),
                    "catalog decoded"
                );
                return Ok(catalog);
            }
            Some(_) => {}
            None => {
                return Err(DecodeError::malformed(
                    scanner.byte_position(),
                    "no root element found",
                ))
            }
        }
    }
}

/// Decode a catalog file.
///
/// Reads the whole file; prefer the streaming reader for large feeds.
pub fn catalog_from_file(path: impl AsRef<Path>) -> DecodeResult<Catalog> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading catalog file");
    let file = File::open(path)?;
    catalog_from_reader(file, &ScanConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CatalogDate;

    #[test]
    fn test_empty_input_has_no_root() {
        let err = catalog_from_str("").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
    }

    #[test]
    fn test_declaration_only_has_no_root() {
        let err = catalog_from_str(r#"<?xml version="1.0"?>"#).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
    }

    #[test]
    fn test_root_without_shop() {
        let catalog = catalog_from_str(r#"<yml_catalog date="2021-06-01 08:00"/>"#).unwrap();
        assert!(catalog.date.is_parsed());
        assert_eq!(catalog.shop, Default::default());
    }

    #[test]
    fn test_root_name_is_not_checked() {
        let catalog = catalog_from_str(r#"<feed date="bad"><shop><name>S</name></shop></feed>"#)
            .unwrap();
        assert_eq!(catalog.date, CatalogDate::Unparsed("bad".to_string()));
        assert_eq!(catalog.shop.name.as_deref(), Some("S"));
    }

    #[test]
    fn test_missing_file() {
        let err = catalog_from_file("/nonexistent/catalog.yml").unwrap_err();
        match err {
            DecodeError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io, got {:?}", other),
        }
    }
}
