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

//! YML catalog core
//!
//! Building blocks for reading Yandex Market Language (YML) catalog feeds: the
//! record schema, the declarative field mapping that decodes XML elements into
//! records, and a forward-only token scanner over any byte stream.
//!
//! # Features
//!
//! - **Typed records**: [`Offer`], [`Shop`], [`Catalog`] and their nested parts
//! - **Declarative mapping**: each record lists `field -> path -> rule` in a
//!   [`FieldMapping`] table evaluated by one generic decoder
//! - **Token scanning**: [`TokenScanner`] pulls open/close/text tokens and reports
//!   malformed markup with a byte position
//! - **Whole-document decode**: [`catalog_from_file`] loads a complete catalog
//!
//! The streaming, bounded-memory path lives in the `yml-stream` crate; this crate
//! holds everything both paths share.
//!
//! # Examples
//!
//! ```rust
//! use yml_core::{catalog_from_str, CatalogDate};
//!
//! let xml = r#"<yml_catalog date="2024-03-01 12:30">
//!   <shop>
//!     <name>Books</name>
//!     <offers>
//!       <offer id="1"><name>Test Book</name></offer>
//!     </offers>
//!   </shop>
//! </yml_catalog>"#;
//!
//! let catalog = catalog_from_str(xml).unwrap();
//! assert!(matches!(catalog.date, CatalogDate::Parsed(_)));
//! assert_eq!(catalog.shop.offers.len(), 1);
//! ```

mod document;
mod element;
mod error;
mod mapping;
mod scanner;
mod schema;

pub use document::{catalog_from_file, catalog_from_reader, catalog_from_str};
pub use element::Element;
pub use error::{DecodeError, DecodeResult};
pub use mapping::{decode_record, DecodeRule, FieldMapping, FieldPath, Record};
pub use scanner::{Attribute, ScanConfig, Token, TokenScanner};
pub use schema::{
    Catalog, CatalogDate, Category, Currency, DeliveryOption, Offer, Param, Shop,
    CATALOG_DATE_FORMAT,
};
