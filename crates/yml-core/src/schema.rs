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

//! Catalog record schema.
//!
//! Plain data types for a YML catalog and their mapping tables. String fields
//! are optional: an absent element or attribute decodes to `None`, an empty one
//! to `Some("")`.

use crate::mapping::{decode_record, DecodeRule, FieldMapping, FieldPath, Record};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Textual pattern of catalog timestamps (`YYYY-MM-DD HH:MM`).
pub const CATALOG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The catalog's `date` attribute.
///
/// Parsing never fails the surrounding decode. A value that does not match
/// [`CATALOG_DATE_FORMAT`] is kept as [`CatalogDate::Unparsed`] and reads as the
/// zero timestamp (`0001-01-01 00:00`) through [`CatalogDate::timestamp`].
///
/// # Examples
///
/// ```rust
/// use yml_core::CatalogDate;
///
/// let date = CatalogDate::parse("2024-03-01 12:30");
/// assert!(date.is_parsed());
///
/// let broken = CatalogDate::parse("yesterday");
/// assert_eq!(broken, CatalogDate::Unparsed("yesterday".to_string()));
/// assert_eq!(broken.timestamp(), CatalogDate::zero());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogDate {
    /// The attribute was absent.
    #[default]
    Missing,
    /// The attribute matched the catalog pattern.
    Parsed(NaiveDateTime),
    /// The attribute was present but did not match; holds the raw value.
    Unparsed(String),
}

impl CatalogDate {
    /// Parse a raw attribute value.
    ///
    /// Every field must be zero-padded and the separators exact: `2024-3-1 1:05`
    /// and `2024-03-0112:30` stay unparsed.
    pub fn parse(raw: &str) -> Self {
        if !has_catalog_shape(raw) {
            return CatalogDate::Unparsed(raw.to_string());
        }
        match NaiveDateTime::parse_from_str(raw, CATALOG_DATE_FORMAT) {
            Ok(ts) => CatalogDate::Parsed(ts),
            Err(_) => CatalogDate::Unparsed(raw.to_string()),
        }
    }

    /// The zero timestamp, `0001-01-01 00:00`.
    pub fn zero() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    /// The parsed timestamp, or [`CatalogDate::zero`] when missing or unparsed.
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            CatalogDate::Parsed(ts) => *ts,
            _ => Self::zero(),
        }
    }

    /// Whether the value matched the catalog pattern.
    #[inline]
    pub fn is_parsed(&self) -> bool {
        matches!(self, CatalogDate::Parsed(_))
    }
}

/// Exact `DDDD-DD-DD DD:DD` shape: zero-padded fields, one space.
fn has_catalog_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b' ',
            13 => b == b':',
            _ => b.is_ascii_digit(),
        })
}

impl Serialize for CatalogDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CatalogDate::Parsed(ts) => {
                serializer.collect_str(&ts.format(CATALOG_DATE_FORMAT))
            }
            _ => serializer.serialize_none(),
        }
    }
}

/// The whole catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub date: CatalogDate,
    pub shop: Shop,
}

/// Shop metadata and its collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Shop {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub currencies: Vec<Currency>,
    pub categories: Vec<Category>,
    pub delivery_options: Vec<DeliveryOption>,
    pub offers: Vec<Offer>,
}

/// A currency and its rate against the shop's base currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Currency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rate: i64,
}

/// A catalog category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub id: i64,
    pub parent_id: i64,
}

/// A delivery option, either shop-wide or per offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_before: Option<String>,
}

/// A named offer parameter (`<param name="...">value</param>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Param {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One product listing.
///
/// `attr_id` is the `id` attribute of the `<offer>` element; `id` is the
/// separate `<ID>` child some feeds carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Offer {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub offer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_extent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_warranty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    pub delivery_options: Vec<DeliveryOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<Param>,
}

// ============================================================================
// Mapping tables
// ============================================================================

macro_rules! text {
    ($field:ident, $path:expr) => {
        FieldMapping {
            field: stringify!($field),
            path: $path,
            rule: DecodeRule::Text(|r, v| r.$field = Some(v)),
        }
    };
}

impl Record for Catalog {
    const ELEMENT: &'static str = "yml_catalog";

    fn mappings() -> &'static [FieldMapping<Self>] {
        static FIELDS: &[FieldMapping<Catalog>] = &[
            FieldMapping {
                field: "date",
                path: FieldPath::Attr("date"),
                rule: DecodeRule::Date(|c, d| c.date = d),
            },
            FieldMapping {
                field: "shop",
                path: FieldPath::Child("shop"),
                rule: DecodeRule::Nested(|c, el| {
                    c.shop = decode_record(el)?;
                    Ok(())
                }),
            },
        ];
        FIELDS
    }
}

impl Record for Shop {
    const ELEMENT: &'static str = "shop";

    fn mappings() -> &'static [FieldMapping<Self>] {
        static FIELDS: &[FieldMapping<Shop>] = &[
            text!(name, FieldPath::Child("name")),
            text!(company, FieldPath::Child("company")),
            text!(url, FieldPath::Child("url")),
            FieldMapping {
                field: "currencies",
                path: FieldPath::Wrapped("currencies", "currency"),
                rule: DecodeRule::Nested(|s, el| {
                    s.currencies.push(decode_record(el)?);
                    Ok(())
                }),
            },
            FieldMapping {
                field: "categories",
                path: FieldPath::Wrapped("categories", "category"),
                rule: DecodeRule::Nested(|s, el| {
                    s.categories.push(decode_record(el)?);
                    Ok(())
                }),
            },
            FieldMapping {
                field: "delivery_options",
                path: FieldPath::Wrapped("delivery-options", "option"),
                rule: DecodeRule::Nested(|s, el| {
                    s.delivery_options.push(decode_record(el)?);
                    Ok(())
                }),
            },
            FieldMapping {
                field: "offers",
                path: FieldPath::Wrapped("offers", "offer"),
                rule: DecodeRule::Nested(|s, el| {
                    s.offers.push(decode_record(el)?);
                    Ok(())
                }),
            },
        ];
        FIELDS
    }
}

impl Record for Currency {
    const ELEMENT: &'static str = "currency";

    fn mappings() -> &'static [FieldMapping<Self>] {
        static FIELDS: &[FieldMapping<Currency>] = &[
            text!(id, FieldPath::Attr("id")),
            FieldMapping {
                field: "rate",
                path: FieldPath::Attr("rate"),
                rule: DecodeRule::Int(|c, v| c.rate = v),
            },
        ];
        FIELDS
    }
}

impl Record for Category {
    const ELEMENT: &'static str = "category";

    fn mappings() -> &'static [FieldMapping<Self>] {
        static FIELDS: &[FieldMapping<Category>] = &[
            text!(name, FieldPath::CharData),
            FieldMapping {
                field: "id",
                path: FieldPath::Attr("id"),
                rule: DecodeRule::Int(|c, v| c.id = v),
            },
            FieldMapping {
                field: "parent_id",
                path: FieldPath::Attr("parentId"),
                rule: DecodeRule::Int(|c, v| c.parent_id = v),
            },
        ];
        FIELDS
    }
}

impl Record for DeliveryOption {
    const ELEMENT: &'static str = "option";

    fn mappings() -> &'static [FieldMapping<Self>] {
        static FIELDS: &[FieldMapping<DeliveryOption>] = &[
            text!(cost, FieldPath::Attr("cost")),
            text!(days, FieldPath::Attr("days")),
            text!(order_before, FieldPath::Attr("order-before")),
        ];
        FIELDS
    }
}

impl Record for Param {
    const ELEMENT: &'static str = "param";

    fn mappings() -> &'static [FieldMapping<Self>] {
        static FIELDS: &[FieldMapping<Param>] = &[
            text!(name, FieldPath::Attr("name")),
            text!(text, FieldPath::CharData),
        ];
        FIELDS
    }
}

impl Record for Offer {
    const ELEMENT: &'static str = "offer";

    fn mappings() -> &'static [FieldMapping<Self>] {
        static FIELDS: &[FieldMapping<Offer>] = &[
            text!(offer_type, FieldPath::Attr("type")),
            text!(available, FieldPath::Attr("available")),
            text!(attr_id, FieldPath::Attr("id")),
            text!(group_id, FieldPath::Attr("group_id")),
            text!(url, FieldPath::Child("url")),
            text!(price, FieldPath::Child("price")),
            text!(currency_id, FieldPath::Child("currencyId")),
            text!(category_id, FieldPath::Child("categoryId")),
            text!(picture, FieldPath::Child("picture")),
            text!(store, FieldPath::Child("store")),
            text!(pickup, FieldPath::Child("pickup")),
            text!(delivery, FieldPath::Child("delivery")),
            text!(author, FieldPath::Child("author")),
            text!(name, FieldPath::Child("name")),
            text!(id, FieldPath::Child("ID")),
            text!(publisher, FieldPath::Child("publisher")),
            text!(series, FieldPath::Child("series")),
            text!(year, FieldPath::Child("year")),
            text!(description, FieldPath::Child("description")),
            text!(isbn, FieldPath::Child("ISBN")),
            text!(language, FieldPath::Child("language")),
            text!(binding, FieldPath::Child("binding")),
            text!(page_extent, FieldPath::Child("page_extent")),
            text!(manufacturer_warranty, FieldPath::Child("manufacturer_warranty")),
            text!(barcode, FieldPath::Child("barcode")),
            text!(weight, FieldPath::Child("weight")),
            text!(dimensions, FieldPath::Child("dimensions")),
            FieldMapping {
                field: "delivery_options",
                path: FieldPath::Wrapped("delivery-options", "option"),
                rule: DecodeRule::Nested(|o, el| {
                    o.delivery_options.push(decode_record(el)?);
                    Ok(())
                }),
            },
            FieldMapping {
                field: "param",
                path: FieldPath::Child("param"),
                rule: DecodeRule::Nested(|o, el| {
                    o.param = Some(decode_record(el)?);
                    Ok(())
                }),
            },
        ];
        FIELDS
    }
}
