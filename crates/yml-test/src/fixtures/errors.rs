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

//! Documents that must fail to decode.

/// A catalog whose second offer is opened but never closed before end-of-input.
///
/// The first offer (`id="ok-1"`) is complete and decodes before the error.
pub fn truncated_offer_catalog() -> &'static str {
    r#"<yml_catalog date="2019-11-05 17:45">
  <shop>
    <offers>
      <offer id="ok-1"><name>Complete</name></offer>
      <offer id="broken-2">
        <name>Never closed</name>
"#
}

/// Non-well-formed documents as `(name, document)` pairs.
pub fn malformed_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("truncated_offer", truncated_offer_catalog()),
        (
            "mismatched_close",
            r#"<yml_catalog><shop><offers><offer id="1"><name>x</price></offer></offers></shop></yml_catalog>"#,
        ),
        (
            "stray_close",
            r#"<yml_catalog><shop></shop></offers></yml_catalog>"#,
        ),
        (
            "unclosed_root",
            r#"<yml_catalog><shop><offers></offers></shop>"#,
        ),
        (
            "bad_attribute",
            r#"<yml_catalog><shop><offers><offer id=1></offer></offers></shop></yml_catalog>"#,
        ),
        (
            "bad_entity",
            r#"<yml_catalog><shop><offers><offer id="1"><name>&nope;</name></offer></offers></shop></yml_catalog>"#,
        ),
    ]
}

/// Well-formed documents whose content cannot be mapped onto the schema.
pub fn undecodable_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "non_numeric_rate",
            r#"<yml_catalog><shop><currencies><currency id="USD" rate="CBRF"/></currencies></shop></yml_catalog>"#,
        ),
        (
            "non_numeric_category_id",
            r#"<yml_catalog><shop><categories><category id="first">Books</category></categories></shop></yml_catalog>"#,
        ),
    ]
}
