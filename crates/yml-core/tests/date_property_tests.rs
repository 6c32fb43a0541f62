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

//! Property tests for catalog date parsing.

use chrono::NaiveDate;
use proptest::prelude::*;
use yml_core::{CatalogDate, CATALOG_DATE_FORMAT};

proptest! {
    #[test]
    fn prop_formatted_dates_parse(
        year in 1000i32..9999,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let ts = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        let raw = ts.format(CATALOG_DATE_FORMAT).to_string();

        prop_assert_eq!(CatalogDate::parse(&raw), CatalogDate::Parsed(ts));
    }

    #[test]
    fn prop_parse_never_panics(raw in ".*") {
        match CatalogDate::parse(&raw) {
            CatalogDate::Parsed(_) => {}
            CatalogDate::Unparsed(kept) => {
                prop_assert_eq!(kept, raw);
            }
            CatalogDate::Missing => prop_assert!(false, "parse never yields Missing"),
        }
    }

    #[test]
    fn prop_unpadded_fields_stay_unparsed(
        year in 1000i32..9999,
        month in 1u32..=9,
        day in 1u32..=9,
        hour in 0u32..=9,
        minute in 0u32..=9,
    ) {
        let raw = format!("{}-{}-{} {}:{}", year, month, day, hour, minute);
        prop_assert_eq!(CatalogDate::parse(&raw), CatalogDate::Unparsed(raw.clone()));
    }

    #[test]
    fn prop_surrounding_whitespace_stays_unparsed(
        day in 10u32..=28,
        pad in prop_oneof![Just(" "), Just("\t"), Just("\n")],
        leading in any::<bool>(),
    ) {
        let formatted = format!("2024-03-{} 12:30", day);
        let raw = if leading {
            format!("{}{}", pad, formatted)
        } else {
            format!("{}{}", formatted, pad)
        };
        prop_assert!(!CatalogDate::parse(&raw).is_parsed());
        prop_assert!(CatalogDate::parse(&formatted).is_parsed());
    }

    #[test]
    fn prop_unparsed_reads_as_zero(raw in "[a-z ]{1,20}") {
        let date = CatalogDate::parse(&raw);
        prop_assert!(!date.is_parsed());
        prop_assert_eq!(date.timestamp(), CatalogDate::zero());
    }
}
