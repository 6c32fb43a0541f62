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

//! Catalog fixtures.
//!
//! - [`simple_catalog`]: one `vitrine` offer (`id="12345"`, "Test Book") with a
//!   single delivery option
//! - [`full_catalog`]: every shop collection populated, three offers
//! - [`catalog_with_offers`]: generated catalog of any size
//! - [`malformed_samples`] / [`undecodable_samples`]: documents that must fail

mod documents;
mod errors;

pub use documents::{catalog_with_offers, full_catalog, offer_xml, simple_catalog};
pub use errors::{malformed_samples, truncated_offer_catalog, undecodable_samples};
