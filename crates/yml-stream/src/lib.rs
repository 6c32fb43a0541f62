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

//! Streaming YML catalog reader
//!
//! Reads offers out of arbitrarily large catalog feeds without loading the
//! document. A producer thread drives the token scanner; every completed offer
//! goes through a bounded relay queue to one or more consumer threads.
//!
//! # Features
//!
//! - **Bounded memory**: at most `queue_capacity` decoded offers are buffered;
//!   a full queue blocks the producer (backpressure)
//! - **Document order**: offers arrive in the order they appear, exactly once
//! - **Liveness**: a one-shot completion signal, and a sealed queue once the
//!   producer stops, so consumers never wait forever
//! - **Cancellation and timeout**: abort a drive from any thread, or bound it
//!   in wall-clock time
//!
//! # Producer / consumer
//!
//! ```rust
//! use std::io::Cursor;
//! use yml_stream::ReaderHandle;
//!
//! let xml = r#"<yml_catalog><shop><offers>
//!   <offer id="1"><name>One</name></offer>
//!   <offer id="2"><name>Two</name></offer>
//! </offers></shop></yml_catalog>"#;
//!
//! let handle = ReaderHandle::from_reader(Cursor::new(xml)).unwrap();
//!
//! std::thread::scope(|s| {
//!     let producer = s.spawn(|| handle.drive_to_completion());
//!
//!     let ids: Vec<_> = handle.offers().filter_map(|o| o.attr_id).collect();
//!     assert_eq!(ids, vec!["1", "2"]);
//!
//!     producer.join().unwrap().unwrap();
//! });
//!
//! assert_eq!(handle.consumed_count(), 2);
//! assert!(handle.is_complete());
//! handle.close().unwrap();
//! ```
//!
//! # Synchronous extraction
//!
//! Without threads, [`OfferExtractor`] is a plain iterator over offers:
//!
//! ```rust
//! use yml_core::ScanConfig;
//! use yml_stream::OfferExtractor;
//!
//! let xml = r#"<yml_catalog><shop><offers><offer id="7"/></offers></shop></yml_catalog>"#;
//! let offers: Vec<_> = OfferExtractor::new(xml.as_bytes(), &ScanConfig::default())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(offers[0].attr_id.as_deref(), Some("7"));
//! ```

mod cancel;
mod error;
mod extractor;
mod queue;
mod reader;
mod signal;

pub use cancel::CancellationToken;
pub use error::{ReaderError, ReaderResult};
pub use extractor::{ExtractorState, OfferExtractor};
pub use queue::{RelayQueue, DEFAULT_QUEUE_CAPACITY};
pub use reader::{ReaderConfig, ReaderHandle};
pub use signal::CompletionSignal;

/// Re-export core types for convenience.
pub use yml_core::{DeliveryOption, Offer, Param, ScanConfig};
