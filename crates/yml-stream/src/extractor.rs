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

//! Offer extraction state machine.
//!
//! Walks the token stream looking for `<offer>` opens. Each one is read as a
//! whole subtree and decoded through the offer mapping table; everything else
//! (shop name, currencies, categories, ...) is stepped over token by token.
//!
//! ```text
//! Scanning ──<offer>──▶ DecodingOffer ──</offer>──▶ Scanning
//!    │                        │
//!    ├── end of input ──▶ Done
//!    ├── cancel token ──▶ Cancelled
//!    └── scan/decode error ──────────────────────▶ Failed
//! ```
//!
//! Offers are recognized at any depth, not only under `shop>offers`.

use crate::cancel::CancellationToken;
use crate::error::{ReaderError, ReaderResult};
use parking_lot::Mutex;
use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use yml_core::{decode_record, Element, Offer, Record, ScanConfig, Token, TokenScanner};

/// Timeout is checked once per this many token pulls.
const TIMEOUT_CHECK_INTERVAL: usize = 100;

/// Where the extractor is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorState {
    /// Looking for the next `<offer>` open.
    Scanning,
    /// Inside an offer element, reading its subtree.
    DecodingOffer,
    /// End of input reached cleanly.
    Done,
    /// The scanner or an offer decode failed.
    Failed,
    /// Stopped through the cancellation token or the time limit.
    Cancelled,
}

impl ExtractorState {
    /// Whether no more offers can come out of this state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }
}

/// Pulls decoded offers out of a byte stream, one at a time.
///
/// Also an `Iterator<Item = ReaderResult<Offer>>` that ends after the first
/// error.
pub struct OfferExtractor<R: Read> {
    scanner: TokenScanner<R>,
    state: ExtractorState,
    mirror: Option<Arc<Mutex<ExtractorState>>>,
    max_depth: usize,
    cancel: Option<CancellationToken>,
    timeout: Option<Duration>,
    start_time: Instant,
    pulls: usize,
    offers: usize,
}

impl<R: Read> OfferExtractor<R> {
    /// Create an extractor over `input`.
    pub fn new(input: R, config: &ScanConfig) -> Self {
        OfferExtractor {
            scanner: TokenScanner::new(input, config),
            state: ExtractorState::Scanning,
            mirror: None,
            max_depth: config.max_depth,
            cancel: None,
            timeout: None,
            start_time: Instant::now(),
            pulls: 0,
            offers: 0,
        }
    }

    /// Stop with `Cancelled` once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Stop with `Timeout` once `limit` has passed since construction.
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Publish every state change to `shared` as well, so other threads can
    /// watch the extractor while it runs.
    pub fn with_state_mirror(mut self, shared: Arc<Mutex<ExtractorState>>) -> Self {
        *shared.lock() = self.state;
        self.mirror = Some(shared);
        self
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> ExtractorState {
        self.state
    }

    /// Number of offers decoded so far.
    #[inline]
    pub fn offers_decoded(&self) -> usize {
        self.offers
    }

    /// Advance to the next complete offer.
    ///
    /// Returns `Ok(None)` at end of input, and after any terminal state.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` / `DecodeFailure` / `Io` from the input (state `Failed`)
    /// - `Cancelled` / `Timeout` (state `Cancelled`)
    pub fn next_offer(&mut self) -> ReaderResult<Option<Offer>> {
        if self.state.is_terminal() {
            return Ok(None);
        }

        match self.advance() {
            Ok(Some(offer)) => {
                self.set_state(ExtractorState::Scanning);
                self.offers += 1;
                Ok(Some(offer))
            }
            Ok(None) => {
                self.set_state(ExtractorState::Done);
                debug!(offers = self.offers, "end of input");
                Ok(None)
            }
            Err(e) => {
                self.set_state(if e.is_interrupted() {
                    ExtractorState::Cancelled
                } else {
                    ExtractorState::Failed
                });
                debug!(offers = self.offers, error = %e, "extraction stopped");
                Err(e)
            }
        }
    }

    fn advance(&mut self) -> ReaderResult<Option<Offer>> {
        loop {
            self.check_interrupt()?;

            match self.scanner.next_token()? {
                Some(Token::Open { name, attributes }) if name == Offer::ELEMENT => {
                    self.set_state(ExtractorState::DecodingOffer);
                    let element = Element::read(&mut self.scanner, name, attributes, self.max_depth)?;
                    let offer: Offer = decode_record(&element)?;
                    trace!(
                        id = offer.attr_id.as_deref().unwrap_or_default(),
                        position = self.scanner.byte_position(),
                        "offer decoded"
                    );
                    return Ok(Some(offer));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }
    }

    fn set_state(&mut self, state: ExtractorState) {
        self.state = state;
        if let Some(mirror) = &self.mirror {
            *mirror.lock() = state;
        }
    }

    fn check_interrupt(&mut self) -> ReaderResult<()> {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(ReaderError::Cancelled);
            }
        }

        self.pulls += 1;
        if let Some(limit) = self.timeout {
            if self.pulls % TIMEOUT_CHECK_INTERVAL == 0 {
                let elapsed = self.start_time.elapsed();
                if elapsed > limit {
                    return Err(ReaderError::Timeout { elapsed, limit });
                }
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for OfferExtractor<R> {
    type Item = ReaderResult<Offer>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_offer().transpose()
    }
}
