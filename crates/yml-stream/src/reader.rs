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

//! Reader handle: lifecycle and producer/consumer surface.

use crate::cancel::CancellationToken;
use crate::error::{ReaderError, ReaderResult};
use crate::extractor::{ExtractorState, OfferExtractor};
use crate::queue::{RelayQueue, DEFAULT_QUEUE_CAPACITY};
use crate::signal::CompletionSignal;
use parking_lot::Mutex;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use yml_core::{Offer, ScanConfig};

/// Configuration for a [`ReaderHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Maximum number of decoded offers buffered between producer and
    /// consumers (default: 10). Must be at least 1.
    pub queue_capacity: usize,
    /// Token scanner settings.
    pub scan: ScanConfig,
    /// Wall-clock limit for one drive (default: none).
    pub timeout: Option<Duration>,
    /// How often a producer blocked on a full queue re-checks cancellation
    /// (default: 50ms).
    pub cancel_poll_interval: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            scan: ScanConfig::default(),
            timeout: None,
            cancel_poll_interval: Duration::from_millis(50),
        }
    }
}

impl ReaderConfig {
    /// Config with the given queue capacity.
    pub fn with_capacity(queue_capacity: usize) -> Self {
        Self {
            queue_capacity,
            ..Default::default()
        }
    }

    /// Set the drive time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A streaming catalog reader shared between one producer and any number of
/// consumers.
///
/// The handle is `Sync`: one thread calls [`drive_to_completion`], others
/// call [`next_offer`] (or iterate [`offers`]) on the same handle. Offers come
/// out in document order, each exactly once across all consumers.
///
/// Lifecycle:
///
/// - construction opens the input (`NotFound`, `PermissionDenied`,
///   `InvalidArgument` on failure)
/// - exactly one drive; a concurrent or repeated drive fails with `Busy`
/// - [`close`] releases the input; closing twice fails with `NotInitialized`
///
/// [`drive_to_completion`]: ReaderHandle::drive_to_completion
/// [`next_offer`]: ReaderHandle::next_offer
/// [`offers`]: ReaderHandle::offers
/// [`close`]: ReaderHandle::close
pub struct ReaderHandle {
    input: Mutex<Option<Box<dyn Read + Send>>>,
    queue: RelayQueue<Offer>,
    completion: CompletionSignal,
    consumed: AtomicUsize,
    state: Arc<Mutex<ExtractorState>>,
    cancel: CancellationToken,
    config: ReaderConfig,
    source: String,
    started: AtomicBool,
}

impl ReaderHandle {
    /// Open a catalog file with the default configuration.
    ///
    /// # Errors
    ///
    /// `NotFound` or `PermissionDenied` if the file cannot be opened.
    pub fn from_file(path: impl AsRef<Path>) -> ReaderResult<Self> {
        Self::from_file_with_config(path, ReaderConfig::default())
    }

    /// Open a catalog file.
    pub fn from_file_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> ReaderResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReaderError::open_failed(path, e))?;
        Self::build(Box::new(file), config, path.display().to_string())
    }

    /// Wrap an arbitrary byte stream with the default configuration.
    pub fn from_reader<R: Read + Send + 'static>(input: R) -> ReaderResult<Self> {
        Self::from_reader_with_config(input, ReaderConfig::default())
    }

    /// Wrap an arbitrary byte stream.
    pub fn from_reader_with_config<R: Read + Send + 'static>(
        input: R,
        config: ReaderConfig,
    ) -> ReaderResult<Self> {
        Self::build(Box::new(input), config, "<stream>".to_string())
    }

    /// Wrap an optional boxed stream, as handed over by callers that may not
    /// have one.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `input` is `None` or the queue capacity is zero.
    pub fn from_boxed(
        input: Option<Box<dyn Read + Send>>,
        config: ReaderConfig,
    ) -> ReaderResult<Self> {
        let input =
            input.ok_or_else(|| ReaderError::InvalidArgument("input stream is absent".to_string()))?;
        Self::build(input, config, "<stream>".to_string())
    }

    fn build(input: Box<dyn Read + Send>, config: ReaderConfig, source: String) -> ReaderResult<Self> {
        if config.queue_capacity == 0 {
            return Err(ReaderError::InvalidArgument(
                "queue capacity must be at least 1".to_string(),
            ));
        }

        debug!(source = %source, capacity = config.queue_capacity, "reader opened");

        Ok(ReaderHandle {
            input: Mutex::new(Some(input)),
            queue: RelayQueue::new(config.queue_capacity),
            completion: CompletionSignal::new(),
            consumed: AtomicUsize::new(0),
            state: Arc::new(Mutex::new(ExtractorState::Scanning)),
            cancel: CancellationToken::new(),
            config,
            source,
            started: AtomicBool::new(false),
        })
    }

    /// Run the extractor over the whole input on the calling thread.
    ///
    /// Every decoded offer bumps the consumed count and is pushed onto the
    /// relay queue, blocking while the queue is full. Returns the number of
    /// offers relayed. On a clean end of input the completion signal fires.
    /// The queue is sealed on every exit, so blocked consumers wake up.
    ///
    /// # Errors
    ///
    /// - `Busy` if a drive is in progress or already ran
    /// - `NotInitialized` if the handle was closed
    /// - `MalformedInput`, `DecodeFailure`, `Io` from the input
    /// - `Cancelled` or `Timeout` if interrupted
    pub fn drive_to_completion(&self) -> ReaderResult<usize> {
        let mut guard = self
            .input
            .try_lock()
            .ok_or(ReaderError::Busy("a drive is already in progress"))?;
        let stream = guard.as_mut().ok_or(ReaderError::NotInitialized)?;
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(ReaderError::Busy("the reader has already been driven"));
        }

        debug!(source = %self.source, "drive started");
        let start = Instant::now();

        let mut extractor = OfferExtractor::new(stream, &self.config.scan)
            .with_cancellation(self.cancel.clone())
            .with_timeout(self.config.timeout)
            .with_state_mirror(Arc::clone(&self.state));

        let result = self.relay(&mut extractor, start);

        let final_state = match &result {
            Ok(_) => ExtractorState::Done,
            Err(e) if e.is_interrupted() => ExtractorState::Cancelled,
            Err(_) => ExtractorState::Failed,
        };
        *self.state.lock() = final_state;

        match &result {
            Ok(relayed) => {
                self.completion.fire();
                info!(
                    source = %self.source,
                    offers = relayed,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "drive complete"
                );
            }
            Err(e) => {
                warn!(
                    source = %self.source,
                    offers = self.consumed_count(),
                    error = %e,
                    "drive stopped"
                );
            }
        }

        self.queue.seal();
        result
    }

    fn relay<R: Read>(&self, extractor: &mut OfferExtractor<R>, start: Instant) -> ReaderResult<usize> {
        let mut relayed = 0;
        while let Some(offer) = extractor.next_offer()? {
            self.consumed.fetch_add(1, Ordering::SeqCst);
            self.publish(offer, start)?;
            relayed += 1;
        }
        Ok(relayed)
    }

    /// Push onto the queue, waking periodically to honour cancellation and
    /// the time limit while the queue is full.
    fn publish(&self, offer: Offer, start: Instant) -> ReaderResult<()> {
        let mut offer = offer;
        loop {
            match self.queue.push_timeout(offer, self.config.cancel_poll_interval) {
                Ok(()) => return Ok(()),
                Err(back) => {
                    if self.cancel.is_cancelled() {
                        return Err(ReaderError::Cancelled);
                    }
                    if let Some(limit) = self.config.timeout {
                        let elapsed = start.elapsed();
                        if elapsed > limit {
                            return Err(ReaderError::Timeout { elapsed, limit });
                        }
                    }
                    offer = back;
                }
            }
        }
    }

    /// Release the input stream.
    ///
    /// Offers already queued stay available to consumers.
    ///
    /// # Errors
    ///
    /// - `Busy` while a drive is running
    /// - `NotInitialized` if already closed
    pub fn close(&self) -> ReaderResult<()> {
        let mut guard = self
            .input
            .try_lock()
            .ok_or(ReaderError::Busy("cannot close while a drive is in progress"))?;
        match guard.take() {
            Some(stream) => {
                drop(stream);
                self.queue.seal();
                debug!(source = %self.source, "reader closed");
                Ok(())
            }
            None => Err(ReaderError::NotInitialized),
        }
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        match self.input.try_lock() {
            Some(guard) => guard.is_none(),
            None => false,
        }
    }

    /// Take the next offer, blocking while the queue is empty.
    ///
    /// Returns `None` once the producer has stopped (or the handle was
    /// closed) and every queued offer has been taken.
    pub fn next_offer(&self) -> Option<Offer> {
        self.queue.recv()
    }

    /// Take the next offer if one is queued right now.
    pub fn try_next_offer(&self) -> Option<Offer> {
        self.queue.try_pop()
    }

    /// Take the next offer, waiting at most `timeout`.
    pub fn next_offer_timeout(&self, timeout: Duration) -> Option<Offer> {
        self.queue.pop_timeout(timeout)
    }

    /// Blocking iterator over [`next_offer`](ReaderHandle::next_offer).
    pub fn offers(&self) -> impl Iterator<Item = Offer> + '_ {
        std::iter::from_fn(move || self.next_offer())
    }

    /// Number of offers currently waiting in the queue.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Total number of offers decoded from the input so far.
    ///
    /// Never decreases. An offer is counted before it is queued.
    #[inline]
    pub fn consumed_count(&self) -> usize {
        self.consumed.load(Ordering::SeqCst)
    }

    /// Queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// The completion signal; fires once, on a clean end of input.
    pub fn completion(&self) -> &CompletionSignal {
        &self.completion
    }

    /// Whether the drive reached a clean end of input.
    pub fn is_complete(&self) -> bool {
        self.completion.is_fired()
    }

    /// Block until the drive completes, or `timeout` passes.
    pub fn wait_for_completion(&self, timeout: Duration) -> bool {
        self.completion.wait_timeout(timeout)
    }

    /// A clone of the token that cancels this handle's drive.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel the drive. A blocked producer notices within one poll interval.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Live extractor state: `DecodingOffer` while an offer subtree is being
    /// read during a drive, `Scanning` between offers, then the terminal state.
    pub fn state(&self) -> ExtractorState {
        *self.state.lock()
    }

    /// The configuration this handle was built with.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

impl fmt::Debug for ReaderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderHandle")
            .field("source", &self.source)
            .field("capacity", &self.capacity())
            .field("pending", &self.pending_count())
            .field("consumed", &self.consumed_count())
            .field("state", &self.state())
            .field("complete", &self.is_complete())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::thread;

    const TWO_OFFERS: &str = r#"<yml_catalog><shop><offers>
        <offer id="1"><name>One</name></offer>
        <offer id="2"><name>Two</name></offer>
    </offers></shop></yml_catalog>"#;

    fn handle(xml: &'static str) -> ReaderHandle {
        ReaderHandle::from_reader(Cursor::new(xml)).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.queue_capacity, 10);
        assert_eq!(config.timeout, None);
        assert_eq!(config.cancel_poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_fresh_handle() {
        let h = handle(TWO_OFFERS);
        assert_eq!(h.pending_count(), 0);
        assert_eq!(h.consumed_count(), 0);
        assert_eq!(h.capacity(), 10);
        assert_eq!(h.state(), ExtractorState::Scanning);
        assert!(!h.is_complete());
        assert!(!h.is_closed());
    }

    #[test]
    fn test_drive_fills_queue() {
        let h = handle(TWO_OFFERS);
        assert_eq!(h.drive_to_completion().unwrap(), 2);
        assert_eq!(h.pending_count(), 2);
        assert_eq!(h.consumed_count(), 2);
        assert_eq!(h.state(), ExtractorState::Done);
        assert!(h.is_complete());

        assert_eq!(h.next_offer().unwrap().attr_id.as_deref(), Some("1"));
        assert_eq!(h.next_offer().unwrap().attr_id.as_deref(), Some("2"));
        assert!(h.next_offer().is_none());
    }

    #[test]
    fn test_absent_stream() {
        let err = ReaderHandle::from_boxed(None, ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, ReaderError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ReaderHandle::from_reader_with_config(Cursor::new(""), ReaderConfig::with_capacity(0))
            .unwrap_err();
        assert!(matches!(err, ReaderError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_boxed_stream() {
        let input: Box<dyn Read + Send> = Box::new(Cursor::new(TWO_OFFERS));
        let h = ReaderHandle::from_boxed(Some(input), ReaderConfig::default()).unwrap();
        assert_eq!(h.drive_to_completion().unwrap(), 2);
    }

    #[test]
    fn test_close_twice() {
        let h = handle(TWO_OFFERS);
        h.close().unwrap();
        assert!(h.is_closed());
        assert!(matches!(h.close(), Err(ReaderError::NotInitialized)));
    }

    #[test]
    fn test_drive_after_close() {
        let h = handle(TWO_OFFERS);
        h.close().unwrap();
        assert!(matches!(h.drive_to_completion(), Err(ReaderError::NotInitialized)));
        assert!(h.next_offer().is_none());
    }

    #[test]
    fn test_second_drive_is_busy() {
        let h = handle(TWO_OFFERS);
        h.drive_to_completion().unwrap();
        assert!(matches!(h.drive_to_completion(), Err(ReaderError::Busy(_))));
        assert_eq!(h.consumed_count(), 2);
    }

    #[test]
    fn test_close_after_drive_keeps_queue() {
        let h = handle(TWO_OFFERS);
        h.drive_to_completion().unwrap();
        h.close().unwrap();
        assert_eq!(h.offers().count(), 2);
    }

    #[test]
    fn test_malformed_input_fails_drive() {
        let h = handle(r#"<c><offer id="1"/><offer id="2"><name>x</name></c>"#);
        let err = h.drive_to_completion().unwrap_err();
        assert!(matches!(err, ReaderError::MalformedInput { .. }));
        assert_eq!(h.state(), ExtractorState::Failed);
        assert!(!h.is_complete());
        assert_eq!(h.consumed_count(), 1);
        assert_eq!(h.next_offer().unwrap().attr_id.as_deref(), Some("1"));
        assert!(h.next_offer().is_none());
    }

    #[test]
    fn test_cancel_before_drive() {
        let h = handle(TWO_OFFERS);
        h.cancel();
        assert!(matches!(h.drive_to_completion(), Err(ReaderError::Cancelled)));
        assert_eq!(h.state(), ExtractorState::Cancelled);
        assert_eq!(h.consumed_count(), 0);
        assert!(h.next_offer().is_none());
    }

    #[test]
    fn test_cancel_blocked_producer() {
        let xml = yml_test::catalog_with_offers(5);
        let config = ReaderConfig {
            queue_capacity: 1,
            cancel_poll_interval: Duration::from_millis(5),
            ..Default::default()
        };
        let h = Arc::new(ReaderHandle::from_reader_with_config(Cursor::new(xml), config).unwrap());

        let producer = {
            let h = Arc::clone(&h);
            thread::spawn(move || h.drive_to_completion())
        };

        // Second offer decoded and waiting for room in the queue.
        while h.consumed_count() < 2 {
            thread::sleep(Duration::from_millis(1));
        }
        h.cancel_token().cancel();

        let result = producer.join().unwrap();
        assert!(matches!(result, Err(ReaderError::Cancelled)));
        assert_eq!(h.pending_count(), 1);
        assert_eq!(h.consumed_count(), 2);
    }

    #[test]
    fn test_wait_for_completion() {
        let h = Arc::new(handle(TWO_OFFERS));
        assert!(!h.wait_for_completion(Duration::from_millis(5)));

        let producer = {
            let h = Arc::clone(&h);
            thread::spawn(move || h.drive_to_completion())
        };
        assert!(h.wait_for_completion(Duration::from_secs(5)));
        producer.join().unwrap().unwrap();
    }

    #[test]
    fn test_debug_output() {
        let h = handle(TWO_OFFERS);
        let debug = format!("{:?}", h);
        assert!(debug.contains("ReaderHandle"));
        assert!(debug.contains("<stream>"));
    }
}
