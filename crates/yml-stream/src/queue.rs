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

//! Bounded relay queue.
//!
//! The hand-off buffer between the drive loop and record consumers: fixed
//! capacity, first-in first-out, blocking on both ends. A full queue blocks the
//! producer, which is what keeps memory bounded while a huge feed is decoded.
//!
//! The queue never fails. It also does not close: [`RelayQueue::pop`] waits for
//! the next record no matter what. A producer that stops [`seal`](RelayQueue::seal)s
//! the queue instead, which only changes what [`RelayQueue::recv`] does once the
//! buffer is drained.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default number of buffered records.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

#[derive(Debug)]
struct QueueState<T> {
    items: VecDeque<T>,
    sealed: bool,
}

/// A fixed-capacity, order-preserving, blocking queue.
///
/// Safe to share between one producer and any number of consumers.
///
/// # Examples
///
/// ```rust
/// use yml_stream::RelayQueue;
///
/// let queue = RelayQueue::new(2);
/// queue.push("a");
/// queue.push("b");
/// assert_eq!(queue.pending_count(), 2);
/// assert_eq!(queue.pop(), "a");
///
/// queue.seal();
/// assert_eq!(queue.recv(), Some("b"));
/// assert_eq!(queue.recv(), None);
/// ```
#[derive(Debug)]
pub struct RelayQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> RelayQueue<T> {
    /// Create a queue holding at most `capacity` records (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        RelayQueue {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                sealed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Maximum number of buffered records.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append `item`, blocking while the queue is full.
    pub fn push(&self, item: T) {
        let mut state = self.state.lock();
        while state.items.len() >= self.capacity {
            self.not_full.wait(&mut state);
        }
        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
    }

    /// Append `item`, waiting at most `timeout` for a free slot.
    ///
    /// Gives the item back if the queue stayed full.
    pub fn push_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.items.len() >= self.capacity {
            if self.not_full.wait_until(&mut state, deadline).timed_out()
                && state.items.len() >= self.capacity
            {
                return Err(item);
            }
        }
        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest record, blocking while the queue is empty.
    ///
    /// Blocks forever on an empty queue whose producer is gone; use
    /// [`recv`](Self::recv) when the producer may stop.
    pub fn pop(&self) -> T {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return item;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Remove the oldest record, or `None` once the queue is sealed and drained.
    pub fn recv(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(item);
            }
            if state.sealed {
                return None;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Remove the oldest record, waiting at most `timeout` for one.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(item);
            }
            if state.sealed || self.not_empty.wait_until(&mut state, deadline).timed_out() {
                let item = state.items.pop_front();
                drop(state);
                if item.is_some() {
                    self.not_full.notify_one();
                }
                return item;
            }
        }
    }

    /// Remove the oldest record if one is buffered.
    pub fn try_pop(&self) -> Option<T> {
        let item = self.state.lock().items.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Number of buffered records at this instant.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Mark that no more records will be pushed and wake every waiting consumer.
    pub fn seal(&self) {
        self.state.lock().sealed = true;
        self.not_empty.notify_all();
    }

    /// Whether the producer has sealed the queue.
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.state.lock().sealed
    }
}

impl<T> Default for RelayQueue<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}
