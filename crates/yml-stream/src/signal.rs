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

//! One-shot completion signal.

use parking_lot::{Condvar, Mutex};
use std::time::Duration;

/// Fires once when the producer reaches a clean end-of-input.
///
/// Consumers can poll it, or block on it. It never fires for a drive that
/// failed or was cancelled.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    fired: Mutex<bool>,
    cond: Condvar,
}

impl CompletionSignal {
    /// Create an unfired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal and wake every waiter.
    ///
    /// Returns `true` for the call that fired it, `false` if it had already fired.
    pub fn fire(&self) -> bool {
        let mut fired = self.fired.lock();
        if *fired {
            return false;
        }
        *fired = true;
        self.cond.notify_all();
        true
    }

    /// Whether the signal has fired.
    #[inline]
    pub fn is_fired(&self) -> bool {
        *self.fired.lock()
    }

    /// Block until the signal fires.
    pub fn wait(&self) {
        let mut fired = self.fired.lock();
        while !*fired {
            self.cond.wait(&mut fired);
        }
    }

    /// Block until the signal fires or `timeout` passes; returns whether it fired.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut fired = self.fired.lock();
        if !*fired {
            self.cond.wait_while_for(&mut fired, |fired| !*fired, timeout);
        }
        *fired
    }
}
