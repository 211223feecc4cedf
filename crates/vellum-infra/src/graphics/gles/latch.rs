// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::atomic::{AtomicU8, Ordering};

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

/// The state of an [`InitLatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    /// Initialization has not started.
    Uninitialized,
    /// Initialization is running.
    Initializing,
    /// Initialization has completed.
    Ready,
}

/// A one-shot initialization latch.
///
/// The first caller of [`InitLatch::run_once`] moves the latch from
/// `Uninitialized` to `Initializing`, runs the initializer and then marks the
/// latch `Ready`. Every other call, including re-entrant ones made while the
/// initializer runs, does nothing.
#[derive(Debug, Default)]
pub struct InitLatch {
    state: AtomicU8,
}

impl InitLatch {
    /// A latch that has not fired yet.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINITIALIZED),
        }
    }

    /// Runs `init` if, and only if, no call has claimed the latch before.
    ///
    /// Returns `true` if `init` ran during this call.
    pub fn run_once(&self, init: impl FnOnce()) -> bool {
        if self
            .state
            .compare_exchange(
                UNINITIALIZED,
                INITIALIZING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return false;
        }
        init();
        self.state.store(READY, Ordering::Release);
        true
    }

    /// The current state.
    pub fn state(&self) -> LatchState {
        match self.state.load(Ordering::Acquire) {
            UNINITIALIZED => LatchState::Uninitialized,
            INITIALIZING => LatchState::Initializing,
            _ => LatchState::Ready,
        }
    }

    /// Returns `true` once initialization has completed.
    pub fn is_ready(&self) -> bool {
        self.state() == LatchState::Ready
    }
}
