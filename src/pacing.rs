/*
pacing.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazewalk.

Mazewalk is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazewalk is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazewalk. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Step pacing and cooperative cancellation.
//!
//! Runners wait on a [`Pacer`] between two algorithm steps, never inside a step, and check the
//! [`StopSignal`] once per step. Neither can change which steps are taken or in which order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// How a run ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The algorithm reached its terminal state.
    Completed,

    /// The stop signal was raised before the algorithm finished.
    Stopped,
}

/// Delay inserted between two steps. A zero delay means unthrottled.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// Create a [`Pacer`] object that waits `delay` between steps.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a [`Pacer`] object that never waits.
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Return the delay between two steps.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Block the calling thread for the configured delay.
    pub fn wait(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Shared flag that asks a running algorithm to stop (user-requested quit, for example).
///
/// Clones share the same flag, so one clone can be moved to a signal handler.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    raised: Arc<AtomicBool>,
}

impl StopSignal {
    /// Create a lowered [`StopSignal`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the runs that share this signal to stop.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Whether the signal has been raised.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_clones_share_the_stop_flag() {
        let signal = StopSignal::new();
        let handler_copy = signal.clone();
        assert!(!signal.is_raised());

        handler_copy.raise();
        assert!(signal.is_raised());
    }

    #[test]
    fn test_unthrottled_pacer_does_not_wait() {
        let pacer = Pacer::unthrottled();
        assert_eq!(pacer.delay(), Duration::ZERO);

        let start = Instant::now();
        for _ in 0..1000 {
            pacer.wait();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_pacer_waits_for_its_delay() {
        let pacer = Pacer::new(Duration::from_millis(5));
        let start = Instant::now();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
