// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    /// Monotonic time, used for invocation deadlines.
    fn now(&self) -> Instant;
    /// Wall-clock time, used for log timestamps.
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    utc: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        // 2026-01-01T00:00:00Z
        let start = Utc.timestamp_opt(1_767_225_600, 0).single().unwrap_or_default();
        Self { current: Arc::new(Mutex::new(Instant::now())), utc: Arc::new(Mutex::new(start)) }
    }

    /// Advance both the monotonic and the wall clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.current.lock() += duration;
        let step = chrono::Duration::from_std(duration).unwrap_or_default();
        let mut utc = self.utc.lock();
        *utc += step;
    }

    /// Set the wall clock to a specific time
    pub fn set_utc(&self, at: DateTime<Utc>) {
        *self.utc.lock() = at;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        *self.utc.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
