//! Time source abstraction
//!
//! The dividend state machine never advances time; it only reads it. All
//! window checks take the current time from a [`Clock`] so that the same
//! code runs against the system clock in production and a manually driven
//! clock in tests and simulations.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of "current time" in seconds since the Unix epoch.
///
/// Implementations must be monotonically non-decreasing as observed by the
/// ledger.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Wall-clock time from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        Utc::now().timestamp().max(0) as u64
    }
}

/// Manually advanced clock for tests and dev-mode nodes.
///
/// Tests jump the clock forward instead of waiting out a 330-day claim
/// window.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Jump forward by `secs` seconds.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the absolute time. Callers are responsible for keeping it
    /// non-decreasing.
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
