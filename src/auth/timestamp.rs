//! Request timestamps for KuCoin API authentication.
//!
//! KuCoin signs every private request over a millisecond timestamp that doubles
//! as a replay-prevention nonce, so each request needs a fresh one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing timestamps for authenticated requests.
pub trait TimestampProvider: Send + Sync {
    /// Milliseconds since the UNIX epoch for the next request.
    fn next_timestamp(&self) -> u64;
}

/// A timestamp provider backed by the system clock.
///
/// Timestamps are milliseconds since the UNIX epoch. Two calls landing in the
/// same millisecond get distinct values: the later one is bumped by one, so
/// the provider never hands out the same timestamp twice.
pub struct MillisTimestamp {
    last: AtomicU64,
}

impl MillisTimestamp {
    /// Create a new timestamp provider.
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    fn current_time_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for MillisTimestamp {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampProvider for MillisTimestamp {
    fn next_timestamp(&self) -> u64 {
        let now = Self::current_time_millis();

        loop {
            let last = self.last.load(Ordering::SeqCst);
            let next = now.max(last + 1);

            if self
                .last
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
        }
    }
}

/// A provider that always returns the same timestamp.
///
/// Useful for reproducing a signature, never for live requests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestamp(pub u64);

impl TimestampProvider for FixedTimestamp {
    fn next_timestamp(&self) -> u64 {
        self.0
    }
}
