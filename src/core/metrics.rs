//! Logger metrics for observability
//!
//! Counts the outcome of every emission, one counter per tier: written,
//! suppressed by priority, redirected to the fallback after a validation
//! failure, rejected by validation, or failed to serialize or write.

use std::sync::atomic::{AtomicU64, Ordering};

/// Emission counters shared by a logger and every logger derived from it.
///
/// # Example
///
/// ```
/// use logharbour::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.written(), 1);
/// assert_eq!(metrics.total(), 2);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries serialized and accepted by the sink
    written: AtomicU64,

    /// Entries dropped by the priority filter
    suppressed: AtomicU64,

    /// Invalid entries routed to a failover sink's fallback branch
    redirected: AtomicU64,

    /// Invalid entries returned to the caller as errors
    rejected: AtomicU64,

    /// Entries that failed to serialize or write
    failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            redirected: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn redirected(&self) -> u64 {
        self.redirected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Total emissions observed across all tiers
    pub fn total(&self) -> u64 {
        self.written() + self.suppressed() + self.redirected() + self.rejected() + self.failed()
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_redirected(&self) -> u64 {
        self.redirected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of non-suppressed emissions that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has reached validation yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let attempted = (self.total() - self.suppressed()) as f64;
        if attempted == 0.0 {
            0.0
        } else {
            (failed / attempted) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.redirected.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written()),
            suppressed: AtomicU64::new(self.suppressed()),
            redirected: AtomicU64::new(self.redirected()),
            rejected: AtomicU64::new(self.rejected()),
            failed: AtomicU64::new(self.failed()),
        }
    }
}
