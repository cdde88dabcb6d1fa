//! Logger metrics for observability
//!
//! Counters describing what happened to log calls: how many were dispatched,
//! filtered by level, silenced by an ignore pattern, how many notifications
//! went out and how many transport writes failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use devnull_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_call();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.calls(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that made it through the whole pipeline
    calls: AtomicU64,

    /// Calls dropped by the level threshold
    filtered: AtomicU64,

    /// Calls dropped because their source file is ignored
    suppressed: AtomicU64,

    /// Notification events emitted
    notifications: AtomicU64,

    /// Transport writes that returned an error
    transport_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            notifications: AtomicU64::new(0),
            transport_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn notifications(&self) -> u64 {
        self.notifications.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn transport_failures(&self) -> u64 {
        self.transport_failures.load(Ordering::Relaxed)
    }

    /// Record a dispatched call. Returns the previous count.
    #[inline]
    pub fn record_call(&self) -> u64 {
        self.calls.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_notification(&self) -> u64 {
        self.notifications.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_transport_failure(&self) -> u64 {
        self.transport_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of calls that were silenced, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no calls reached the suppression check.
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.suppressed() as f64;
        let total = self.calls() as f64 + suppressed;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
        self.transport_failures.store(0, Ordering::Relaxed);
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
            calls: AtomicU64::new(self.calls()),
            filtered: AtomicU64::new(self.filtered()),
            suppressed: AtomicU64::new(self.suppressed()),
            notifications: AtomicU64::new(self.notifications()),
            transport_failures: AtomicU64::new(self.transport_failures()),
        }
    }
}
