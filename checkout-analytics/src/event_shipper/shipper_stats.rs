use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for events the shipper gave up on, which never surface as errors.
#[derive(Default)]
pub struct ShipperStats {
    dropped_events: AtomicU64,
    sent_batches: AtomicU64,
    failed_attempts: AtomicU64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ShipperStatsSnapshot {
    pub dropped_events: u64,
    pub sent_batches: u64,
    pub failed_attempts: u64,
}

impl ShipperStats {
    pub fn record_dropped(&self, count: usize) {
        self.dropped_events
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_sent_batch(&self) {
        self.sent_batches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed_attempt(&self) {
        self.failed_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ShipperStatsSnapshot {
        ShipperStatsSnapshot {
            dropped_events: self.dropped_events.load(Ordering::Relaxed),
            sent_batches: self.sent_batches.load(Ordering::Relaxed),
            failed_attempts: self.failed_attempts.load(Ordering::Relaxed),
        }
    }
}
