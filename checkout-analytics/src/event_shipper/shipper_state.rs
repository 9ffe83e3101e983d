use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ShipperState {
    Idle,
    Buffering,
    Flushing,
    /// Terminal. Nothing is sent once retries run out.
    Exhausted,
}

impl Display for ShipperState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShipperState::Idle => "Idle",
            ShipperState::Buffering => "Buffering",
            ShipperState::Flushing => "Flushing",
            ShipperState::Exhausted => "Exhausted",
        };
        write!(f, "{name}")
    }
}

/// Consecutive failed sends. Only a successful send resets the count, and once it
/// reaches `max` it never moves again.
pub struct FlushRetries {
    count: AtomicU32,
    max: u32,
}

impl FlushRetries {
    pub fn new(max: u32) -> Self {
        Self {
            count: AtomicU32::new(0),
            max: max.max(1),
        }
    }

    /// Returns true when this failure exhausted the retries.
    pub fn record_failure(&self) -> bool {
        let result = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                (count < self.max).then_some(count + 1)
            });

        match result {
            Ok(previous) => previous + 1 >= self.max,
            Err(_) => true,
        }
    }

    pub fn reset(&self) {
        if !self.is_exhausted() {
            self.count.store(0, Ordering::SeqCst);
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.count() >= self.max
    }

    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}
