use parking_lot::RwLock;
use std::collections::VecDeque;

use crate::events::TransportEvent;
use crate::{read_lock_or_return, write_lock_or_noop, write_lock_or_return};

const TAG: &str = stringify!(EventBuffer);

/// FIFO of events waiting for the collector.
#[derive(Default)]
pub struct EventBuffer {
    events: RwLock<VecDeque<TransportEvent>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends and returns the new length, or 0 if the buffer could not be locked.
    pub fn push(&self, event: TransportEvent) -> usize {
        let mut events = write_lock_or_return!(TAG, self.events, 0);
        events.push_back(event);
        events.len()
    }

    pub fn take_all(&self) -> Vec<TransportEvent> {
        let mut events = write_lock_or_return!(TAG, self.events, vec![]);
        events.drain(..).collect()
    }

    /// Puts a failed batch back ahead of anything pushed since it was taken, keeping
    /// the batch's own order.
    pub fn requeue_front(&self, batch: Vec<TransportEvent>) {
        let mut events = write_lock_or_noop!(TAG, self.events);
        for event in batch.into_iter().rev() {
            events.push_front(event);
        }
    }

    /// Empties the buffer, returning how many events were discarded.
    pub fn drain_count(&self) -> usize {
        let mut events = write_lock_or_return!(TAG, self.events, 0);
        let count = events.len();
        events.clear();
        count
    }

    pub fn len(&self) -> usize {
        let events = read_lock_or_return!(TAG, self.events, 0);
        events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn event(name: &str) -> TransportEvent {
        TransportEvent {
            name: name.to_string(),
            params: Map::new(),
        }
    }

    fn names(events: &[TransportEvent]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_push_reports_length() {
        let buffer = EventBuffer::new();
        assert_eq!(buffer.push(event("a")), 1);
        assert_eq!(buffer.push(event("b")), 2);
    }

    #[test]
    fn test_requeued_batch_precedes_newer_events() {
        let buffer = EventBuffer::new();
        buffer.push(event("a"));
        buffer.push(event("b"));

        let batch = buffer.take_all();
        assert!(buffer.is_empty());

        buffer.push(event("c"));
        buffer.requeue_front(batch);

        assert_eq!(names(&buffer.take_all()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drain_count() {
        let buffer = EventBuffer::new();
        buffer.push(event("a"));
        buffer.push(event("b"));

        assert_eq!(buffer.drain_count(), 2);
        assert_eq!(buffer.len(), 0);
    }
}
