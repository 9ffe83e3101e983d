use async_trait::async_trait;
use checkout_analytics::{AnalyticsErr, CollectorAdapter, CollectorRequest};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Notify;

/// Accepts every batch, but holds each `send_events` call open until `open_gate` is
/// called. Tracks how many calls were in flight at once.
pub struct GatedCollectorAdapter {
    gate: Notify,
    is_open: AtomicBool,
    in_flight: AtomicU64,
    max_in_flight: AtomicU64,
    call_count: AtomicU64,
    sent_event_names: Mutex<Vec<Vec<String>>>,
}

impl GatedCollectorAdapter {
    pub fn new() -> Self {
        Self {
            gate: Notify::new(),
            is_open: AtomicBool::new(false),
            in_flight: AtomicU64::new(0),
            max_in_flight: AtomicU64::new(0),
            call_count: AtomicU64::new(0),
            sent_event_names: Mutex::new(Vec::new()),
        }
    }

    pub fn open_gate(&self) {
        self.is_open.store(true, Ordering::SeqCst);
        self.gate.notify_waiters();
    }

    pub fn calls(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> u64 {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn sent_event_names(&self) -> Vec<Vec<String>> {
        self.sent_event_names.lock().clone()
    }

    async fn wait_for_gate(&self) {
        let notified = self.gate.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if !self.is_open.load(Ordering::SeqCst) {
            notified.await;
        }
    }
}

#[async_trait]
impl CollectorAdapter for GatedCollectorAdapter {
    async fn send_events(&self, request: &CollectorRequest) -> Result<(), AnalyticsErr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        self.wait_for_gate().await;

        self.sent_event_names
            .lock()
            .push(request.events.iter().map(|e| e.name.clone()).collect());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), AnalyticsErr> {
        Ok(())
    }
}
