use async_trait::async_trait;
use checkout_analytics::networking::NetworkError;
use checkout_analytics::{AnalyticsErr, CollectorAdapter, CollectorRequest};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Records every request body. Responds with the scripted outcomes in order, then
/// with `default_outcome` once the script runs out.
pub struct MockCollectorAdapter {
    pub call_count: AtomicU64,
    pub received_bodies: Mutex<Vec<Value>>,
    scripted_outcomes: Mutex<VecDeque<bool>>,
    default_outcome: bool,
    pub was_shutdown: Mutex<bool>,
}

impl MockCollectorAdapter {
    pub fn new() -> Self {
        Self::with_outcomes(vec![], true)
    }

    pub fn always_failing() -> Self {
        Self::with_outcomes(vec![], false)
    }

    pub fn with_outcomes(outcomes: Vec<bool>, default_outcome: bool) -> Self {
        Self {
            call_count: AtomicU64::new(0),
            received_bodies: Mutex::new(Vec::new()),
            scripted_outcomes: Mutex::new(outcomes.into()),
            default_outcome,
            was_shutdown: Mutex::new(false),
        }
    }

    pub fn calls(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn body_at(&self, index: usize) -> Value {
        self.received_bodies.lock()[index].clone()
    }

    pub fn event_names_at(&self, index: usize) -> Vec<String> {
        self.body_at(index)["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect()
    }
}

#[async_trait]
impl CollectorAdapter for MockCollectorAdapter {
    async fn send_events(&self, request: &CollectorRequest) -> Result<(), AnalyticsErr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.received_bodies.lock().push(request.to_body()?);

        let succeeded = self
            .scripted_outcomes
            .lock()
            .pop_front()
            .unwrap_or(self.default_outcome);

        if succeeded {
            Ok(())
        } else {
            Err(AnalyticsErr::NetworkError(NetworkError::RequestFailed(
                "http://mock.collector/collect".to_string(),
                Some(500),
                "Internal Server Error".to_string(),
            )))
        }
    }

    async fn shutdown(&self) -> Result<(), AnalyticsErr> {
        *self.was_shutdown.lock() = true;
        Ok(())
    }
}
