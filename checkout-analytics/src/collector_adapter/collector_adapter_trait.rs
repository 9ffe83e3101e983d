use async_trait::async_trait;

use super::collector_payload::CollectorRequest;
use crate::AnalyticsErr;

/// Delivers one batch to the collector. `Ok` means the collector accepted it,
/// anything else leaves the batch for retry.
#[async_trait]
pub trait CollectorAdapter: Send + Sync {
    async fn send_events(&self, request: &CollectorRequest) -> Result<(), AnalyticsErr>;

    async fn shutdown(&self) -> Result<(), AnalyticsErr>;
}
