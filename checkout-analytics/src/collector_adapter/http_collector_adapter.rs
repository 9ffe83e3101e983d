use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::collector_adapter_trait::CollectorAdapter;
use super::collector_payload::CollectorRequest;
use crate::cookies::CookieJar;
use crate::networking::{NetworkClient, NetworkProvider, RequestArgs};
use crate::{log_d, AnalyticsErr};

const TAG: &str = stringify!(HttpCollectorAdapter);

const COLLECTOR_TIMEOUT_MS: u64 = 10_000;

pub struct HttpCollectorAdapter {
    collector_url: String,
    cookies: Arc<CookieJar>,
    network: NetworkClient,
}

impl HttpCollectorAdapter {
    #[must_use]
    pub fn new(collector_url: &str, cookies: Arc<CookieJar>, disable_network: Option<bool>) -> Self {
        Self {
            collector_url: collector_url.to_string(),
            cookies,
            network: NetworkClient::new(Some(constant_headers()), disable_network),
        }
    }

    #[must_use]
    pub fn with_provider(
        collector_url: &str,
        cookies: Arc<CookieJar>,
        provider: Arc<dyn NetworkProvider>,
    ) -> Self {
        Self {
            collector_url: collector_url.to_string(),
            cookies,
            network: NetworkClient::with_provider(Some(constant_headers()), provider),
        }
    }

    async fn send_events_over_http(&self, request: &CollectorRequest) -> Result<(), AnalyticsErr> {
        let body = request.to_body()?;
        log_d!(TAG, "Sending events ({}): {}", request.event_count(), body);

        let bytes =
            serde_json::to_vec(&body).map_err(|e| AnalyticsErr::SerializationError(e.to_string()))?;

        // the collector authenticates the session from the page's cookies
        let mut headers = HashMap::new();
        let cookie_header = self.cookies.to_cookie_header();
        if !cookie_header.is_empty() {
            headers.insert("Cookie".to_string(), cookie_header);
        }

        self.network
            .post(
                RequestArgs {
                    url: self.collector_url.clone(),
                    headers: Some(headers),
                    timeout_ms: COLLECTOR_TIMEOUT_MS,
                    ..RequestArgs::default()
                },
                Some(bytes),
            )
            .await
            .map_err(AnalyticsErr::NetworkError)?;

        Ok(())
    }
}

fn constant_headers() -> HashMap<String, String> {
    HashMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

#[async_trait]
impl CollectorAdapter for HttpCollectorAdapter {
    async fn send_events(&self, request: &CollectorRequest) -> Result<(), AnalyticsErr> {
        self.send_events_over_http(request).await
    }

    async fn shutdown(&self) -> Result<(), AnalyticsErr> {
        self.network.shutdown();
        Ok(())
    }
}
