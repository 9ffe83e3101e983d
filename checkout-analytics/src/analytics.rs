use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::collector_adapter::{CollectorAdapter, HttpCollectorAdapter};
use crate::cookies::CookieJar;
use crate::event_shipper::{EventShipper, ShipperState, ShipperStatsSnapshot};
use crate::events::{
    purchase_intent, EventIntent, EventNormalizer, NormalizedEvent, OrderTotals, TransportContext,
    TransportEvent, GA_EVENT,
};
use crate::host::{push_to_data_layer, HostEnvironment};
use crate::identity::{CookieIdentityProvider, DevicePlatform, IdentityProvider};
use crate::output_logger::{initialize_output_logger, shutdown_output_logger};
use crate::{log_d, log_e, AnalyticsErr, AnalyticsOptions, AnalyticsRuntime};

const TAG: &str = stringify!(EventAnalytics);

const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(3);

/// Entry point for the page's analytics. One instance owns the event buffer and its
/// flush timer, and should live as long as the page does.
pub struct EventAnalytics {
    cookies: Arc<CookieJar>,
    host: HostEnvironment,
    normalizer: EventNormalizer,
    shipper: Arc<EventShipper>,
    runtime: Arc<AnalyticsRuntime>,
}

impl EventAnalytics {
    pub fn new(
        cookies: Arc<CookieJar>,
        host: HostEnvironment,
        options: Option<AnalyticsOptions>,
    ) -> Result<Self, AnalyticsErr> {
        let options = options.unwrap_or_default();

        initialize_output_logger(
            &options.output_log_level,
            options.output_logger_provider.clone(),
        );

        log_d!(TAG, "Initializing with options {:?}", options);

        let runtime = AnalyticsRuntime::get_runtime()?;

        let identity_provider: Arc<dyn IdentityProvider> = match &options.identity_provider {
            Some(provider) => provider.clone(),
            None => Arc::new(CookieIdentityProvider::new(
                cookies.clone(),
                host.tag_manager.clone(),
                options.ga_measurement_id.clone(),
                host.is_mobile(),
            )),
        };

        let collector_adapter: Arc<dyn CollectorAdapter> = match &options.collector_adapter {
            Some(adapter) => adapter.clone(),
            None => Arc::new(HttpCollectorAdapter::new(
                &options.collector_url(),
                cookies.clone(),
                options.disable_network,
            )),
        };

        let shipper = Arc::new(EventShipper::new(
            collector_adapter,
            identity_provider,
            cookies.clone(),
            &options,
            &runtime,
        ));
        shipper.start_background_task();

        Ok(Self {
            normalizer: EventNormalizer::new(cookies.clone(), options.account()),
            cookies,
            host,
            shipper,
            runtime,
        })
    }

    /// Records a payment journey event. Collector-bound events are buffered and
    /// mirrored to the message bridge, generic web events go straight to the bridge
    /// and the data layer. Never fails.
    pub fn push_pay_event(&self, intent: EventIntent) {
        let context = TransportContext::from_cookies(&self.cookies);
        let normalized = self.normalizer.normalize(intent, &context);

        if context.is_app || !normalized.is_generic_tag() {
            let event = TransportEvent::from_normalized(&normalized);
            self.post_to_host(&event);
            self.shipper.push(event);
            return;
        }

        self.post_to_host(&normalized);
        self.push_generic_to_data_layer(&normalized);
    }

    pub fn track_purchase(&self, order: &OrderTotals) {
        self.push_pay_event(purchase_intent(order));
    }

    pub async fn flush(&self) {
        self.shipper.flush().await;
    }

    pub async fn shutdown(&self) -> Result<(), AnalyticsErr> {
        self.shutdown_with_timeout(DEFAULT_SHUTDOWN_TIMEOUT).await
    }

    /// Stops the shipper and every background task. Always tears everything down,
    /// but reports a failure when the final flush did not finish within `timeout`.
    pub async fn shutdown_with_timeout(&self, timeout: Duration) -> Result<(), AnalyticsErr> {
        log_d!(TAG, "Shutting down with timeout {}ms", timeout.as_millis());

        let result = self.shipper.shutdown(timeout).await;
        self.runtime.shutdown();
        shutdown_output_logger();

        result
    }

    pub fn stats(&self) -> ShipperStatsSnapshot {
        self.shipper.stats()
    }

    pub fn shipper_state(&self) -> ShipperState {
        self.shipper.state()
    }

    pub fn retry_count(&self) -> u32 {
        self.shipper.retry_count()
    }

    pub fn pending_event_count(&self) -> usize {
        self.shipper.pending_event_count()
    }

    fn post_to_host<T: Serialize>(&self, message: &T) {
        match serde_json::to_string(message) {
            Ok(json) => self.host.post_message(&json),
            Err(e) => log_e!(TAG, "Failed to serialize message for host: {}", e),
        }
    }

    fn push_generic_to_data_layer(&self, event: &NormalizedEvent) {
        let Some(data_layer) = &self.host.data_layer else {
            log_d!(TAG, "No data layer, skipping {}", event.name());
            return;
        };

        let platform = DevicePlatform::from_is_mobile(self.host.is_mobile());

        let mut data = Map::new();
        data.insert("event".to_string(), Value::from(GA_EVENT));
        if let Ok(platform) = serde_json::to_value(platform) {
            data.insert("platform".to_string(), platform);
        }
        data.extend(event.to_json_map());

        push_to_data_layer(data_layer.as_ref(), data, false);
    }
}
