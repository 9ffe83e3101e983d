use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::collector_adapter::CollectorAdapter;
use crate::identity::IdentityProvider;
use crate::output_logger::{LogLevel, OutputLogProvider};
use crate::serialize_if_not_none;

pub const DEFAULT_ACCOUNT: &str = "thefoschini";
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const PRODUCTION_COLLECTOR_URL: &str = "https://web-api.bash.com/v1/analytics/collect";
const STAGING_COLLECTOR_URL: &str = "https://web-api.staging.tfglabs.dev/v1/analytics/collect";

/// Only the production account reports to the production collector.
pub fn collector_url_for_account(account: &str) -> String {
    if account == DEFAULT_ACCOUNT {
        PRODUCTION_COLLECTOR_URL.to_string()
    } else {
        STAGING_COLLECTOR_URL.to_string()
    }
}

#[derive(Clone, Default)]
pub struct AnalyticsOptions {
    pub account: Option<String>,
    pub collector_url: Option<String>, // Derived from the account when unset

    pub flush_interval_ms: Option<u64>,
    pub max_retries: Option<u32>,

    pub ga_measurement_id: Option<String>, // Without it, ids missing from cookies are never looked up
    pub disable_network: Option<bool>,

    pub output_log_level: Option<LogLevel>,
    pub output_logger_provider: Option<Arc<dyn OutputLogProvider>>,

    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
    pub collector_adapter: Option<Arc<dyn CollectorAdapter>>,
}

impl AnalyticsOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> AnalyticsOptionsBuilder {
        AnalyticsOptionsBuilder::default()
    }

    pub fn account(&self) -> &str {
        self.account.as_deref().unwrap_or(DEFAULT_ACCOUNT)
    }

    pub fn collector_url(&self) -> String {
        match &self.collector_url {
            Some(url) => url.clone(),
            None => collector_url_for_account(self.account()),
        }
    }

    pub fn flush_interval_ms(&self) -> u64 {
        self.flush_interval_ms.unwrap_or(DEFAULT_FLUSH_INTERVAL_MS)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }
}

#[derive(Default)]
pub struct AnalyticsOptionsBuilder {
    inner: AnalyticsOptions,
}

impl AnalyticsOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Collector

    #[must_use]
    pub fn account(mut self, account: Option<String>) -> Self {
        self.inner.account = account;
        self
    }

    #[must_use]
    pub fn collector_url(mut self, collector_url: Option<String>) -> Self {
        self.inner.collector_url = collector_url;
        self
    }

    #[must_use]
    pub fn collector_adapter(mut self, collector_adapter: Option<Arc<dyn CollectorAdapter>>) -> Self {
        self.inner.collector_adapter = collector_adapter;
        self
    }

    #[must_use]
    pub fn disable_network(mut self, disable_network: Option<bool>) -> Self {
        self.inner.disable_network = disable_network;
        self
    }

    // Flushing

    #[must_use]
    pub fn flush_interval_ms(mut self, flush_interval_ms: Option<u64>) -> Self {
        self.inner.flush_interval_ms = flush_interval_ms;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: Option<u32>) -> Self {
        self.inner.max_retries = max_retries;
        self
    }

    // Identity

    #[must_use]
    pub fn ga_measurement_id(mut self, ga_measurement_id: Option<String>) -> Self {
        self.inner.ga_measurement_id = ga_measurement_id;
        self
    }

    #[must_use]
    pub fn identity_provider(mut self, identity_provider: Option<Arc<dyn IdentityProvider>>) -> Self {
        self.inner.identity_provider = identity_provider;
        self
    }

    // Logging

    #[must_use]
    pub fn output_log_level(mut self, output_log_level: Option<u32>) -> Self {
        if let Some(level) = output_log_level {
            self.inner.output_log_level = Some(LogLevel::from(level));
        }
        self
    }

    #[must_use]
    pub fn output_logger_provider(
        mut self,
        output_logger_provider: Option<Arc<dyn OutputLogProvider>>,
    ) -> Self {
        self.inner.output_logger_provider = output_logger_provider;
        self
    }

    #[must_use]
    pub fn build(self) -> AnalyticsOptions {
        self.inner
    }
}

impl Serialize for AnalyticsOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("AnalyticsOptions", 10)?;
        serialize_if_not_none!(state, "account", &self.account);
        serialize_if_not_none!(state, "collector_url", &self.collector_url);
        serialize_if_not_none!(state, "flush_interval_ms", &self.flush_interval_ms);
        serialize_if_not_none!(state, "max_retries", &self.max_retries);
        serialize_if_not_none!(state, "ga_measurement_id", &self.ga_measurement_id);
        serialize_if_not_none!(state, "disable_network", &self.disable_network);
        serialize_if_not_none!(
            state,
            "output_log_level",
            &get_display_name(&self.output_log_level)
        );
        serialize_if_not_none!(
            state,
            "output_logger_provider",
            &get_if_set(&self.output_logger_provider)
        );
        serialize_if_not_none!(
            state,
            "identity_provider",
            &get_if_set(&self.identity_provider)
        );
        serialize_if_not_none!(
            state,
            "collector_adapter",
            &get_if_set(&self.collector_adapter)
        );

        state.end()
    }
}

impl fmt::Debug for AnalyticsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "AnalyticsOptions{json}"),
            Err(_) => write!(f, "AnalyticsOptions{{}}"),
        }
    }
}

fn get_if_set<T>(s: &Option<T>) -> Option<&str> {
    s.as_ref().map(|_| "set")
}

fn get_display_name<T: fmt::Debug>(s: &Option<T>) -> Option<String> {
    s.as_ref().map(|st| format!("{st:?}"))
}
