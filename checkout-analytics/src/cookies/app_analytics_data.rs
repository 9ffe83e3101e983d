use serde_json::{Map, Value};

use super::{CookieJar, APP_ANALYTICS_DATA_COOKIE};
use crate::{log_e, AnalyticsErr};

const TAG: &str = stringify!(AppAnalyticsData);
const APP_INSTANCE_ID_KEY: &str = "appInstanceId";

/// Payload the native app writes into the `app_analytics_data` cookie. Its fields
/// are forwarded verbatim to the collector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppAnalyticsData {
    pub fields: Map<String, Value>,
}

impl AppAnalyticsData {
    pub fn app_instance_id(&self) -> Option<&str> {
        self.fields
            .get(APP_INSTANCE_ID_KEY)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn parse(raw: &str) -> Result<Self, AnalyticsErr> {
        // the app sometimes wraps the JSON in single quotes
        let json = match raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            Some(inner) => inner,
            None => raw,
        };

        let value: Value = serde_json::from_str(json).map_err(|e| {
            AnalyticsErr::CookieParseError(APP_ANALYTICS_DATA_COOKIE.to_string(), e.to_string())
        })?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Ok(Self::default()),
        }
    }
}

/// Reads and parses the app analytics cookie. Absent or malformed cookies yield an
/// empty payload.
pub fn read_app_analytics_data(cookies: &CookieJar) -> AppAnalyticsData {
    let raw = match cookies.get_decoded(APP_ANALYTICS_DATA_COOKIE) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return AppAnalyticsData::default(),
    };

    match AppAnalyticsData::parse(&raw) {
        Ok(data) => data,
        Err(e) => {
            log_e!(TAG, "{}", e);
            AppAnalyticsData::default()
        }
    }
}
