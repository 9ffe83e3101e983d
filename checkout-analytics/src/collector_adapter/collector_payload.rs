use serde_json::{Map, Value};

use crate::cookies::AppAnalyticsData;
use crate::events::TransportEvent;
use crate::identity::IdentityContext;
use crate::AnalyticsErr;

const FB_EVENTS_KEY: &str = "fbEvents";
const EVENTS_KEY: &str = "events";

pub struct CollectorRequest {
    pub fb_events: bool,
    pub app_analytics_data: AppAnalyticsData,
    pub identity: IdentityContext,
    pub events: Vec<TransportEvent>,
}

impl CollectorRequest {
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Builds the collector body. Later sources overwrite earlier ones on key
    /// collisions: `fbEvents`, the app cookie payload, identity, then `events`.
    pub fn to_body(&self) -> Result<Value, AnalyticsErr> {
        let mut body = Map::new();

        if self.fb_events {
            body.insert(FB_EVENTS_KEY.to_string(), Value::Bool(true));
        }

        for (key, value) in &self.app_analytics_data.fields {
            body.insert(key.clone(), value.clone());
        }

        match serde_json::to_value(&self.identity) {
            Ok(Value::Object(identity)) => body.extend(identity),
            Ok(_) => {}
            Err(e) => return Err(AnalyticsErr::SerializationError(e.to_string())),
        }

        let events = serde_json::to_value(&self.events)
            .map_err(|e| AnalyticsErr::SerializationError(e.to_string()))?;
        body.insert(EVENTS_KEY.to_string(), events);

        Ok(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn purchase_event() -> TransportEvent {
        TransportEvent {
            name: "purchase".to_string(),
            params: Map::from_iter([("value".to_string(), json!(500))]),
        }
    }

    #[test]
    fn test_web_body() {
        let request = CollectorRequest {
            fb_events: false,
            app_analytics_data: AppAnalyticsData::default(),
            identity: IdentityContext::for_web(
                Some("abc".to_string()),
                Some("xyz".to_string()),
                false,
                true,
            ),
            events: vec![purchase_event()],
        };

        assert_eq!(request.event_count(), 1);
        assert_eq!(
            request.to_body().unwrap(),
            json!({
                "platform": "Web",
                "clientId": "abc",
                "sessionId": "xyz",
                "feature_flag_parameters": ["is_bash_pay"],
                "events": [{"name": "purchase", "params": {"value": 500}}]
            })
        );
    }

    #[test]
    fn test_app_body_merges_cookie_payload() {
        let mut fields = Map::new();
        fields.insert("appInstanceId".into(), json!("inst-1"));
        fields.insert("events".into(), json!("overwritten"));

        let request = CollectorRequest {
            fb_events: true,
            app_analytics_data: AppAnalyticsData { fields },
            identity: IdentityContext::for_app(),
            events: vec![purchase_event()],
        };

        assert_eq!(
            request.to_body().unwrap(),
            json!({
                "fbEvents": true,
                "appInstanceId": "inst-1",
                "events": [{"name": "purchase", "params": {"value": 500}}]
            })
        );
    }
}
