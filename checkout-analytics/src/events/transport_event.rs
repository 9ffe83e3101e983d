use serde::Serialize;
use serde_json::{Map, Value};

use super::normalized_event::NormalizedEvent;

const EXCLUDED_PARAMS: [&str; 3] = ["user_id", "event", "ecommerce"];

/// The flat `{name, params}` record sent to the collector and the app bridge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransportEvent {
    pub name: String,
    pub params: Map<String, Value>,
}

impl TransportEvent {
    /// Params are the ecommerce fields followed by the remaining top-level fields.
    /// `user_id`, `event` and `ecommerce` never appear as params.
    pub fn from_normalized(event: &NormalizedEvent) -> Self {
        let mut top_level = event.to_json_map();
        let mut params = match top_level.remove("ecommerce") {
            Some(Value::Object(ecommerce)) => ecommerce,
            _ => Map::new(),
        };

        for (key, value) in top_level {
            params.insert(key, value);
        }

        for key in EXCLUDED_PARAMS {
            params.remove(key);
        }

        Self {
            name: event.name().to_string(),
            params,
        }
    }
}
