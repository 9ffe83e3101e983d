use serde_json::{Map, Value};

use crate::log_d;

const TAG: &str = stringify!(TagManager);

pub type TagManagerCallback = Box<dyn FnOnce(String) + Send + 'static>;

/// The host page's tag manager, exposing its callback based field getter.
pub trait TagManager: Send + Sync {
    /// Looks up `field_name` for `measurement_id`. The callback may be invoked at any
    /// later point, or never.
    fn get(&self, measurement_id: &str, field_name: &str, callback: TagManagerCallback);
}

/// Append-only sequence consumed by the tag manager.
pub trait DataLayer: Send + Sync {
    fn push(&self, entry: Value);
}

/// Pushes `data` onto the data layer, marked as coming from the headless storefront.
///
/// With `ecommerce` set and no `ecommerce` key present, the fields (minus `event`) are
/// nested under `ecommerce`, and an `items` list is renamed to `impressions`. Every
/// object carrying `ecommerce` is preceded by an `{ecommerce: null}` reset so the tag
/// manager does not merge it into the previous push.
pub fn push_to_data_layer(data_layer: &dyn DataLayer, mut data: Map<String, Value>, ecommerce: bool) {
    let mut for_data_layer = if ecommerce && !data.contains_key("ecommerce") {
        let event = data.remove("event");

        let mut nested = Map::new();
        if let Some(items) = data.remove("items") {
            nested.insert("impressions".to_string(), items);
        }
        nested.extend(data);

        let mut wrapped = Map::new();
        if let Some(event) = event {
            wrapped.insert("event".to_string(), event);
        }
        wrapped.insert("ecommerce".to_string(), Value::Object(nested));
        wrapped
    } else {
        data
    };

    if for_data_layer.get("ecommerce").is_some_and(|e| !e.is_null()) {
        data_layer.push(serde_json::json!({ "ecommerce": null }));
    }

    for_data_layer.insert("is_headless".to_string(), Value::Bool(true));

    log_d!(
        TAG,
        "Pushing {} to data layer",
        for_data_layer
            .get("event")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
    );
    data_layer.push(Value::Object(for_data_layer));
}
