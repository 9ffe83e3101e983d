use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

pub const GA_EVENT: &str = "gaEvent";
pub const CURRENCY: &str = "ZAR";

const PAYMENTS_CATEGORY: &str = "Payments";
const TRUE_FLAG: &str = "true";

/// An event in the shape its consumer expects. Ecommerce events describe commerce
/// actions; everything else is a generic tag event named `gaEvent`.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalizedEvent {
    Ecommerce(EcommerceEvent),
    GenericTag(GenericTagEvent),
}

impl NormalizedEvent {
    pub fn name(&self) -> &str {
        match self {
            NormalizedEvent::Ecommerce(e) => &e.event,
            NormalizedEvent::GenericTag(_) => GA_EVENT,
        }
    }

    pub fn is_generic_tag(&self) -> bool {
        matches!(self, NormalizedEvent::GenericTag(_))
    }

    pub fn to_json_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl Serialize for NormalizedEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NormalizedEvent::Ecommerce(e) => e.serialize(serializer),
            NormalizedEvent::GenericTag(e) => e.serialize(serializer),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EcommerceEvent {
    pub event: String,
    pub ecommerce: EcommerceDetails,
    pub is_bash_pay: &'static str,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_flag"
    )]
    pub is_headless_checkout: Option<bool>,
}

impl EcommerceEvent {
    pub fn new(event: String, ecommerce: EcommerceDetails, is_headless_checkout: bool) -> Self {
        Self {
            event,
            ecommerce,
            is_bash_pay: TRUE_FLAG,
            is_headless_checkout: is_headless_checkout.then_some(true),
        }
    }
}

/// The intent's own fields, enriched with currency, line items and user id. The
/// enrichment wins over intent fields of the same name.
#[derive(Clone, Debug, PartialEq)]
pub struct EcommerceDetails {
    pub fields: Map<String, Value>,
    pub currency: &'static str,
    pub items: Vec<Value>,
    pub user_id: Option<String>,
}

const ENRICHED_KEYS: [&str; 3] = ["currency", "items", "user_id"];

impl Serialize for EcommerceDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.fields {
            if !ENRICHED_KEYS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("currency", self.currency)?;
        map.serialize_entry("items", &self.items)?;
        if let Some(user_id) = &self.user_id {
            map.serialize_entry("user_id", user_id)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenericTagEvent {
    pub event: &'static str,
    #[serde(rename = "eventCategory")]
    pub event_category: &'static str,
    #[serde(rename = "eventAction", skip_serializing_if = "Option::is_none")]
    pub event_action: Option<String>,
    #[serde(rename = "eventLabel")]
    pub event_label: String,
    #[serde(rename = "eventDescription")]
    pub event_description: String,
    pub event_params: EventParams,
}

impl GenericTagEvent {
    pub fn new(
        event_action: Option<String>,
        event_label: String,
        event_description: String,
        event_params: EventParams,
    ) -> Self {
        Self {
            event: GA_EVENT,
            event_category: PAYMENTS_CATEGORY,
            event_action,
            event_label,
            event_description,
            event_params,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventParams {
    pub is_bash_pay: &'static str,
    pub is_webview: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_flag"
    )]
    pub is_headless_checkout: Option<bool>,
}

impl EventParams {
    pub fn new(is_webview: bool, is_headless_checkout: bool) -> Self {
        Self {
            is_bash_pay: TRUE_FLAG,
            is_webview,
            is_headless_checkout: is_headless_checkout.then_some(true),
        }
    }
}

// tag manager flags are the string "true", never a boolean
fn serialize_flag<S: Serializer>(flag: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match flag {
        Some(true) => serializer.serialize_str(TRUE_FLAG),
        _ => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generic_event_shape() {
        let event = NormalizedEvent::GenericTag(GenericTagEvent::new(
            Some("Card_Declined".to_string()),
            "Pay_Event".to_string(),
            "Pay Event".to_string(),
            EventParams::new(false, true),
        ));

        assert_eq!(event.name(), "gaEvent");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "gaEvent",
                "eventCategory": "Payments",
                "eventAction": "Card_Declined",
                "eventLabel": "Pay_Event",
                "eventDescription": "Pay Event",
                "event_params": {
                    "is_bash_pay": "true",
                    "is_webview": false,
                    "is_headless_checkout": "true"
                }
            })
        );
    }

    #[test]
    fn test_enrichment_overrides_intent_fields() {
        let mut fields = Map::new();
        fields.insert("event".into(), json!("purchase"));
        fields.insert("currency".into(), json!("USD"));
        fields.insert("value".into(), json!(500));

        let event = NormalizedEvent::Ecommerce(EcommerceEvent::new(
            "purchase".to_string(),
            EcommerceDetails {
                fields,
                currency: CURRENCY,
                items: vec![json!({"item_id": "sku"})],
                user_id: None,
            },
            false,
        ));

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "purchase",
                "ecommerce": {
                    "event": "purchase",
                    "value": 500,
                    "currency": "ZAR",
                    "items": [{"item_id": "sku"}]
                },
                "is_bash_pay": "true"
            })
        );
    }
}
