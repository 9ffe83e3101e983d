use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MAX_DESCRIPTION_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

/// A caller's request to record an analytics event. Unknown keys are kept in
/// `extra` and forwarded with ecommerce payloads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventIntent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_detail: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bash_pay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_headless_checkout: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventIntent {
    #[must_use]
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: Some(event.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    #[must_use]
    pub fn with_shipping(mut self, shipping: f64) -> Self {
        self.shipping = Some(shipping);
        self
    }

    #[must_use]
    pub fn with_event_description(mut self, description: impl Into<String>) -> Self {
        self.event_description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_event_action(mut self, action: impl Into<String>) -> Self {
        self.event_action = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_event_label(mut self, label: impl Into<String>) -> Self {
        self.event_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_event_detail(mut self, detail: Value) -> Self {
        self.event_detail = Some(detail);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub(crate) fn truncate_description(&mut self) {
        if let Some(description) = self.event_description.take() {
            self.event_description = Some(truncate_string(&description, MAX_DESCRIPTION_CHARS));
        }
    }
}

/// Truncates to `max_chars` characters, the last three replaced by `...`.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = input.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
