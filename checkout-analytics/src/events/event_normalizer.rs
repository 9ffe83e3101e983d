use serde_json::{Map, Value};
use std::sync::Arc;

use super::event_intent::EventIntent;
use super::normalized_event::{
    EcommerceDetails, EcommerceEvent, EventParams, GenericTagEvent, NormalizedEvent, CURRENCY,
    GA_EVENT,
};
use crate::cookies::{
    read_auth_token_claims, read_customer_items, CookieJar, HEADLESS_CHECKOUT_BETA_COOKIE,
    IS_APP_COOKIE,
};
use crate::log_w;

const TAG: &str = stringify!(EventNormalizer);

const DEFAULT_EVENT_LABEL: &str = "Pay_Event";
const DEFAULT_EVENT_DESCRIPTION: &str = "Pay Event";

/// Platform facts that decide an event's shape and destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransportContext {
    pub is_app: bool,
    pub is_headless_checkout: bool,
}

impl TransportContext {
    pub fn from_cookies(cookies: &CookieJar) -> Self {
        let is_app = cookies.is_flag_set(IS_APP_COOKIE);
        Self {
            is_app,
            is_headless_checkout: !is_app && cookies.is_flag_set(HEADLESS_CHECKOUT_BETA_COOKIE),
        }
    }
}

/// Maps event intents onto their canonical shape. Reads cookies, nothing else.
pub struct EventNormalizer {
    cookies: Arc<CookieJar>,
    account: String,
}

impl EventNormalizer {
    pub fn new(cookies: Arc<CookieJar>, account: impl Into<String>) -> Self {
        Self {
            cookies,
            account: account.into(),
        }
    }

    pub fn normalize(&self, mut intent: EventIntent, context: &TransportContext) -> NormalizedEvent {
        intent.truncate_description();

        let ecommerce_name = intent.event.clone().filter(|name| name != GA_EVENT);

        match ecommerce_name {
            Some(name) => {
                NormalizedEvent::Ecommerce(self.to_ecommerce_event(name, intent, context))
            }
            None => NormalizedEvent::GenericTag(to_generic_tag_event(intent, context)),
        }
    }

    fn to_ecommerce_event(
        &self,
        name: String,
        intent: EventIntent,
        context: &TransportContext,
    ) -> EcommerceEvent {
        let fields = match serde_json::to_value(&intent) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => Map::new(),
            Err(e) => {
                log_w!(TAG, "Failed to serialize event intent {}: {}", name, e);
                Map::new()
            }
        };

        let user_id = read_auth_token_claims(&self.cookies, &self.account)
            .and_then(|claims| claims.user_id_suffix());

        let details = EcommerceDetails {
            fields,
            currency: CURRENCY,
            items: read_customer_items(&self.cookies),
            user_id,
        };

        EcommerceEvent::new(name, details, context.is_headless_checkout)
    }
}

fn to_generic_tag_event(intent: EventIntent, context: &TransportContext) -> GenericTagEvent {
    let event_action = intent
        .event_action
        .as_deref()
        .map(|action| action.replace(char::is_whitespace, "_"));

    let event_label = intent
        .event_label
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| DEFAULT_EVENT_LABEL.to_string());

    let event_description = match &intent.event_detail {
        Some(detail) => describe_detail(detail),
        None => intent
            .event_description
            .filter(|description| !description.is_empty())
            .unwrap_or_else(|| DEFAULT_EVENT_DESCRIPTION.to_string()),
    };

    GenericTagEvent::new(
        event_action,
        event_label,
        event_description,
        EventParams::new(context.is_app, context.is_headless_checkout),
    )
}

/// The nested `error` wins over the whole detail object.
fn describe_detail(detail: &Value) -> String {
    let described = match detail.get("error") {
        Some(error) if !error.is_null() => error,
        _ => detail,
    };

    described.to_string()
}
