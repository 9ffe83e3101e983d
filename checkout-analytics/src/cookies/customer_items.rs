use serde::Deserialize;
use serde_json::Value;

use super::{CookieJar, GA_DATA_COOKIE};
use crate::log_e;

const TAG: &str = "CustomerItems";

#[derive(Deserialize)]
struct GaData {
    #[serde(default)]
    items: Option<Value>,
}

/// Line items for ecommerce events, read from the `ga_data` cookie.
pub fn read_customer_items(cookies: &CookieJar) -> Vec<Value> {
    let raw = match cookies.get(GA_DATA_COOKIE) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return vec![],
    };

    match serde_json::from_str::<GaData>(&raw) {
        Ok(GaData {
            items: Some(Value::Array(items)),
        }) => items,
        Ok(_) => vec![],
        Err(e) => {
            log_e!(TAG, "Could not parse items from {}: {}", GA_DATA_COOKIE, e);
            vec![]
        }
    }
}
