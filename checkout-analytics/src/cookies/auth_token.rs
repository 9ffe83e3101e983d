use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use super::{CookieJar, AUTH_COOKIE_PREFIX};
use crate::{log_d, log_w, AnalyticsErr};

const TAG: &str = stringify!(AuthTokenClaims);

/// Claims carried in the payload segment of the storefront auth token.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AuthTokenClaims {
    #[serde(rename = "userId", default, deserialize_with = "deserialize_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub sub: Option<String>,
}

impl AuthTokenClaims {
    /// Decodes `header.payload.signature`. Accepts standard or url-safe base64, with
    /// or without padding.
    pub fn decode(token: &str) -> Result<Self, AnalyticsErr> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| AnalyticsErr::TokenDecodeError("missing payload segment".into()))?;

        let normalized: String = payload
            .trim_end_matches('=')
            .chars()
            .map(|c| match c {
                '-' => '+',
                '_' => '/',
                other => other,
            })
            .collect();

        let bytes = STANDARD_NO_PAD
            .decode(normalized)
            .map_err(|e| AnalyticsErr::TokenDecodeError(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            AnalyticsErr::JsonParseError(stringify!(AuthTokenClaims).to_string(), e.to_string())
        })
    }

    /// The part of `sub` before the `@`, if non-empty.
    pub fn user_id_suffix(&self) -> Option<String> {
        let sub = self.sub.as_deref()?;
        let prefix = sub.split('@').next().unwrap_or_default();
        if prefix.is_empty() {
            return None;
        }

        Some(prefix.to_string())
    }
}

/// Ids are usually strings, but numeric ids show up too.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

pub fn read_auth_token_claims(cookies: &CookieJar, account: &str) -> Option<AuthTokenClaims> {
    let cookie_name = format!("{AUTH_COOKIE_PREFIX}{account}");
    let token = match cookies.get(&cookie_name) {
        Some(token) => token,
        None => {
            log_d!(TAG, "No auth token found for account {}", account);
            return None;
        }
    };

    match AuthTokenClaims::decode(&token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log_w!(TAG, "{}", e);
            None
        }
    }
}
