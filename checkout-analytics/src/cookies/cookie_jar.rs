use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;

use crate::{read_lock_or_return, write_lock_or_noop};

const TAG: &str = stringify!(CookieJar);

#[derive(Clone, Debug)]
struct StoredCookie {
    value: String,
    expires: Option<DateTime<Utc>>,
}

impl StoredCookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// The page's cookie jar. Shared by every reader and writer, no locking beyond
/// the individual read or write.
#[derive(Default)]
pub struct CookieJar {
    cookies: RwLock<BTreeMap<String, StoredCookie>>,
}

impl CookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `Cookie` header (`a=1; b=2`). Pairs without `=` are skipped and a
    /// repeated name keeps its last value.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }

                Some((
                    name.to_string(),
                    StoredCookie {
                        value: value.trim().to_string(),
                        expires: None,
                    },
                ))
            })
            .collect();

        Self {
            cookies: RwLock::new(cookies),
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        let cookies = read_lock_or_return!(TAG, self.cookies, None);
        cookies
            .get(name)
            .filter(|cookie| !cookie.is_expired(Utc::now()))
            .map(|cookie| cookie.value.clone())
    }

    /// Same as `get`, with the value percent-decoded. Invalid UTF-8 sequences are
    /// replaced rather than rejected.
    pub fn get_decoded(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|value| percent_decode_str(&value).decode_utf8_lossy().into_owned())
    }

    pub fn is_flag_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| value == "true")
    }

    /// Stores `value` for `days` days. Absent or empty values are ignored.
    pub fn set(&self, name: &str, value: Option<&str>, days: i64) {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return,
        };

        let mut cookies = write_lock_or_noop!(TAG, self.cookies);
        cookies.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires: Some(Utc::now() + Duration::days(days)),
            },
        );
    }

    pub fn to_cookie_header(&self) -> String {
        let cookies = read_lock_or_return!(TAG, self.cookies, String::new());
        let now = Utc::now();
        cookies
            .iter()
            .filter(|(_, cookie)| !cookie.is_expired(now))
            .map(|(name, cookie)| format!("{name}={}", cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
