use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

use super::{IdentityContext, IdentityProvider};
use crate::cookies::{CookieJar, BASH_PAY_BETA_COOKIE, CLIENT_ID_COOKIE, SESSION_ID_COOKIE};
use crate::host::TagManager;
use crate::{log_d, log_i, log_w};

const TAG: &str = stringify!(CookieIdentityProvider);

const CLIENT_ID_FIELD: &str = "client_id";
const SESSION_ID_FIELD: &str = "session_id";

#[derive(Default)]
struct CachedIds {
    client_id: Option<String>,
    session_id: Option<String>,
}

/// Resolves web identity from the `client_id`/`session_id` cookies, falling back to
/// the tag manager's getter. Resolved ids are cached for the lifetime of the provider.
pub struct CookieIdentityProvider {
    cookies: Arc<CookieJar>,
    tag_manager: Option<Arc<dyn TagManager>>,
    measurement_id: Option<String>,
    is_mobile: bool,
    cached: Mutex<CachedIds>,
}

impl CookieIdentityProvider {
    pub fn new(
        cookies: Arc<CookieJar>,
        tag_manager: Option<Arc<dyn TagManager>>,
        measurement_id: Option<String>,
        is_mobile: bool,
    ) -> Self {
        let cached = CachedIds {
            client_id: cookies.get(CLIENT_ID_COOKIE).filter(|id| !id.is_empty()),
            session_id: cookies.get(SESSION_ID_COOKIE).filter(|id| !id.is_empty()),
        };

        Self {
            cookies,
            tag_manager,
            measurement_id,
            is_mobile,
            cached: Mutex::new(cached),
        }
    }

    fn cached_ids(&self) -> (Option<String>, Option<String>) {
        let cached = self.cached.lock();
        (cached.client_id.clone(), cached.session_id.clone())
    }

    fn web_context(&self, is_bash_pay: bool) -> IdentityContext {
        let (client_id, session_id) = self.cached_ids();
        IdentityContext::for_web(client_id, session_id, self.is_mobile, is_bash_pay)
    }

    /// Bridges the tag manager's callback into a future. Resolves to `None` if the
    /// callback is dropped without being invoked.
    async fn lookup_field(
        tag_manager: &Arc<dyn TagManager>,
        measurement_id: &str,
        field_name: &'static str,
    ) -> Option<String> {
        let (tx, rx) = oneshot::channel();
        tag_manager.get(
            measurement_id,
            field_name,
            Box::new(move |id: String| {
                let _ = tx.send(id);
            }),
        );

        match rx.await {
            Ok(id) => {
                log_i!(TAG, "Resolved {} from tag manager: {}", field_name, id);
                Some(id)
            }
            Err(_) => {
                log_w!(TAG, "Tag manager dropped the {} callback", field_name);
                None
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for CookieIdentityProvider {
    async fn resolve_identity(&self, is_app_platform: bool) -> IdentityContext {
        if is_app_platform {
            return IdentityContext::for_app();
        }

        let is_bash_pay = self.cookies.is_flag_set(BASH_PAY_BETA_COOKIE);

        let (cached_client_id, cached_session_id) = self.cached_ids();
        if cached_client_id.is_some() && cached_session_id.is_some() {
            log_d!(TAG, "Using cached client and session ids");
            return self.web_context(is_bash_pay);
        }

        let (tag_manager, measurement_id) = match (&self.tag_manager, &self.measurement_id) {
            (Some(tag_manager), Some(measurement_id)) => (tag_manager, measurement_id),
            _ => {
                log_w!(TAG, "Web Analytics: tag manager is not ready / configured.");
                return IdentityContext::default();
            }
        };

        let client_id_lookup = async move {
            match cached_client_id {
                Some(id) => Some(id),
                None => Self::lookup_field(tag_manager, measurement_id, CLIENT_ID_FIELD).await,
            }
        };
        let session_id_lookup = async move {
            match cached_session_id {
                Some(id) => Some(id),
                None => Self::lookup_field(tag_manager, measurement_id, SESSION_ID_FIELD).await,
            }
        };

        // no timeout: a tag manager that never calls back stalls this resolution
        let (client_id, session_id) = tokio::join!(client_id_lookup, session_id_lookup);

        {
            let mut cached = self.cached.lock();
            if client_id.is_some() {
                cached.client_id = client_id;
            }
            if session_id.is_some() {
                cached.session_id = session_id;
            }
        }

        self.web_context(is_bash_pay)
    }
}
