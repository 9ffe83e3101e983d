use async_trait::async_trait;
use checkout_analytics::{IdentityContext, IdentityProvider};
use std::sync::atomic::{AtomicU64, Ordering};

/// Returns the same web identity for every resolution.
pub struct FixedIdentityProvider {
    pub identity: IdentityContext,
    pub resolve_count: AtomicU64,
}

impl FixedIdentityProvider {
    pub fn web(client_id: &str, session_id: &str) -> Self {
        Self {
            identity: IdentityContext::for_web(
                Some(client_id.to_string()),
                Some(session_id.to_string()),
                false,
                false,
            ),
            resolve_count: AtomicU64::new(0),
        }
    }

    pub fn resolutions(&self) -> u64 {
        self.resolve_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn resolve_identity(&self, is_app_platform: bool) -> IdentityContext {
        self.resolve_count.fetch_add(1, Ordering::SeqCst);

        if is_app_platform {
            return IdentityContext::for_app();
        }

        self.identity.clone()
    }
}
