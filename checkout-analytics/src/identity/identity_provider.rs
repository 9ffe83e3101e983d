use async_trait::async_trait;

use super::IdentityContext;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the identity for the next collector batch. Never fails; missing
    /// identifiers are left empty.
    async fn resolve_identity(&self, is_app_platform: bool) -> IdentityContext;
}
