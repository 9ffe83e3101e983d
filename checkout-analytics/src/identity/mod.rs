pub mod cookie_identity_provider;
pub mod identity_context;
pub mod identity_provider;
pub mod user_agent;

pub use cookie_identity_provider::CookieIdentityProvider;
pub use identity_context::{DevicePlatform, IdentityContext};
pub use identity_provider::IdentityProvider;
