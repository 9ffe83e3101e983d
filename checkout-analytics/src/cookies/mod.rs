pub mod app_analytics_data;
pub mod auth_token;
pub mod cookie_jar;
pub mod customer_items;

pub use app_analytics_data::{read_app_analytics_data, AppAnalyticsData};
pub use auth_token::{read_auth_token_claims, AuthTokenClaims};
pub use cookie_jar::CookieJar;
pub use customer_items::read_customer_items;

pub const IS_APP_COOKIE: &str = "is_app";
pub const CLIENT_ID_COOKIE: &str = "client_id";
pub const SESSION_ID_COOKIE: &str = "session_id";
pub const BASH_PAY_BETA_COOKIE: &str = "bashpaybeta";
pub const HEADLESS_CHECKOUT_BETA_COOKIE: &str = "bash_checkout_beta";
pub const APP_ANALYTICS_DATA_COOKIE: &str = "app_analytics_data";
pub const GA_DATA_COOKIE: &str = "ga_data";
pub const SHOPPING_WEB_VIEW_COOKIE: &str = "swv";
pub const AUTH_COOKIE_PREFIX: &str = "VtexIdclientAutCookie_";
