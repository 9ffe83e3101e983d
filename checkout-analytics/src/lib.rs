pub use analytics::EventAnalytics;
pub use analytics_err::AnalyticsErr;
pub use analytics_options::{AnalyticsOptions, AnalyticsOptionsBuilder};
pub use analytics_runtime::AnalyticsRuntime;
pub use collector_adapter::*;
pub use cookies::CookieJar;
pub use event_shipper::{ShipperState, ShipperStatsSnapshot};
pub use events::{EventIntent, NormalizedEvent, OrderTotals, TransportEvent};
pub use host::{DataLayer, HostEnvironment, MessageBridge, ParentChannel, TagManager};
pub use identity::{CookieIdentityProvider, IdentityContext, IdentityProvider};
pub use output_logger::{LogLevel, OutputLogProvider};

pub mod analytics_options;
pub mod analytics_runtime;
pub mod cookies;
pub mod event_shipper;
pub mod events;
pub mod host;
pub mod identity;
pub mod logging_utils;
pub mod networking;
pub mod output_logger;

mod analytics;
mod analytics_err;
mod collector_adapter;
mod macros;
