pub use collector_adapter_trait::*;
pub use collector_payload::CollectorRequest;
pub use http_collector_adapter::HttpCollectorAdapter;

pub mod collector_adapter_trait;
pub mod collector_payload;
pub mod http_collector_adapter;
