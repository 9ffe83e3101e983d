pub mod event_buffer;
pub mod event_shipper;
pub mod shipper_state;
pub mod shipper_stats;

pub use event_buffer::EventBuffer;
pub use event_shipper::EventShipper;
pub use shipper_state::{FlushRetries, ShipperState};
pub use shipper_stats::{ShipperStats, ShipperStatsSnapshot};
