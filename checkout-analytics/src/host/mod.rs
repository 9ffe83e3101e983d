pub mod host_environment;
pub mod message_bridge;
pub mod tag_manager;

pub use host_environment::HostEnvironment;
pub use message_bridge::{MessageBridge, ParentChannel};
pub use tag_manager::{push_to_data_layer, DataLayer, TagManager, TagManagerCallback};
