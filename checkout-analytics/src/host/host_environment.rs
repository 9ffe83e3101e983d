use std::sync::Arc;

use super::{DataLayer, MessageBridge, ParentChannel, TagManager};
use crate::identity::user_agent::is_mobile_user_agent;
use crate::log_d;

const TAG: &str = stringify!(HostEnvironment);
const ANY_ORIGIN: &str = "*";

/// The parts of the hosting page the analytics pipeline talks to. Every collaborator
/// is optional, missing tooling must never break the page.
#[derive(Clone, Default)]
pub struct HostEnvironment {
    pub tag_manager: Option<Arc<dyn TagManager>>,
    pub data_layer: Option<Arc<dyn DataLayer>>,
    pub app_bridge: Option<Arc<dyn MessageBridge>>,
    pub parent_channel: Option<Arc<dyn ParentChannel>>,
    pub user_agent: Option<String>,
}

impl HostEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tag_manager(mut self, tag_manager: Arc<dyn TagManager>) -> Self {
        self.tag_manager = Some(tag_manager);
        self
    }

    #[must_use]
    pub fn with_data_layer(mut self, data_layer: Arc<dyn DataLayer>) -> Self {
        self.data_layer = Some(data_layer);
        self
    }

    #[must_use]
    pub fn with_app_bridge(mut self, app_bridge: Arc<dyn MessageBridge>) -> Self {
        self.app_bridge = Some(app_bridge);
        self
    }

    #[must_use]
    pub fn with_parent_channel(mut self, parent_channel: Arc<dyn ParentChannel>) -> Self {
        self.parent_channel = Some(parent_channel);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn is_mobile(&self) -> bool {
        self.user_agent.as_deref().is_some_and(is_mobile_user_agent)
    }

    /// Forwards a serialized event to the app bridge, or to the parent page when
    /// no bridge is present.
    pub fn post_message(&self, message: &str) {
        if let Some(bridge) = &self.app_bridge {
            log_d!(TAG, "Posting event to app bridge");
            bridge.post_message(message);
            return;
        }

        if let Some(parent) = &self.parent_channel {
            log_d!(TAG, "Posting event to parent channel");
            parent.post_message(message, ANY_ORIGIN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<String>>,
    }

    impl MessageBridge for Recorder {
        fn post_message(&self, message: &str) {
            self.messages.lock().push(message.to_string());
        }
    }

    impl ParentChannel for Recorder {
        fn post_message(&self, message: &str, target_origin: &str) {
            self.messages.lock().push(format!("{target_origin} {message}"));
        }
    }

    #[test]
    fn test_prefers_app_bridge() {
        let bridge = Arc::new(Recorder::default());
        let parent = Arc::new(Recorder::default());
        let host = HostEnvironment::new()
            .with_app_bridge(bridge.clone())
            .with_parent_channel(parent.clone());

        host.post_message("{}");

        assert_eq!(*bridge.messages.lock(), vec!["{}".to_string()]);
        assert!(parent.messages.lock().is_empty());
    }

    #[test]
    fn test_falls_back_to_parent_with_any_origin() {
        let parent = Arc::new(Recorder::default());
        let host = HostEnvironment::new().with_parent_channel(parent.clone());

        host.post_message("{\"name\":\"purchase\"}");

        assert_eq!(
            *parent.messages.lock(),
            vec!["* {\"name\":\"purchase\"}".to_string()]
        );
    }

    #[test]
    fn test_mobile_detection_uses_user_agent() {
        let host = HostEnvironment::new().with_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
        );
        assert!(host.is_mobile());
        assert!(!HostEnvironment::new().is_mobile());
    }
}
