/// Message bridge injected by the native app when the page runs inside a web view.
pub trait MessageBridge: Send + Sync {
    fn post_message(&self, message: &str);
}

/// The embedding (parent) page's message channel.
pub trait ParentChannel: Send + Sync {
    fn post_message(&self, message: &str, target_origin: &str);
}
