use checkout_analytics::host::TagManagerCallback;
use checkout_analytics::{DataLayer, HostEnvironment, MessageBridge, ParentChannel, TagManager};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct RecordingDataLayer {
    pub entries: Mutex<Vec<Value>>,
}

impl DataLayer for RecordingDataLayer {
    fn push(&self, entry: Value) {
        self.entries.lock().push(entry);
    }
}

#[derive(Default)]
pub struct RecordingBridge {
    pub messages: Mutex<Vec<String>>,
}

impl MessageBridge for RecordingBridge {
    fn post_message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingParentChannel {
    pub messages: Mutex<Vec<(String, String)>>,
}

impl ParentChannel for RecordingParentChannel {
    fn post_message(&self, message: &str, target_origin: &str) {
        self.messages
            .lock()
            .push((message.to_string(), target_origin.to_string()));
    }
}

/// Answers field lookups synchronously from a fixed table. Unknown fields never
/// get a callback.
#[derive(Default)]
pub struct ImmediateTagManager {
    pub fields: HashMap<String, String>,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl ImmediateTagManager {
    pub fn with_ids(client_id: &str, session_id: &str) -> Self {
        Self {
            fields: HashMap::from([
                ("client_id".to_string(), client_id.to_string()),
                ("session_id".to_string(), session_id.to_string()),
            ]),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl TagManager for ImmediateTagManager {
    fn get(&self, measurement_id: &str, field_name: &str, callback: TagManagerCallback) {
        self.requests
            .lock()
            .push((measurement_id.to_string(), field_name.to_string()));

        if let Some(value) = self.fields.get(field_name) {
            callback(value.clone());
        }
    }
}

/// Keeps every callback without ever invoking it, like a tag manager that never
/// finished loading.
#[derive(Default)]
pub struct SilentTagManager {
    pub pending_callbacks: Mutex<Vec<TagManagerCallback>>,
}

impl TagManager for SilentTagManager {
    fn get(&self, _measurement_id: &str, _field_name: &str, callback: TagManagerCallback) {
        self.pending_callbacks.lock().push(callback);
    }
}

pub struct MockHost {
    pub data_layer: Arc<RecordingDataLayer>,
    pub bridge: Arc<RecordingBridge>,
    pub parent: Arc<RecordingParentChannel>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            data_layer: Arc::new(RecordingDataLayer::default()),
            bridge: Arc::new(RecordingBridge::default()),
            parent: Arc::new(RecordingParentChannel::default()),
        }
    }

    /// A page embedded in another page, without an app bridge.
    pub fn embedded_environment(&self) -> HostEnvironment {
        HostEnvironment::new()
            .with_data_layer(self.data_layer.clone())
            .with_parent_channel(self.parent.clone())
    }

    /// A page running inside the native app's web view.
    pub fn app_environment(&self) -> HostEnvironment {
        self.embedded_environment()
            .with_app_bridge(self.bridge.clone())
    }

    pub fn data_layer_entries(&self) -> Vec<Value> {
        self.data_layer.entries.lock().clone()
    }

    pub fn bridge_messages(&self) -> Vec<Value> {
        self.bridge
            .messages
            .lock()
            .iter()
            .map(|m| serde_json::from_str(m).unwrap())
            .collect()
    }

    pub fn parent_messages(&self) -> Vec<(Value, String)> {
        self.parent
            .messages
            .lock()
            .iter()
            .map(|(m, origin)| (serde_json::from_str(m).unwrap(), origin.clone()))
            .collect()
    }
}
