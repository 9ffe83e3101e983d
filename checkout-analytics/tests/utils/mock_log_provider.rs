use std::time::Duration;

use checkout_analytics::OutputLogProvider;
use parking_lot::Mutex;

#[derive(Debug, PartialEq)]
pub enum RecordedLog {
    Debug(String, String),
    Info(String, String),
    Warn(String, String),
    Error(String, String),
    Init,
    Shutdown,
}

pub struct MockLogProvider {
    pub logs: Mutex<Vec<RecordedLog>>,
}

impl MockLogProvider {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, log: RecordedLog) {
        self.logs
            .try_lock_for(Duration::from_secs(5))
            .unwrap()
            .push(log);
    }
}

impl OutputLogProvider for MockLogProvider {
    fn initialize(&self) {
        self.record(RecordedLog::Init);
    }

    fn debug(&self, tag: &str, msg: String) {
        self.record(RecordedLog::Debug(tag.to_string(), msg));
    }

    fn info(&self, tag: &str, msg: String) {
        self.record(RecordedLog::Info(tag.to_string(), msg));
    }

    fn warn(&self, tag: &str, msg: String) {
        self.record(RecordedLog::Warn(tag.to_string(), msg));
    }

    fn error(&self, tag: &str, msg: String) {
        self.record(RecordedLog::Error(tag.to_string(), msg));
    }

    fn shutdown(&self) {
        self.record(RecordedLog::Shutdown);
    }
}
