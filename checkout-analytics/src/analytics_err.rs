use crate::networking::network_error::NetworkError;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize)]
pub enum AnalyticsErr {
    // System / Concurrency
    LockFailure(String),
    ThreadFailure(String),

    // Network
    NetworkError(NetworkError),

    // Data Format / Serialization / Parsing
    SerializationError(String),
    JsonParseError(String, String),
    CookieParseError(String, String),
    TokenDecodeError(String),

    // Lifecycle
    InvalidOperation(String),
    ShutdownFailure(String),
}

impl Display for AnalyticsErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyticsErr::LockFailure(msg) => write!(f, "Failed to acquire lock: {msg}"),
            AnalyticsErr::ThreadFailure(msg) => write!(f, "Thread failure: {msg}"),

            AnalyticsErr::NetworkError(error) => write!(f, "NetworkError|{error}"),

            AnalyticsErr::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            AnalyticsErr::JsonParseError(type_name, err_msg) => {
                write!(f, "Failed to parse JSON {type_name} - {err_msg}")
            }
            AnalyticsErr::CookieParseError(cookie_name, err_msg) => {
                write!(f, "Failed to parse cookie {cookie_name} - {err_msg}")
            }
            AnalyticsErr::TokenDecodeError(msg) => write!(f, "Failed to decode auth token: {msg}"),

            AnalyticsErr::InvalidOperation(e) => write!(f, "Invalid operation: {e}"),
            AnalyticsErr::ShutdownFailure(e) => write!(f, "Shutdown failure: {e}"),
        }
    }
}

impl AnalyticsErr {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsErr::LockFailure(_) => "LockFailure",
            AnalyticsErr::ThreadFailure(_) => "ThreadFailure",

            AnalyticsErr::NetworkError(e) => e.name(),

            AnalyticsErr::SerializationError(_) => "SerializationError",
            AnalyticsErr::JsonParseError(_, _) => "JsonParseError",
            AnalyticsErr::CookieParseError(_, _) => "CookieParseError",
            AnalyticsErr::TokenDecodeError(_) => "TokenDecodeError",

            AnalyticsErr::InvalidOperation(_) => "InvalidOperation",
            AnalyticsErr::ShutdownFailure(_) => "ShutdownFailure",
        }
    }
}

impl std::error::Error for AnalyticsErr {}
