use serde::Serialize;
use std::fmt;

use crate::logging_utils::sanitize_auth_token;

type RequestUrl = String;

#[derive(PartialEq, Debug, Clone, Serialize)]
pub enum NetworkError {
    ShutdownError(RequestUrl),
    DisableNetworkOn(RequestUrl),
    RequestFailed(RequestUrl, Option<u16>, String),
}

impl NetworkError {
    pub fn name(&self) -> &'static str {
        match self {
            NetworkError::ShutdownError(_) => "ShutdownError",
            NetworkError::DisableNetworkOn(_) => "DisableNetworkOn",
            NetworkError::RequestFailed(_, _, _) => "RequestFailed",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetworkError::RequestFailed(_, status, _) => *status,
            _ => None,
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ShutdownError(url) => write!(f, "ShutdownError: {url}"),
            NetworkError::DisableNetworkOn(url) => write!(f, "DisableNetworkOn: {url}"),
            NetworkError::RequestFailed(url, status, message) => {
                let message = sanitize_auth_token(message);
                let status_display = match status {
                    Some(code) => code.to_string(),
                    None => "None".to_string(),
                };
                write!(f, "RequestFailed: {url} {status_display} {message}")
            }
        }
    }
}
