use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{atomic::AtomicBool, Arc},
};

use crate::AnalyticsErr;

#[derive(Clone, Default)]
pub struct RequestArgs {
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub headers: Option<HashMap<String, String>>,
    pub timeout_ms: u64,
    pub is_shutdown: Option<Arc<AtomicBool>>,
}

impl RequestArgs {
    pub fn populate_headers(&mut self, extra_headers: HashMap<String, String>) {
        if let Some(my_headers) = &mut self.headers {
            for (key, value) in extra_headers {
                my_headers.entry(key).or_insert(value);
            }
        } else {
            self.headers = Some(extra_headers);
        }
    }
}

pub struct Response {
    pub status_code: u16,
    pub data: Option<Vec<u8>>,
    pub error: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(PartialEq, Clone, Debug)]
pub enum HttpMethod {
    POST,
}

#[async_trait]
pub trait NetworkProvider: Sync + Send {
    async fn send(&self, method: &HttpMethod, args: &RequestArgs) -> Response;
    async fn shutdown(&self) -> Result<(), AnalyticsErr>;
}
