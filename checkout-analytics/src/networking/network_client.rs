use super::providers::get_network_provider;
use super::{HttpMethod, NetworkError, NetworkProvider, RequestArgs};
use crate::{log_d, log_i, log_w};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SHUTDOWN_ERROR: &str = "Request was aborted because the client is shutting down";

const TAG: &str = stringify!(NetworkClient);

pub struct NetworkClient {
    headers: HashMap<String, String>,
    is_shutdown: Arc<AtomicBool>,
    disable_network: bool,
    net_provider: Arc<dyn NetworkProvider>,
}

impl NetworkClient {
    #[must_use]
    pub fn new(headers: Option<HashMap<String, String>>, disable_network: Option<bool>) -> Self {
        let disable_network = disable_network.unwrap_or(false);

        NetworkClient {
            headers: headers.unwrap_or_default(),
            is_shutdown: Arc::new(AtomicBool::new(false)),
            disable_network,
            net_provider: get_network_provider(disable_network),
        }
    }

    #[must_use]
    pub fn with_provider(
        headers: Option<HashMap<String, String>>,
        net_provider: Arc<dyn NetworkProvider>,
    ) -> Self {
        NetworkClient {
            headers: headers.unwrap_or_default(),
            is_shutdown: Arc::new(AtomicBool::new(false)),
            disable_network: false,
            net_provider,
        }
    }

    pub fn shutdown(&self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// Posts `body` and reports whether the server accepted it. Any 2xx counts as
    /// accepted and the response body is never read.
    pub async fn post(
        &self,
        mut request_args: RequestArgs,
        body: Option<Vec<u8>>,
    ) -> Result<(), NetworkError> {
        request_args.body = body;
        self.make_request(HttpMethod::POST, request_args).await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        mut request_args: RequestArgs,
    ) -> Result<(), NetworkError> {
        let url = request_args.url.clone();

        if self.disable_network {
            log_d!(TAG, "Network is disabled, not sending request to {}", url);
            return Err(NetworkError::DisableNetworkOn(url));
        }

        let is_shutdown = match &request_args.is_shutdown {
            Some(is_shutdown) => is_shutdown.clone(),
            None => self.is_shutdown.clone(),
        };

        if is_shutdown.load(Ordering::SeqCst) {
            log_i!(TAG, "{}", SHUTDOWN_ERROR);
            return Err(NetworkError::ShutdownError(url));
        }

        request_args.populate_headers(self.headers.clone());

        let response = self.net_provider.send(&method, &request_args).await;

        let status = response.status_code;
        if (200..300).contains(&status) {
            return Ok(());
        }

        let error_message = response
            .error
            .unwrap_or_else(|| get_error_message_for_status(status));

        log_w!(
            TAG,
            "Request to {} failed with status {}: {}",
            url,
            status,
            error_message
        );

        let status = if status == 0 { None } else { Some(status) };
        Err(NetworkError::RequestFailed(url, status, error_message))
    }
}

fn get_error_message_for_status(status: u16) -> String {
    match status {
        400 => "Bad Request".to_string(),
        401 => "Unauthorized".to_string(),
        403 => "Forbidden".to_string(),
        404 => "Not Found".to_string(),
        408 => "Request Timeout".to_string(),
        429 => "Too Many Requests".to_string(),
        500 => "Internal Server Error".to_string(),
        502 => "Bad Gateway".to_string(),
        503 => "Service Unavailable".to_string(),
        504 => "Gateway Timeout".to_string(),
        0 => "Unknown Error".to_string(),
        _ => format!("HTTP Error {status}"),
    }
}
