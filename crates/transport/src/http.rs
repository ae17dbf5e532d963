//! Blocking HTTP transport backed by `reqwest`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::{unwrap_envelope, JsonObject, Method, Transport, TransportError};

/// Upper bound on a single policy engine call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client settings.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total time allowed per request, connect included.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Talks JSON over HTTP to the policy engine at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, config: TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Base URL and path joined as-is; separators are the caller's business.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonObject, TransportError> {
        let url = self.url_for(path);
        debug!(%method, %url, "initializing HTTP request");

        let http_method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut req = self
            .client
            .request(http_method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            let payload = serde_json::to_string(body).map_err(|source| TransportError::Encode {
                endpoint: path.to_string(),
                source,
            })?;
            debug!(body = %payload, "HTTP request body");
            req = req.body(payload);
        }

        let request_failed = |source: reqwest::Error| TransportError::Request {
            method,
            endpoint: path.to_string(),
            source,
        };

        let resp = req.send().map_err(request_failed)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                method,
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().map_err(request_failed)?;
        debug!(status = status.as_u16(), body = %text, "HTTP response body");

        unwrap_envelope(path, &text)
    }
}
