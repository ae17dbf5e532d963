use thiserror::Error;

use crate::Method;

/// A policy engine call that produced no usable `result`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("unable to initialize HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to encode request body for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP request {method} {endpoint} failed: {source}")]
    Request {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request {method} {endpoint} returned status {status}")]
    Status {
        method: Method,
        endpoint: String,
        status: u16,
    },

    #[error("error parsing JSON response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("top level value of JSON response from {endpoint} is not type object")]
    NotAnObject { endpoint: String },

    #[error(
        "value of field 'result' does not have type object in JSON response; \
         please ensure that your endpoint '{endpoint}' matches your package path"
    )]
    MissingResult { endpoint: String },
}

impl TransportError {
    /// Whether the call gave up because the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Request { source, .. } if source.is_timeout())
    }
}
