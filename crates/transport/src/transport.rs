//! Transport contract shared by the session phases.

use serde_json::Value as JsonValue;
use tracing::error;

use crate::TransportError;

/// A JSON object as returned by the policy engine.
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// HTTP methods used against the policy engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous request/response access to the policy engine.
///
/// `path` is appended verbatim to the engine's base URL. On success the
/// envelope's nested `result` object is returned; anything else is an error.
pub trait Transport {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonObject, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonObject, TransportError> {
        (**self).request(method, path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonObject, TransportError> {
        (**self).request(method, path, body)
    }
}

/// Issue a request, logging a failure and returning `None` for it.
///
/// Phases treat `None` as "nothing to do".
pub fn fetch<T: Transport + ?Sized>(
    transport: &T,
    method: Method,
    path: &str,
    body: Option<&JsonValue>,
) -> Option<JsonObject> {
    match transport.request(method, path, body) {
        Ok(result) => Some(result),
        Err(err) => {
            error!(
                endpoint = path,
                method = %method,
                timeout = err.is_timeout(),
                error = %err,
                "policy engine request failed"
            );
            None
        }
    }
}

/// Parse a response body and take the `result` object out of its envelope.
pub fn unwrap_envelope(endpoint: &str, body: &str) -> Result<JsonObject, TransportError> {
    let value: JsonValue =
        serde_json::from_str(body).map_err(|source| TransportError::Parse {
            endpoint: endpoint.to_string(),
            source,
        })?;

    let JsonValue::Object(mut envelope) = value else {
        return Err(TransportError::NotAnObject {
            endpoint: endpoint.to_string(),
        });
    };

    match envelope.remove("result") {
        Some(JsonValue::Object(result)) => Ok(result),
        _ => Err(TransportError::MissingResult {
            endpoint: endpoint.to_string(),
        }),
    }
}
