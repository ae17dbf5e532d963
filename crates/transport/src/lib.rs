//! `pam-policy-transport`: HTTP/JSON access to the policy engine.
//!
//! Every phase talks to the engine through [`Transport`]. Callers only ever
//! see the `result` object nested inside the engine's response envelope.

pub mod error;
pub mod http;
pub mod transport;

pub use error::TransportError;
pub use http::{HttpTransport, TransportConfig, DEFAULT_TIMEOUT};
pub use transport::{fetch, unwrap_envelope, JsonObject, Method, Transport};
