//! `pam-policy-core`: shared types for policy-governed authentication.
//!
//! This crate holds the data model exchanged between the session phases and
//! their configuration. It performs no network IO.

pub mod accumulator;
pub mod config;
pub mod error;
pub mod facts;
pub mod id;
pub mod responses;
pub mod verdict;

pub use accumulator::ResponseList;
pub use config::{LogLevel, ModuleConfig};
pub use error::{CallbackError, ConfigError, JsonKind, ResourceError, SchemaError};
pub use facts::{FactId, FactsProvider, SessionFacts, StaticFacts};
pub use id::SessionId;
pub use responses::{DisplayResponse, DisplayResponses, EnvVarResponse, FileResponse, PullResponses};
pub use verdict::Verdict;
