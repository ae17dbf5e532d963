//! `pam-policy-engine`: the display, pull and authz phases of a
//! remote-policy-governed authentication attempt.
//!
//! Policy evaluation itself happens in the remote engine; this crate only
//! shapes, transports and interprets the documents exchanged with it.

pub mod authz;
pub mod conversation;
pub mod display;
pub mod pull;
pub mod schema;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use authz::{run_authz, AuthzInput, AuthzRequest, PullDocument};
pub use conversation::{Conversation, MessageStyle};
pub use display::run_display;
pub use pull::{load_json_file, run_pull, Environment, ProcessEnv};
pub use schema::{AuthzResult, DisplayEntry, DisplayStyle, StringArray};
pub use session::{authenticate, Endpoints, Session, SessionReport};
