//! Tracing and logging setup (shared by library and binaries).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber construction (process-wide and per session).
pub mod tracing;

pub use self::tracing::{level_filter, session_logging, session_logging_to, SessionLogGuard};
