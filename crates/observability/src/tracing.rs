//! Tracing/logging initialization.
//!
//! Two entry points: a process-wide JSON subscriber driven by `RUST_LOG`, and
//! a thread-scoped subscriber for a single authentication attempt whose
//! verbosity comes from the session's configured [`LogLevel`]. Both write to
//! stderr by default.

use pam_policy_core::LogLevel;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // JSON logs + timestamps on stderr, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Maximum tracing level emitted at a session log level.
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::None => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
    }
}

/// Keeps a session's subscriber installed on the current thread.
///
/// Dropping it restores whatever subscriber was active before.
#[must_use = "the session subscriber is removed when the guard is dropped"]
pub struct SessionLogGuard {
    level: LogLevel,
    _default: tracing::subscriber::DefaultGuard,
}

impl SessionLogGuard {
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

impl core::fmt::Debug for SessionLogGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionLogGuard")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Install a subscriber for one session on the current thread.
///
/// Events above `level` are suppressed. Log lines go to stderr, never to
/// stdout, which belongs to the host program. Concurrent sessions on other
/// threads are unaffected.
pub fn session_logging(level: LogLevel) -> SessionLogGuard {
    install(level, std::io::stderr, false)
}

/// Like [`session_logging`], with the JSON lines written to `writer`.
///
/// At [`LogLevel::Debug`] every event is additionally mirrored,
/// human-readable, to stderr.
pub fn session_logging_to<W>(level: LogLevel, writer: W) -> SessionLogGuard
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    install(level, writer, true)
}

fn install<W>(level: LogLevel, writer: W, mirror_debug: bool) -> SessionLogGuard
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = level_filter(level);

    let primary = fmt::layer()
        .json()
        .with_writer(writer)
        .with_timer(fmt::time::SystemTime)
        .with_target(false)
        .with_filter(filter);

    let mirror = (mirror_debug && level >= LogLevel::Debug).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter)
    });

    let subscriber = Registry::default().with(primary).with(mirror);

    SessionLogGuard {
        level,
        _default: tracing::subscriber::set_default(subscriber),
    }
}
