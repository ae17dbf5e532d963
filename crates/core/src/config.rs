//! Module configuration parsed from `flag=value` arguments.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ConfigError;

/// Session log severity. Higher is more verbose.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Log nothing.
    None,
    /// Log only errors.
    Error,
    /// Log general information.
    #[default]
    Info,
    /// Log verbosely and mirror to stderr.
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
    }
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags accepted by the module. Unset flags are empty strings.
///
/// An empty phase endpoint disables that phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Base URL of the policy engine; endpoints are appended verbatim.
    pub url: String,
    pub display_endpoint: String,
    pub pull_endpoint: String,
    pub authz_endpoint: String,
    pub log_level: String,
}

impl ModuleConfig {
    /// Parse module arguments. Bad arguments are logged and skipped.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            info!(arg, "parsing arg");
            if let Err(err) = config.apply_arg(arg) {
                error!(error = %err, "skipping module arg");
            }
        }
        config
    }

    /// Apply a single `flag=value` argument.
    pub fn apply_arg(&mut self, arg: &str) -> Result<(), ConfigError> {
        let mut parts = arg.split('=');
        let (Some(flag), Some(value)) = (parts.next(), parts.next()) else {
            return Err(ConfigError::Malformed(arg.to_string()));
        };
        if parts.next().is_some() {
            return Err(ConfigError::MultipleSeparators(arg.to_string()));
        }

        let slot = match flag {
            "url" => &mut self.url,
            "display_endpoint" => &mut self.display_endpoint,
            "pull_endpoint" => &mut self.pull_endpoint,
            "authz_endpoint" => &mut self.authz_endpoint,
            "log_level" => &mut self.log_level,
            other => return Err(ConfigError::UnknownFlag(other.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Effective session log level.
    ///
    /// An unset flag means the default level; an unrecognised one is logged
    /// and also falls back to the default.
    pub fn log_level(&self) -> LogLevel {
        if self.log_level.is_empty() {
            return LogLevel::default();
        }
        match self.log_level.parse() {
            Ok(level) => level,
            Err(err) => {
                error!(error = %err, "invalid log level defined in module args, using default");
                LogLevel::default()
            }
        }
    }
}
