//! Records produced by the display and pull phases.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::accumulator::ResponseList;

/// Answer collected for one prompting display entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayResponse {
    pub key: String,

    /// `None` when the conversation produced no text at all.
    pub input: Option<String>,
}

impl DisplayResponse {
    pub fn new(key: impl Into<String>, input: Option<String>) -> Self {
        Self {
            key: key.into(),
            input,
        }
    }
}

/// Display responses in the order the entries were presented.
///
/// Keys are not unique here; they collapse (last write wins) only when the
/// authz input document is assembled.
pub type DisplayResponses = ResponseList<DisplayResponse>;

/// A JSON file requested by the pull phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResponse {
    /// Path exactly as requested by the policy engine.
    pub name: String,

    /// Parsed file contents, `None` if the file could not be loaded.
    pub contents: Option<JsonValue>,
}

/// An environment variable requested by the pull phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVarResponse {
    pub name: String,

    /// Empty when unset.
    pub value: String,
}

/// Everything the pull phase collected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PullResponses {
    pub files: ResponseList<FileResponse>,
    pub env_vars: ResponseList<EnvVarResponse>,
}

impl PullResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.env_vars.is_empty()
    }
}
