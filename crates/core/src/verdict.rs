//! Final outcome of an authentication attempt.

use serde::Serialize;

/// Binary outcome of a session; the only value the host shell observes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Grant,
    Deny,
}

impl Verdict {
    /// `Grant` only for a literal `true`.
    pub fn from_allow(allow: bool) -> Self {
        if allow { Verdict::Grant } else { Verdict::Deny }
    }
}

impl core::fmt::Display for Verdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Verdict::Grant => "grant",
            Verdict::Deny => "deny",
        })
    }
}
