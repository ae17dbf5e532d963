//! Interactive conversation with the party being authenticated.

use pam_policy_core::CallbackError;

/// How a message is presented, and whether an answer is expected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MessageStyle {
    /// Ask for input and echo it back.
    PromptEchoOn,
    /// Ask for input without echoing (passwords, OTPs).
    PromptEchoOff,
    /// Informational text.
    Info,
    /// Error text.
    Error,
}

impl MessageStyle {
    /// Exact match against the policy engine's style names.
    pub fn from_wire(style: &str) -> Option<Self> {
        match style {
            "prompt_echo_on" => Some(MessageStyle::PromptEchoOn),
            "prompt_echo_off" => Some(MessageStyle::PromptEchoOff),
            "info" => Some(MessageStyle::Info),
            "error" => Some(MessageStyle::Error),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            MessageStyle::PromptEchoOn => "prompt_echo_on",
            MessageStyle::PromptEchoOff => "prompt_echo_off",
            MessageStyle::Info => "info",
            MessageStyle::Error => "error",
        }
    }

    pub fn is_prompt(&self) -> bool {
        matches!(self, MessageStyle::PromptEchoOn | MessageStyle::PromptEchoOff)
    }
}

impl core::fmt::Display for MessageStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Host-provided conversation function.
///
/// Called with exactly one message at a time. Returns the answer text, if
/// any; non-prompting styles normally return `Ok(None)`. The call may block
/// on a human for as long as the host allows.
pub trait Conversation {
    fn converse(&mut self, style: MessageStyle, message: &str) -> Result<Option<String>, CallbackError>;
}

impl<F> Conversation for F
where
    F: FnMut(MessageStyle, &str) -> Result<Option<String>, CallbackError>,
{
    fn converse(&mut self, style: MessageStyle, message: &str) -> Result<Option<String>, CallbackError> {
        self(style, message)
    }
}
