//! Conversation over the controlling terminal.

use std::io::{BufRead, Write};

use pam_policy_core::CallbackError;
use pam_policy_engine::{Conversation, MessageStyle};

/// Prompts on `prompts`, reads one answer line per prompt from `input`.
///
/// Info text goes to `info`; error text and prompts go to `prompts`.
pub struct TerminalConversation<R, W, E> {
    input: R,
    info: W,
    prompts: E,
}

impl<R, W, E> TerminalConversation<R, W, E> {
    pub fn new(input: R, info: W, prompts: E) -> Self {
        Self {
            input,
            info,
            prompts,
        }
    }
}

impl<R: BufRead, W: Write, E: Write> Conversation for TerminalConversation<R, W, E> {
    fn converse(&mut self, style: MessageStyle, message: &str) -> Result<Option<String>, CallbackError> {
        let io_err = |err: std::io::Error| CallbackError::new(err.to_string());

        match style {
            MessageStyle::Info => {
                writeln!(self.info, "{message}").map_err(io_err)?;
                Ok(None)
            }
            MessageStyle::Error => {
                writeln!(self.prompts, "{message}").map_err(io_err)?;
                Ok(None)
            }
            // No echo control here: answers are read as plain lines.
            MessageStyle::PromptEchoOn | MessageStyle::PromptEchoOff => {
                write!(self.prompts, "{message} ").map_err(io_err)?;
                self.prompts.flush().map_err(io_err)?;

                let mut line = String::new();
                if self.input.read_line(&mut line).map_err(io_err)? == 0 {
                    return Ok(None);
                }
                Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
            }
        }
    }
}
