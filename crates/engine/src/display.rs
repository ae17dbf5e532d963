//! Display phase: replay engine-specified messages through the conversation
//! and collect answers to prompts.

use pam_policy_core::{DisplayResponse, DisplayResponses};
use pam_policy_transport::{fetch, Method, Transport};
use tracing::{debug, error, info};

use crate::conversation::Conversation;
use crate::schema::{display_entries, DisplayStyle};

/// Run the display phase against `endpoint`.
///
/// An empty endpoint, an unreachable engine or a malformed `display_spec`
/// all yield whatever was collected so far (possibly nothing).
pub fn run_display<T, C>(transport: &T, endpoint: &str, conversation: &mut C) -> DisplayResponses
where
    T: Transport + ?Sized,
    C: Conversation + ?Sized,
{
    let mut responses = DisplayResponses::new();

    if endpoint.is_empty() {
        info!("display endpoint is empty; not proceeding");
        return responses;
    }

    let Some(result) = fetch(transport, Method::Get, endpoint, None) else {
        return responses;
    };

    let entries = match display_entries(&result) {
        Ok(entries) => entries,
        Err(err) => {
            error!(error = %err, "invalid display spec");
            return responses;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                error!(error = %err, "invalid display spec entry; abandoning remaining entries");
                break;
            }
        };

        let style = match entry.style {
            DisplayStyle::Known(style) => style,
            DisplayStyle::Unrecognized(style) => {
                error!(%style, "received invalid display style");
                continue;
            }
        };

        debug!(%style, message = %entry.message, "calling conversation function");
        let answer = match conversation.converse(style, &entry.message) {
            Ok(answer) => answer,
            Err(err) => {
                error!(error = %err, "received error from conversation function");
                continue;
            }
        };

        if let Some(key) = entry.key {
            if answer.is_some() {
                debug!(%key, "collected a prompt response");
            }
            responses.push(DisplayResponse::new(key, answer));
        }
    }

    responses
}
