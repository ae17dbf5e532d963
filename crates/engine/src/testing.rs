//! In-memory collaborators for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use pam_policy_core::CallbackError;
use pam_policy_transport::{JsonObject, Method, Transport, TransportError};
use serde_json::Value as JsonValue;

use crate::conversation::{Conversation, MessageStyle};
use crate::pull::Environment;

/// Serves canned `result` objects by path and records requests.
#[derive(Default)]
pub(crate) struct FakeTransport {
    results: HashMap<String, JsonValue>,
    pub(crate) requests: RefCell<Vec<(Method, String, Option<JsonValue>)>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, path: &str, result: JsonValue) -> Self {
        self.results.insert(path.to_string(), result);
        self
    }
}

impl Transport for FakeTransport {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonObject, TransportError> {
        self.requests
            .borrow_mut()
            .push((method, path.to_string(), body.cloned()));

        match self.results.get(path) {
            Some(JsonValue::Object(result)) => Ok(result.clone()),
            _ => Err(TransportError::MissingResult {
                endpoint: path.to_string(),
            }),
        }
    }
}

/// Answers prompts from a script and records every call.
#[derive(Default)]
pub(crate) struct ScriptedConversation {
    pub(crate) answers: HashMap<String, Result<Option<String>, CallbackError>>,
    pub(crate) calls: Vec<(MessageStyle, String)>,
}

impl ScriptedConversation {
    pub(crate) fn answering(pairs: &[(&str, &str)]) -> Self {
        Self {
            answers: pairs
                .iter()
                .map(|(msg, answer)| (msg.to_string(), Ok(Some(answer.to_string()))))
                .collect(),
            calls: Vec::new(),
        }
    }
}

impl Conversation for ScriptedConversation {
    fn converse(
        &mut self,
        style: MessageStyle,
        message: &str,
    ) -> Result<Option<String>, CallbackError> {
        self.calls.push((style, message.to_string()));
        self.answers.get(message).cloned().unwrap_or(Ok(None))
    }
}

/// Environment backed by a fixed table.
#[derive(Default)]
pub(crate) struct FakeEnv(pub(crate) HashMap<String, String>);

impl FakeEnv {
    pub(crate) fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for FakeEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}
