//! Authz phase: submit everything collected to the policy engine and turn
//! its answer into a [`Verdict`].
//!
//! Fail-closed: any path that does not end in a well-formed `allow: true`
//! denies.

use pam_policy_core::{DisplayResponses, PullResponses, SessionFacts, Verdict};
use pam_policy_transport::{fetch, Method, Transport};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::{error, info};

use crate::schema::AuthzResult;

/// Request body for the authz endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthzRequest<'a> {
    pub input: AuthzInput<'a>,
}

/// The composite document the policy engine evaluates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthzInput<'a> {
    /// Prompt key → answer; later answers overwrite earlier ones. Prompts
    /// that got no answer are absent.
    pub display_responses: Map<String, JsonValue>,
    pub pull_responses: PullDocument,
    pub sysinfo: &'a SessionFacts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PullDocument {
    /// Path → parsed contents (`null` when loading failed).
    pub files: Map<String, JsonValue>,
    /// Name → value (`""` when unset).
    pub env_vars: Map<String, JsonValue>,
}

impl<'a> AuthzRequest<'a> {
    /// Fold phase outputs into the request document.
    pub fn assemble(display: DisplayResponses, pull: PullResponses, facts: &'a SessionFacts) -> Self {
        let mut display_responses = Map::new();
        for response in display {
            let Some(input) = response.input else {
                error!(key = %response.key, "no answer for display response; leaving it out");
                continue;
            };
            display_responses.insert(response.key, JsonValue::String(input));
        }

        let mut pull_responses = PullDocument::default();
        for file in pull.files {
            pull_responses
                .files
                .insert(file.name, file.contents.unwrap_or(JsonValue::Null));
        }
        for var in pull.env_vars {
            pull_responses
                .env_vars
                .insert(var.name, JsonValue::String(var.value));
        }

        Self {
            input: AuthzInput {
                display_responses,
                pull_responses,
                sysinfo: facts,
            },
        }
    }
}

/// Run the authz phase against `endpoint`.
pub fn run_authz<T>(
    transport: &T,
    endpoint: &str,
    display: DisplayResponses,
    pull: PullResponses,
    facts: &SessionFacts,
) -> Verdict
where
    T: Transport + ?Sized,
{
    if endpoint.is_empty() {
        error!("authz endpoint is empty; denying");
        return Verdict::Deny;
    }

    let body = match serde_json::to_value(AuthzRequest::assemble(display, pull, facts)) {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "could not build authz input document; denying");
            return Verdict::Deny;
        }
    };

    let Some(result) = fetch(transport, Method::Post, endpoint, Some(&body)) else {
        return Verdict::Deny;
    };

    let decoded = match AuthzResult::decode(&result) {
        Ok(decoded) => decoded,
        Err(err) => {
            error!(error = %err, "invalid authz result; denying");
            return Verdict::Deny;
        }
    };

    let verdict = Verdict::from_allow(decoded.allow);

    for message in &decoded.errors.values {
        error!(policy_error = %message, "received authz error log from policy engine");
    }
    if let Some(err) = decoded.errors.violation {
        error!(error = %err, "invalid authz errors field");
    }

    info!(%verdict, "authz decision");
    verdict
}
