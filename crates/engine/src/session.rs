//! Session orchestration: display → pull → authz, strictly in order.

use chrono::{DateTime, Utc};
use pam_policy_core::{FactsProvider, LogLevel, ModuleConfig, SessionId, Verdict};
use pam_policy_observability::session_logging;
use pam_policy_transport::{HttpTransport, Transport, TransportConfig};
use serde::Serialize;
use tracing::{debug, error, info, info_span};

use crate::authz::run_authz;
use crate::conversation::Conversation;
use crate::display::run_display;
use crate::pull::{run_pull, Environment};

/// Phase endpoints; an empty string disables the phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub display: String,
    pub pull: String,
    pub authz: String,
}

impl From<&ModuleConfig> for Endpoints {
    fn from(config: &ModuleConfig) -> Self {
        Self {
            display: config.display_endpoint.clone(),
            pull: config.pull_endpoint.clone(),
            authz: config.authz_endpoint.clone(),
        }
    }
}

/// Summary of one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub display_responses: usize,
    pub files: usize,
    pub env_vars: usize,
    pub verdict: Verdict,
}

/// One authentication attempt against a policy engine.
///
/// Nothing here is shared between sessions; run one instance per attempt.
pub struct Session<T> {
    id: SessionId,
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self::with_id(SessionId::new(), transport, endpoints)
    }

    pub fn with_id(id: SessionId, transport: T, endpoints: Endpoints) -> Self {
        Self {
            id,
            transport,
            endpoints,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Run all three phases and return the outcome.
    ///
    /// Facts are gathered once, before any phase runs.
    pub fn run<C, F, E>(&self, conversation: &mut C, facts: &F, env: &E) -> SessionReport
    where
        C: Conversation + ?Sized,
        F: FactsProvider + ?Sized,
        E: Environment + ?Sized,
    {
        let span = info_span!("session", session_id = %self.id);
        let _enter = span.enter();
        let started_at = Utc::now();

        debug!("collecting session facts");
        let facts = facts.facts();

        debug!("commencing display cycle");
        let display = run_display(&self.transport, &self.endpoints.display, conversation);

        debug!("commencing pull cycle");
        let pull = run_pull(&self.transport, &self.endpoints.pull, env);

        let display_responses = display.len();
        let files = pull.files.len();
        let env_vars = pull.env_vars.len();

        debug!("commencing authz cycle");
        let verdict = run_authz(&self.transport, &self.endpoints.authz, display, pull, &facts);

        let report = SessionReport {
            session_id: self.id,
            started_at,
            finished_at: Utc::now(),
            display_responses,
            files,
            env_vars,
            verdict,
        };

        info!(
            %verdict,
            display_responses,
            files,
            env_vars,
            "session complete"
        );
        report
    }
}

/// Run a full attempt from module arguments, as a host shell would.
///
/// Logging starts at the default level until the arguments are parsed, then
/// switches to the configured one for the rest of the attempt. A transport
/// that cannot be built denies.
pub fn authenticate<I, S, C, F, E>(args: I, conversation: &mut C, facts: &F, env: &E) -> SessionReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    C: Conversation + ?Sized,
    F: FactsProvider + ?Sized,
    E: Environment + ?Sized,
{
    let config = {
        let _log = session_logging(LogLevel::default());
        ModuleConfig::from_args(args)
    };

    let level = config.log_level();
    let _log = session_logging(level);
    info!(%level, "session log level set");

    let session_id = SessionId::new();
    match HttpTransport::new(config.url.clone(), TransportConfig::default()) {
        Ok(transport) => Session::with_id(session_id, transport, Endpoints::from(&config))
            .run(conversation, facts, env),
        Err(err) => {
            error!(error = %err, "unable to initialize HTTP transport; denying");
            let now = Utc::now();
            SessionReport {
                session_id,
                started_at: now,
                finished_at: now,
                display_responses: 0,
                files: 0,
                env_vars: 0,
                verdict: Verdict::Deny,
            }
        }
    }
}
