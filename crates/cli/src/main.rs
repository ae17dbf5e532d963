use std::io::{self, BufReader};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pam_policy_core::{StaticFacts, Verdict};
use pam_policy_engine::{authenticate, ProcessEnv};

mod terminal;

use terminal::TerminalConversation;

#[derive(Parser, Debug)]
#[command(
    name = "pam-policy-check",
    version,
    about = "Run one policy-governed authentication attempt against a policy engine"
)]
struct Cli {
    /// Module arguments: url, display_endpoint, pull_endpoint, authz_endpoint, log_level
    #[arg(value_name = "FLAG=VALUE")]
    args: Vec<String>,

    /// User being authenticated
    #[arg(long)]
    user: Option<String>,

    /// Service requesting authentication
    #[arg(long)]
    service: Option<String>,

    /// Requesting user
    #[arg(long)]
    ruser: Option<String>,

    /// Requesting host
    #[arg(long)]
    rhost: Option<String>,

    #[arg(long, value_enum, default_value_t = Mode::Auth)]
    mode: Mode,

    /// Print the session report as JSON on stdout
    #[arg(long, default_value_t = false)]
    report: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Exit status reflects the verdict.
    Auth,
    /// Run the same flow, always succeed.
    Account,
}

fn main() -> anyhow::Result<ExitCode> {
    pam_policy_observability::init();

    let cli = Cli::parse();
    tracing::debug!(mode = ?cli.mode, "starting authentication attempt");

    let facts = StaticFacts {
        username: cli.user,
        service: cli.service,
        requesting_username: cli.ruser,
        requesting_hostname: cli.rhost,
    };

    let mut conversation =
        TerminalConversation::new(BufReader::new(io::stdin()), io::stdout(), io::stderr());

    let report = authenticate(&cli.args, &mut conversation, &facts, &ProcessEnv);

    if cli.report {
        let json = serde_json::to_string(&report).context("failed to serialize session report")?;
        println!("{json}");
    }

    let code = match (cli.mode, report.verdict) {
        (Mode::Account, _) | (Mode::Auth, Verdict::Grant) => ExitCode::SUCCESS,
        (Mode::Auth, Verdict::Deny) => ExitCode::FAILURE,
    };
    Ok(code)
}
