//! Pull phase: load the local files and environment variables the policy
//! engine asks for.

use std::path::Path;

use pam_policy_core::{EnvVarResponse, FileResponse, PullResponses, ResourceError};
use pam_policy_transport::{fetch, Method, Transport};
use serde_json::Value as JsonValue;
use tracing::{debug, error, info};

use crate::schema::string_array;

/// Read-only view of environment variables.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// The current process environment.
#[derive(Debug, Copy, Clone, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

/// Read `path` and parse it as a single JSON document.
pub fn load_json_file(path: impl AsRef<Path>) -> Result<JsonValue, ResourceError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ResourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ResourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the pull phase against `endpoint`.
///
/// A file that cannot be loaded is recorded with no contents; it never stops
/// the remaining files or variables.
pub fn run_pull<T, E>(transport: &T, endpoint: &str, env: &E) -> PullResponses
where
    T: Transport + ?Sized,
    E: Environment + ?Sized,
{
    let mut responses = PullResponses::new();

    if endpoint.is_empty() {
        info!("pull endpoint is empty; not proceeding");
        return responses;
    }

    let Some(result) = fetch(transport, Method::Get, endpoint, None) else {
        return responses;
    };

    let files = match string_array(&result, "files") {
        Ok(files) => files,
        Err(err) => {
            error!(error = %err, "invalid pull spec");
            return responses;
        }
    };

    for name in files.values {
        let contents = match load_json_file(&name) {
            Ok(contents) => {
                debug!(file = %name, contents = %contents, "loaded JSON file");
                Some(contents)
            }
            Err(err) => {
                error!(error = %err, "error loading JSON file");
                None
            }
        };
        responses.files.push(FileResponse { name, contents });
    }
    if let Some(err) = files.violation {
        error!(error = %err, "invalid pull spec entry; abandoning remaining files");
    }

    let env_vars = match string_array(&result, "env_vars") {
        Ok(env_vars) => env_vars,
        Err(err) => {
            error!(error = %err, "invalid pull spec");
            return responses;
        }
    };

    for name in env_vars.values {
        let value = env.var(&name).unwrap_or_default();
        debug!(env_var = %name, value = %value, "loaded environment variable");
        responses.env_vars.push(EnvVarResponse { name, value });
    }
    if let Some(err) = env_vars.violation {
        error!(error = %err, "invalid pull spec entry; abandoning remaining env_vars");
    }

    responses
}
