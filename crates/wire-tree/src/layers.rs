//! Environment-layered configuration
//!
//! A layered configuration file holds shared defaults under `all` and one
//! section per environment name (`dev`, `qa`, `prd`, or whatever the
//! hosts are called). The effective tree for an environment is the
//! environment section merged over the shared defaults.

use crate::{Error, Node, Result};

/// Process variable naming the active environment.
pub const SYSTEM_ENVIRONMENT: &str = "SYSTEM_ENVIRONMENT";

/// Section holding defaults shared by every environment.
pub const SHARED_SECTION: &str = "all";

/// Name of the active environment, read from [`SYSTEM_ENVIRONMENT`].
///
/// The value is trimmed and lowercased. Unset or blank is an error naming
/// the variable, so a misconfigured host fails loudly at startup.
pub fn current_environment() -> Result<String> {
    normalize(std::env::var(SYSTEM_ENVIRONMENT).ok())
}

fn normalize(raw: Option<String>) -> Result<String> {
    match raw {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_lowercase()),
        _ => Err(Error::EnvironmentNotSet {
            var: SYSTEM_ENVIRONMENT,
        }),
    }
}

/// Resolve the effective tree for `environment`.
///
/// Both the shared section and the environment section must exist.
pub fn layered(root: &Node, environment: &str) -> Result<Node> {
    let shared = root.get_object_node(SHARED_SECTION)?;
    let env = root.get_object_node(environment)?;
    tracing::debug!(environment, "layering environment over shared defaults");
    Ok(shared.merged(env))
}

/// Resolve layers for the environment named by the process variable.
pub fn layered_from_process(root: &Node) -> Result<Node> {
    let environment = current_environment()?;
    layered(root, &environment)
}
