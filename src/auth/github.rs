//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use crate::process::{CommandRunner, CommandSpec};
use std::path::Path;
use tracing::debug;

/// Environment variables checked in order
const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// A resolved GitHub token
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// The token itself
    pub token: String,
    /// Where it came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Token set in `GH_TOKEN` or `GITHUB_TOKEN`, if any
pub fn env_token() -> Option<String> {
    TOKEN_VARS.iter().find_map(|var| {
        std::env::var(var)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Resolve a token from `GH_TOKEN`, `GITHUB_TOKEN`, then `gh auth token`
pub async fn get_github_auth(runner: &dyn CommandRunner, dir: &Path) -> Result<GitHubAuthConfig> {
    if let Some(token) = env_token() {
        debug!("using token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    let output = runner
        .run(dir, &CommandSpec::new("gh").args(["auth", "token"]))
        .await
        .map_err(|e| {
            Error::Auth(format!(
                "no token in GH_TOKEN/GITHUB_TOKEN and gh unavailable: {e}"
            ))
        })?;

    let token = output.stdout.trim().to_string();
    if !output.success() || token.is_empty() {
        return Err(Error::Auth(
            "no token in GH_TOKEN/GITHUB_TOKEN and `gh auth token` returned none".to_string(),
        ));
    }

    debug!("using token from gh CLI");
    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}
