//! Host construction from config

use crate::auth::{env_token, get_github_auth};
use crate::config::HostKind;
use crate::error::Result;
use crate::platform::{GhCliHost, GitHubService, PullRequestHost, parse_repo_info};
use crate::process::CommandRunner;
use crate::types::GitRemote;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Create the host selected by `kind` for the repository behind `remote`
pub async fn create_host(
    kind: HostKind,
    runner: Arc<dyn CommandRunner>,
    repo_root: &Path,
    remote: &GitRemote,
) -> Result<Box<dyn PullRequestHost>> {
    match kind {
        HostKind::GhCli => {
            debug!("using gh CLI host");
            Ok(Box::new(
                GhCliHost::new(runner, repo_root).with_secret(env_token()),
            ))
        }
        HostKind::Api => {
            let platform = parse_repo_info(&remote.url)?;
            let auth = get_github_auth(runner.as_ref(), repo_root).await?;
            debug!(
                owner = %platform.owner,
                repo = %platform.repo,
                source = ?auth.source,
                "using GitHub API host"
            );
            Ok(Box::new(GitHubService::new(&auth.token, platform)?))
        }
    }
}
