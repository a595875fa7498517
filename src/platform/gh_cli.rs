//! Pull request host backed by the `gh` CLI

use crate::auth::redact;
use crate::error::{Error, Result};
use crate::platform::PullRequestHost;
use crate::process::{CommandRunner, CommandSpec};
use crate::types::{MergeMethod, NewPullRequest, PullRequest};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Row of `gh pr list --json number,url,headRefName,id`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPullRequest {
    number: u64,
    url: String,
    head_ref_name: String,
    id: Option<String>,
}

impl From<GhPullRequest> for PullRequest {
    fn from(pr: GhPullRequest) -> Self {
        Self {
            number: pr.number,
            html_url: pr.url,
            head_ref: pr.head_ref_name,
            node_id: pr.id,
        }
    }
}

/// Host that shells out to `gh`, which handles its own authentication
pub struct GhCliHost {
    runner: Arc<dyn CommandRunner>,
    dir: PathBuf,
    secret: Option<String>,
}

impl GhCliHost {
    /// Create a host running `gh` inside the repository at `dir`
    pub fn new(runner: Arc<dyn CommandRunner>, dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            dir: dir.into(),
            secret: None,
        }
    }

    /// Scrub `secret` from any error text `gh` produces
    #[must_use]
    pub fn with_secret(mut self, secret: Option<String>) -> Self {
        self.secret = secret;
        self
    }

    async fn gh(&self, spec: CommandSpec) -> Result<String> {
        let output = self.runner.run(&self.dir, &spec).await?;
        if !output.success() {
            let message = format!(
                "`{spec}` failed ({}): {}",
                output.status_text(),
                output.stderr.trim()
            );
            let message = match &self.secret {
                Some(secret) => redact(&message, secret),
                None => message,
            };
            return Err(Error::GitHubApi(message));
        }
        Ok(output.stdout)
    }
}

/// Parse the PR number out of the URL `gh pr create` prints
pub fn pr_number_from_url(url: &str) -> Option<u64> {
    let (_, tail) = url.trim().rsplit_once("/pull/")?;
    tail.split(['/', '#', '?']).next()?.parse().ok()
}

/// Build the `gh pr create` invocation for a request
pub fn create_command(request: &NewPullRequest) -> CommandSpec {
    let mut spec = CommandSpec::new("gh").args([
        "pr",
        "create",
        "--head",
        request.head.as_str(),
        "--base",
        request.base.as_str(),
        "--title",
        request.title.as_str(),
        "--body",
        request.body.as_str(),
    ]);
    for label in &request.labels {
        spec = spec.args(["--label", label.as_str()]);
    }
    spec
}

#[async_trait]
impl PullRequestHost for GhCliHost {
    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        debug!(head_branch, "finding existing PR");
        let stdout = self
            .gh(CommandSpec::new("gh").args([
                "pr",
                "list",
                "--head",
                head_branch,
                "--state",
                "open",
                "--json",
                "number,url,headRefName,id",
                "--limit",
                "1",
            ]))
            .await?;

        let prs: Vec<GhPullRequest> = serde_json::from_str(stdout.trim())
            .map_err(|e| Error::GitHubApi(format!("unexpected `gh pr list` output: {e}")))?;
        Ok(prs.into_iter().next().map(Into::into))
    }

    async fn create_pr(&self, request: &NewPullRequest) -> Result<PullRequest> {
        debug!(head = %request.head, base = %request.base, "creating PR");
        let stdout = self.gh(create_command(request)).await?;

        // gh prints progress lines before the URL
        let url = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| l.starts_with("http"))
            .ok_or_else(|| Error::GitHubApi(format!("`gh pr create` printed no URL: {stdout}")))?;
        let number = pr_number_from_url(url)
            .ok_or_else(|| Error::GitHubApi(format!("cannot parse PR number from {url}")))?;

        debug!(pr_number = number, "created PR");
        Ok(PullRequest {
            number,
            html_url: url.to_string(),
            head_ref: request.head.clone(),
            node_id: None,
        })
    }

    async fn add_labels(&self, pr: &PullRequest, labels: &[String]) -> Result<()> {
        debug!(pr_number = pr.number, ?labels, "labeling PR");
        let number = pr.number.to_string();
        let mut spec = CommandSpec::new("gh").args(["pr", "edit", number.as_str()]);
        for label in labels {
            spec = spec.args(["--add-label", label.as_str()]);
        }
        self.gh(spec).await?;
        Ok(())
    }

    async fn enable_automerge(&self, pr: &PullRequest, method: MergeMethod) -> Result<()> {
        debug!(pr_number = pr.number, %method, "enabling automerge");
        self.gh(CommandSpec::new("gh").args([
            "pr".to_string(),
            "merge".to_string(),
            pr.number.to_string(),
            "--auto".to_string(),
            format!("--{method}"),
        ]))
        .await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "gh-cli"
    }
}
