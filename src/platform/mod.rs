//! Pull request hosts
//!
//! Provides a unified interface for the two remote writes a run makes:
//! opening the bump PR and enabling automerge on it.

mod detection;
mod factory;
mod gh_cli;
mod github;

pub use detection::parse_repo_info;
pub use factory::create_host;
pub use gh_cli::GhCliHost;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{MergeMethod, NewPullRequest, PullRequest};
use async_trait::async_trait;

/// Host trait for the PR operations a run needs
///
/// Implemented over the `gh` CLI and over the GitHub API, so the publish
/// logic works with either backend.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Find an existing open PR for a head branch
    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>>;

    /// Open a new PR with the request's title, body and labels
    async fn create_pr(&self, request: &NewPullRequest) -> Result<PullRequest>;

    /// Add labels to an open PR. Labels already present are left alone.
    async fn add_labels(&self, pr: &PullRequest, labels: &[String]) -> Result<()>;

    /// Enable automerge on an existing PR
    async fn enable_automerge(&self, pr: &PullRequest, method: MergeMethod) -> Result<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
