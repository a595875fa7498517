//! Core types for autodeps

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the source snapshot a run started from
///
/// Captured once at run start (the `HEAD` commit hash) and never changed
/// afterwards, so every name derived from it is stable for the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionId(String);

impl RevisionId {
    /// Wrap a full revision string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Full identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` characters of the identifier (or all of it if shorter)
    pub fn short(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the branch a run publishes to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Derive the branch name: `prefix` followed by the first `len`
    /// characters of the revision
    pub fn derive(prefix: &str, revision: &RevisionId, len: usize) -> Self {
        Self(format!("{prefix}{}", revision.short(len)))
    }

    /// Branch name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pull request as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Head branch name
    pub head_ref: String,
    /// GraphQL node ID (API host only, used for mutations)
    pub node_id: Option<String>,
}

/// Everything needed to open the bump PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Branch with the bump commit
    pub head: String,
    /// Branch the PR targets
    pub base: String,
    /// PR title
    pub title: String,
    /// PR body (may be empty)
    pub body: String,
    /// Labels applied at creation
    pub labels: Vec<String>,
}

/// Merge strategy used when automerge fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Squash all commits into one
    #[default]
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl MergeMethod {
    /// Value of the GraphQL `PullRequestMergeMethod` enum
    pub const fn graphql_name(self) -> &'static str {
        match self {
            Self::Squash => "SQUASH",
            Self::Merge => "MERGE",
            Self::Rebase => "REBASE",
        }
    }
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Repository coordinates on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// Terminal state of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Working tree unchanged after bump and format; nothing was published
    NoChanges,
    /// Dry run: changes exist but nothing was published
    DryRun {
        /// Branch that would have been pushed
        branch: BranchName,
        /// Title the PR would have used
        title: String,
    },
    /// Branch pushed and PR opened
    Published {
        /// Branch that was pushed
        branch: BranchName,
        /// The opened PR
        pull_request: PullRequest,
        /// Whether automerge was enabled
        automerge: bool,
    },
}
