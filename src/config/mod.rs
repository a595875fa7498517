//! Run configuration
//!
//! Everything a run needs to know that is not derived from the repository
//! itself. Loaded from `autodeps.toml`; every field has a default matching
//! the stock monthly bump workflow.

mod storage;

pub use storage::{CONFIG_FILE, config_path, load_config, load_config_from, save_config};

use crate::error::{Error, Result};
use crate::process::CommandSpec;
use crate::retry::{BackoffSchedule, DEFAULT_BACKOFF_SECS};
use crate::types::MergeMethod;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An external command as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    /// Executable name or path
    pub program: String,
    /// Arguments passed verbatim
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandConfig {
    /// Build a command from a program and argument list
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// Convert into a runnable spec
    pub fn to_spec(&self) -> CommandSpec {
        CommandSpec::new(&self.program).args(self.args.iter().cloned())
    }
}

impl fmt::Display for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Which backend talks to GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostKind {
    /// Shell out to the `gh` CLI
    #[default]
    GhCli,
    /// Call the REST and GraphQL APIs directly
    Api,
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GhCli => write!(f, "gh-cli"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// Commit author used for the bump commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorConfig {
    /// `user.name`
    pub name: String,
    /// `user.email`
    pub email: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "github-actions[bot]".to_string(),
            email: "41898282+github-actions[bot]@users.noreply.github.com".to_string(),
        }
    }
}

/// Full run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutodepsConfig {
    /// Remote to push to
    pub remote: String,
    /// Branch the PR targets; detected from the remote when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,
    /// Fixed prefix of the bump branch
    pub branch_prefix: String,
    /// How many revision characters follow the prefix
    pub revision_length: usize,
    /// Commit message for the bump commit
    pub commit_message: String,
    /// PR title; `{revision}` is replaced by the short revision
    pub title: String,
    /// PR body
    pub body: String,
    /// Labels applied to the PR
    pub labels: Vec<String>,
    /// Merge strategy for automerge
    pub merge_method: MergeMethod,
    /// Whether to enable automerge after opening the PR
    pub automerge: bool,
    /// GitHub backend
    pub host: HostKind,
    /// Backoff schedule in seconds, terminated by `0`
    pub backoff: Vec<u64>,
    /// Bot identity for the commit
    pub author: AuthorConfig,
    /// Dependency bump commands; any failure aborts the run
    pub bump: Vec<CommandConfig>,
    /// Formatting commands; failures are tolerated
    pub format: Vec<CommandConfig>,
}

impl Default for AutodepsConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            base_branch: None,
            branch_prefix: "autodeps/bump_from_".to_string(),
            revision_length: 6,
            commit_message: "Dependency updates".to_string(),
            title: "Bump dependencies from commit {revision}".to_string(),
            body: String::new(),
            labels: vec!["dependencies".to_string()],
            merge_method: MergeMethod::Squash,
            automerge: true,
            host: HostKind::GhCli,
            backoff: DEFAULT_BACKOFF_SECS.to_vec(),
            author: AuthorConfig::default(),
            bump: vec![
                CommandConfig::new(
                    "uv",
                    &[
                        "pip",
                        "compile",
                        "--universal",
                        "--python-version=3.9",
                        "--upgrade",
                        "test-requirements.in",
                        "-o",
                        "test-requirements.txt",
                    ],
                ),
                CommandConfig::new("pre-commit", &["autoupdate", "--jobs", "0"]),
            ],
            format: vec![CommandConfig::new("pre-commit", &["run", "--all-files"])],
        }
    }
}

impl AutodepsConfig {
    /// Check field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(Error::Config("remote must not be empty".to_string()));
        }
        if self.branch_prefix.trim().is_empty() {
            return Err(Error::Config("branch_prefix must not be empty".to_string()));
        }
        if self.revision_length == 0 {
            return Err(Error::Config(
                "revision_length must be at least 1".to_string(),
            ));
        }
        if self.commit_message.trim().is_empty() {
            return Err(Error::Config("commit_message must not be empty".to_string()));
        }
        if self.bump.is_empty() {
            return Err(Error::Config(
                "at least one [[bump]] command is required".to_string(),
            ));
        }
        if let Some(cmd) = self
            .bump
            .iter()
            .chain(&self.format)
            .find(|c| c.program.trim().is_empty())
        {
            return Err(Error::Config(format!("command with empty program: {cmd:?}")));
        }
        self.backoff_schedule()?;
        Ok(())
    }

    /// Parsed backoff schedule
    pub fn backoff_schedule(&self) -> Result<BackoffSchedule> {
        BackoffSchedule::from_secs(&self.backoff)
    }
}
