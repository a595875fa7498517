//! Git operations via the `git` CLI
//!
//! Covers the change committer and branch publisher steps: reading the
//! revision, detecting a dirty tree, switching to the bump branch,
//! committing as the bot and force-pushing.

use crate::auth::redact;
use crate::config::AuthorConfig;
use crate::error::{Error, Result};
use crate::process::{CommandOutput, CommandRunner, CommandSpec};
use crate::types::{BranchName, GitRemote, RevisionId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Wrapper for executing git commands in a working directory
#[derive(Clone)]
pub struct Git {
    runner: Arc<dyn CommandRunner>,
    workdir: PathBuf,
}

impl Git {
    /// Create a wrapper rooted at `workdir`
    pub fn new(runner: Arc<dyn CommandRunner>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let spec = CommandSpec::new("git").args(args.iter().copied());
        self.runner.run(&self.workdir, &spec).await
    }

    async fn run_spec_checked(&self, spec: &CommandSpec) -> Result<String> {
        let output = self.runner.run(&self.workdir, spec).await?;
        if !output.success() {
            return Err(Error::Git(format!(
                "`{spec}` failed ({}): {}",
                output.status_text(),
                output.stderr.trim()
            )));
        }
        Ok(output.stdout)
    }

    async fn run_checked(&self, args: &[&str]) -> Result<String> {
        self.run_spec_checked(&CommandSpec::new("git").args(args.iter().copied()))
            .await
    }

    /// Resolve the repository's top-level directory
    pub async fn toplevel(&self) -> Result<PathBuf> {
        let out = self.run_checked(&["rev-parse", "--show-toplevel"]).await?;
        Ok(PathBuf::from(out.trim()))
    }

    /// Identifier of the snapshot the run starts from (`HEAD`)
    pub async fn revision_id(&self) -> Result<RevisionId> {
        let out = self.run_checked(&["rev-parse", "HEAD"]).await?;
        let revision = RevisionId::new(out);
        if revision.as_str().is_empty() {
            return Err(Error::Git("git rev-parse HEAD returned nothing".to_string()));
        }
        debug!(revision = %revision, "resolved revision");
        Ok(revision)
    }

    /// Whether any tracked file differs from `HEAD`
    pub async fn has_changes(&self) -> Result<bool> {
        let out = self
            .run_checked(&["status", "--porcelain", "--untracked-files=no"])
            .await?;
        let changed = out.lines().filter(|l| !l.trim().is_empty()).count();
        debug!(changed, "working tree status");
        Ok(changed > 0)
    }

    /// Create (or reset) `branch` at the current commit and switch to it,
    /// carrying working-tree changes along
    pub async fn switch_force_create(&self, branch: &BranchName) -> Result<()> {
        info!(branch = %branch, "switching to bump branch");
        self.run_checked(&["switch", "--force-create", branch.as_str()])
            .await?;
        Ok(())
    }

    /// Commit every tracked change as `author`
    ///
    /// The identity is passed through the environment of this one command,
    /// so the repository's own `user.name` / `user.email` stay untouched.
    pub async fn commit_all(&self, message: &str, author: &AuthorConfig) -> Result<()> {
        info!(author = %author.name, "committing changes");
        let spec = commit_command(message, author);
        self.run_spec_checked(&spec).await?;
        Ok(())
    }

    /// Force-push `branch` and set upstream. Never retried.
    ///
    /// `secret` is scrubbed from any error text.
    pub async fn force_push(
        &self,
        remote: &str,
        branch: &BranchName,
        secret: Option<&str>,
    ) -> Result<()> {
        info!(remote, branch = %branch, "force-pushing");
        let output = self
            .run(&["push", "--force", "--set-upstream", remote, branch.as_str()])
            .await?;

        if !output.success() {
            let message = output.stderr.trim();
            let message = secret.map_or_else(|| message.to_string(), |s| redact(message, s));
            return Err(Error::PushFailed {
                branch: branch.to_string(),
                message,
            });
        }
        Ok(())
    }

    /// List configured remotes (fetch URLs)
    pub async fn remotes(&self) -> Result<Vec<GitRemote>> {
        let out = self.run_checked(&["remote", "-v"]).await?;
        Ok(parse_remotes(&out))
    }

    /// Default branch of `remote` as recorded by `refs/remotes/<remote>/HEAD`
    pub async fn default_branch(&self, remote: &str) -> Result<Option<String>> {
        let head_ref = format!("refs/remotes/{remote}/HEAD");
        let output = self
            .run(&["symbolic-ref", "--quiet", "--short", &head_ref])
            .await?;
        if !output.success() {
            debug!(remote, "remote HEAD not set");
            return Ok(None);
        }

        let prefix = format!("{remote}/");
        let name = output.stdout.trim();
        Ok(name
            .strip_prefix(&prefix)
            .map(str::to_string)
            .filter(|b| !b.is_empty()))
    }
}

/// `git commit --all` with the bot identity set for author and committer
pub fn commit_command(message: &str, author: &AuthorConfig) -> CommandSpec {
    CommandSpec::new("git")
        .args(["commit", "--all", "--message", message])
        .env("GIT_AUTHOR_NAME", &author.name)
        .env("GIT_AUTHOR_EMAIL", &author.email)
        .env("GIT_COMMITTER_NAME", &author.name)
        .env("GIT_COMMITTER_EMAIL", &author.email)
}

/// Parse `git remote -v` output, keeping fetch URLs
pub fn parse_remotes(output: &str) -> Vec<GitRemote> {
    let mut remotes: Vec<GitRemote> = Vec::new();
    for line in output.lines() {
        let mut parts = line.split_whitespace();
        let (Some(name), Some(url), kind) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        if kind.is_some_and(|k| k != "(fetch)") {
            continue;
        }
        if remotes.iter().any(|r| r.name == name) {
            continue;
        }
        remotes.push(GitRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
    }
    remotes
}
