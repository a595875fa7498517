//! The upgrade-and-publish pipeline
//!
//! One linear pass per invocation:
//! environment check → bump → format → diff guard → branch → PR → automerge.
//! The diff guard is the only branch point: no tracked change means no
//! branch, no commit and no pull request.

use crate::auth::env_token;
use crate::bump::{run_bumpers, run_formatters};
use crate::config::AutodepsConfig;
use crate::error::{Error, Result};
use crate::git::Git;
use crate::platform::{PullRequestHost, create_host};
use crate::process::CommandRunner;
use crate::progress::ProgressCallback;
use crate::publish::{create_publish_plan, execute_publish, publish_branch};
use crate::toolchain::{ensure_tools, required_tools};
use crate::types::RunOutcome;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Base branch used when neither config nor remote HEAD names one
pub const FALLBACK_BASE_BRANCH: &str = "main";

/// Options for a single run
#[derive(Debug, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions {
    /// Stop after the diff guard and report the plan
    pub dry_run: bool,
    /// Skip Phase B even if the config enables automerge
    pub no_automerge: bool,
    /// Verify required tools before touching anything
    pub check_tools: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            no_automerge: false,
            check_tools: true,
        }
    }
}

/// Everything a run needs
///
/// The PR host is built lazily, after the branch is pushed, so runs that
/// end at the diff guard never need credentials.
pub struct RunContext {
    /// Repository root
    pub repo_root: PathBuf,
    /// Loaded config
    pub config: AutodepsConfig,
    /// Process runner shared by every step
    pub runner: Arc<dyn CommandRunner>,
    /// Git wrapper rooted at `repo_root`
    pub git: Git,
    host: Option<Box<dyn PullRequestHost>>,
}

impl RunContext {
    /// Create a context for the repository at `repo_root`
    pub fn new(
        repo_root: impl Into<PathBuf>,
        config: AutodepsConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let repo_root = repo_root.into();
        let git = Git::new(Arc::clone(&runner), repo_root.clone());
        Self {
            repo_root,
            config,
            runner,
            git,
            host: None,
        }
    }

    /// Use a prebuilt host instead of the one the config selects
    #[must_use]
    pub fn with_host(mut self, host: Box<dyn PullRequestHost>) -> Self {
        self.host = Some(host);
        self
    }

    async fn host(&mut self) -> Result<&dyn PullRequestHost> {
        if self.host.is_none() {
            let remotes = self.git.remotes().await?;
            let remote = remotes
                .into_iter()
                .find(|r| r.name == self.config.remote)
                .ok_or_else(|| Error::RemoteNotFound(self.config.remote.clone()))?;
            let host = create_host(
                self.config.host,
                Arc::clone(&self.runner),
                &self.repo_root,
                &remote,
            )
            .await?;
            self.host = Some(host);
        }
        self.host
            .as_deref()
            .ok_or_else(|| Error::Internal("host not initialized".to_string()))
    }

    async fn base_branch(&self) -> Result<String> {
        if let Some(base) = &self.config.base_branch {
            return Ok(base.clone());
        }
        let detected = self.git.default_branch(&self.config.remote).await?;
        Ok(detected.unwrap_or_else(|| {
            debug!("remote HEAD unknown, falling back to {FALLBACK_BASE_BRANCH}");
            FALLBACK_BASE_BRANCH.to_string()
        }))
    }
}

/// Run the whole pipeline once
pub async fn run_pipeline(
    ctx: &mut RunContext,
    options: RunOptions,
    progress: &dyn ProgressCallback,
) -> Result<RunOutcome> {
    if options.check_tools {
        progress.on_step("Checking tools").await;
        ensure_tools(&required_tools(&ctx.config))?;
    }

    let revision = ctx.git.revision_id().await?;
    info!(revision = %revision, "starting run");

    progress.on_step("Bumping dependencies").await;
    run_bumpers(ctx.runner.as_ref(), &ctx.repo_root, &ctx.config.bump).await?;

    progress.on_step("Formatting").await;
    let report = run_formatters(ctx.runner.as_ref(), &ctx.repo_root, &ctx.config.format).await;
    if report.has_failures() {
        progress
            .on_message(&format!(
                "Formatting failed for: {} (ignored)",
                report.failed.join(", ")
            ))
            .await;
    }

    if !ctx.git.has_changes().await? {
        info!("no changes after bump, nothing to do");
        return Ok(RunOutcome::NoChanges);
    }

    let base_branch = ctx.base_branch().await?;
    let mut plan = create_publish_plan(&ctx.config, &revision, &base_branch);
    if options.no_automerge {
        plan.automerge = None;
    }

    if options.dry_run {
        return Ok(RunOutcome::DryRun {
            branch: plan.branch,
            title: plan.request.title,
        });
    }

    progress
        .on_step(&format!("Publishing {}", plan.branch))
        .await;
    let secret = env_token();
    publish_branch(&plan, &ctx.git, secret.as_deref()).await?;

    let schedule = ctx.config.backoff_schedule()?;
    let host = ctx.host().await?;
    let result = execute_publish(&plan, host, &schedule, progress).await?;

    Ok(RunOutcome::Published {
        branch: plan.branch,
        automerge: result.automerge_enabled(),
        pull_request: result.pull_request,
    })
}
