//! Publish execution - effectful operations
//!
//! Takes a `PublishPlan` and performs the remote writes: force-push the
//! branch (never retried), then Phase A (open the PR) and Phase B (enable
//! automerge), each polled with the backoff schedule. Phase B only runs
//! once Phase A has succeeded.

use crate::error::Result;
use crate::git::Git;
use crate::platform::PullRequestHost;
use crate::progress::ProgressCallback;
use crate::publish::plan::PublishPlan;
use crate::retry::{BackoffSchedule, Phase, poll_until_success};
use crate::types::{MergeMethod, PullRequest};
use tracing::{debug, info};

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// The open PR
    pub pull_request: PullRequest,
    /// Attempts Phase A used
    pub create_attempts: usize,
    /// Attempts Phase B used, `None` when automerge was not requested
    pub automerge_attempts: Option<usize>,
}

impl PublishResult {
    /// Whether automerge was enabled
    pub const fn automerge_enabled(&self) -> bool {
        self.automerge_attempts.is_some()
    }
}

/// Switch to the plan's branch, commit as the bot and force-push
pub async fn publish_branch(plan: &PublishPlan, git: &Git, secret: Option<&str>) -> Result<()> {
    git.switch_force_create(&plan.branch).await?;
    git.commit_all(&plan.commit_message, &plan.author).await?;
    git.force_push(&plan.remote, &plan.branch, secret).await?;
    info!(branch = %plan.branch, remote = %plan.remote, "branch published");
    Ok(())
}

async fn report_retry(
    progress: &dyn ProgressCallback,
    schedule: &BackoffSchedule,
    phase: Phase,
    attempt: usize,
) {
    if attempt > 1 {
        let delay = schedule.delay_after(attempt - 1).unwrap_or_default();
        progress
            .on_retry(phase, attempt, schedule.max_attempts(), delay)
            .await;
    }
}

/// Phase A: open the PR, reusing one already open for the branch
pub async fn open_pull_request(
    plan: &PublishPlan,
    host: &dyn PullRequestHost,
    schedule: &BackoffSchedule,
    progress: &dyn ProgressCallback,
) -> Result<(PullRequest, usize)> {
    let request = &plan.request;
    progress
        .on_message(&format!("Opening PR {} -> {}", request.head, request.base))
        .await;

    let outcome = poll_until_success(schedule, Phase::CreatePullRequest, move |attempt| async move {
        report_retry(progress, schedule, Phase::CreatePullRequest, attempt).await;

        // An earlier attempt may have landed even though it reported failure,
        // possibly before its labels were applied
        if let Some(existing) = host.find_existing_pr(&request.head).await? {
            debug!(pr_number = existing.number, "reusing open PR for branch");
            if !request.labels.is_empty() {
                host.add_labels(&existing, &request.labels).await?;
            }
            return Ok(existing);
        }
        host.create_pr(request).await
    })
    .await;

    let attempts = outcome.attempts();
    let pr = outcome.into_result(Phase::CreatePullRequest)?;
    info!(pr_number = pr.number, attempts, host = host.name(), "PR open");
    Ok((pr, attempts))
}

/// Phase B: enable automerge on an open PR
pub async fn enable_automerge(
    pr: &PullRequest,
    method: MergeMethod,
    host: &dyn PullRequestHost,
    schedule: &BackoffSchedule,
    progress: &dyn ProgressCallback,
) -> Result<usize> {
    progress
        .on_message(&format!("Enabling automerge ({method}) on PR #{}", pr.number))
        .await;

    let outcome = poll_until_success(schedule, Phase::EnableAutomerge, move |attempt| async move {
        report_retry(progress, schedule, Phase::EnableAutomerge, attempt).await;
        host.enable_automerge(pr, method).await
    })
    .await;

    let attempts = outcome.attempts();
    outcome.into_result(Phase::EnableAutomerge)?;
    info!(pr_number = pr.number, attempts, "automerge enabled");
    Ok(attempts)
}

/// Execute the remote half of the plan (EFFECTFUL)
///
/// The branch must already be pushed. Stops at the first exhausted phase.
pub async fn execute_publish(
    plan: &PublishPlan,
    host: &dyn PullRequestHost,
    schedule: &BackoffSchedule,
    progress: &dyn ProgressCallback,
) -> Result<PublishResult> {
    let (pull_request, create_attempts) =
        open_pull_request(plan, host, schedule, progress).await?;

    let automerge_attempts = match plan.automerge {
        Some(method) => {
            Some(enable_automerge(&pull_request, method, host, schedule, progress).await?)
        }
        None => {
            debug!("automerge disabled, skipping");
            None
        }
    };

    Ok(PublishResult {
        pull_request,
        create_attempts,
        automerge_attempts,
    })
}
