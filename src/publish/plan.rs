//! Publish planning - pure functions
//!
//! Everything here is a deterministic function of the config and the
//! revision identifier, so two runs at the same revision plan the same
//! branch and the same PR.

use crate::config::{AuthorConfig, AutodepsConfig};
use crate::types::{BranchName, MergeMethod, NewPullRequest, RevisionId};

/// Placeholder replaced by the short revision in titles
const REVISION_PLACEHOLDER: &str = "{revision}";

/// What a run will publish once changes are known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    /// Revision the run started from
    pub revision: RevisionId,
    /// Branch derived from the revision
    pub branch: BranchName,
    /// Remote to force-push to
    pub remote: String,
    /// Commit message for the bump commit
    pub commit_message: String,
    /// Bot identity for the commit
    pub author: AuthorConfig,
    /// PR to open
    pub request: NewPullRequest,
    /// Merge method to enable automerge with; `None` skips that phase
    pub automerge: Option<MergeMethod>,
}

/// Substitute the short revision into a title template
pub fn render_title(template: &str, short_revision: &str) -> String {
    template.replace(REVISION_PLACEHOLDER, short_revision)
}

/// Create the publish plan (PURE)
pub fn create_publish_plan(
    config: &AutodepsConfig,
    revision: &RevisionId,
    base_branch: &str,
) -> PublishPlan {
    let branch = BranchName::derive(&config.branch_prefix, revision, config.revision_length);
    let short = revision.short(config.revision_length);

    PublishPlan {
        revision: revision.clone(),
        request: NewPullRequest {
            head: branch.to_string(),
            base: base_branch.to_string(),
            title: render_title(&config.title, short),
            body: config.body.clone(),
            labels: config.labels.clone(),
        },
        branch,
        remote: config.remote.clone(),
        commit_message: config.commit_message.clone(),
        author: config.author.clone(),
        automerge: config.automerge.then_some(config.merge_method),
    }
}
