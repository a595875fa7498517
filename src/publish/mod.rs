//! Publishing a bump: branch, pull request, automerge
//!
//! Two-phase pattern:
//! 1. Plan - derive branch name, title and PR request (pure, testable)
//! 2. Execute - push the branch, then open the PR and enable automerge,
//!    each behind its own backoff schedule (effectful)

mod execute;
mod plan;

pub use execute::{
    PublishResult, enable_automerge, execute_publish, open_pull_request, publish_branch,
};
pub use plan::{PublishPlan, create_publish_plan, render_title};
