//! Shared test utilities

#![allow(dead_code)]

mod mock_host;
mod scripted_runner;
mod temp_repo;

pub use mock_host::{AutomergeCall, MockHost};
pub use scripted_runner::ScriptedRunner;
pub use temp_repo::TempGitRepo;

use autodeps::config::{AutodepsConfig, CommandConfig};
use autodeps::types::{NewPullRequest, PullRequest};

/// Config with a fixed base branch and one bump and one format command
pub fn test_config() -> AutodepsConfig {
    AutodepsConfig {
        base_branch: Some("main".to_string()),
        bump: vec![CommandConfig::new("uv", &["pip", "compile", "--upgrade"])],
        format: vec![CommandConfig::new("pre-commit", &["run", "--all-files"])],
        ..AutodepsConfig::default()
    }
}

/// Build a `PullRequest` for tests
pub fn make_pr(number: u64, head: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        head_ref: head.to_string(),
        node_id: Some(format!("PR_node_{number}")),
    }
}

/// Build a `NewPullRequest` for tests
pub fn make_request(head: &str) -> NewPullRequest {
    NewPullRequest {
        head: head.to_string(),
        base: "main".to_string(),
        title: "Bump dependencies from commit def456".to_string(),
        body: String::new(),
        labels: vec!["dependencies".to_string()],
    }
}
