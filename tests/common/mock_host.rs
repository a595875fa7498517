//! Mock pull request host for testing

use async_trait::async_trait;
use autodeps::error::{Error, Result};
use autodeps::platform::PullRequestHost;
use autodeps::types::{MergeMethod, NewPullRequest, PullRequest};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Call record for `enable_automerge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomergeCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

#[derive(Default)]
struct MockState {
    next_pr_number: AtomicU64,
    open_prs: Mutex<HashMap<String, PullRequest>>,
    // Call tracking
    events: Mutex<Vec<String>>,
    find_calls: Mutex<Vec<String>>,
    create_calls: Mutex<Vec<NewPullRequest>>,
    label_calls: Mutex<Vec<(u64, Vec<String>)>>,
    automerge_calls: Mutex<Vec<AutomergeCall>>,
    // Failure injection: number of upcoming calls that fail
    create_failures: AtomicUsize,
    label_failures: AtomicUsize,
    automerge_failures: AtomicUsize,
    create_lands_on_failure: AtomicBool,
}

/// Mock host with call tracking and failure injection
///
/// Clones share state, so a test can keep one handle while the pipeline
/// owns another.
#[derive(Clone, Default)]
pub struct MockHost {
    state: Arc<MockState>,
}

impl MockHost {
    pub fn new() -> Self {
        let host = Self::default();
        host.state.next_pr_number.store(1, Ordering::SeqCst);
        host
    }

    // === Failure injection ===

    /// Fail the next `n` `create_pr` calls
    pub fn fail_create(&self, n: usize) {
        self.state.create_failures.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` `add_labels` calls
    pub fn fail_labels(&self, n: usize) {
        self.state.label_failures.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` `enable_automerge` calls
    pub fn fail_automerge(&self, n: usize) {
        self.state.automerge_failures.store(n, Ordering::SeqCst);
    }

    /// Failed `create_pr` calls still open the PR (lost response)
    pub fn create_lands_on_failure(&self) {
        self.state.create_lands_on_failure.store(true, Ordering::SeqCst);
    }

    /// Register an already-open PR for a branch
    pub fn set_open_pr(&self, pr: PullRequest) {
        self.state
            .open_prs
            .lock()
            .unwrap()
            .insert(pr.head_ref.clone(), pr);
    }

    // === Call verification ===

    /// Ordered log of every call: `find`, `create`, `label`, `automerge`
    pub fn events(&self) -> Vec<String> {
        self.state.events.lock().unwrap().clone()
    }

    pub fn find_calls(&self) -> Vec<String> {
        self.state.find_calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<NewPullRequest> {
        self.state.create_calls.lock().unwrap().clone()
    }

    pub fn label_calls(&self) -> Vec<(u64, Vec<String>)> {
        self.state.label_calls.lock().unwrap().clone()
    }

    pub fn automerge_calls(&self) -> Vec<AutomergeCall> {
        self.state.automerge_calls.lock().unwrap().clone()
    }

    /// Assert no remote call of any kind happened
    pub fn assert_untouched(&self) {
        let events = self.events();
        assert!(events.is_empty(), "Expected no host calls but got: {events:?}");
    }

    fn record(&self, event: &str) {
        self.state.events.lock().unwrap().push(event.to_string());
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn open(&self, request: &NewPullRequest) -> PullRequest {
        let number = self.state.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let pr = PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            head_ref: request.head.clone(),
            node_id: Some(format!("PR_node_{number}")),
        };
        self.set_open_pr(pr.clone());
        pr
    }
}

#[async_trait]
impl PullRequestHost for MockHost {
    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        self.record("find");
        self.state
            .find_calls
            .lock()
            .unwrap()
            .push(head_branch.to_string());
        Ok(self.state.open_prs.lock().unwrap().get(head_branch).cloned())
    }

    async fn create_pr(&self, request: &NewPullRequest) -> Result<PullRequest> {
        self.record("create");
        self.state
            .create_calls
            .lock()
            .unwrap()
            .push(request.clone());

        if Self::take_failure(&self.state.create_failures) {
            if self.state.create_lands_on_failure.load(Ordering::SeqCst) {
                self.open(request);
            }
            return Err(Error::GitHubApi("head branch not found yet".to_string()));
        }
        Ok(self.open(request))
    }

    async fn add_labels(&self, pr: &PullRequest, labels: &[String]) -> Result<()> {
        self.record("label");
        self.state
            .label_calls
            .lock()
            .unwrap()
            .push((pr.number, labels.to_vec()));

        if Self::take_failure(&self.state.label_failures) {
            return Err(Error::GitHubApi("label request rejected".to_string()));
        }
        Ok(())
    }

    async fn enable_automerge(&self, pr: &PullRequest, method: MergeMethod) -> Result<()> {
        self.record("automerge");
        self.state.automerge_calls.lock().unwrap().push(AutomergeCall {
            pr_number: pr.number,
            method,
        });

        if Self::take_failure(&self.state.automerge_failures) {
            return Err(Error::GitHubApi("pull request is in clean status".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
