//! Progress reporting hooks for long-running steps

use crate::retry::Phase;
use async_trait::async_trait;
use std::time::Duration;

/// Receives status updates while a run executes
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A pipeline step started
    async fn on_step(&self, step: &str);

    /// Free-form status message
    async fn on_message(&self, message: &str);

    /// An attempt in `phase` failed and the next one follows after `delay`
    async fn on_retry(&self, phase: Phase, attempt: usize, max_attempts: usize, delay: Duration);
}

/// Progress sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_step(&self, _step: &str) {}

    async fn on_message(&self, _message: &str) {}

    async fn on_retry(
        &self,
        _phase: Phase,
        _attempt: usize,
        _max_attempts: usize,
        _delay: Duration,
    ) {
    }
}
