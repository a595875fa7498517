//! Bounded backoff polling against an eventually-consistent remote
//!
//! A [`BackoffSchedule`] is a fixed list of waits ending in `0`. The first
//! attempt runs immediately; after attempt `k` fails the `k`-th entry is
//! consulted: a positive entry is slept and another attempt follows, the
//! terminal `0` means the phase is exhausted. `[1, 2, 4, 8, 0]` therefore
//! allows five attempts separated by 1, 2, 4 and 8 seconds.
//!
//! Failures are never classified. Every error is retried the same way.

use crate::error::{Error, Result};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default schedule in seconds, shared by both publish phases
pub const DEFAULT_BACKOFF_SECS: [u64; 5] = [1, 2, 4, 8, 0];

/// Fixed sequence of waits consumed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    delays: Vec<Duration>,
}

impl BackoffSchedule {
    /// Build a schedule from whole seconds.
    ///
    /// The list must be non-empty, end in `0`, and have no other zero entry.
    pub fn from_secs(secs: &[u64]) -> Result<Self> {
        let Some((&last, rest)) = secs.split_last() else {
            return Err(Error::Config("backoff schedule must not be empty".to_string()));
        };
        if last != 0 {
            return Err(Error::Config(format!(
                "backoff schedule must end with 0, got {secs:?}"
            )));
        }
        if rest.contains(&0) {
            return Err(Error::Config(format!(
                "only the final backoff entry may be 0, got {secs:?}"
            )));
        }

        Ok(Self {
            delays: secs.iter().copied().map(Duration::from_secs).collect(),
        })
    }

    /// Upper bound on attempts a phase makes
    pub fn max_attempts(&self) -> usize {
        self.delays.len()
    }

    /// Wait before the attempt following failed attempt `attempt` (1-based).
    ///
    /// `None` once the terminal entry is reached.
    pub fn delay_after(&self, attempt: usize) -> Option<Duration> {
        attempt
            .checked_sub(1)
            .and_then(|idx| self.delays.get(idx))
            .copied()
            .filter(|d| !d.is_zero())
    }
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self {
            delays: DEFAULT_BACKOFF_SECS
                .iter()
                .copied()
                .map(Duration::from_secs)
                .collect(),
        }
    }
}

/// The two independently retried publish phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Phase A: open the pull request
    CreatePullRequest,
    /// Phase B: enable automerge on it
    EnableAutomerge,
}

impl Phase {
    /// Fatal error reported when this phase runs out of attempts
    pub fn exhausted(self, attempts: usize, last: Error) -> Error {
        let last = Box::new(last);
        match self {
            Self::CreatePullRequest => Error::PrCreationExhausted { attempts, last },
            Self::EnableAutomerge => Error::AutomergeExhausted { attempts, last },
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatePullRequest => write!(f, "create-pr"),
            Self::EnableAutomerge => write!(f, "enable-automerge"),
        }
    }
}

/// Terminal state of one phase
#[derive(Debug)]
pub enum PhaseOutcome<T> {
    /// An attempt succeeded; remaining entries were not consumed
    Succeeded {
        /// Value returned by the successful attempt
        value: T,
        /// 1-based index of that attempt
        attempts: usize,
    },
    /// Every attempt failed
    Exhausted {
        /// Attempts made
        attempts: usize,
        /// Error from the last attempt
        last_error: Error,
    },
}

impl<T> PhaseOutcome<T> {
    /// Convert to a `Result`, mapping exhaustion to the phase's fatal error
    pub fn into_result(self, phase: Phase) -> Result<T> {
        match self {
            Self::Succeeded { value, .. } => Ok(value),
            Self::Exhausted {
                attempts,
                last_error,
            } => Err(phase.exhausted(attempts, last_error)),
        }
    }

    /// Number of attempts that were made
    pub const fn attempts(&self) -> usize {
        match self {
            Self::Succeeded { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Run `op` until it succeeds or `schedule` is exhausted.
///
/// `op` receives the 1-based attempt number.
pub async fn poll_until_success<T, F, Fut>(
    schedule: &BackoffSchedule,
    phase: Phase,
    mut op: F,
) -> PhaseOutcome<T>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => {
                debug!(%phase, attempt, "phase succeeded");
                return PhaseOutcome::Succeeded {
                    value,
                    attempts: attempt,
                };
            }
            Err(err) => {
                let Some(delay) = schedule.delay_after(attempt) else {
                    warn!(%phase, attempt, error = %err, "phase exhausted");
                    return PhaseOutcome::Exhausted {
                        attempts: attempt,
                        last_error: err,
                    };
                };
                warn!(
                    %phase,
                    attempt,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
