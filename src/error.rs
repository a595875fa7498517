//! Error types for autodeps

use thiserror::Error;

/// Errors that can abort a run
#[derive(Debug, Error)]
pub enum Error {
    /// `autodeps.toml` could not be read or is invalid
    #[error("config error: {0}")]
    Config(String),

    /// Required executables are not on `PATH`
    #[error("missing required tools: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    /// An external command could not be spawned at all
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Rendered command line
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A dependency bump command exited non-zero
    #[error("dependency bump failed: `{command}` exited with {status}: {stderr}")]
    BumpFailed {
        /// Rendered command line
        command: String,
        /// Exit status description
        status: String,
        /// Trimmed stderr of the command
        stderr: String,
    },

    /// A git command failed
    #[error("git error: {0}")]
    Git(String),

    /// Pushing the bump branch failed
    #[error("push of {branch} failed: {message}")]
    PushFailed {
        /// Branch that was being pushed
        branch: String,
        /// Redacted stderr from git
        message: String,
    },

    /// No usable token was found
    #[error("authentication error: {0}")]
    Auth(String),

    /// Remote URL did not look like a GitHub repository
    #[error("unsupported remote: {0}")]
    UnsupportedRemote(String),

    /// Remote not present in the repository
    #[error("remote '{0}' not found")]
    RemoteNotFound(String),

    /// GitHub API or `gh` CLI error
    #[error("GitHub error: {0}")]
    GitHubApi(String),

    /// Phase A ran out of attempts
    #[error("Could not create the PR (gave up after {attempts} attempts): {last}")]
    PrCreationExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Error from the final attempt
        last: Box<Error>,
    },

    /// Phase B ran out of attempts
    #[error("Could not set automerge (gave up after {attempts} attempts): {last}")]
    AutomergeExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Error from the final attempt
        last: Box<Error>,
    },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result type alias for autodeps operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_messages_are_distinct() {
        let pr = Error::PrCreationExhausted {
            attempts: 5,
            last: Box::new(Error::GitHubApi("not found".to_string())),
        };
        let automerge = Error::AutomergeExhausted {
            attempts: 5,
            last: Box::new(Error::GitHubApi("not found".to_string())),
        };

        assert!(pr.to_string().starts_with("Could not create the PR"));
        assert!(automerge.to_string().starts_with("Could not set automerge"));
        assert_ne!(pr.to_string(), automerge.to_string());
    }

    #[test]
    fn test_missing_tools_lists_every_tool() {
        let err = Error::MissingTools(vec!["gh".to_string(), "uv".to_string()]);
        assert_eq!(err.to_string(), "missing required tools: gh, uv");
    }
}
