//! External process execution
//!
//! Every tool autodeps drives (the upgrader, formatters, `git`, `gh`) is
//! reached through [`CommandRunner`], so the pipeline can be exercised
//! against a scripted runner in tests.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// A command line plus extra environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name or path
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Extra environment variables (not rendered in logs)
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Start a command with no arguments
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for this command only
    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` if killed by a signal
    pub code: Option<i32>,
    /// Captured stdout (lossy UTF-8)
    pub stdout: String,
    /// Captured stderr (lossy UTF-8)
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a command that exited 0
    pub fn ok(stdout: &str) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// Output of a command that exited with `code`
    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    /// Whether the command exited 0
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Human-readable exit status
    pub fn status_text(&self) -> String {
        self.code
            .map_or_else(|| "signal".to_string(), |c| format!("exit code {c}"))
    }
}

/// Runs external commands to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` in `dir` and capture its output.
    ///
    /// A non-zero exit is not an error here; only failing to spawn is.
    async fn run(&self, dir: &Path, command: &CommandSpec) -> Result<CommandOutput>;
}

/// Runner backed by real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, dir: &Path, command: &CommandSpec) -> Result<CommandOutput> {
        debug!(command = %command, dir = %dir.display(), "running command");

        let output = Command::new(&command.program)
            .args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                command: command.to_string(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command = %command.program, status = %result.status_text(), "command finished");
        Ok(result)
    }
}
