//! Dependency bump and formatting passes
//!
//! Bump commands are all-or-nothing: the first non-zero exit aborts the run.
//! Formatting commands are cosmetic: every one runs and failures are only
//! logged.

use crate::config::CommandConfig;
use crate::error::{Error, Result};
use crate::process::CommandRunner;
use std::path::Path;
use tracing::{info, warn};

/// Run every bump command in order, stopping at the first failure
pub async fn run_bumpers(
    runner: &dyn CommandRunner,
    dir: &Path,
    commands: &[CommandConfig],
) -> Result<()> {
    for command in commands {
        info!(command = %command, "bumping dependencies");
        let output = runner.run(dir, &command.to_spec()).await?;
        if !output.success() {
            return Err(Error::BumpFailed {
                command: command.to_string(),
                status: output.status_text(),
                stderr: output.stderr.trim().to_string(),
            });
        }
    }
    Ok(())
}

/// Summary of a formatting pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatReport {
    /// Commands that exited 0
    pub succeeded: Vec<String>,
    /// Commands that failed to spawn or exited non-zero
    pub failed: Vec<String>,
}

impl FormatReport {
    /// Whether any formatter failed
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Run every format command; never fails
pub async fn run_formatters(
    runner: &dyn CommandRunner,
    dir: &Path,
    commands: &[CommandConfig],
) -> FormatReport {
    let mut report = FormatReport::default();

    for command in commands {
        info!(command = %command, "formatting");
        match runner.run(dir, &command.to_spec()).await {
            Ok(output) if output.success() => report.succeeded.push(command.to_string()),
            Ok(output) => {
                warn!(
                    command = %command,
                    status = %output.status_text(),
                    "formatter failed, continuing"
                );
                report.failed.push(command.to_string());
            }
            Err(e) => {
                warn!(command = %command, error = %e, "formatter could not run, continuing");
                report.failed.push(command.to_string());
            }
        }
    }

    report
}
