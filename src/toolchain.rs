//! Environment preparation: make sure every external tool is reachable
//! before anything touches the working tree.

use crate::config::{AutodepsConfig, HostKind};
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Result of looking up one tool on `PATH`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// Executable name
    pub name: String,
    /// Resolved path, `None` if not found
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    /// Whether the tool was found
    pub const fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Executables a run with `config` will invoke, without duplicates
pub fn required_tools(config: &AutodepsConfig) -> Vec<String> {
    let mut tools = vec!["git".to_string()];
    if config.host == HostKind::GhCli {
        tools.push("gh".to_string());
    }
    for cmd in config.bump.iter().chain(&config.format) {
        if !tools.contains(&cmd.program) {
            tools.push(cmd.program.clone());
        }
    }
    tools
}

/// Look up each tool on `PATH`
pub fn probe_tools(tools: &[String]) -> Vec<ToolStatus> {
    tools
        .iter()
        .map(|name| {
            let path = which::which(name).ok();
            debug!(tool = %name, found = path.is_some(), "probed tool");
            ToolStatus {
                name: name.clone(),
                path,
            }
        })
        .collect()
}

/// Fail with every missing tool named, not just the first
pub fn ensure_tools(tools: &[String]) -> Result<Vec<ToolStatus>> {
    let statuses = probe_tools(tools);
    let missing: Vec<String> = statuses
        .iter()
        .filter(|s| !s.is_found())
        .map(|s| s.name.clone())
        .collect();

    if missing.is_empty() {
        Ok(statuses)
    } else {
        Err(Error::MissingTools(missing))
    }
}
