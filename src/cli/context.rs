//! Shared command context for CLI commands
//!
//! Resolves the repository root and loads the config, the setup shared
//! by every command.

use autodeps::config::{AutodepsConfig, load_config, load_config_from};
use autodeps::error::Result;
use autodeps::git::Git;
use autodeps::pipeline::RunContext;
use autodeps::process::{CommandRunner, SystemRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared context for CLI commands
pub struct CommandContext {
    /// Root of the git repository
    pub repo_root: PathBuf,
    /// Loaded config
    pub config: AutodepsConfig,
    /// Process runner
    pub runner: Arc<dyn CommandRunner>,
}

impl CommandContext {
    /// Resolve the repository containing `path` and load its config
    ///
    /// An explicit `config` path must exist; otherwise a missing
    /// `autodeps.toml` means defaults.
    pub async fn new(path: &Path, config: Option<&Path>) -> Result<Self> {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);
        let repo_root = Git::new(Arc::clone(&runner), path).toplevel().await?;

        let config = match config {
            Some(file) => load_config_from(file)?,
            None => load_config(&repo_root)?,
        };

        Ok(Self {
            repo_root,
            config,
            runner,
        })
    }

    /// Turn into the library's run context
    pub fn into_run_context(self) -> RunContext {
        RunContext::new(self.repo_root, self.config, self.runner)
    }
}
