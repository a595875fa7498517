//! Init command - write a default `autodeps.toml`

use crate::cli::style::{Stylize, check};
use anstream::println;
use autodeps::config::{AutodepsConfig, save_config};
use autodeps::error::Result;
use autodeps::git::Git;
use autodeps::process::SystemRunner;
use std::path::Path;
use std::sync::Arc;

/// Write the built-in defaults to the repository root
pub async fn run_init(path: &Path) -> Result<()> {
    let repo_root = Git::new(Arc::new(SystemRunner), path).toplevel().await?;
    let written = save_config(&repo_root, &AutodepsConfig::default())?;
    println!("{} Wrote {}", check(), written.display().accent());
    Ok(())
}
