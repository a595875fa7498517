//! Check command - verify the external tools a run needs

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use autodeps::error::{Error, Result};
use autodeps::toolchain::{probe_tools, required_tools};
use std::path::Path;

/// Report every required tool as found or missing
pub async fn run_check(path: &Path, config: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::new(path, config).await?;

    println!(
        "{} {}",
        "Host:".emphasis(),
        ctx.config.host.to_string().accent()
    );

    let statuses = probe_tools(&required_tools(&ctx.config));
    for status in &statuses {
        match &status.path {
            Some(found) => println!(
                "  {} {} {}",
                check(),
                status.name,
                found.display().muted()
            ),
            None => println!("  {} {} {}", cross(), status.name, "not found".warn()),
        }
    }

    let missing: Vec<String> = statuses
        .into_iter()
        .filter(|s| !s.is_found())
        .map(|s| s.name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingTools(missing))
    }
}
