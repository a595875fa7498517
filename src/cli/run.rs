//! Run command - bump, commit, push and open an automerging PR

use crate::cli::context::CommandContext;
use crate::cli::progress::CliProgress;
use crate::cli::style::{CHECK, Stylize, arrow, hyperlink};
use anstream::println;
use autodeps::error::Result;
use autodeps::pipeline::{RunOptions, run_pipeline};
use autodeps::types::RunOutcome;
use std::path::Path;

/// Run the pipeline once and print its outcome
pub async fn run_run(path: &Path, config: Option<&Path>, options: RunOptions) -> Result<()> {
    let ctx = CommandContext::new(path, config).await?;

    println!(
        "{} {}",
        "Updating dependencies in".emphasis(),
        ctx.repo_root.display().accent()
    );

    let mut run_ctx = ctx.into_run_context();
    let progress = CliProgress::new();
    let outcome = run_pipeline(&mut run_ctx, options, &progress).await;

    match &outcome {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }

    match outcome? {
        RunOutcome::NoChanges => {
            println!("{}", "No dependency changes, nothing to do".muted());
        }
        RunOutcome::DryRun { branch, title } => {
            println!("{}:", "Dry run".emphasis());
            println!("  {} branch {}", arrow(), branch.accent());
            println!("  {} title  {}", arrow(), title);
            println!("{}", "Run without --dry-run to publish.".muted());
        }
        RunOutcome::Published {
            branch,
            pull_request,
            automerge,
        } => {
            println!();
            println!(
                "{} PR #{} opened from {}",
                format!("{CHECK} Published:").success(),
                pull_request.number.accent(),
                branch.accent()
            );
            println!(
                "  {}",
                hyperlink(&format!("#{}", pull_request.number), &pull_request.html_url)
            );
            if automerge {
                println!("  {}", "Automerge enabled".muted());
            } else {
                println!("  {}", "Automerge not requested".muted());
            }
        }
    }

    Ok(())
}
