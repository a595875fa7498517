//! autodeps - CLI entry point

mod cli;

use anstream::eprintln;
use autodeps::pipeline::RunOptions;
use clap::{ArgAction, Parser, Subcommand};
use cli::style::Stylize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Env var holding a tracing filter directive
const LOG_ENV: &str = "AUTODEPS_LOG";

#[derive(Parser)]
#[command(
    name = "autodeps",
    version,
    about = "Bump dependencies and publish them as an automerging pull request"
)]
struct Cli {
    /// Path inside the repository
    #[arg(short = 'C', long, global = true, default_value = ".")]
    path: PathBuf,

    /// Config file (defaults to autodeps.toml at the repository root)
    #[arg(long, global = true, env = "AUTODEPS_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bump dependencies, push a branch and open an automerging PR
    Run {
        /// Stop before publishing and show what would be pushed
        #[arg(long)]
        dry_run: bool,

        /// Open the PR without enabling automerge
        #[arg(long)]
        no_automerge: bool,

        /// Skip the check for required tools
        #[arg(long)]
        skip_tool_check: bool,
    },
    /// Check that every tool a run needs is installed
    Check,
    /// Write a default autodeps.toml to the repository root
    Init,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command.unwrap_or(Commands::Run {
        dry_run: false,
        no_automerge: false,
        skip_tool_check: false,
    }) {
        Commands::Run {
            dry_run,
            no_automerge,
            skip_tool_check,
        } => {
            let options = RunOptions {
                dry_run,
                no_automerge,
                check_tools: !skip_tool_check,
            };
            cli::run_run(&cli.path, config, options).await
        }
        Commands::Check => cli::run_check(&cli.path, config).await,
        Commands::Init => cli::run_init(&cli.path).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".failure());
            ExitCode::FAILURE
        }
    }
}
