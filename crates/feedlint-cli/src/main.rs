//! # feedlint entry point
//!
//! Parses arguments, installs the log subscriber and maps the run result to
//! the process exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use feedlint_cli::check::{run_check, CheckArgs};
use feedlint_cli::find_repo_root;

/// Check authorization and price-feed records against their field bounds.
///
/// Emits `::notice`/`::error` workflow annotations on stdout and exits with
/// status 1 if any record fails.
#[derive(Parser, Debug)]
#[command(name = "feedlint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Repository root. Defaults to the nearest ancestor of the current
    /// directory that holds a record directory.
    #[arg(long, value_name = "PATH")]
    root: Option<PathBuf>,

    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = resolve_root(cli.root).and_then(|root| {
        tracing::debug!(root = %root.display(), "resolved repository root");
        run_check(&cli.check, &root)
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn resolve_root(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root);
    }
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(find_repo_root(&cwd).unwrap_or_else(|| {
        tracing::warn!("no record directory found above the current directory; using it as root");
        cwd
    }))
}
