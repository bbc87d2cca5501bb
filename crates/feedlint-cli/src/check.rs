//! # Record Check
//!
//! Runs the field rules over the record directories and turns the report
//! into an exit code: 0 when every record passes, 1 otherwise.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use clap::Args;

use feedlint_schema::{
    DiagnosticSink, FailureKind, RunReport, StdoutSink, Validator, DEFAULT_DIRECTORIES,
};

/// Arguments selecting which records to check.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Record directory to check, relative to the root. Repeatable.
    /// Defaults to `authorizations` and `price-feeds`.
    #[arg(long = "dir", value_name = "PATH")]
    pub dirs: Vec<PathBuf>,
}

impl CheckArgs {
    fn directories(&self) -> Vec<PathBuf> {
        if self.dirs.is_empty() {
            DEFAULT_DIRECTORIES.into_iter().map(PathBuf::from).collect()
        } else {
            self.dirs.clone()
        }
    }
}

/// Execute the check, printing diagnostics and a summary to stdout.
///
/// Returns exit code: 0 if every record passed, 1 otherwise.
pub fn run_check(args: &CheckArgs, root: &Path) -> Result<u8> {
    let report = check_records(args, root, &mut StdoutSink)?;

    println!("Records: {}/{} passed", report.passed, report.total);

    Ok(exit_code(&report))
}

/// Validate the selected directories under `root`, sending diagnostics to `sink`.
pub fn check_records(
    args: &CheckArgs,
    root: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<RunReport> {
    ensure!(
        root.is_dir(),
        "repository root {} is not a directory",
        root.display()
    );

    let directories = args.directories();
    let report = Validator::new(root).run_report(&directories, sink);

    tracing::info!(
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        "record check complete"
    );

    for failure in &report.failures {
        match &failure.kind {
            FailureKind::Load(e) => {
                tracing::info!(file = %failure.file.display(), "unreadable record: {e}");
            }
            FailureKind::Rules { violations } => {
                tracing::info!(file = %failure.file.display(), violations, "record out of bounds");
            }
        }
    }

    Ok(report)
}

/// Map a run report to the process exit code.
pub fn exit_code(report: &RunReport) -> u8 {
    if report.all_valid() {
        0
    } else {
        1
    }
}
