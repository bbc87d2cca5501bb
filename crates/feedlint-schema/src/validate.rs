//! # Record Validation
//!
//! The three field rules and the directory walk that applies them.
//!
//! Every rule emits exactly one diagnostic per checked value, pass or fail,
//! so the CI log shows what was looked at and not only what broke. A file
//! passes when all of its rules pass; the run passes when every file in
//! every directory passes.
//!
//! ## Failure Isolation
//!
//! Rules never short-circuit each other, and a file that cannot be read or
//! parsed is reported as a single error and counted as failing. Neither
//! condition stops the walk over the remaining files.

use std::path::{Path, PathBuf};

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::limits::FieldLimits;
use crate::record::{char_len, Record, RecordError};

/// Record directories checked when no override is given, relative to the
/// repository root.
pub const DEFAULT_DIRECTORIES: [&str; 2] = ["authorizations", "price-feeds"];

const RECORD_SUFFIX: &str = ".json";

/// Check that `name` (empty when absent) fits within `limits.name`.
pub fn validate_name(
    record: &Record,
    file: &Path,
    limits: &FieldLimits,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    if char_len(record.name()) > limits.name {
        sink.emit(Diagnostic::error(
            file,
            format!("'name' exceeds {} characters.", limits.name),
        ));
        false
    } else {
        sink.emit(Diagnostic::notice(file, "name check passed ✅"));
        true
    }
}

/// Check that `description`, when present, fits within `limits.description`.
pub fn validate_description(
    record: &Record,
    file: &Path,
    limits: &FieldLimits,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    match record.description() {
        Some(description) if char_len(description) > limits.description => {
            sink.emit(Diagnostic::error(
                file,
                format!("'description' exceeds {} characters.", limits.description),
            ));
            false
        }
        _ => {
            sink.emit(Diagnostic::notice(file, "description check passed ✅"));
            true
        }
    }
}

/// Check every address against `limits.address`, one diagnostic per network.
///
/// Vacuously true when the record has no addresses.
pub fn validate_address(
    record: &Record,
    file: &Path,
    limits: &FieldLimits,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    record
        .addresses()
        .fold(true, |valid, (network, address)| {
            if char_len(address) > limits.address {
                sink.emit(Diagnostic::error(
                    file,
                    format!(
                        "'address.{network}' exceeds {} characters.",
                        limits.address
                    ),
                ));
                false
            } else {
                sink.emit(Diagnostic::notice(
                    file,
                    format!("address.{network} check passed ✅"),
                ));
                valid
            }
        })
}

/// Why a record file failed.
#[derive(Debug)]
pub enum FailureKind {
    /// The file could not be read or parsed.
    Load(RecordError),
    /// The record parsed but broke one or more field rules.
    Rules {
        /// Number of error diagnostics emitted for the file.
        violations: usize,
    },
}

/// A single failing record file.
#[derive(Debug)]
pub struct FileFailure {
    /// Path as shown in diagnostics.
    pub file: PathBuf,
    pub kind: FailureKind,
}

/// Outcome of a full run over the record directories.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of record files found.
    pub total: usize,
    /// Number that passed every rule.
    pub passed: usize,
    /// Number that failed to load or broke a rule.
    pub failed: usize,
    /// Details of each failing file.
    pub failures: Vec<FileFailure>,
    /// Directories that could not be listed.
    pub unreadable_directories: Vec<PathBuf>,
}

impl RunReport {
    /// True iff every file passed and every directory was readable.
    pub fn all_valid(&self) -> bool {
        self.failures.is_empty() && self.unreadable_directories.is_empty()
    }

    fn record(mut self, file: PathBuf, outcome: Result<(), FailureKind>) -> Self {
        self.total += 1;
        match outcome {
            Ok(()) => self.passed += 1,
            Err(kind) => {
                self.failed += 1;
                self.failures.push(FileFailure { file, kind });
            }
        }
        self
    }
}

/// Counts error diagnostics on their way to the wrapped sink.
struct ErrorCounter<'a> {
    inner: &'a mut dyn DiagnosticSink,
    errors: usize,
}

impl DiagnosticSink for ErrorCounter<'_> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.errors += 1;
        }
        self.inner.emit(diagnostic);
    }
}

/// Applies the field rules to the record files under a repository root.
#[derive(Debug, Clone)]
pub struct Validator {
    root: PathBuf,
    limits: FieldLimits,
}

impl Validator {
    /// Create a validator for the repository at `root` with default limits.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            limits: FieldLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: FieldLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    /// Validate a single record file.
    ///
    /// A read or parse failure is emitted as one error diagnostic and the
    /// file counts as failing.
    pub fn validate_file(&self, path: &Path, sink: &mut dyn DiagnosticSink) -> bool {
        self.check_file(path, sink).is_ok()
    }

    /// Validate every record file in `directories` and return whether all
    /// of them passed.
    pub fn run<P: AsRef<Path>>(&self, directories: &[P], sink: &mut dyn DiagnosticSink) -> bool {
        self.run_report(directories, sink).all_valid()
    }

    /// Validate every record file in `directories`, in order, and return
    /// per-file results.
    ///
    /// Relative directories resolve against the repository root. Files are
    /// visited in name order within each directory.
    pub fn run_report<P: AsRef<Path>>(
        &self,
        directories: &[P],
        sink: &mut dyn DiagnosticSink,
    ) -> RunReport {
        directories
            .iter()
            .fold(RunReport::default(), |report, dir| {
                let dir = self.root.join(dir.as_ref());
                self.run_directory(&dir, report, sink)
            })
    }

    fn run_directory(
        &self,
        dir: &Path,
        mut report: RunReport,
        sink: &mut dyn DiagnosticSink,
    ) -> RunReport {
        let files = match list_record_files(dir) {
            Ok(files) => files,
            Err(e) => {
                let shown = self.display_path(dir);
                tracing::debug!(dir = %dir.display(), error = %e, "cannot list record directory");
                sink.emit(Diagnostic::error(
                    shown.clone(),
                    format!("cannot read directory: {e}"),
                ));
                report.unreadable_directories.push(shown);
                return report;
            }
        };

        tracing::debug!(dir = %dir.display(), files = files.len(), "validating record directory");

        files.into_iter().fold(report, |report, path| {
            let outcome = self.check_file(&path, sink);
            report.record(self.display_path(&path), outcome)
        })
    }

    fn check_file(&self, path: &Path, sink: &mut dyn DiagnosticSink) -> Result<(), FailureKind> {
        let shown = self.display_path(path);
        let record = match Record::load(path) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(file = %path.display(), error = %e, "record failed to load");
                sink.emit(Diagnostic::error(shown, e.to_string()));
                return Err(FailureKind::Load(e));
            }
        };

        let mut counter = ErrorCounter {
            inner: sink,
            errors: 0,
        };
        let name_valid = validate_name(&record, &shown, &self.limits, &mut counter);
        let description_valid = validate_description(&record, &shown, &self.limits, &mut counter);
        let address_valid = validate_address(&record, &shown, &self.limits, &mut counter);

        tracing::debug!(
            file = %path.display(),
            name_valid,
            description_valid,
            address_valid,
            "record checked"
        );

        if name_valid && description_valid && address_valid {
            Ok(())
        } else {
            Err(FailureKind::Rules {
                violations: counter.errors,
            })
        }
    }

    /// Path relative to the root when it lies beneath it.
    fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }
}

/// Regular files directly under `dir` whose name ends in `.json`, sorted.
///
/// The suffix is matched on the raw file name bytes.
fn list_record_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // Names need not be UTF-8; a non-UTF-8 record must still be checked.
        let is_record = entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(RECORD_SUFFIX.as_bytes());
        if is_record && entry.path().is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::collection::btree_map;
    use proptest::prelude::*;

    fn check_name(name: &str) -> bool {
        let r = Record {
            name: Some(name.to_string()),
            ..Record::default()
        };
        let mut sink: Vec<Diagnostic> = Vec::new();
        validate_name(&r, Path::new("x.json"), &FieldLimits::default(), &mut sink)
    }

    proptest! {
        /// The name rule fails exactly when the name is longer than 20 characters.
        #[test]
        fn name_fails_iff_too_long(name in "\\PC{0,40}") {
            prop_assert_eq!(check_name(&name), name.chars().count() <= 20);
        }

        /// An absent description always passes; a present one fails only past 100 characters.
        #[test]
        fn description_fails_iff_present_and_too_long(
            description in proptest::option::of("\\PC{0,160}"),
        ) {
            let expected = description
                .as_ref()
                .map_or(true, |d| d.chars().count() <= 100);
            let r = Record { description, ..Record::default() };
            let mut sink: Vec<Diagnostic> = Vec::new();
            let valid = validate_description(&r, Path::new("x.json"), &FieldLimits::default(), &mut sink);
            prop_assert_eq!(valid, expected);
            prop_assert_eq!(sink.len(), 1);
        }

        /// The address rule passes iff every value fits, with one diagnostic per network.
        #[test]
        fn address_fails_iff_any_value_too_long(
            address in proptest::option::of(btree_map("[a-z]{1,10}", "[0-9a-fx]{0,60}", 0..6)),
        ) {
            let expected = address
                .iter()
                .flatten()
                .all(|(_, v)| v.chars().count() <= 42);
            let networks = address.as_ref().map_or(0, |a| a.len());
            let r = Record {
                address: address.map(|a| a.into_iter().collect()),
                ..Record::default()
            };
            let mut sink: Vec<Diagnostic> = Vec::new();
            let valid = validate_address(&r, Path::new("x.json"), &FieldLimits::default(), &mut sink);
            prop_assert_eq!(valid, expected);
            prop_assert_eq!(sink.len(), networks);
        }
    }
}
