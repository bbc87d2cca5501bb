//! # feedlint-schema - Record Conformance Rules
//!
//! Checks the JSON records kept under `authorizations/` and `price-feeds/`
//! against three field-level length rules and reports one diagnostic per
//! check.
//!
//! ## Rules
//!
//! - `name` (default empty) is at most 20 characters.
//! - `description`, when present, is at most 100 characters.
//! - Every value in the `address` map is at most 42 characters.
//!
//! ## Entry Points
//!
//! - [`Validator::run`] - walks the record directories and folds the
//!   per-file results into a single pass/fail.
//! - [`Validator::validate_file`] - checks one file.
//! - [`validate_name`], [`validate_description`], [`validate_address`]:
//!   the individual field rules over an already parsed [`Record`].
//!
//! ## Crate Policy
//!
//! - Every failure is local to a file or field. A malformed file is reported
//!   and counted, never allowed to abort the remaining files.
//! - Rules never print directly. Diagnostics go through a [`DiagnosticSink`]
//!   chosen by the caller; [`StdoutSink`] is the CI one.

pub mod diagnostic;
pub mod limits;
pub mod record;
pub mod validate;

pub use diagnostic::{Diagnostic, DiagnosticSink, Severity, StdoutSink};
pub use limits::FieldLimits;
pub use record::{Record, RecordError};
pub use validate::{
    validate_address, validate_description, validate_name, FailureKind, FileFailure, RunReport,
    Validator, DEFAULT_DIRECTORIES,
};
