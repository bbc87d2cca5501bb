//! # Diagnostics
//!
//! One line per check, in the workflow-command form CI runners turn into
//! inline annotations:
//!
//! ```text
//! ::notice file=authorizations/usdc.json::name check passed ✅
//! ::error file=price-feeds/eth.json::'address.base' exceeds 42 characters.
//! ```

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Annotation level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Notice,
    /// The check failed.
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single pass/fail line tied to a file and a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// File the diagnostic is attached to, as shown to the operator.
    pub file: PathBuf,
    pub message: String,
}

impl Diagnostic {
    pub fn notice(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Notice,
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn error(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "::{} file={}::{}",
            self.severity,
            self.file.display(),
            self.message
        )
    }
}

/// Destination for diagnostics produced by the field rules.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in emission order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Writes every diagnostic as one line on standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{diagnostic}") {
            tracing::warn!(error = %e, "failed to write diagnostic to stdout");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_renders_as_workflow_command() {
        let d = Diagnostic::notice("authorizations/usdc.json", "name check passed ✅");
        assert_eq!(
            d.to_string(),
            "::notice file=authorizations/usdc.json::name check passed ✅"
        );
        assert!(!d.is_error());
    }

    #[test]
    fn error_renders_as_workflow_command() {
        let d = Diagnostic::error(
            "price-feeds/eth.json",
            "'address.base' exceeds 42 characters.",
        );
        assert_eq!(
            d.to_string(),
            "::error file=price-feeds/eth.json::'address.base' exceeds 42 characters."
        );
        assert!(d.is_error());
    }

    #[test]
    fn vec_sink_preserves_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.emit(Diagnostic::notice("a.json", "first"));
        sink.emit(Diagnostic::error("b.json", "second"));
        let messages: Vec<&str> = sink.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
