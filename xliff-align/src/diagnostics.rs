//! Diagnostics produced while aligning a document pair
//!
//! Warnings never stop a run; they are collected in order and handed back to
//! the caller next to the aligned pairs. Fatal diagnostics come from an
//! [`AlignError`](crate::AlignError) and end the run for that pair only.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Warning,
    Fatal,
}

/// Why an entry was left out of the emitted pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    BlankSource,
    BlankTranslation,
    Identical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Two source fragments map to the same structural path
    StructuralConflict,
    /// A translation fragment has no source entry at its path
    OrphanTranslation,
    /// A translation fragment's entry has no source text
    MissingSource,
    /// Entry excluded from output: blank side or nothing to translate
    NoopPair(NoopReason),
    /// Any other failure of a document pair (parse, I/O, serialization)
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, path: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            path: Some(path.to_string()),
            message,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// Emit this diagnostic as a log event: `warn!` for warnings, `error!`
    /// for fatal ones
    pub fn log(&self) {
        let path = self.path.as_deref().unwrap_or("");
        match self.severity {
            Severity::Warning => warn!(path, kind = ?self.kind, "{}", self.message),
            Severity::Fatal => error!(path, kind = ?self.kind, "{}", self.message),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Fatal => "ERROR",
        };
        write!(f, "[{}] {}", level, self.message)
    }
}

/// Ordered sink for the diagnostics of one alignment run
///
/// Every pushed diagnostic is also logged, so a host that only watches the
/// log still sees per-path problems as they happen.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.items.push(diagnostic);
    }

    pub fn warn(&mut self, kind: DiagnosticKind, path: &str, message: String) {
        self.push(Diagnostic::warning(kind, path, message));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Count the diagnostics of a given kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
