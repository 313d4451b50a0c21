use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity};

/// Error types for an alignment run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// Two source fragments were collected at the same structural path
    StructuralConflict {
        path: String,
        existing: String,
        incoming: String,
    },
    /// Markup could not be parsed into a tree
    ParseError(String),
    /// The file extension is not one we know how to parse
    UnsupportedFormat(String),
    /// Reading or writing a file failed
    IoError(String),
    /// Writing the XLIFF document failed
    SerializeError(String),
    /// Invalid configuration or command line input
    ConfigError(String),
    /// Language code rejected by `validate_language`
    InvalidLanguage(String),
}

impl AlignError {
    /// Render the error as a fatal diagnostic for reports
    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            AlignError::StructuralConflict { path, .. } => Diagnostic {
                severity: Severity::Fatal,
                kind: DiagnosticKind::StructuralConflict,
                path: Some(path.clone()),
                message: self.to_string(),
            },
            _ => Diagnostic {
                severity: Severity::Fatal,
                kind: DiagnosticKind::Failure,
                path: None,
                message: self.to_string(),
            },
        }
    }
}

impl std::fmt::Display for AlignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignError::StructuralConflict {
                path,
                existing,
                incoming,
            } => write!(
                f,
                "Duplicate source entry: path {}: existing text: {}: new text: {}",
                path, existing, incoming
            ),
            AlignError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AlignError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            AlignError::IoError(msg) => write!(f, "I/O error: {}", msg),
            AlignError::SerializeError(msg) => write!(f, "Serialization error: {}", msg),
            AlignError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AlignError::InvalidLanguage(msg) => write!(f, "Invalid language: {}", msg),
        }
    }
}

impl std::error::Error for AlignError {}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
