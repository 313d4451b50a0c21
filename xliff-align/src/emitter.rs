//! Final filtering of the alignment table into numbered pairs

use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, Diagnostics, NoopReason};
use crate::table::{AlignmentEntry, AlignmentTable};

/// A validated source/translation pair ready for serialization
///
/// Both texts are non-blank and differ from each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// 1-based, sequential in emission order
    pub id: usize,
    pub path: String,
    pub source: String,
    pub target: String,
}

/// Walk the table in insertion order and keep the entries worth translating
///
/// Rejected entries produce one `NoopPair` warning each, for the first rule
/// they fail: blank source, blank translation, identical text.
pub fn emit_pairs(table: &AlignmentTable, diagnostics: &mut Diagnostics) -> Vec<AlignedPair> {
    let mut pairs = Vec::new();

    for entry in table.iter() {
        match check_entry(entry) {
            Ok((source, target)) => pairs.push(AlignedPair {
                id: pairs.len() + 1,
                path: entry.path.clone(),
                source: source.to_string(),
                target: target.to_string(),
            }),
            Err(reason) => {
                diagnostics.warn(
                    DiagnosticKind::NoopPair(reason),
                    &entry.path,
                    noop_message(reason, entry),
                );
            }
        }
    }

    pairs
}

fn check_entry(entry: &AlignmentEntry) -> Result<(&str, &str), NoopReason> {
    let source = entry.source_text().ok_or(NoopReason::BlankSource)?;
    let target = entry
        .translation_text()
        .ok_or(NoopReason::BlankTranslation)?;
    if source == target {
        return Err(NoopReason::Identical);
    }
    Ok((source, target))
}

fn noop_message(reason: NoopReason, entry: &AlignmentEntry) -> String {
    let source = entry.source.as_deref().unwrap_or_default();
    match reason {
        NoopReason::BlankSource => {
            format!("Source entry is null or empty: path {}", entry.path)
        }
        NoopReason::BlankTranslation => format!(
            "Translation entry is null or empty: path {}: source: {}",
            entry.path, source
        ),
        NoopReason::Identical => format!(
            "Source and translation are identical: path {}: text: {}",
            entry.path, source
        ),
    }
}
