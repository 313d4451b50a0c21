//! One alignment run over a source/translation document pair
//!
//! The run is a straight pipeline: collect the source fragments, collect the
//! translation fragments into the same table, emit the surviving pairs. A
//! fatal conflict in either collection pass ends the run before anything is
//! emitted.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::collector::{CollectMode, FragmentCollector};
use crate::config::AlignConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::emitter::{AlignedPair, emit_pairs};
use crate::error::AlignResult;
use crate::loader::read_document;
use crate::table::AlignmentTable;
use crate::traverse::try_walk;
use crate::tree::TreeNode;

/// Stage of an alignment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CollectSource,
    CollectTranslation,
    Emit,
    Done,
}

impl Phase {
    /// The stage that follows this one; `Done` is terminal
    pub fn next(self) -> Phase {
        match self {
            Phase::CollectSource => Phase::CollectTranslation,
            Phase::CollectTranslation => Phase::Emit,
            Phase::Emit | Phase::Done => Phase::Done,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::CollectSource => "collect-source",
            Phase::CollectTranslation => "collect-translation",
            Phase::Emit => "emit",
            Phase::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub pairs: Vec<AlignedPair>,
    /// Warnings in the order they were raised
    pub diagnostics: Vec<Diagnostic>,
}

impl Alignment {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    pub fn new(config: AlignConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Align two parsed documents
    ///
    /// Returns `Err(AlignError::StructuralConflict)` when two source fragments
    /// share a path; warnings are returned inside the [`Alignment`].
    pub fn align<N: TreeNode>(&self, source: &N, translation: &N) -> AlignResult<Alignment> {
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        let mut phase = Phase::CollectSource;
        let mut pairs = Vec::new();

        while phase != Phase::Done {
            debug!(%phase, entries = table.len(), "alignment phase");
            match phase {
                Phase::CollectSource => {
                    collect(source, &mut table, &mut diagnostics, CollectMode::Source)?
                }
                Phase::CollectTranslation => collect(
                    translation,
                    &mut table,
                    &mut diagnostics,
                    CollectMode::Translation,
                )?,
                Phase::Emit => pairs = emit_pairs(&table, &mut diagnostics),
                Phase::Done => {}
            }
            phase = phase.next();
        }

        info!(
            entries = table.len(),
            pairs = pairs.len(),
            warnings = diagnostics.len(),
            "aligned document pair"
        );

        Ok(Alignment {
            pairs,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Load, parse and align two files; the parser is picked from each
    /// file's extension
    pub fn align_files(&self, source_path: &Path, translation_path: &Path) -> AlignResult<Alignment> {
        let source = read_document(source_path)?;
        let translation = read_document(translation_path)?;
        self.align(&source, &translation)
    }
}

fn collect<N: TreeNode>(
    root: &N,
    table: &mut AlignmentTable,
    diagnostics: &mut Diagnostics,
    mode: CollectMode,
) -> AlignResult<()> {
    let mut collector = FragmentCollector::new(table, diagnostics, mode);
    try_walk(root, |node, path| collector.visit(node, path))
}
