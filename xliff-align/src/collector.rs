//! Visitor that records text fragments into the alignment table
//!
//! The same collector runs twice per document pair: once over the source
//! tree in [`CollectMode::Source`], then over the translation tree in
//! [`CollectMode::Translation`], both writing into one table.

use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{AlignError, AlignResult};
use crate::path::is_text_run;
use crate::table::AlignmentTable;
use crate::tree::TreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectMode {
    Source,
    Translation,
}

pub struct FragmentCollector<'a> {
    table: &'a mut AlignmentTable,
    diagnostics: &'a mut Diagnostics,
    mode: CollectMode,
}

impl<'a> FragmentCollector<'a> {
    pub fn new(
        table: &'a mut AlignmentTable,
        diagnostics: &'a mut Diagnostics,
        mode: CollectMode,
    ) -> Self {
        Self {
            table,
            diagnostics,
            mode,
        }
    }

    /// Visitor entry point, called once per traversed node
    pub fn visit<N: TreeNode>(&mut self, node: &N, path: &str) -> AlignResult<()> {
        if path.is_empty() || !is_text_run(node) {
            return Ok(());
        }
        let Some(text) = node.text() else {
            return Ok(());
        };

        match self.mode {
            CollectMode::Source => self.add_source(path, text),
            CollectMode::Translation => {
                self.add_translation(path, text);
                Ok(())
            }
        }
    }

    /// Record a source fragment; a second fragment at the same path is fatal
    pub fn add_source(&mut self, path: &str, text: &str) -> AlignResult<()> {
        if let Some(existing) = self.table.get(path).and_then(|e| e.source.as_deref()) {
            return Err(AlignError::StructuralConflict {
                path: path.to_string(),
                existing: existing.to_string(),
                incoming: text.to_string(),
            });
        }
        self.table.entry_or_insert(path).source = Some(text.to_string());
        Ok(())
    }

    /// Record a translation fragment, discarding it with a warning when
    /// there is no source text to pair it with
    pub fn add_translation(&mut self, path: &str, text: &str) {
        let Some(entry) = self.table.get_mut(path) else {
            self.diagnostics.warn(
                DiagnosticKind::OrphanTranslation,
                path,
                format!("No source entry: path {}: translation: {}", path, text),
            );
            return;
        };

        if entry.source_text().is_none() {
            self.diagnostics.warn(
                DiagnosticKind::MissingSource,
                path,
                format!("No source string: path {}: translation: {}", path, text),
            );
            return;
        }

        if let Some(previous) = &entry.translation {
            debug!(path, previous = %previous, "replacing translation at path");
        }
        entry.translation = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::try_walk;
    use crate::tree::Node;

    fn collect(
        tree: &Node,
        table: &mut AlignmentTable,
        diagnostics: &mut Diagnostics,
        mode: CollectMode,
    ) -> AlignResult<()> {
        let mut collector = FragmentCollector::new(table, diagnostics, mode);
        try_walk(tree, |node, path| collector.visit(node, path))
    }

    #[test]
    fn test_source_pass_records_non_blank_text() {
        let tree = Node::document(vec![Node::element(
            "root",
            vec![
                Node::text_node("\n  "),
                Node::text_element("title", "Hello"),
                Node::text_node("\n"),
            ],
        )]);
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        collect(&tree, &mut table, &mut diagnostics, CollectMode::Source).unwrap();

        assert_eq!(table.len(), 1);
        let entry = table.get("/root[1]/title[1]").unwrap();
        assert_eq!(entry.source.as_deref(), Some("Hello"));
        assert!(entry.translation.is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_source_text_is_kept_untrimmed() {
        let tree = Node::document(vec![Node::text_element("p", "  padded ")]);
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        collect(&tree, &mut table, &mut diagnostics, CollectMode::Source).unwrap();
        assert_eq!(table.get("/p[1]").unwrap().source.as_deref(), Some("  padded "));
    }

    #[test]
    fn test_duplicate_source_is_structural_conflict() {
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        let mut collector =
            FragmentCollector::new(&mut table, &mut diagnostics, CollectMode::Source);
        collector.add_source("/p[1]", "One").unwrap();
        let err = collector.add_source("/p[1]", "Two").unwrap_err();

        assert_eq!(
            err,
            AlignError::StructuralConflict {
                path: "/p[1]".to_string(),
                existing: "One".to_string(),
                incoming: "Two".to_string(),
            }
        );
        assert_eq!(table.get("/p[1]").unwrap().source.as_deref(), Some("One"));
    }

    #[test]
    fn test_mixed_content_runs_are_separate_entries() {
        let tree = Node::document(vec![Node::element(
            "p",
            vec![
                Node::text_node("One"),
                Node::element("br", vec![]),
                Node::text_node("\n"),
                Node::text_node("Two"),
            ],
        )]);
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        collect(&tree, &mut table, &mut diagnostics, CollectMode::Source).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("/p[1]/text()[1]").unwrap().source.as_deref(),
            Some("One")
        );
        assert_eq!(
            table.get("/p[1]/text()[2]").unwrap().source.as_deref(),
            Some("Two")
        );
        assert!(table.get("/p[1]").is_none());
    }

    #[test]
    fn test_orphan_translation_is_discarded() {
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        let mut collector =
            FragmentCollector::new(&mut table, &mut diagnostics, CollectMode::Translation);
        collector.add_translation("/root[1]/extra[1]", "Extra");

        assert!(table.is_empty());
        assert_eq!(diagnostics.count(DiagnosticKind::OrphanTranslation), 1);
    }

    #[test]
    fn test_translation_without_source_is_discarded() {
        let mut table = AlignmentTable::new();
        table.entry_or_insert("/a[1]").source = Some("   ".to_string());
        let mut diagnostics = Diagnostics::new();
        let mut collector =
            FragmentCollector::new(&mut table, &mut diagnostics, CollectMode::Translation);
        collector.add_translation("/a[1]", "Bonjour");

        assert!(table.get("/a[1]").unwrap().translation.is_none());
        assert_eq!(diagnostics.count(DiagnosticKind::MissingSource), 1);
    }

    #[test]
    fn test_last_translation_wins() {
        let mut table = AlignmentTable::new();
        table.entry_or_insert("/a[1]").source = Some("Hello".to_string());
        let mut diagnostics = Diagnostics::new();
        let mut collector =
            FragmentCollector::new(&mut table, &mut diagnostics, CollectMode::Translation);
        collector.add_translation("/a[1]", "Salut");
        collector.add_translation("/a[1]", "Bonjour");

        assert_eq!(
            table.get("/a[1]").unwrap().translation.as_deref(),
            Some("Bonjour")
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_document_level_text_is_ignored() {
        let tree = Node::document(vec![Node::text_node("stray"), Node::text_element("a", "A")]);
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        collect(&tree, &mut table, &mut diagnostics, CollectMode::Source).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains("/a[1]"));
    }

    #[test]
    fn test_cdata_and_comments_are_not_collected() {
        let tree = Node::document(vec![Node::element(
            "root",
            vec![
                Node::Comment("translator note".to_string()),
                Node::CData("<raw>".to_string()),
            ],
        )]);
        let mut table = AlignmentTable::new();
        let mut diagnostics = Diagnostics::new();
        collect(&tree, &mut table, &mut diagnostics, CollectMode::Source).unwrap();
        assert!(table.is_empty());
    }
}
