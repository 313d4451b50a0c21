//! Depth-first traversal assigning a structural path to every node
//!
//! Visiting is pre-order: a parent before its children, siblings in document
//! order. Every node is visited, whatever its kind, because element ordinals
//! depend on all siblings; callers filter in the visitor.

use std::convert::Infallible;

use crate::path::{SiblingCounter, child_path};
use crate::tree::{NodeKind, TreeNode};

/// Visit every node of `root` with its structural path
pub fn walk<N, F>(root: &N, mut visitor: F)
where
    N: TreeNode,
    F: FnMut(&N, &str),
{
    let result: Result<(), Infallible> = try_walk(root, |node, path| {
        visitor(node, path);
        Ok(())
    });
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Visit every node of `root`, stopping at the first visitor error
pub fn try_walk<N, F, E>(root: &N, mut visitor: F) -> Result<(), E>
where
    N: TreeNode,
    F: FnMut(&N, &str) -> Result<(), E>,
{
    fn visit<N, F, E>(node: &N, path: &str, visitor: &mut F) -> Result<(), E>
    where
        N: TreeNode,
        F: FnMut(&N, &str) -> Result<(), E>,
    {
        visitor(node, path)?;

        let mut counter = SiblingCounter::for_children(node.children());
        for child in node.children() {
            let child_at = child_path(path, child, &mut counter);
            visit(child, &child_at, visitor)?;
        }
        Ok(())
    }

    visit(root, "", &mut visitor)
}

/// List `(kind, path)` for every node in traversal order
pub fn paths<N: TreeNode>(root: &N) -> Vec<(NodeKind, String)> {
    let mut out = Vec::new();
    walk(root, |node, path| out.push((node.kind(), path.to_string())));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    fn sample() -> Node {
        Node::document(vec![Node::element(
            "root",
            vec![
                Node::text_element("title", "Hello"),
                Node::text_element("para", "A"),
                Node::element(
                    "section",
                    vec![Node::text_element("para", "Inner")],
                ),
                Node::text_element("para", "B"),
            ],
        )])
    }

    fn text_paths(root: &Node) -> Vec<(String, String)> {
        let mut out = Vec::new();
        walk(root, |node, path| {
            if node.kind() == NodeKind::Text {
                out.push((path.to_string(), node.text().unwrap_or_default().to_string()));
            }
        });
        out
    }

    #[test]
    fn test_preorder_paths() {
        let kinds_and_paths = paths(&sample());
        let expected = vec![
            (NodeKind::Document, ""),
            (NodeKind::Element, "/root[1]"),
            (NodeKind::Element, "/root[1]/title[1]"),
            (NodeKind::Text, "/root[1]/title[1]"),
            (NodeKind::Element, "/root[1]/para[1]"),
            (NodeKind::Text, "/root[1]/para[1]"),
            (NodeKind::Element, "/root[1]/section[1]"),
            (NodeKind::Element, "/root[1]/section[1]/para[1]"),
            (NodeKind::Text, "/root[1]/section[1]/para[1]"),
            (NodeKind::Element, "/root[1]/para[2]"),
            (NodeKind::Text, "/root[1]/para[2]"),
        ];
        let expected: Vec<(NodeKind, String)> = expected
            .into_iter()
            .map(|(k, p)| (k, p.to_string()))
            .collect();
        assert_eq!(kinds_and_paths, expected);
    }

    #[test]
    fn test_counters_do_not_leak_between_branches() {
        let texts = text_paths(&sample());
        // the nested para restarts at 1 and does not bump the outer count
        assert_eq!(texts[2].0, "/root[1]/section[1]/para[1]");
        assert_eq!(texts[3].0, "/root[1]/para[2]");
    }

    #[test]
    fn test_walk_is_deterministic() {
        let tree = sample();
        assert_eq!(paths(&tree), paths(&tree));
        assert_eq!(paths(&tree), paths(&tree.clone()));
    }

    #[test]
    fn test_visits_every_node_once() {
        let tree = sample();
        let mut visited = 0;
        walk(&tree, |_, _| visited += 1);
        assert_eq!(visited, tree.node_count());
    }

    #[test]
    fn test_try_walk_stops_at_first_error() {
        let tree = sample();
        let mut seen = Vec::new();
        let result = try_walk(&tree, |node, path| {
            seen.push(path.to_string());
            if node.tag_name() == Some("section") {
                return Err(path.to_string());
            }
            Ok(())
        });
        assert_eq!(result, Err("/root[1]/section[1]".to_string()));
        assert_eq!(seen.last().map(String::as_str), Some("/root[1]/section[1]"));
        assert!(!seen.iter().any(|p| p == "/root[1]/para[2]"));
    }

    #[test]
    fn test_comments_do_not_shift_ordinals() {
        let with_comment = Node::document(vec![Node::element(
            "root",
            vec![
                Node::Comment("note".to_string()),
                Node::text_element("para", "A"),
            ],
        )]);
        let texts = text_paths(&with_comment);
        assert_eq!(texts, vec![("/root[1]/para[1]".to_string(), "A".to_string())]);
    }

    #[test]
    fn test_mixed_content_runs_get_distinct_paths() {
        let tree = Node::document(vec![Node::element(
            "p",
            vec![
                Node::text_node("See the "),
                Node::text_element("a", "documentation"),
                Node::text_node(" for details."),
            ],
        )]);
        let texts = text_paths(&tree);
        assert_eq!(
            texts,
            vec![
                ("/p[1]/text()[1]".to_string(), "See the ".to_string()),
                ("/p[1]/a[1]".to_string(), "documentation".to_string()),
                ("/p[1]/text()[2]".to_string(), " for details.".to_string()),
            ]
        );
    }
}
