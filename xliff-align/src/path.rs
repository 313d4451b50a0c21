//! Structural paths
//!
//! A node's path is the chain of `/tag[k]` segments from the document root
//! down to it, where `k` is the 1-based ordinal of the element among its
//! parent's children with the same tag.
//!
//! Text is addressed through its container. When an element holds a single
//! text run, that run carries the element's own path, so the text inside
//! `<title>` is `.../title[1]`. When an element holds several text runs
//! (mixed content such as `<p>See <a>this</a> page</p>`), each run gets a
//! `/text()[k]` step numbered among the non-blank runs of that element:
//! `.../p[1]/text()[1]` and `.../p[1]/text()[2]`. Whitespace-only text,
//! CDATA, comments and declarations never take an ordinal and carry the
//! container's path.

use std::collections::HashMap;

use crate::tree::{NodeKind, TreeNode};

/// Step name used for numbered text runs
pub const TEXT_STEP: &str = "text()";

/// Per-parent ordinals of same-tagged children and of text runs
///
/// One counter lives in each traversal frame and is dropped with it, so
/// numbering restarts under every parent.
#[derive(Debug, Default)]
pub struct SiblingCounter {
    seen: HashMap<String, usize>,
    text_runs: usize,
    texts_seen: usize,
}

impl SiblingCounter {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
            text_runs: 0,
            texts_seen: 0,
        }
    }

    /// Counter for the children of one parent, aware of how many text runs
    /// that parent holds
    pub fn for_children<N: TreeNode>(children: &[N]) -> Self {
        Self {
            text_runs: children.iter().filter(|c| is_text_run(*c)).count(),
            ..Self::new()
        }
    }

    /// Return the 1-based ordinal of the next sibling tagged `tag`
    pub fn next(&mut self, tag: &str) -> usize {
        let counter = self.seen.entry(tag.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Ordinal of the next text run, or `None` when the parent holds at most
    /// one run and text keeps the container path
    pub fn next_text(&mut self) -> Option<usize> {
        if self.text_runs < 2 {
            return None;
        }
        self.texts_seen += 1;
        Some(self.texts_seen)
    }
}

/// Whether `node` is a text node with non-whitespace content
pub fn is_text_run<N: TreeNode>(node: &N) -> bool {
    node.kind() == NodeKind::Text && node.text().is_some_and(|t| !t.trim().is_empty())
}

/// Path segment for one element, e.g. `/para[2]`
pub fn segment(tag: &str, ordinal: usize) -> String {
    format!("/{}[{}]", tag, ordinal)
}

/// Compute the path of `child` given its parent's path
pub fn child_path<N: TreeNode>(
    parent_path: &str,
    child: &N,
    counter: &mut SiblingCounter,
) -> String {
    match child.tag_name() {
        Some(tag) => {
            let ordinal = counter.next(tag);
            let mut path = String::with_capacity(parent_path.len() + tag.len() + 4);
            path.push_str(parent_path);
            path.push_str(&segment(tag, ordinal));
            path
        }
        None if is_text_run(child) => match counter.next_text() {
            Some(ordinal) => format!("{}{}", parent_path, segment(TEXT_STEP, ordinal)),
            None => parent_path.to_string(),
        },
        None => parent_path.to_string(),
    }
}

/// Split a path back into `(tag, ordinal)` pairs
///
/// Returns `None` if the string is not a well-formed structural path.
pub fn parse_segments(path: &str) -> Option<Vec<(&str, usize)>> {
    if path.is_empty() {
        return Some(Vec::new());
    }
    let rest = path.strip_prefix('/')?;
    rest.split('/')
        .map(|part| {
            let (tag, index) = part.strip_suffix(']')?.split_once('[')?;
            if tag.is_empty() {
                return None;
            }
            let ordinal = index.parse::<usize>().ok().filter(|n| *n > 0)?;
            Some((tag, ordinal))
        })
        .collect()
}
