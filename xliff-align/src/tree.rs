//! Generic document tree shared by the XML and HTML parsers
//!
//! The traverser only needs to know a node's kind, its tag name, its text and
//! its ordered children. That view is the [`TreeNode`] trait; [`Node`] is the
//! owned tree both parsers build.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    CData,
    Comment,
    Other,
}

/// Read-only view of a parsed document node
pub trait TreeNode: Sized {
    fn kind(&self) -> NodeKind;

    /// Tag name, present for elements only
    fn tag_name(&self) -> Option<&str>;

    /// Character content of text-bearing nodes
    fn text(&self) -> Option<&str>;

    fn children(&self) -> &[Self];
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document { children: Vec<Node> },
    Element { name: String, children: Vec<Node> },
    Text(String),
    CData(String),
    Comment(String),
    /// XML declaration, processing instruction or doctype
    Other { name: String },
}

impl Node {
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document { children }
    }

    pub fn element(name: &str, children: Vec<Node>) -> Self {
        Node::Element {
            name: name.to_string(),
            children,
        }
    }

    pub fn text_node(text: &str) -> Self {
        Node::Text(text.to_string())
    }

    /// Element holding a single text child, e.g. `<title>Hello</title>`
    pub fn text_element(name: &str, text: &str) -> Self {
        Node::element(name, vec![Node::text_node(text)])
    }

    /// Append a child to a document or element; other nodes are leaves
    pub fn push_child(&mut self, child: Node) -> bool {
        match self {
            Node::Document { children } | Node::Element { children, .. } => {
                children.push(child);
                true
            }
            _ => false,
        }
    }

    /// Total number of nodes in this subtree, the node itself included
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Node::node_count)
            .sum::<usize>()
    }
}

impl TreeNode for Node {
    fn kind(&self) -> NodeKind {
        match self {
            Node::Document { .. } => NodeKind::Document,
            Node::Element { .. } => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::CData(_) => NodeKind::CData,
            Node::Comment(_) => NodeKind::Comment,
            Node::Other { .. } => NodeKind::Other,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) | Node::CData(text) | Node::Comment(text) => Some(text.as_str()),
            _ => None,
        }
    }

    fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } | Node::Element { children, .. } => children.as_slice(),
            _ => &[],
        }
    }
}
