//! Markup parsers producing the generic [`Node`] tree
//!
//! The aligner never looks at markup itself. [`XmlParser`] and [`HtmlParser`]
//! turn raw text into a [`Node`] tree, and [`DocumentFormat`] picks one from a
//! file name.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use scraper::{Html, Node as HtmlNode};

use crate::error::{AlignError, AlignResult};
use crate::tree::{Node, TreeNode};

/// Parser for one markup language
pub trait DocumentParser: Send + Sync {
    /// Parse a whole document into a tree rooted at a [`Node::Document`]
    fn parse(&self, input: &str) -> AlignResult<Node>;

    /// Name used in log messages
    fn format_name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Xml,
    Html,
}

impl DocumentFormat {
    /// Choose a format from a file extension, ignoring case
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xml" => Some(DocumentFormat::Xml),
            "html" | "htm" => Some(DocumentFormat::Html),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> AlignResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension).ok_or_else(|| {
            AlignError::UnsupportedFormat(format!(
                "File extension '{}' is not supported: {}",
                extension,
                path.display()
            ))
        })
    }

    pub fn parser(&self) -> Box<dyn DocumentParser> {
        match self {
            DocumentFormat::Xml => Box::new(XmlParser),
            DocumentFormat::Html => Box::new(HtmlParser),
        }
    }
}

/// XML parser built on the quick-xml event reader
///
/// Whitespace is preserved, entity references are resolved, and mismatched
/// or unclosed tags are reported as [`AlignError::ParseError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlParser;

impl DocumentParser for XmlParser {
    fn parse(&self, input: &str) -> AlignResult<Node> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        // Open elements; the bottom frame is the document itself
        let mut stack: Vec<Node> = vec![Node::document(Vec::new())];

        loop {
            let event = reader
                .read_event()
                .map_err(|e| AlignError::ParseError(format!("Malformed XML: {}", e)))?;

            match event {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    stack.push(Node::element(&name, Vec::new()));
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    append(&mut stack, Node::element(&name, Vec::new()));
                }
                Event::End(e) => {
                    if stack.len() < 2 {
                        return Err(AlignError::ParseError(format!(
                            "Unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        )));
                    }
                    if let Some(element) = stack.pop() {
                        append(&mut stack, element);
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| {
                        AlignError::ParseError(format!("Bad text content: {}", err))
                    })?;
                    append(&mut stack, Node::Text(text.into_owned()));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append(&mut stack, Node::CData(text));
                }
                Event::Comment(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append(&mut stack, Node::Comment(text));
                }
                Event::Decl(_) => append(
                    &mut stack,
                    Node::Other {
                        name: "xml".to_string(),
                    },
                ),
                Event::PI(_) => append(
                    &mut stack,
                    Node::Other {
                        name: "#processing-instruction".to_string(),
                    },
                ),
                Event::DocType(_) => append(
                    &mut stack,
                    Node::Other {
                        name: "#doctype".to_string(),
                    },
                ),
                Event::Eof => break,
            }
        }

        if stack.len() > 1 {
            let open: Vec<&str> = stack[1..].iter().filter_map(|n| n.tag_name()).collect();
            return Err(AlignError::ParseError(format!(
                "Unclosed element(s) at end of input: {}",
                open.join(", ")
            )));
        }

        stack
            .pop()
            .ok_or_else(|| AlignError::ParseError("Empty parser stack".to_string()))
    }

    fn format_name(&self) -> &str {
        "XML"
    }
}

fn append(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(node);
    }
}

/// HTML parser built on scraper's html5ever tree builder
///
/// Parsing follows the HTML5 algorithm, so implied `html`, `head` and `body`
/// elements are present in the tree; both documents of a pair go through the
/// same rules and therefore get the same implied structure.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl DocumentParser for HtmlParser {
    fn parse(&self, input: &str) -> AlignResult<Node> {
        let html = Html::parse_document(input);
        let root = html.tree.root();

        // Iterative conversion: (source node, its child iterator, converted children)
        let mut frames = vec![(root, root.children(), Vec::new())];
        loop {
            let next = match frames.last_mut() {
                Some(frame) => frame.1.next(),
                None => break,
            };
            match next {
                Some(child) => match child.value() {
                    HtmlNode::Document | HtmlNode::Fragment | HtmlNode::Element(_) => {
                        frames.push((child, child.children(), Vec::new()));
                    }
                    leaf => {
                        if let (Some(frame), Some(node)) =
                            (frames.last_mut(), convert_leaf(leaf))
                        {
                            frame.2.push(node);
                        }
                    }
                },
                None => {
                    let Some((source, _, children)) = frames.pop() else {
                        break;
                    };
                    let node = match source.value() {
                        HtmlNode::Element(element) => Node::element(element.name(), children),
                        _ => Node::document(children),
                    };
                    match frames.last_mut() {
                        Some(parent) => parent.2.push(node),
                        None => return Ok(node),
                    }
                }
            }
        }

        Err(AlignError::ParseError("HTML document has no root".to_string()))
    }

    fn format_name(&self) -> &str {
        "HTML"
    }
}

fn convert_leaf(node: &HtmlNode) -> Option<Node> {
    match node {
        HtmlNode::Text(text) => Some(Node::Text(String::from(&**text))),
        HtmlNode::Comment(comment) => Some(Node::Comment(String::from(&**comment))),
        HtmlNode::Doctype(_) => Some(Node::Other {
            name: "#doctype".to_string(),
        }),
        HtmlNode::ProcessingInstruction(_) => Some(Node::Other {
            name: "#processing-instruction".to_string(),
        }),
        HtmlNode::Document | HtmlNode::Fragment | HtmlNode::Element(_) => None,
    }
}
