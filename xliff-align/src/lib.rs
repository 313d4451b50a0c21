//! Positional alignment of original and translated markup documents
//!
//! Two copies of the same document, one per language, are parsed into
//! generic trees. Every text node gets a structural path such as
//! `/root[1]/para[2]`, built from its ancestors and the 1-based index of each
//! ancestor among same-tagged siblings. Separate text runs inside one element
//! get their own `/text()[k]` step. Text found at the same path in both trees
//! is paired, filtered, numbered and written out as XLIFF 2.0.
//!
//! ```
//! use xliff_align::{Aligner, DocumentParser, XmlParser};
//!
//! let source = XmlParser.parse("<root><title>Hello</title></root>").unwrap();
//! let translation = XmlParser.parse("<root><title>Bonjour</title></root>").unwrap();
//!
//! let alignment = Aligner::default().align(&source, &translation).unwrap();
//! assert_eq!(alignment.pairs[0].path, "/root[1]/title[1]");
//! assert_eq!(alignment.pairs[0].target, "Bonjour");
//! ```

pub mod batch;
pub mod collector;
pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod loader;
pub mod parser;
pub mod path;
pub mod table;
pub mod traverse;
pub mod tree;
pub mod xliff;

pub use batch::{BatchReport, PairJob, PairOutcome, run_batch};
pub use collector::{CollectMode, FragmentCollector};
pub use config::{AlignConfig, VerbosityLevel, XliffOptions, validate_language};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, NoopReason, Severity};
pub use emitter::{AlignedPair, emit_pairs};
pub use engine::{Aligner, Alignment, Phase};
pub use error::{AlignError, AlignResult};
pub use loader::{load_config, read_document, scan_documents};
pub use parser::{DocumentFormat, DocumentParser, HtmlParser, XmlParser};
pub use table::{AlignmentEntry, AlignmentTable};
pub use traverse::{paths, try_walk, walk};
pub use tree::{Node, NodeKind, TreeNode};
pub use xliff::{XliffDocument, XliffWriter};
