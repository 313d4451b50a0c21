use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::AlignConfig;
use crate::error::{AlignError, AlignResult};
use crate::parser::DocumentFormat;
use crate::tree::Node;

/// Read a document from disk and parse it
///
/// The parser is chosen from the file extension: `.xml` goes through the XML
/// parser, `.html`/`.htm` through the HTML parser.
///
/// # Errors
/// - Unsupported extension
/// - File read errors
/// - Malformed markup
pub fn read_document(path: &Path) -> AlignResult<Node> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        AlignError::IoError(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    let parser = format.parser();
    debug!(path = %path.display(), format = parser.format_name(), "parsing document");
    parser.parse(&content).map_err(|e| match e {
        AlignError::ParseError(message) => {
            AlignError::ParseError(format!("{}: {}", path.display(), message))
        }
        other => other,
    })
}

/// List the documents under `dir` whose extension is in `extensions`
///
/// Subdirectories are scanned recursively. Returned paths are relative to
/// `dir` and sorted, so the same tree always produces the same job order.
pub fn scan_documents(dir: &Path, extensions: &[String]) -> AlignResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(AlignError::IoError(format!(
            "Directory not found: {}",
            dir.display()
        )));
    }

    if !dir.is_dir() {
        return Err(AlignError::IoError(format!(
            "Path is not a directory: {}",
            dir.display()
        )));
    }

    let mut found = Vec::new();
    scan_into(dir, dir, extensions, &mut found)?;
    found.sort();

    if found.is_empty() {
        warn!(dir = %dir.display(), "no supported documents found");
    }

    Ok(found)
}

fn scan_into(
    root: &Path,
    dir: &Path,
    extensions: &[String],
    found: &mut Vec<PathBuf>,
) -> AlignResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        AlignError::IoError(format!("Failed to read directory '{}': {}", dir.display(), e))
    })?;

    for entry in entries {
        let entry = entry
            .map_err(|e| AlignError::IoError(format!("Error reading directory entry: {}", e)))?;
        let path = entry.path();

        if path.is_dir() {
            scan_into(root, &path, extensions, found)?;
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if !matches {
            continue;
        }

        if let Ok(relative) = path.strip_prefix(root) {
            found.push(relative.to_path_buf());
        }
    }

    Ok(())
}

/// Load an [`AlignConfig`] from a JSON file; missing keys take their defaults
pub fn load_config(path: &Path) -> AlignResult<AlignConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        AlignError::IoError(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AlignError::ConfigError(format!(
            "Failed to parse JSON from '{}': {}",
            path.display(),
            e
        ))
    })
}
