//! Path-keyed table of source/translation text pending pairing

use std::collections::HashMap;

/// Source and translation text collected for one structural path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentEntry {
    pub path: String,
    pub source: Option<String>,
    pub translation: Option<String>,
}

impl AlignmentEntry {
    pub fn new(path: String) -> Self {
        Self {
            path,
            source: None,
            translation: None,
        }
    }

    /// Source text, if present and not whitespace-only
    pub fn source_text(&self) -> Option<&str> {
        non_blank(self.source.as_deref())
    }

    /// Translation text, if present and not whitespace-only
    pub fn translation_text(&self) -> Option<&str> {
        non_blank(self.translation.as_deref())
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Insertion-ordered map from structural path to [`AlignmentEntry`]
///
/// Entries are kept in the order they were first created, which is the order
/// the source document was traversed in; pair ids are assigned from it.
#[derive(Debug, Default, Clone)]
pub struct AlignmentTable {
    entries: Vec<AlignmentEntry>,
    index: HashMap<String, usize>,
}

impl AlignmentTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&AlignmentEntry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut AlignmentEntry> {
        match self.index.get(path) {
            Some(&i) => Some(&mut self.entries[i]),
            None => None,
        }
    }

    /// Entry at `path`, appending an empty one if there is none yet
    pub fn entry_or_insert(&mut self, path: &str) -> &mut AlignmentEntry {
        let i = match self.index.get(path) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push(AlignmentEntry::new(path.to_string()));
                self.index.insert(path.to_string(), i);
                i
            }
        };
        &mut self.entries[i]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &AlignmentEntry> {
        self.entries.iter()
    }
}
