//! Shared types and data structures for fileseq

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Sequence Types
// ============================================================================

/// Marker shown where a number is substituted into a template
pub const PLACEHOLDER: char = '@';

/// A filename with its number component lifted out
///
/// `Numbered` keeps the text on either side of the number; `Literal` is a
/// file that carries no number and always expands to itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Template {
    Numbered { head: String, tail: String },
    Literal { path: String },
}

impl Template {
    pub fn numbered(head: impl Into<String>, tail: impl Into<String>) -> Self {
        Template::Numbered {
            head: head.into(),
            tail: tail.into(),
        }
    }

    pub fn literal(path: impl Into<String>) -> Self {
        Template::Literal { path: path.into() }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Template::Literal { .. })
    }

    /// Substitute `number` at the placeholder
    pub fn render(&self, number: &str) -> String {
        match self {
            Template::Numbered { head, tail } => {
                let mut out = String::with_capacity(head.len() + number.len() + tail.len());
                out.push_str(head);
                out.push_str(number);
                out.push_str(tail);
                out
            }
            Template::Literal { path } => path.clone(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Numbered { head, tail } => write!(f, "{}{}{}", head, PLACEHOLDER, tail),
            Template::Literal { path } => f.write_str(path),
        }
    }
}

/// One number of a sequence and the exact text substituted for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberEntry {
    pub value: u64,
    pub render: String,
}

/// Insertion-ordered set of numbers with their renders
///
/// Order and renders live in one list; the index only maps a value to its
/// position, so a value is present at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NumberSet {
    entries: Vec<NumberEntry>,
    #[serde(skip)]
    positions: HashMap<u64, usize>,
}

impl NumberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a number; an existing value keeps its position and takes the new render
    pub fn insert(&mut self, value: u64, render: impl Into<String>) {
        let render = render.into();
        match self.positions.get(&value) {
            Some(&index) => self.entries[index].render = render,
            None => {
                self.positions.insert(value, self.entries.len());
                self.entries.push(NumberEntry { value, render });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render_of(&self, value: u64) -> Option<&str> {
        self.positions
            .get(&value)
            .map(|&index| self.entries[index].render.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NumberEntry> {
        self.entries.iter()
    }

    /// Values in substitution order
    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Entries sorted ascending by value
    pub fn sorted(&self) -> Vec<&NumberEntry> {
        let mut sorted: Vec<&NumberEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.value);
        sorted
    }
}

impl<'a> IntoIterator for &'a NumberSet {
    type Item = &'a NumberEntry;
    type IntoIter = std::slice::Iter<'a, NumberEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<(u64, S)> for NumberSet {
    fn from_iter<I: IntoIterator<Item = (u64, S)>>(iter: I) -> Self {
        let mut set = NumberSet::new();
        for (value, render) in iter {
            set.insert(value, render);
        }
        set
    }
}

/// A template plus the numbers that fill it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSequence {
    pub template: Template,
    pub numbers: NumberSet,
    /// Compact form; the caller's text when parsed, computed when reduced
    pub notation: String,
}

impl FileSequence {
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Literal filenames in number order
    pub fn files(&self) -> Vec<String> {
        self.numbers
            .iter()
            .map(|entry| self.template.render(&entry.render))
            .collect()
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// One row of expand output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedFile {
    pub path: String,
    pub online: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceOperationResult {
    pub processed: usize,
    pub message: String,
}

/// Digest used to verify copies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumKind {
    #[default]
    Md5,
    Sha256,
}
