//! Label lookup over a sibling export

use std::collections::HashMap;

use super::model::{LocalizationDocument, WordEntry};

/// Lookup from label name (and label position) to word entries.
///
/// Borrowing the document keeps donor sources read-only for the whole
/// resolution pass.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex<'a> {
    by_name: HashMap<&'a str, &'a [WordEntry]>,
    by_position: Vec<&'a [WordEntry]>,
}

impl<'a> LabelIndex<'a> {
    /// Build an index over `document`.
    ///
    /// A document without a label array yields an empty index. Labels without a
    /// name or without a word array are not reachable by name. When two labels
    /// share a name the later one wins.
    #[must_use]
    pub fn build(document: &'a LocalizationDocument) -> Self {
        let labels = document.labels();
        let mut by_name = HashMap::with_capacity(labels.len());
        let mut by_position = Vec::with_capacity(labels.len());

        for label in labels {
            by_position.push(label.words());
            if let (Some(name), Some(words)) = (label.name.as_deref(), label.words.as_deref()) {
                by_name.insert(name, words);
            }
        }

        Self {
            by_name,
            by_position,
        }
    }

    /// Words of the label named `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a [WordEntry]> {
        self.by_name.get(name).copied()
    }

    /// Words of the label at `position` in document order
    #[must_use]
    pub fn at(&self, position: usize) -> Option<&'a [WordEntry]> {
        self.by_position.get(position).copied()
    }

    /// Whether a label named `name` is indexed
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct label names
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no label is reachable by name
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Number of labels in document order
    #[must_use]
    pub fn positions(&self) -> usize {
        self.by_position.len()
    }
}
