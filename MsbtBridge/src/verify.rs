//! Structure checks of a produced export against its template

use serde::Serialize;

use crate::document::LocalizationDocument;

/// A template label with no counterpart at its position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingLabel {
    /// Position in the template
    pub index: usize,
    /// Template label name
    pub label_name: Option<String>,
}

/// A label whose word arrays differ in length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordLengthMismatch {
    /// Label position
    pub index: usize,
    /// Word count in the produced document
    pub produced_len: usize,
    /// Word count in the template
    pub template_len: usize,
}

/// Result of checking one produced document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureCheck {
    /// Produced file name
    pub produced_file: String,
    /// Template file name
    pub template_file: String,
    /// Same set of top-level keys
    pub top_keys_equal: bool,
    /// Same number of labels
    pub label_count_equal: bool,
    /// Same label name at every template position
    pub label_names_equal: bool,
    /// Same word count for every label
    pub word_arrays_len_equal: bool,
    /// Template labels past the end of the produced label array
    pub missing_labels: Vec<MissingLabel>,
    /// Labels with differing word counts
    pub mismatched_word_lengths: Vec<WordLengthMismatch>,
}

impl StructureCheck {
    /// Whether every check passed
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.top_keys_equal && self.label_count_equal && self.label_names_equal && self.word_arrays_len_equal
    }
}

/// Compare `produced` to `template` position by position
#[must_use]
pub fn check_structure(
    produced: &LocalizationDocument,
    produced_file: impl Into<String>,
    template: &LocalizationDocument,
    template_file: impl Into<String>,
) -> StructureCheck {
    let mut produced_keys = produced.top_level_keys();
    let mut template_keys = template.top_level_keys();
    produced_keys.sort();
    template_keys.sort();

    let produced_labels = produced.labels();
    let template_labels = template.labels();

    let mut check = StructureCheck {
        produced_file: produced_file.into(),
        template_file: template_file.into(),
        top_keys_equal: produced_keys == template_keys,
        label_count_equal: produced_labels.len() == template_labels.len(),
        label_names_equal: true,
        word_arrays_len_equal: true,
        missing_labels: Vec::new(),
        mismatched_word_lengths: Vec::new(),
    };

    for (index, template_label) in template_labels.iter().enumerate() {
        let Some(produced_label) = produced_labels.get(index) else {
            check.label_names_equal = false;
            check.missing_labels.push(MissingLabel {
                index,
                label_name: template_label.name.clone(),
            });
            continue;
        };
        if produced_label.name != template_label.name {
            check.label_names_equal = false;
        }
        let (produced_len, template_len) = (produced_label.words().len(), template_label.words().len());
        if produced_len != template_len {
            check.word_arrays_len_equal = false;
            check.mismatched_word_lengths.push(WordLengthMismatch {
                index,
                produced_len,
                template_len,
            });
        }
    }

    check
}

/// Roll-up over many checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StructureSummary {
    /// Documents checked
    pub files_checked: usize,
    /// Every document has the template's top-level keys
    pub all_top_keys_equal: bool,
    /// Every document has the template's label count
    pub all_label_count_equal: bool,
    /// Every document has the template's label names
    pub all_label_names_equal: bool,
    /// Every label has the template's word count
    pub all_word_arrays_len_equal: bool,
}

impl StructureSummary {
    /// Summarize `checks`; an empty list passes vacuously
    #[must_use]
    pub fn from_checks(checks: &[StructureCheck]) -> Self {
        Self {
            files_checked: checks.len(),
            all_top_keys_equal: checks.iter().all(|c| c.top_keys_equal),
            all_label_count_equal: checks.iter().all(|c| c.label_count_equal),
            all_label_names_equal: checks.iter().all(|c| c.label_names_equal),
            all_word_arrays_len_equal: checks.iter().all(|c| c.word_arrays_len_equal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Label, WordEntry};
    use pretty_assertions::assert_eq;

    fn doc(labels: &[(&str, usize)]) -> LocalizationDocument {
        LocalizationDocument {
            identity_name: Some("x".to_string()),
            labels: Some(
                labels
                    .iter()
                    .map(|(name, words)| Label::new(*name, vec![WordEntry::new("w", 1); *words]))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_matching_structure() {
        let check = check_structure(&doc(&[("a", 2), ("b", 1)]), "si.json", &doc(&[("a", 2), ("b", 1)]), "en.json");
        assert!(check.is_ok());
        assert!(check.missing_labels.is_empty());
    }

    #[test]
    fn test_missing_labels_and_word_lengths() {
        let check = check_structure(&doc(&[("a", 1)]), "si.json", &doc(&[("a", 2), ("b", 1)]), "en.json");
        assert!(!check.label_count_equal);
        assert!(!check.label_names_equal);
        assert!(!check.word_arrays_len_equal);
        assert_eq!(
            check.missing_labels,
            vec![MissingLabel {
                index: 1,
                label_name: Some("b".to_string()),
            }]
        );
        assert_eq!(
            check.mismatched_word_lengths,
            vec![WordLengthMismatch {
                index: 0,
                produced_len: 1,
                template_len: 2,
            }]
        );
    }

    #[test]
    fn test_renamed_label_and_extra_key() {
        let mut produced = doc(&[("z", 1)]);
        produced.extra.insert("extra", serde_json::json!(1));
        let check = check_structure(&produced, "si.json", &doc(&[("a", 1)]), "en.json");
        assert!(!check.top_keys_equal);
        assert!(!check.label_names_equal);
        assert!(check.label_count_equal);
    }

    #[test]
    fn test_summary() {
        let good = check_structure(&doc(&[("a", 1)]), "1", &doc(&[("a", 1)]), "1");
        let bad = check_structure(&doc(&[("b", 1)]), "2", &doc(&[("a", 1)]), "2");
        let summary = StructureSummary::from_checks(&[good, bad]);
        assert_eq!(summary.files_checked, 2);
        assert!(summary.all_top_keys_equal);
        assert!(!summary.all_label_names_equal);
        assert!(StructureSummary::from_checks(&[]).all_label_count_equal);
    }
}
