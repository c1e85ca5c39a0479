//! Resolution chain: sibling donors first, term substitution last

use crate::document::{Label, LabelIndex, LocalizationDocument, WordEntry};

use super::convert::ScriptConverter;
use super::terms::TermTable;
use super::types::{Alignment, CopyMode, ResolutionRecord, ResolveReport, SourceTier};

/// A sibling export that may donate text, with its handling rules
pub struct CandidateSource<'a> {
    /// Name used in reports
    pub name: String,
    /// Index over the sibling document
    pub index: LabelIndex<'a>,
    /// Converter for alternate-script siblings
    pub converter: Option<&'a dyn ScriptConverter>,
    /// What is copied from a donor word
    pub copy_mode: CopyMode,
    /// How donor labels are matched
    pub alignment: Alignment,
}

impl<'a> CandidateSource<'a> {
    /// A same-script source matched by name, copying text only
    pub fn new(name: impl Into<String>, index: LabelIndex<'a>) -> Self {
        Self {
            name: name.into(),
            index,
            converter: None,
            copy_mode: CopyMode::default(),
            alignment: Alignment::default(),
        }
    }

    /// Route donor text through `converter`
    #[must_use]
    pub fn with_converter(mut self, converter: &'a dyn ScriptConverter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Set the copy mode
    #[must_use]
    pub fn with_copy_mode(mut self, copy_mode: CopyMode) -> Self {
        self.copy_mode = copy_mode;
        self
    }

    /// Set the alignment strategy
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Tier recorded for labels this source supplies
    #[must_use]
    pub fn tier(&self) -> SourceTier {
        if self.converter.is_some() {
            SourceTier::SecondaryConvertedAligned
        } else {
            SourceTier::PrimaryAligned
        }
    }

    fn donor_for(&self, label: &Label, position: usize) -> Option<&'a [WordEntry]> {
        match self.alignment {
            Alignment::ByName => label.name.as_deref().and_then(|name| self.index.get(name)),
            Alignment::ByPosition => self.index.at(position),
        }
    }
}

impl std::fmt::Debug for CandidateSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateSource")
            .field("name", &self.name)
            .field("labels", &self.index.len())
            .field("converter", &self.converter.map(|c| c.name()))
            .field("copy_mode", &self.copy_mode)
            .field("alignment", &self.alignment)
            .finish()
    }
}

/// Fills a target document's labels from prioritized sibling sources.
///
/// Only the target passed to [`Resolver::resolve`] is mutated; sources are
/// borrowed read-only through their indexes.
#[derive(Debug)]
pub struct Resolver<'a> {
    sources: Vec<CandidateSource<'a>>,
    terms: &'a TermTable,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with no sources and the given fallback terms
    #[must_use]
    pub fn new(terms: &'a TermTable) -> Self {
        Self {
            sources: Vec::new(),
            terms,
        }
    }

    /// Append a source at the lowest priority so far
    #[must_use]
    pub fn with_source(mut self, source: CandidateSource<'a>) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a source at the lowest priority so far
    pub fn push_source(&mut self, source: CandidateSource<'a>) {
        self.sources.push(source);
    }

    /// Sources in priority order
    #[must_use]
    pub fn sources(&self) -> &[CandidateSource<'a>] {
        &self.sources
    }

    /// Resolve a copy of `target`, leaving the original untouched
    #[must_use]
    pub fn resolve_to_new(&self, target: &LocalizationDocument) -> (LocalizationDocument, ResolveReport) {
        let mut output = target.clone();
        let report = self.resolve(&mut output);
        (output, report)
    }

    /// Resolve every label of `target` in place
    pub fn resolve(&self, target: &mut LocalizationDocument) -> ResolveReport {
        let mut report = ResolveReport::default();
        for source in &self.sources {
            report.source_hits.insert(source.name.clone(), 0);
        }

        let Some(labels) = target.labels.as_mut() else {
            tracing::debug!("Target has no label array, nothing to resolve");
            return report;
        };

        for (position, label) in labels.iter_mut().enumerate() {
            self.resolve_label(label, position, &mut report);
        }

        report
    }

    fn resolve_label(&self, label: &mut Label, position: usize, report: &mut ResolveReport) {
        let before = label.words.clone();

        let selected = self
            .sources
            .iter()
            .find_map(|source| source.donor_for(label, position).map(|donor| (source, donor)));

        let (tier, source_name) = match selected {
            Some((source, donor)) => {
                apply_donor(label, donor, source, report);
                if let Some(hits) = report.source_hits.get_mut(&source.name) {
                    *hits += 1;
                }
                (source.tier(), Some(source.name.clone()))
            }
            None => {
                if self.apply_term_fallback(label) {
                    (SourceTier::TermFallback, None)
                } else {
                    (SourceTier::Unresolved, None)
                }
            }
        };

        report.tiers.add(tier);

        if label.words == before {
            return;
        }
        if texts_of(before.as_deref()) == texts_of(label.words.as_deref()) {
            report.layout_only_changes += 1;
            return;
        }
        report.records.push(ResolutionRecord {
            label_name: label
                .name
                .clone()
                .unwrap_or_else(|| format!("#{position}")),
            source_used: tier,
            source_name,
        });
    }

    /// Substitute terms in the target's own text; true when any text changed.
    fn apply_term_fallback(&self, label: &mut Label) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let Some(words) = label.words.as_mut() else {
            return false;
        };

        let mut changed = false;
        for word in words.iter_mut() {
            let Some(text) = word.text.as_mut() else {
                continue;
            };
            let (replaced, fired) = self.terms.apply(text);
            if fired && replaced != *text {
                *text = replaced;
                changed = true;
            }
        }
        changed
    }
}

/// Copy donor words onto the target positionally.
///
/// Extra donor words are ignored; extra target words keep their text.
fn apply_donor(label: &mut Label, donor: &[WordEntry], source: &CandidateSource<'_>, report: &mut ResolveReport) {
    let Some(words) = label.words.as_mut() else {
        return;
    };

    if words.len() != donor.len() {
        report.length_mismatches += 1;
        tracing::debug!(
            "Word count mismatch for {:?} from {}: target {} vs donor {}",
            label.name,
            source.name,
            words.len(),
            donor.len()
        );
    }

    for (word, donor_word) in words.iter_mut().zip(donor) {
        match source.copy_mode {
            CopyMode::TextOnly => {
                if let Some(text) = donor_word.text.as_deref() {
                    word.text = Some(convert_text(text, source, report));
                }
            }
            CopyMode::WholeEntry => {
                let mut entry = donor_word.clone();
                if let Some(text) = entry.text.as_deref() {
                    entry.text = Some(convert_text(text, source, report));
                }
                *word = entry;
            }
        }
    }
}

fn convert_text(text: &str, source: &CandidateSource<'_>, report: &mut ResolveReport) -> String {
    let Some(converter) = source.converter else {
        return text.to_string();
    };
    match converter.convert(text) {
        Ok(converted) => converted,
        Err(e) => {
            report.conversion_failures += 1;
            tracing::warn!(
                "{} conversion failed for text from {}, keeping original: {}",
                converter.name(),
                source.name,
                e
            );
            text.to_string()
        }
    }
}

fn texts_of(words: Option<&[WordEntry]>) -> Vec<Option<&str>> {
    words
        .unwrap_or_default()
        .iter()
        .map(|w| w.text.as_deref())
        .collect()
}
