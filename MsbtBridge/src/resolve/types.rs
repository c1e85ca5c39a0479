//! Types for label resolution

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which fallback tier supplied a label's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    /// Same-script sibling, copied as-is
    PrimaryAligned,
    /// Alternate-script sibling, passed through script conversion
    SecondaryConvertedAligned,
    /// No sibling had the label; literal term substitution fired
    TermFallback,
    /// Nothing applied
    Unresolved,
}

impl SourceTier {
    /// Human-readable name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryAligned => "primary aligned",
            Self::SecondaryConvertedAligned => "secondary converted aligned",
            Self::TermFallback => "term fallback",
            Self::Unresolved => "unresolved",
        }
    }
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is copied from a donor word onto the target word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyMode {
    /// Only `str`; target width and other attributes are kept
    #[default]
    TextOnly,
    /// The donor entry wholesale, width included
    WholeEntry,
}

/// How a target label finds its donor label in a sibling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Match on `labelName`
    #[default]
    ByName,
    /// Match on label position in document order
    ByPosition,
}

/// Provenance of one changed label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionRecord {
    /// Label name (or `#<position>` for unnamed labels)
    pub label_name: String,
    /// Tier that produced the new words
    pub source_used: SourceTier,
    /// Name of the sibling source, if any
    pub source_name: Option<String>,
}

/// Labels counted per tier, including unchanged ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierTally {
    /// Labels taken from a same-script sibling
    pub primary_aligned: usize,
    /// Labels taken from a converted alternate-script sibling
    pub secondary_converted_aligned: usize,
    /// Labels rewritten by term substitution
    pub term_fallback: usize,
    /// Labels left as they were
    pub unresolved: usize,
}

impl TierTally {
    /// Count one label under `tier`
    pub fn add(&mut self, tier: SourceTier) {
        match tier {
            SourceTier::PrimaryAligned => self.primary_aligned += 1,
            SourceTier::SecondaryConvertedAligned => self.secondary_converted_aligned += 1,
            SourceTier::TermFallback => self.term_fallback += 1,
            SourceTier::Unresolved => self.unresolved += 1,
        }
    }

    /// Count for `tier`
    #[must_use]
    pub fn get(&self, tier: SourceTier) -> usize {
        match tier {
            SourceTier::PrimaryAligned => self.primary_aligned,
            SourceTier::SecondaryConvertedAligned => self.secondary_converted_aligned,
            SourceTier::TermFallback => self.term_fallback,
            SourceTier::Unresolved => self.unresolved,
        }
    }

    /// Total labels counted
    #[must_use]
    pub fn total(&self) -> usize {
        self.primary_aligned + self.secondary_converted_aligned + self.term_fallback + self.unresolved
    }

    /// Add another tally into this one
    pub fn merge(&mut self, other: &TierTally) {
        self.primary_aligned += other.primary_aligned;
        self.secondary_converted_aligned += other.secondary_converted_aligned;
        self.term_fallback += other.term_fallback;
        self.unresolved += other.unresolved;
    }
}

/// Outcome of resolving one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    /// Labels per tier
    pub tiers: TierTally,
    /// Labels matched per sibling source name
    pub source_hits: IndexMap<String, usize>,
    /// One record per label whose text changed
    pub records: Vec<ResolutionRecord>,
    /// Labels whose text stayed the same but whose word entries were replaced
    /// (a whole-entry donor with different width or attributes)
    pub layout_only_changes: usize,
    /// Donor/target word lists of different length
    pub length_mismatches: usize,
    /// Script conversions that failed and kept the raw donor text
    pub conversion_failures: usize,
}

impl ResolveReport {
    /// Number of labels whose text changed
    #[must_use]
    pub fn labels_changed(&self) -> usize {
        self.records.len()
    }

    /// Whether the document came out unchanged
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.records.is_empty() && self.layout_only_changes == 0
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} labels: {} primary, {} converted, {} term fallback, {} unresolved ({} changed, {} layout only)",
            self.tiers.total(),
            self.tiers.primary_aligned,
            self.tiers.secondary_converted_aligned,
            self.tiers.term_fallback,
            self.tiers.unresolved,
            self.labels_changed(),
            self.layout_only_changes
        )
    }
}
