//! Analysis driver: classify non-text differences across a pair of export directories

use std::fmt::Write as _;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;

use crate::diff::{DiffBucket, DiffCounts, LeafPolicy, classify_differences};
use crate::document::load_value;

use super::types::{BatchPhase, BatchProgress, BatchProgressCallback, FilePair, pair_language_files};

/// Width differences dominate above this share of the total
pub const WIDTH_DOMINANCE_RATIO: f64 = 0.8;

const RULE: &str = "================================================================================";

/// Counts for one file pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCounts {
    /// File in the first directory
    pub file_a: String,
    /// File in the second directory
    pub file_b: String,
    /// Classified differences
    pub counts: DiffCounts,
}

/// A pair that could not be analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPair {
    /// File in the first directory
    pub file_a: String,
    /// Reason
    pub error: String,
}

/// Statement drawn from the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    /// Width fields make up most differences
    WidthDominant,
    /// Full-width/half-width digit differences exist
    NumericFormatPresent,
    /// Nothing outside width and digit format differs
    NoOtherDifferences,
    /// Other non-text differences exist
    OtherDifferencesPresent,
}

impl Conclusion {
    /// Report sentence
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WidthDominant => {
                "Most non-text differences are width fields, expected from the different glyph widths of each language"
            }
            Self::NumericFormatPresent => {
                "Numeric format differences exist, mainly full-width versus half-width digits"
            }
            Self::NoOtherDifferences => "No other kind of non-text difference was found",
            Self::OtherDifferencesPresent => "Some other kinds of non-text differences exist",
        }
    }
}

/// Result of an analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Totals across all analyzed pairs
    pub totals: DiffCounts,
    /// Per-pair counts, sorted by file name
    pub pairs: Vec<PairCounts>,
    /// Pairs that failed to load
    pub skipped: Vec<SkippedPair>,
}

impl AnalysisReport {
    /// Conclusions drawn from the totals
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn conclusions(&self) -> Vec<Conclusion> {
        let totals = &self.totals;
        let mut out = Vec::new();
        if totals.layout_width as f64 > totals.total as f64 * WIDTH_DOMINANCE_RATIO {
            out.push(Conclusion::WidthDominant);
        }
        if totals.numeric_glyph_format > 0 {
            out.push(Conclusion::NumericFormatPresent);
        }
        if totals.content_other == 0 {
            out.push(Conclusion::NoOtherDifferences);
        } else {
            out.push(Conclusion::OtherDifferencesPresent);
        }
        out
    }

    /// Render the plain-text report
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut text = String::new();
        let totals = &self.totals;
        let _ = writeln!(text, "JSON difference analysis");
        let _ = writeln!(text, "{RULE}\n");

        let _ = writeln!(text, "Totals ({} file pairs):", self.pairs.len());
        for (label, bucket) in [
            ("Width field differences", DiffBucket::LayoutWidth),
            ("Numeric format differences (full-width/half-width)", DiffBucket::NumericGlyphFormat),
            ("Other non-text differences", DiffBucket::ContentOther),
        ] {
            let _ = writeln!(
                text,
                "{label}: {} ({:.1}%)",
                totals.get(bucket),
                totals.percentage(bucket)
            );
        }
        let _ = writeln!(text, "Total non-text differences: {}\n", totals.total);

        let _ = writeln!(text, "Conclusions:");
        for (i, conclusion) in self.conclusions().iter().enumerate() {
            let _ = writeln!(text, "{}. {}", i + 1, conclusion.as_str());
        }

        let differing: Vec<&PairCounts> = self.pairs.iter().filter(|p| !p.counts.is_empty()).collect();
        if !differing.is_empty() {
            let _ = writeln!(text, "\nPer file:");
            for pair in differing {
                let _ = writeln!(text, "{} / {}: {}", pair.file_a, pair.file_b, pair.counts.summary());
            }
        }

        if !self.skipped.is_empty() {
            let _ = writeln!(text, "\nSkipped:");
            for skipped in &self.skipped {
                let _ = writeln!(text, "{}: {}", skipped.file_a, skipped.error);
            }
        }
        text
    }
}

/// Classify the non-text differences of every `lang_a` file in `dir_a`
/// against its `lang_b` sibling in `dir_b`.
pub fn analyze(
    dir_a: &Path,
    lang_a: &str,
    dir_b: &Path,
    lang_b: &str,
    policy: &dyn LeafPolicy,
    progress: BatchProgressCallback,
) -> AnalysisReport {
    progress(&BatchProgress::new(BatchPhase::Scanning, 0, 0));
    let pairs = pair_language_files(dir_a, lang_a, dir_b, lang_b);
    let total = pairs.len();
    tracing::info!("Analyzing {} file pairs", total);

    let processed = AtomicUsize::new(0);
    let results: Vec<Result<PairCounts, SkippedPair>> = pairs
        .par_iter()
        .map(|pair| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress::with_file(
                BatchPhase::Analyzing,
                current,
                total,
                pair.a.file_name.clone(),
            ));
            analyze_pair(pair, policy)
        })
        .collect();

    let mut report = AnalysisReport::default();
    for result in results {
        match result {
            Ok(pair) => {
                report.totals.merge(&pair.counts);
                report.pairs.push(pair);
            }
            Err(skipped) => report.skipped.push(skipped),
        }
    }

    progress(&BatchProgress::new(BatchPhase::Complete, total, total));
    tracing::info!("Analysis totals: {}", report.totals.summary());
    report
}

fn analyze_pair(pair: &FilePair, policy: &dyn LeafPolicy) -> Result<PairCounts, SkippedPair> {
    let skip = |e: crate::Error| {
        tracing::warn!("Skipping {}: {}", pair.a.file_name, e);
        SkippedPair {
            file_a: pair.a.file_name.clone(),
            error: e.to_string(),
        }
    };
    let a = load_value(&pair.a.path).map_err(skip)?;
    let b = load_value(&pair.b_path).map_err(skip)?;
    let counts = classify_differences(&a, &b, policy);
    tracing::debug!("{} / {}: {}", pair.a.file_name, pair.b_file_name, counts.summary());
    Ok(PairCounts {
        file_a: pair.a.file_name.clone(),
        file_b: pair.b_file_name.clone(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(layout_width: usize, numeric_glyph_format: usize, content_other: usize) -> AnalysisReport {
        AnalysisReport {
            totals: DiffCounts {
                layout_width,
                numeric_glyph_format,
                content_other,
                total: layout_width + numeric_glyph_format + content_other,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_conclusions_width_dominant() {
        assert_eq!(
            report(9, 1, 0).conclusions(),
            vec![
                Conclusion::WidthDominant,
                Conclusion::NumericFormatPresent,
                Conclusion::NoOtherDifferences
            ]
        );
    }

    #[test]
    fn test_conclusions_boundary_and_empty() {
        // exactly 80% is not dominant
        assert_eq!(
            report(8, 0, 2).conclusions(),
            vec![Conclusion::OtherDifferencesPresent]
        );
        assert_eq!(report(0, 0, 0).conclusions(), vec![Conclusion::NoOtherDifferences]);
    }

    #[test]
    fn test_render_text() {
        let text = report(3, 1, 0).render_text();
        assert!(text.contains("Width field differences: 3 (75.0%)"));
        assert!(text.contains("Total non-text differences: 4"));
        assert!(text.contains("1. Numeric format differences exist"));
        assert!(text.contains("2. No other kind of non-text difference was found"));
    }
}
