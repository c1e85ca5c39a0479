//! Comparison driver: presence diff across a pair of export directories

use std::fmt::Write as _;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;

use crate::diff::presence_diff;
use crate::document::load_value;

use super::analyze::SkippedPair;
use super::types::{BatchPhase, BatchProgress, BatchProgressCallback, FilePair, pair_language_files};

const RULE: &str = "================================================================================";
const THIN_RULE: &str = "--------------------------------------------------------------------------------";

/// Differences found for one file pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDifferences {
    /// File in the first directory
    pub file_a: String,
    /// File in the second directory
    pub file_b: String,
    /// Human-readable difference lines
    pub differences: Vec<String>,
}

/// Result of a comparison run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Pairs compared
    pub compared: usize,
    /// Pairs with at least one difference, sorted by file name
    pub files: Vec<FileDifferences>,
    /// Pairs that failed to load
    pub skipped: Vec<SkippedPair>,
}

impl ComparisonReport {
    /// Whether every compared pair matched apart from language text
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }

    /// Total difference lines
    #[must_use]
    pub fn difference_count(&self) -> usize {
        self.files.iter().map(|f| f.differences.len()).sum()
    }

    /// Render the plain-text report
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "JSON comparison results");
        let _ = writeln!(text, "{RULE}\n");
        for file in &self.files {
            let _ = writeln!(text, "File: {}", file.file_a);
            for diff in &file.differences {
                let _ = writeln!(text, "  - {diff}");
            }
            let _ = writeln!(text, "\n{THIN_RULE}\n");
        }
        if self.is_clean() {
            let _ = writeln!(
                text,
                "Apart from language text, all files have the same structure and non-text values"
            );
        }
        text
    }
}

/// Presence-diff every `lang_a` file in `dir_a` against its `lang_b` sibling in `dir_b`
pub fn compare(
    dir_a: &Path,
    lang_a: &str,
    dir_b: &Path,
    lang_b: &str,
    progress: BatchProgressCallback,
) -> ComparisonReport {
    progress(&BatchProgress::new(BatchPhase::Scanning, 0, 0));
    let pairs = pair_language_files(dir_a, lang_a, dir_b, lang_b);
    let total = pairs.len();
    tracing::info!("Comparing {} file pairs", total);

    let processed = AtomicUsize::new(0);
    let results: Vec<Result<FileDifferences, SkippedPair>> = pairs
        .par_iter()
        .map(|pair| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress::with_file(
                BatchPhase::Comparing,
                current,
                total,
                pair.a.file_name.clone(),
            ));
            compare_pair(pair)
        })
        .collect();

    let mut report = ComparisonReport::default();
    for result in results {
        match result {
            Ok(file) => {
                report.compared += 1;
                if !file.differences.is_empty() {
                    report.files.push(file);
                }
            }
            Err(skipped) => report.skipped.push(skipped),
        }
    }

    progress(&BatchProgress::new(BatchPhase::Complete, total, total));
    tracing::info!(
        "{} of {} pairs differ ({} differences)",
        report.files.len(),
        report.compared,
        report.difference_count()
    );
    report
}

fn compare_pair(pair: &FilePair) -> Result<FileDifferences, SkippedPair> {
    let skip = |e: crate::Error| {
        tracing::warn!("Skipping {}: {}", pair.a.file_name, e);
        SkippedPair {
            file_a: pair.a.file_name.clone(),
            error: e.to_string(),
        }
    };
    let a = load_value(&pair.a.path).map_err(skip)?;
    let b = load_value(&pair.b_path).map_err(skip)?;
    let differences: Vec<String> = presence_diff(&a, &b, &pair.b_file_name)
        .iter()
        .map(ToString::to_string)
        .collect();
    if differences.is_empty() {
        tracing::debug!("{}: no differences besides language text", pair.a.file_name);
    } else {
        tracing::debug!("{}: {} differences", pair.a.file_name, differences.len());
    }
    Ok(FileDifferences {
        file_a: pair.a.file_name.clone(),
        file_b: pair.b_file_name.clone(),
        differences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report_text() {
        let report = ComparisonReport {
            compared: 3,
            ..Default::default()
        };
        assert!(report.render_text().contains("Apart from language text"));
    }

    #[test]
    fn test_report_lists_files() {
        let report = ComparisonReport {
            compared: 1,
            files: vec![FileDifferences {
                file_a: "simp_chinese_a.json".to_string(),
                file_b: "korean_a.json".to_string(),
                differences: vec!["key 'x' value differs: 1 vs 2".to_string()],
            }],
            skipped: Vec::new(),
        };
        let text = report.render_text();
        assert!(text.contains("File: simp_chinese_a.json\n  - key 'x' value differs: 1 vs 2\n"));
        assert!(!text.contains("Apart from language text"));
        assert_eq!(report.difference_count(), 1);
    }
}
