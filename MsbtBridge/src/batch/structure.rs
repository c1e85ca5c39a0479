//! Verification driver: structure-check produced exports against their templates

use std::path::Path;

use serde::Serialize;

use crate::document::load_document;
use crate::verify::{StructureCheck, StructureSummary, check_structure};

use super::analyze::SkippedPair;
use super::types::pair_language_files;

/// Result of a verification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Roll-up flags
    pub summary: StructureSummary,
    /// Per-file checks, sorted by file name
    pub details: Vec<StructureCheck>,
    /// Pairs that failed to load
    pub skipped: Vec<SkippedPair>,
}

impl VerifyReport {
    /// Whether every check passed and nothing was skipped
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.skipped.is_empty() && self.details.iter().all(StructureCheck::is_ok)
    }
}

/// Check every `produced_lang` file in `produced_dir` against the
/// `template_lang` file with the same suffix in `template_dir`.
pub fn verify(produced_dir: &Path, produced_lang: &str, template_dir: &Path, template_lang: &str) -> VerifyReport {
    let mut details = Vec::new();
    let mut skipped = Vec::new();

    for pair in pair_language_files(produced_dir, produced_lang, template_dir, template_lang) {
        let loaded = load_document(&pair.a.path)
            .and_then(|produced| load_document(&pair.b_path).map(|template| (produced, template)));
        match loaded {
            Ok((produced, template)) => {
                let check = check_structure(&produced, &pair.a.file_name, &template, &pair.b_file_name);
                if !check.is_ok() {
                    tracing::warn!("{} does not match {}", pair.a.file_name, pair.b_file_name);
                }
                details.push(check);
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", pair.a.file_name, e);
                skipped.push(SkippedPair {
                    file_a: pair.a.file_name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let summary = StructureSummary::from_checks(&details);
    tracing::info!("Verified {} files", summary.files_checked);
    VerifyReport {
        summary,
        details,
        skipped,
    }
}
