//! Backfill driver: resolve every target export through the configured sources

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{BatchConfig, SourceConfig};
use crate::document::{LabelIndex, LocalizationDocument, load_document, save_document};
use crate::error::Result;
use crate::naming::{Retargeter, file_name_for};
use crate::resolve::{CandidateSource, CharTableConverter, ResolveReport, Resolver, ScriptConverter, TermTable, TierTally};

use super::types::{BatchPhase, BatchProgress, BatchProgressCallback, LanguageFile, find_language_files};

/// What happened to one target document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Labels were resolved and the output saved
    Resolved {
        /// Per-label resolution results
        report: ResolveReport,
    },
    /// No label array; copied through with retargeting only
    CopiedThrough,
    /// The target could not be loaded
    LoadFailed {
        /// Reason
        error: String,
    },
    /// The output could not be written
    SaveFailed {
        /// Reason
        error: String,
    },
}

/// Outcome for one target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentResult {
    /// Target file name
    pub file_name: String,
    /// Produced file name
    pub output_file: String,
    /// Sources that had a usable sibling for this file
    pub sources_available: Vec<String>,
    /// What happened
    #[serde(flatten)]
    pub outcome: DocumentOutcome,
}

/// Result of a backfill run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    /// Target files found
    pub files_found: usize,
    /// Documents resolved and saved
    pub resolved: usize,
    /// Asset-index documents copied through
    pub copied_through: usize,
    /// Targets that failed to load
    pub load_failures: usize,
    /// Outputs that failed to save
    pub save_failures: usize,
    /// Labels per tier across all documents
    pub tiers: TierTally,
    /// Labels matched per source across all documents
    pub source_hits: IndexMap<String, usize>,
    /// Labels whose text changed
    pub labels_changed: usize,
    /// Labels whose entries were replaced without a text change
    pub layout_only_changes: usize,
    /// Donor/target word count mismatches
    pub length_mismatches: usize,
    /// Script conversions that failed
    pub conversion_failures: usize,
    /// Per-file results, sorted by file name
    pub files: Vec<DocumentResult>,
}

impl BackfillReport {
    fn push(&mut self, result: DocumentResult) {
        match &result.outcome {
            DocumentOutcome::Resolved { report } => {
                self.resolved += 1;
                self.tiers.merge(&report.tiers);
                for (name, hits) in &report.source_hits {
                    *self.source_hits.entry(name.clone()).or_default() += hits;
                }
                self.labels_changed += report.labels_changed();
                self.layout_only_changes += report.layout_only_changes;
                self.length_mismatches += report.length_mismatches;
                self.conversion_failures += report.conversion_failures;
            }
            DocumentOutcome::CopiedThrough => self.copied_through += 1,
            DocumentOutcome::LoadFailed { .. } => self.load_failures += 1,
            DocumentOutcome::SaveFailed { .. } => self.save_failures += 1,
        }
        self.files.push(result);
    }

    /// Documents that did not produce output
    #[must_use]
    pub fn failures(&self) -> usize {
        self.load_failures + self.save_failures
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} files: {} resolved, {} copied through, {} failed; labels {} primary, {} converted, {} term fallback, {} unresolved",
            self.files_found,
            self.resolved,
            self.copied_through,
            self.failures(),
            self.tiers.primary_aligned,
            self.tiers.secondary_converted_aligned,
            self.tiers.term_fallback,
            self.tiers.unresolved
        )
    }
}

/// Shared, read-only state for one run
struct BackfillContext<'a> {
    config: &'a BatchConfig,
    terms: TermTable,
    converter: Option<CharTableConverter>,
    retargeter: Option<Retargeter>,
}

/// Backfill every target export named in `config`.
///
/// Configuration problems (unreadable term file, bad conversion table) fail
/// the whole run; problems with a single document are tallied in the report.
pub fn backfill(config: &BatchConfig, progress: BatchProgressCallback) -> Result<BackfillReport> {
    config.validate()?;
    let context = BackfillContext {
        config,
        terms: config.term_table()?,
        converter: config.converter()?,
        retargeter: config.retarget.then(|| config.retargeter()),
    };

    progress(&BatchProgress::new(BatchPhase::Scanning, 0, 0));
    let files = find_language_files(&config.target_root, &config.target_language);
    let total = files.len();
    tracing::info!(
        "Backfilling {} {} files from {}",
        total,
        config.target_language,
        config.target_root.display()
    );

    let processed = AtomicUsize::new(0);
    let results: Vec<DocumentResult> = files
        .par_iter()
        .map(|file| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress::with_file(
                BatchPhase::Resolving,
                current,
                total,
                file.file_name.clone(),
            ));
            context.process(file)
        })
        .collect();

    let mut report = BackfillReport {
        files_found: total,
        ..Default::default()
    };
    for result in results {
        report.push(result);
    }

    progress(&BatchProgress::new(BatchPhase::Complete, total, total));
    tracing::info!("{}", report.summary());
    Ok(report)
}

impl BackfillContext<'_> {
    fn process(&self, file: &LanguageFile) -> DocumentResult {
        let output_file = file_name_for(&self.config.output_language, &file.suffix);
        let mut result = DocumentResult {
            file_name: file.file_name.clone(),
            output_file: output_file.clone(),
            sources_available: Vec::new(),
            outcome: DocumentOutcome::CopiedThrough,
        };

        let mut target = match load_document(&file.path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file.file_name, e);
                result.outcome = DocumentOutcome::LoadFailed { error: e.to_string() };
                return result;
            }
        };

        if target.has_labels() {
            let siblings = self.load_siblings(&file.suffix);
            result.sources_available = siblings.iter().map(|(source, _)| source.name.clone()).collect();

            let mut resolver = Resolver::new(&self.terms);
            for (source, doc) in &siblings {
                resolver.push_source(self.candidate(source, doc));
            }
            let report = resolver.resolve(&mut target);
            tracing::debug!("{}: {}", file.file_name, report.summary());
            result.outcome = DocumentOutcome::Resolved { report };
        } else {
            tracing::debug!("{} has no label array, copying through", file.file_name);
        }

        if let Some(retargeter) = &self.retargeter {
            retargeter.apply(&mut target);
        }

        let output_path = self.config.output_root.join(&output_file);
        if let Err(e) = save_document(&target, &output_path, self.config.output_style) {
            tracing::warn!("Failed to save {}: {}", output_path.display(), e);
            result.outcome = DocumentOutcome::SaveFailed { error: e.to_string() };
            return result;
        }

        tracing::info!("Wrote {}", output_file);
        result
    }

    /// Load every configured sibling that exists and has a label array
    fn load_siblings(&self, suffix: &str) -> Vec<(&SourceConfig, LocalizationDocument)> {
        self.config
            .sources
            .iter()
            .filter_map(|source| {
                let path = source.root.join(file_name_for(&source.language, suffix));
                load_sibling(source, &path).map(|doc| (source, doc))
            })
            .collect()
    }

    fn candidate<'a>(&'a self, source: &SourceConfig, doc: &'a LocalizationDocument) -> CandidateSource<'a> {
        let mut candidate = CandidateSource::new(source.name.clone(), LabelIndex::build(doc))
            .with_copy_mode(source.copy_mode)
            .with_alignment(source.alignment);
        if source.convert {
            if let Some(converter) = &self.converter {
                candidate = candidate.with_converter(converter as &dyn ScriptConverter);
            }
        }
        candidate
    }
}

fn load_sibling(source: &SourceConfig, path: &Path) -> Option<LocalizationDocument> {
    if !path.is_file() {
        tracing::debug!("Source {} has no {}", source.name, path.display());
        return None;
    }
    match load_document(path) {
        Ok(doc) if doc.has_labels() => Some(doc),
        Ok(_) => {
            tracing::debug!("Source {} file {} has no label array", source.name, path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Source {} unavailable for {}: {}", source.name, path.display(), e);
            None
        }
    }
}
