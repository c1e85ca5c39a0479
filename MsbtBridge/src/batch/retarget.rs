//! Retarget driver: move existing exports into another language's asset namespace

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;

use crate::document::{OutputStyle, load_document, save_document};
use crate::naming::Retargeter;

use super::format::FormatFailure;
use super::types::{BatchPhase, BatchProgress, BatchProgressCallback};

/// Result of a retarget run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetargetReport {
    /// Files rewritten
    pub files_changed: usize,
    /// Files that needed no change and were left as they were
    pub files_unchanged: usize,
    /// Names and paths rewritten across all files
    pub strings_changed: usize,
    /// Files that failed to load or save, in input order
    pub failures: Vec<FormatFailure>,
}

enum FileOutcome {
    Changed(usize),
    Unchanged,
    Failed(FormatFailure),
}

/// Apply `retargeter` to every file in `paths` in place.
///
/// Files with nothing to rename are not rewritten. A file that fails to load
/// is left untouched.
pub fn retarget(
    paths: &[PathBuf],
    retargeter: &Retargeter,
    style: OutputStyle,
    progress: BatchProgressCallback,
) -> RetargetReport {
    let processed = AtomicUsize::new(0);
    let total = paths.len();

    let outcomes: Vec<FileOutcome> = paths
        .par_iter()
        .map(|path| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress::with_file(
                BatchPhase::Retargeting,
                current,
                total,
                path.to_string_lossy(),
            ));

            let result = load_document(path).and_then(|mut document| {
                let changed = retargeter.apply(&mut document);
                if changed > 0 {
                    save_document(&document, path, style)?;
                }
                Ok(changed)
            });
            match result {
                Ok(0) => FileOutcome::Unchanged,
                Ok(changed) => {
                    tracing::debug!("Retargeted {} ({} strings)", path.display(), changed);
                    FileOutcome::Changed(changed)
                }
                Err(e) => {
                    tracing::warn!("Failed to retarget {}: {}", path.display(), e);
                    FileOutcome::Failed(FormatFailure {
                        path: path.clone(),
                        error: e.to_string(),
                    })
                }
            }
        })
        .collect();

    let mut report = RetargetReport::default();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Changed(changed) => {
                report.files_changed += 1;
                report.strings_changed += changed;
            }
            FileOutcome::Unchanged => report.files_unchanged += 1,
            FileOutcome::Failed(failure) => report.failures.push(failure),
        }
    }

    progress(&BatchProgress::new(BatchPhase::Complete, total, total));
    tracing::info!(
        "Retargeted {} files, {} unchanged, {} failed",
        report.files_changed,
        report.files_unchanged,
        report.failures.len()
    );
    report
}
