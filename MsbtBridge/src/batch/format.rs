//! Format driver: rewrite JSON files pretty-printed

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;

use crate::document::reformat_file;

use super::types::{BatchPhase, BatchProgress, BatchProgressCallback};

/// A file that could not be reformatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatFailure {
    /// The file
    pub path: PathBuf,
    /// Reason
    pub error: String,
}

/// Result of a format run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    /// Files rewritten
    pub success_count: usize,
    /// Files that failed, in input order
    pub failures: Vec<FormatFailure>,
}

impl FormatReport {
    /// Number of failed files
    #[must_use]
    pub fn fail_count(&self) -> usize {
        self.failures.len()
    }
}

/// Pretty-print every file in `paths` in place.
///
/// A file that fails to parse is left untouched.
pub fn reformat(paths: &[PathBuf], progress: BatchProgressCallback) -> FormatReport {
    let processed = AtomicUsize::new(0);
    let total = paths.len();

    let results: Vec<Option<FormatFailure>> = paths
        .par_iter()
        .map(|path| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress::with_file(
                BatchPhase::Formatting,
                current,
                total,
                path.to_string_lossy(),
            ));
            match reformat_file(path) {
                Ok(()) => {
                    tracing::debug!("Formatted {}", path.display());
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to format {}: {}", path.display(), e);
                    Some(FormatFailure {
                        path: path.clone(),
                        error: e.to_string(),
                    })
                }
            }
        })
        .collect();

    let failures: Vec<FormatFailure> = results.into_iter().flatten().collect();
    let report = FormatReport {
        success_count: total - failures.len(),
        failures,
    };

    progress(&BatchProgress::new(BatchPhase::Complete, total, total));
    tracing::info!("Formatted {} files, {} failed", report.success_count, report.fail_count());
    report
}
