//! Batch drivers over export directories
//!
//! Each driver discovers its inputs, processes independent documents in
//! parallel, and returns a report sorted by file name. A failure on one
//! document is recorded in the report and never stops the run.

mod analyze;
mod backfill;
mod compare;
mod format;
mod retarget;
mod structure;
mod types;

pub use analyze::{AnalysisReport, Conclusion, PairCounts, SkippedPair, WIDTH_DOMINANCE_RATIO, analyze};
pub use backfill::{BackfillReport, DocumentOutcome, DocumentResult, backfill};
pub use compare::{ComparisonReport, FileDifferences, compare};
pub use format::{FormatFailure, FormatReport, reformat};
pub use retarget::{RetargetReport, retarget};
pub use structure::{VerifyReport, verify};
pub use types::{
    BatchPhase, BatchProgress, BatchProgressCallback, FilePair, LanguageFile, find_json_files,
    find_language_files, pair_language_files, read_path_list, write_report,
};
