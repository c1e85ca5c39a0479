//! Structural comparison of parallel exports
//!
//! Two passes over a pair of documents in different languages:
//!
//! - [`classify_differences`] buckets every disagreeing leaf as a width,
//!   numeric glyph format or other difference and counts them
//! - [`presence_diff`] lists missing keys, list length mismatches and
//!   non-text value changes for manual review

mod classify;
mod policy;
mod presence;
mod types;

pub use classify::{classify_differences, classify_leaf, values_equal};
pub use policy::{LeafPolicy, SuffixPolicy};
pub use presence::presence_diff;
pub use types::{DiffBucket, DiffCounts, PresenceDifference};
