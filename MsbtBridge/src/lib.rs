//! # MsbtBridge
//!
//! Label-keyed alignment and differential classification for MSBT JSON
//! localization exports.
//!
//! A game ships one export per language for every text asset. `MsbtBridge`
//! backfills a placeholder or machine-translated language with text taken
//! from better-translated sibling languages, and classifies the residual
//! non-linguistic differences between two languages' exports.
//!
//! ## Quick Start
//!
//! ### Backfilling One Document
//!
//! ```no_run
//! use msbtbridge::prelude::*;
//!
//! let mut target = load_document("korean_ss_menu.json")?;
//! let simp = load_document("simp_chinese_ss_menu.json")?;
//! let terms = TermTable::korean_to_simplified_chinese();
//!
//! let resolver = Resolver::new(&terms)
//!     .with_source(CandidateSource::new("simp", LabelIndex::build(&simp)));
//! let report = resolver.resolve(&mut target);
//! println!("{}", report.summary());
//!
//! save_document(&target, "simp_chinese_ss_menu.json", OutputStyle::Compact)?;
//! # Ok::<(), msbtbridge::Error>(())
//! ```
//!
//! ### Classifying Differences
//!
//! ```
//! use msbtbridge::diff::{SuffixPolicy, classify_differences};
//! use serde_json::json;
//!
//! let a = json!({"labelDataArray": [{"wordDataArray": [{"str": "１２", "strWidth": 20}]}]});
//! let b = json!({"labelDataArray": [{"wordDataArray": [{"str": "12", "strWidth": 12}]}]});
//!
//! let counts = classify_differences(&a, &b, &SuffixPolicy::default());
//! assert_eq!(counts.layout_width, 1);
//! assert_eq!(counts.numeric_glyph_format, 1);
//! ```
//!
//! ### Whole Directories
//!
//! ```no_run
//! use msbtbridge::batch::backfill;
//! use msbtbridge::config::BatchConfig;
//!
//! let config = BatchConfig::load("msbtbridge.toml")?;
//! let report = backfill(&config, &|_| {})?;
//! println!("{}", report.summary());
//! # Ok::<(), msbtbridge::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `msbtbridge` command-line binary

pub mod batch;
pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod heuristics;
pub mod naming;
pub mod resolve;
pub mod verify;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::batch::{BatchPhase, BatchProgress, analyze, backfill, compare, reformat};
    pub use crate::config::BatchConfig;
    pub use crate::diff::{DiffBucket, DiffCounts, LeafPolicy, SuffixPolicy, classify_differences, presence_diff};
    pub use crate::document::{
        Label, LabelIndex, LocalizationDocument, OutputStyle, WordEntry, load_document, save_document,
    };
    pub use crate::error::{Error, Result};
    pub use crate::heuristics::{is_fullwidth_halfwidth_variant, is_likely_text};
    pub use crate::naming::Retargeter;
    pub use crate::resolve::{
        Alignment, CandidateSource, CharTableConverter, CopyMode, Resolver, ScriptConverter, SourceTier,
        TermTable, apply_terms,
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
