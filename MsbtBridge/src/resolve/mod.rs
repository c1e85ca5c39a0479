//! Label resolution: prioritized sibling sources, script conversion, term fallback
//!
//! ```no_run
//! use msbtbridge::document::{LabelIndex, load_document};
//! use msbtbridge::resolve::{CandidateSource, Resolver, TermTable};
//!
//! let mut target = load_document("korean_menu.json")?;
//! let simp = load_document("simp_chinese_menu.json")?;
//! let terms = TermTable::korean_to_simplified_chinese();
//!
//! let resolver = Resolver::new(&terms)
//!     .with_source(CandidateSource::new("simp", LabelIndex::build(&simp)));
//! let report = resolver.resolve(&mut target);
//! println!("{}", report.summary());
//! # Ok::<(), msbtbridge::Error>(())
//! ```

mod convert;
mod resolver;
mod terms;
mod types;

pub use convert::{CharTableConverter, IdentityConverter, ScriptConverter};
pub use resolver::{CandidateSource, Resolver};
pub use terms::{Term, TermTable, apply_terms};
pub use types::{Alignment, CopyMode, ResolutionRecord, ResolveReport, SourceTier, TierTally};
