//! MSBT localization export documents
//!
//! Typed view of a label-array export, an index for label lookup and the
//! load/save boundary.
//!
//! ```no_run
//! use msbtbridge::document::{LabelIndex, load_document};
//!
//! let doc = load_document("common_msbt_Export/simp_chinese_ss_menu.json")?;
//! let index = LabelIndex::build(&doc);
//! println!("{} labels", index.len());
//! # Ok::<(), msbtbridge::Error>(())
//! ```

mod fields;
mod index;
mod io;
mod model;

pub use fields::FieldBag;
pub use index::LabelIndex;
pub use io::{
    OutputStyle, load_document, load_value, reformat_file, save_document, save_value,
    to_json_string,
};
pub use model::{Label, LocalizationDocument, WordEntry, keys};
