//! File naming and asset retargeting between language exports
//!
//! Exports are named `<language>_<asset>.json`, with a bare `<language>.json`
//! holding the asset index. The part after the language, separator included,
//! is the *suffix* shared by every language's copy of an asset.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::LocalizationDocument;

/// Suffix of `file_name` after `language`, or `None` if it is not a file of that language.
///
/// `korean_menu.json` gives `_menu.json`, `korean.json` gives `.json`.
#[must_use]
pub fn language_suffix<'a>(file_name: &'a str, language: &str) -> Option<&'a str> {
    let rest = file_name.strip_prefix(language)?;
    if !rest.ends_with(".json") {
        return None;
    }
    if rest == ".json" || rest.starts_with('_') {
        Some(rest)
    } else {
        None
    }
}

/// File name of `language`'s copy for a shared `suffix`
#[must_use]
pub fn file_name_for(language: &str, suffix: &str) -> String {
    format!("{language}{suffix}")
}

/// Name of the sibling file in `to_language` for a `from_language` file
#[must_use]
pub fn sibling_file_name(file_name: &str, from_language: &str, to_language: &str) -> Option<String> {
    language_suffix(file_name, from_language).map(|suffix| file_name_for(to_language, suffix))
}

/// Rename an asset name equal to `from`, or prefixed with `from_`, to `to`
#[must_use]
pub fn retarget_name(name: &str, from: &str, to: &str) -> Option<String> {
    if name == from {
        return Some(to.to_string());
    }
    name.strip_prefix(from)
        .filter(|rest| rest.starts_with('_'))
        .map(|rest| format!("{to}{rest}"))
}

/// Substring rewrite applied to asset container paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRewrite {
    /// Text to find
    pub from: String,
    /// Replacement
    pub to: String,
}

impl PathRewrite {
    /// Create a rewrite
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Moves a document from one language's asset namespace to another's
#[derive(Debug, Clone, Default)]
pub struct Retargeter {
    from_language: String,
    to_language: String,
    path_rewrites: Vec<PathRewrite>,
}

impl Retargeter {
    /// Create a retargeter without path rewrites
    pub fn new(from_language: impl Into<String>, to_language: impl Into<String>) -> Self {
        Self {
            from_language: from_language.into(),
            to_language: to_language.into(),
            path_rewrites: Vec::new(),
        }
    }

    /// Add container path rewrites
    #[must_use]
    pub fn with_path_rewrites(mut self, rewrites: impl IntoIterator<Item = PathRewrite>) -> Self {
        self.path_rewrites.extend(rewrites);
        self
    }

    /// Rename identity and bundle names and rewrite container paths.
    ///
    /// The identity name is renamed when it equals the source language or
    /// carries its `<lang>_` prefix; the bundle name only on an exact match.
    /// Returns the number of strings changed. Labels are not touched.
    pub fn apply(&self, document: &mut LocalizationDocument) -> usize {
        let mut changed = 0;
        if let Some(name) = document.identity_name.as_mut() {
            if let Some(renamed) = retarget_name(name, &self.from_language, &self.to_language) {
                *name = renamed;
                changed += 1;
            }
        }
        if let Some(bundle) = document.bundle_name.as_mut() {
            if *bundle == self.from_language {
                bundle.clone_from(&self.to_language);
                changed += 1;
            }
        }
        for value in document.extra.values_mut() {
            changed += self.rewrite_paths(value);
        }
        changed
    }

    fn rewrite_paths(&self, value: &mut Value) -> usize {
        match value {
            Value::String(s) => {
                let mut changed = false;
                for rewrite in &self.path_rewrites {
                    if !rewrite.from.is_empty() && s.contains(&rewrite.from) {
                        *s = s.replace(&rewrite.from, &rewrite.to);
                        changed = true;
                    }
                }
                usize::from(changed)
            }
            Value::Array(items) => items.iter_mut().map(|item| self.rewrite_paths(item)).sum(),
            Value::Object(map) => map.values_mut().map(|item| self.rewrite_paths(item)).sum(),
            _ => 0,
        }
    }
}
