//! Script conversion between two written forms of the same language

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Converts donor text from an alternate script before it is copied.
///
/// Implementations should be pure. A returned error is not fatal: the
/// resolver keeps the unconverted donor text and counts the failure.
pub trait ScriptConverter: Send + Sync {
    /// Convert `text`
    fn convert(&self, text: &str) -> Result<String>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "converter"
    }
}

/// Returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl ScriptConverter for IdentityConverter {
    fn convert(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Dictionary converter over OpenCC-style tables.
///
/// Each line maps a phrase or character to one or more space-separated
/// candidates (`from<TAB>to [alt ...]`); the first candidate is used. Text is
/// converted greedily, longest dictionary match first.
#[derive(Debug, Clone, Default)]
pub struct CharTableConverter {
    name: String,
    entries: HashMap<String, String>,
    longest_key: usize,
}

impl CharTableConverter {
    /// Create an empty converter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a mapping; later additions replace earlier ones
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if from.is_empty() {
            return;
        }
        self.longest_key = self.longest_key.max(from.chars().count());
        self.entries.insert(from, to.into());
    }

    /// Number of dictionary entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load one or more dictionary files into a single converter
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut converter = Self::new("char-table");
        for path in paths {
            converter.load_file(path.as_ref())?;
        }
        tracing::debug!("Loaded {} conversion entries", converter.len());
        Ok(converter)
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        for (i, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let table_error = |message: &str| Error::ConversionTable {
                path: path.to_path_buf(),
                line: i + 1,
                message: message.to_string(),
            };
            let (from, candidates) = line
                .split_once('\t')
                .ok_or_else(|| table_error("missing tab separator"))?;
            let to = candidates
                .split_whitespace()
                .next()
                .ok_or_else(|| table_error("no conversion candidate"))?;
            if from.is_empty() {
                return Err(table_error("empty source phrase"));
            }
            self.insert(from, to);
        }
        Ok(())
    }
}

impl ScriptConverter for CharTableConverter {
    fn convert(&self, text: &str) -> Result<String> {
        if self.entries.is_empty() {
            return Ok(text.to_string());
        }

        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        let mut candidate = String::new();

        while pos < chars.len() {
            let max_len = self.longest_key.min(chars.len() - pos);
            let mut matched = false;
            for len in (1..=max_len).rev() {
                candidate.clear();
                candidate.extend(&chars[pos..pos + len]);
                if let Some(to) = self.entries.get(&candidate) {
                    out.push_str(to);
                    pos += len;
                    matched = true;
                    break;
                }
            }
            if !matched {
                out.push(chars[pos]);
                pos += 1;
            }
        }

        Ok(out)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
