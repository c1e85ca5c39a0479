//! Batch configuration (`msbtbridge.toml`)
//!
//! Relative paths are resolved against the directory holding the file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::OutputStyle;
use crate::error::{Error, Result};
use crate::naming::{PathRewrite, Retargeter};
use crate::resolve::{Alignment, CharTableConverter, CopyMode, Term, TermTable};

fn default_true() -> bool {
    true
}

/// The full backfill configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Language prefix of the files to backfill
    pub target_language: String,
    /// Language prefix given to produced files
    pub output_language: String,
    /// Directory holding the target files
    pub target_root: PathBuf,
    /// Directory produced files are written to
    pub output_root: PathBuf,
    /// JSON layout of produced files
    #[serde(default)]
    pub output_style: OutputStyle,
    /// Rename identity/bundle names and rewrite container paths
    #[serde(default = "default_true")]
    pub retarget: bool,
    /// Candidate sources in priority order
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// Script conversion dictionaries
    #[serde(default)]
    pub conversion: Option<ConversionConfig>,
    /// Container path rewrites
    #[serde(default)]
    pub path_rewrites: Vec<PathRewrite>,
    /// Inline fallback terms; the built-in table is used when neither this nor `terms_file` is set
    #[serde(default)]
    pub terms: Option<Vec<Term>>,
    /// Fallback term file
    #[serde(default)]
    pub terms_file: Option<PathBuf>,
}

/// One candidate sibling export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Name used in reports
    pub name: String,
    /// Directory holding the sibling files
    pub root: PathBuf,
    /// Language prefix of the sibling files
    pub language: String,
    /// Pass donor text through the script converter
    #[serde(default)]
    pub convert: bool,
    /// What is copied from a donor word
    #[serde(default)]
    pub copy_mode: CopyMode,
    /// How donor labels are matched
    #[serde(default)]
    pub alignment: Alignment,
}

/// OpenCC-style dictionaries for script conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Character dictionary
    pub table: PathBuf,
    /// Optional phrase dictionary
    #[serde(default)]
    pub phrases: Option<PathBuf>,
}

impl BatchConfig {
    /// Minimal configuration with no sources
    pub fn new(
        target_language: impl Into<String>,
        output_language: impl Into<String>,
        target_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target_language: target_language.into(),
            output_language: output_language.into(),
            target_root: target_root.into(),
            output_root: output_root.into(),
            output_style: OutputStyle::default(),
            retarget: true,
            sources: Vec::new(),
            conversion: None,
            path_rewrites: Vec::new(),
            terms: None,
            terms_file: None,
        }
    }

    /// Load, resolve relative paths and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;
        tracing::debug!(
            "Loaded config {}: {} -> {} with {} sources",
            path.display(),
            config.target_language,
            config.output_language,
            config.sources.len()
        );
        Ok(config)
    }

    /// Make every relative path absolute against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.target_root);
        join(&mut self.output_root);
        for source in &mut self.sources {
            join(&mut source.root);
        }
        if let Some(conversion) = &mut self.conversion {
            join(&mut conversion.table);
            if let Some(phrases) = &mut conversion.phrases {
                join(phrases);
            }
        }
        if let Some(terms_file) = &mut self.terms_file {
            join(terms_file);
        }
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| -> Result<()> { Err(Error::InvalidConfig { message }) };

        if self.target_language.trim().is_empty() {
            return invalid("target_language is empty".to_string());
        }
        if self.output_language.trim().is_empty() {
            return invalid("output_language is empty".to_string());
        }
        if self.target_language == self.output_language && self.target_root == self.output_root {
            return invalid("output would overwrite the target files".to_string());
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return invalid("source with an empty name".to_string());
            }
            if source.language.trim().is_empty() {
                return invalid(format!("source '{}' has an empty language", source.name));
            }
            if !names.insert(source.name.as_str()) {
                return invalid(format!("duplicate source name '{}'", source.name));
            }
            if source.convert && self.conversion.is_none() {
                return invalid(format!(
                    "source '{}' requests conversion but no [conversion] table is configured",
                    source.name
                ));
            }
        }

        if self.terms.is_some() && self.terms_file.is_some() {
            return invalid("set either terms or terms_file, not both".to_string());
        }
        Ok(())
    }

    /// Fallback term table: file, inline terms, or the built-in Korean table
    pub fn term_table(&self) -> Result<TermTable> {
        if let Some(path) = &self.terms_file {
            return TermTable::load(path);
        }
        Ok(match &self.terms {
            Some(terms) => terms.iter().cloned().collect(),
            None => TermTable::korean_to_simplified_chinese(),
        })
    }

    /// Script converter, if any source needs one
    pub fn converter(&self) -> Result<Option<CharTableConverter>> {
        let Some(conversion) = &self.conversion else {
            return Ok(None);
        };
        if !self.sources.iter().any(|s| s.convert) {
            return Ok(None);
        }
        let mut tables = Vec::new();
        if let Some(phrases) = &conversion.phrases {
            tables.push(phrases.as_path());
        }
        tables.push(conversion.table.as_path());
        CharTableConverter::load(&tables).map(Some)
    }

    /// Retargeter for produced documents
    #[must_use]
    pub fn retargeter(&self) -> Retargeter {
        Retargeter::new(&self.target_language, &self.output_language)
            .with_path_rewrites(self.path_rewrites.iter().cloned())
    }
}
