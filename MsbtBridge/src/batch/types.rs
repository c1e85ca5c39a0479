//! Progress tracking and file discovery shared by the batch drivers

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::naming::language_suffix;

/// Progress callback type for batch operations
pub type BatchProgressCallback<'a> = &'a (dyn Fn(&BatchProgress) + Sync + Send);

/// Progress information during batch operations
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Current operation phase
    pub phase: BatchPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl BatchProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: BatchPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file name
    #[must_use]
    pub fn with_file(phase: BatchPhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a batch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    /// Discovering input files
    Scanning,
    /// Backfilling target documents
    Resolving,
    /// Classifying differences
    Analyzing,
    /// Listing structural differences
    Comparing,
    /// Checking produced structure
    Verifying,
    /// Rewriting JSON layout
    Formatting,
    /// Renaming asset names and container paths
    Retargeting,
    /// Operation complete
    Complete,
}

impl BatchPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scanning => "Scanning",
            Self::Resolving => "Resolving labels",
            Self::Analyzing => "Analyzing differences",
            Self::Comparing => "Comparing structure",
            Self::Verifying => "Verifying structure",
            Self::Formatting => "Formatting",
            Self::Retargeting => "Retargeting",
            Self::Complete => "Complete",
        }
    }
}

/// An export file of one language, with the suffix shared across languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    /// Full path
    pub path: PathBuf,
    /// File name
    pub file_name: String,
    /// Part of the name after the language prefix (`_menu.json`, `.json`)
    pub suffix: String,
}

/// Find the `language` exports directly inside `dir`, sorted by file name
pub fn find_language_files<P: AsRef<Path>>(dir: P, language: &str) -> Vec<LanguageFile> {
    let mut files: Vec<LanguageFile> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let file_name = e.file_name().to_str()?.to_string();
            let suffix = language_suffix(&file_name, language)?.to_string();
            Some(LanguageFile {
                path: e.path().to_path_buf(),
                file_name,
                suffix,
            })
        })
        .collect();

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    files
}

/// A file of `dir_a` in `lang_a` with its `lang_b` sibling in `dir_b`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// File in the first directory
    pub a: LanguageFile,
    /// Sibling path in the second directory
    pub b_path: PathBuf,
    /// Sibling file name
    pub b_file_name: String,
}

/// Pair every `lang_a` file of `dir_a` with its existing `lang_b` sibling in `dir_b`.
///
/// Files without a sibling are skipped.
pub fn pair_language_files(dir_a: &Path, lang_a: &str, dir_b: &Path, lang_b: &str) -> Vec<FilePair> {
    find_language_files(dir_a, lang_a)
        .into_iter()
        .filter_map(|a| {
            let b_file_name = format!("{lang_b}{}", a.suffix);
            let b_path = dir_b.join(&b_file_name);
            if b_path.is_file() {
                Some(FilePair { a, b_path, b_file_name })
            } else {
                tracing::debug!("No {} sibling for {}", lang_b, a.file_name);
                None
            }
        })
        .collect()
}

/// Find all `.json` files under `dir` recursively, sorted
pub fn find_json_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Read a list of paths, one per line; blank lines and `#` comments are skipped.
///
/// Relative entries are resolved against the list file's directory.
pub fn read_path_list<P: AsRef<Path>>(list_file: P) -> Result<Vec<PathBuf>> {
    let list_file = list_file.as_ref();
    let content = fs::read_to_string(list_file).map_err(|source| Error::FileRead {
        path: list_file.to_path_buf(),
        source,
    })?;
    let base = list_file.parent().unwrap_or(Path::new(""));
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let path = PathBuf::from(line);
            if path.is_relative() { base.join(path) } else { path }
        })
        .collect())
}

/// Write a text report, creating parent directories as needed
pub fn write_report<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    let wrap = |source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, text).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_find_language_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        for name in ["korean_b.json", "korean_a.json", "korean.json", "koreanx.json", "simp_chinese_a.json", "korean_c.txt"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("korean_dir.json")).unwrap();

        let files = find_language_files(dir.path(), "korean");
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["korean.json", "korean_a.json", "korean_b.json"]);
        assert_eq!(files[1].suffix, "_a.json");
    }

    #[test]
    fn test_pair_language_files() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        fs::write(a.path().join("simp_chinese_x.json"), "{}").unwrap();
        fs::write(a.path().join("simp_chinese_y.json"), "{}").unwrap();
        fs::write(b.path().join("korean_x.json"), "{}").unwrap();

        let pairs = pair_language_files(a.path(), "simp_chinese", b.path(), "korean");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].b_file_name, "korean_x.json");
    }

    #[test]
    fn test_find_json_files_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.JSON"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();
        assert_eq!(find_json_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_read_path_list() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("files.txt");
        fs::write(&list, "# files\na.json\n\n/abs/b.json\n").unwrap();
        assert_eq!(
            read_path_list(&list).unwrap(),
            vec![dir.path().join("a.json"), PathBuf::from("/abs/b.json")]
        );
    }
}
