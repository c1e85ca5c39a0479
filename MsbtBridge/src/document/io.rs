//! Reading and writing export files
//!
//! Every function here returns an explicit `Result`; batch drivers decide
//! whether a failure skips a document or aborts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::LocalizationDocument;
use crate::error::{Error, Result};

/// How JSON is laid out on save
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Single line, trailing newline
    #[default]
    Compact,
    /// Two-space indentation
    Pretty,
}

/// Load an export file as a generic JSON value
pub fn load_value<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| Error::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an export file as a typed document
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<LocalizationDocument> {
    let path = path.as_ref();
    let value = load_value(path)?;
    if !value.is_object() {
        return Err(Error::NotAnObject {
            path: path.to_path_buf(),
        });
    }
    serde_json::from_value(value).map_err(|source| Error::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize anything JSON-shaped with the given style
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, style: OutputStyle) -> Result<String> {
    let mut text = match style {
        OutputStyle::Compact => serde_json::to_string(value)?,
        OutputStyle::Pretty => serde_json::to_string_pretty(value)?,
    };
    text.push('\n');
    Ok(text)
}

/// Write a typed document, creating parent directories as needed
pub fn save_document<P: AsRef<Path>>(
    document: &LocalizationDocument,
    path: P,
    style: OutputStyle,
) -> Result<()> {
    write_text(path.as_ref(), &to_json_string(document, style)?)
}

/// Write a generic JSON value, creating parent directories as needed
pub fn save_value<P: AsRef<Path>>(value: &Value, path: P, style: OutputStyle) -> Result<()> {
    write_text(path.as_ref(), &to_json_string(value, style)?)
}

/// Rewrite a JSON file in place, pretty-printed
pub fn reformat_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let value = load_value(path)?;
    save_value(&value, path, OutputStyle::Pretty)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let wrap = |source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, text).map_err(wrap)
}
