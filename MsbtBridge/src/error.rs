//! Error types for `MsbtBridge`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `MsbtBridge` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== JSON Errors ====================
    /// JSON (de)serialization error without file context.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON export could not be parsed.
    #[error("invalid JSON in {path}: {source}")]
    JsonParse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The parser error.
        source: serde_json::Error,
    },

    /// The document root is not a JSON object.
    #[error("document root is not a JSON object: {path}")]
    NotAnObject {
        /// The offending file.
        path: PathBuf,
    },

    // ==================== Configuration Errors ====================
    /// The batch configuration file could not be parsed.
    #[error("failed to parse config {path}: {message}")]
    ConfigParse {
        /// The configuration file.
        path: PathBuf,
        /// The TOML parser message.
        message: String,
    },

    /// The batch configuration parsed but is not usable.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// What is wrong with it.
        message: String,
    },

    // ==================== Script Conversion Errors ====================
    /// A conversion dictionary line could not be parsed.
    #[error("invalid conversion table {path} at line {line}: {message}")]
    ConversionTable {
        /// The dictionary file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The script converter could not convert a string.
    #[error("script conversion failed: {message}")]
    ConversionFailed {
        /// The converter's message.
        message: String,
    },
}

/// Result type alias for `MsbtBridge` operations.
pub type Result<T> = std::result::Result<T, Error>;
