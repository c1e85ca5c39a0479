//! Subcommand definitions

use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::naming::PathRewrite;

pub mod analyze;
pub mod backfill;
pub mod compare;
pub mod diff;
pub mod execute;
pub mod format;
pub mod retarget;
pub mod verify;

/// Output format for single-pair diffs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty JSON
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Backfill target-language exports from sibling languages
    Backfill {
        /// Batch configuration file (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Write the full JSON report here
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Classify non-text differences between two export directories
    Analyze {
        /// First export directory
        dir_a: PathBuf,

        /// Language prefix of files in the first directory
        lang_a: String,

        /// Second export directory
        dir_b: PathBuf,

        /// Language prefix of files in the second directory
        lang_b: String,

        /// Path suffix marking width fields
        #[arg(long, default_value = "strWidth")]
        width_suffix: String,

        /// Path suffix marking text fields
        #[arg(long, default_value = "str")]
        text_suffix: String,

        /// Write the text report here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List structural and non-text value differences between two export directories
    Compare {
        /// First export directory
        dir_a: PathBuf,

        /// Language prefix of files in the first directory
        lang_a: String,

        /// Second export directory
        dir_b: PathBuf,

        /// Language prefix of files in the second directory
        lang_b: String,

        /// Write the text report here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check produced exports against template exports
    Verify {
        /// Directory of produced exports
        produced_dir: PathBuf,

        /// Language prefix of produced files
        produced_lang: String,

        /// Directory of template exports
        template_dir: PathBuf,

        /// Language prefix of template files
        template_lang: String,

        /// Write the JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pretty-print JSON files in place
    Format {
        /// Directory to format recursively
        #[arg(required_unless_present = "list", conflicts_with = "list")]
        dir: Option<PathBuf>,

        /// File listing the paths to format, one per line
        #[arg(short, long)]
        list: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rename asset names and container paths of existing exports in place
    Retarget {
        /// Directory to retarget recursively
        dir: PathBuf,

        /// Language the asset names currently carry
        #[arg(long)]
        from: String,

        /// Language to rename them to
        #[arg(long)]
        to: String,

        /// Only touch files named `<prefix>_*.json` or `<prefix>.json` directly in the directory
        #[arg(long)]
        prefix: Option<String>,

        /// Container path rewrite as `FROM=TO`, may be repeated
        #[arg(long = "rewrite", value_parser = parse_rewrite)]
        rewrites: Vec<PathRewrite>,

        /// Write files pretty-printed instead of compact
        #[arg(long)]
        pretty: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Compare two single export files
    Diff {
        /// First file
        file_a: PathBuf,

        /// Second file
        file_b: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn parse_rewrite(arg: &str) -> Result<PathRewrite, String> {
    match arg.split_once('=') {
        Some((from, to)) if !from.is_empty() => Ok(PathRewrite::new(from, to)),
        _ => Err(format!("expected FROM=TO, got '{arg}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rewrite() {
        assert_eq!(
            parse_rewrite("ko/korean/korean_=si/simp_chinese/simp_chinese_"),
            Ok(PathRewrite::new("ko/korean/korean_", "si/simp_chinese/simp_chinese_"))
        );
        assert!(parse_rewrite("no-separator").is_err());
        assert!(parse_rewrite("=x").is_err());
    }
}
