//! CLI command for diffing two single exports

use std::path::Path;

use crate::diff::{SuffixPolicy, classify_differences, presence_diff};
use crate::document::load_value;

use super::OutputFormat;

/// Classify and list the differences between two files
pub fn execute(file_a: &Path, file_b: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let a = load_value(file_a)?;
    let b = load_value(file_b)?;

    let counts = classify_differences(&a, &b, &SuffixPolicy::default());
    let b_name = file_b
        .file_name()
        .map_or_else(|| file_b.display().to_string(), |n| n.to_string_lossy().to_string());
    let differences: Vec<String> = presence_diff(&a, &b, &b_name).iter().map(ToString::to_string).collect();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file_a": file_a.display().to_string(),
                "file_b": file_b.display().to_string(),
                "counts": counts,
                "differences": differences,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", counts.summary());
            if differences.is_empty() {
                println!("No differences besides language text");
            } else {
                for diff in &differences {
                    println!("  - {diff}");
                }
            }
        }
    }
    Ok(())
}
