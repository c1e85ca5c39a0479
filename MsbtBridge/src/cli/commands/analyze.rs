//! CLI command for difference analysis

use std::path::Path;

use crate::batch;
use crate::cli::progress::{batch_bar, update_bar};
use crate::diff::LeafPolicy;

/// Classify non-text differences between two export directories
pub fn execute(
    dir_a: &Path,
    lang_a: &str,
    dir_b: &Path,
    lang_b: &str,
    policy: &dyn LeafPolicy,
    output: Option<&Path>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    for dir in [dir_a, dir_b] {
        if !dir.is_dir() {
            anyhow::bail!("Directory not found: {}", dir.display());
        }
    }

    let pb = batch_bar(quiet);
    let report = batch::analyze(dir_a, lang_a, dir_b, lang_b, policy, &|progress| update_bar(&pb, progress));
    pb.finish_and_clear();

    if report.pairs.is_empty() && report.skipped.is_empty() {
        println!("No {lang_a}/{lang_b} file pairs found");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    if let Some(path) = output {
        batch::write_report(path, &report.render_text())?;
        println!("\nReport written to {}", path.display());
    }
    Ok(())
}
