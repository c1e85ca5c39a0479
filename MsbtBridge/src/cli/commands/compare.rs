//! CLI command for structural comparison

use std::path::Path;

use crate::batch;
use crate::cli::progress::{batch_bar, update_bar};

/// List structural differences between two export directories
pub fn execute(
    dir_a: &Path,
    lang_a: &str,
    dir_b: &Path,
    lang_b: &str,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    for dir in [dir_a, dir_b] {
        if !dir.is_dir() {
            anyhow::bail!("Directory not found: {}", dir.display());
        }
    }

    let pb = batch_bar(quiet);
    let report = batch::compare(dir_a, lang_a, dir_b, lang_b, &|progress| update_bar(&pb, progress));
    pb.finish_and_clear();

    println!("Compared {} file pairs", report.compared);
    for file in &report.files {
        println!("{}: {} differences", file.file_a, file.differences.len());
    }
    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.file_a, skipped.error);
    }
    if report.is_clean() {
        println!("No differences besides language text");
    }

    match output {
        Some(path) => {
            batch::write_report(path, &report.render_text())?;
            println!("Report written to {}", path.display());
        }
        None if !report.is_clean() => {
            println!();
            print!("{}", report.render_text());
        }
        None => {}
    }
    Ok(())
}
