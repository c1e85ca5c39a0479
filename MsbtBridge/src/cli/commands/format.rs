//! CLI command for pretty-printing JSON files

use std::path::Path;

use crate::batch;
use crate::cli::progress::{batch_bar, update_bar};

/// Reformat every JSON file under `dir`, or every file named in `list`
pub fn execute(dir: Option<&Path>, list: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let paths = match (dir, list) {
        (_, Some(list)) => batch::read_path_list(list)?,
        (Some(dir), None) => {
            if !dir.is_dir() {
                anyhow::bail!("Directory not found: {}", dir.display());
            }
            batch::find_json_files(dir)
        }
        (None, None) => anyhow::bail!("Either a directory or --list is required"),
    };

    if paths.is_empty() {
        println!("No JSON files found");
        return Ok(());
    }

    println!("Found {} JSON files to format", paths.len());
    let pb = batch_bar(quiet);
    let report = batch::reformat(&paths, &|progress| update_bar(&pb, progress));
    pb.finish_and_clear();

    println!();
    println!("Formatting complete:");
    println!("  Success: {}", report.success_count);
    println!("  Failed: {}", report.fail_count());

    if !report.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in &report.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
    }
    Ok(())
}
