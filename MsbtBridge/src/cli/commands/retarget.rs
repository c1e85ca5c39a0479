//! CLI command for renaming exports into another language's asset namespace

use std::path::Path;

use crate::batch;
use crate::cli::progress::{batch_bar, update_bar};
use crate::document::OutputStyle;
use crate::naming::{PathRewrite, Retargeter};

/// Retarget the exports under `dir` from `from` to `to` in place
pub fn execute(
    dir: &Path,
    from: &str,
    to: &str,
    prefix: Option<&str>,
    rewrites: &[PathRewrite],
    pretty: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }
    if from.is_empty() || to.is_empty() {
        anyhow::bail!("Both --from and --to must be non-empty");
    }

    let paths = match prefix {
        Some(prefix) => batch::find_language_files(dir, prefix)
            .into_iter()
            .map(|file| file.path)
            .collect(),
        None => batch::find_json_files(dir),
    };
    if paths.is_empty() {
        println!("No JSON files found");
        return Ok(());
    }

    let retargeter = Retargeter::new(from, to).with_path_rewrites(rewrites.iter().cloned());
    let style = if pretty { OutputStyle::Pretty } else { OutputStyle::Compact };

    println!("Found {} JSON files to retarget", paths.len());
    let pb = batch_bar(quiet);
    let report = batch::retarget(&paths, &retargeter, style, &|progress| update_bar(&pb, progress));
    pb.finish_and_clear();

    println!();
    println!("Retargeting complete:");
    println!("  Changed:   {} ({} names/paths)", report.files_changed, report.strings_changed);
    println!("  Unchanged: {}", report.files_unchanged);
    println!("  Failed:    {}", report.failures.len());

    if !report.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in &report.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
    }
    Ok(())
}
