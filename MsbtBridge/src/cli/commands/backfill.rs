//! CLI command for backfilling exports

use std::path::Path;
use std::time::Instant;

use crate::batch::{self, DocumentOutcome};
use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, batch_bar, print_done, print_step, update_bar};
use crate::config::BatchConfig;
use crate::document::{OutputStyle, to_json_string};

/// Backfill the exports described by `config_path`
pub fn execute(config_path: &Path, report_path: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let steps = if report_path.is_some() { 3 } else { 2 };

    print_step(1, steps, LOOKING_GLASS, &format!("Loading {}", config_path.display()));
    let config = BatchConfig::load(config_path)?;
    if !config.target_root.is_dir() {
        anyhow::bail!("Target directory not found: {}", config.target_root.display());
    }

    print_step(
        2,
        steps,
        GEAR,
        &format!("Backfilling {} -> {}", config.target_language, config.output_language),
    );
    let pb = batch_bar(quiet);
    let report = batch::backfill(&config, &|progress| update_bar(&pb, progress))?;
    pb.finish_and_clear();

    println!();
    println!("Backfill complete:");
    println!("  Files:          {}", report.files_found);
    println!("  Resolved:       {}", report.resolved);
    println!("  Copied through: {}", report.copied_through);
    println!("  Load failures:  {}", report.load_failures);
    println!("  Save failures:  {}", report.save_failures);
    println!();
    println!("Labels:");
    println!("  Primary aligned:   {}", report.tiers.primary_aligned);
    println!("  Converted aligned: {}", report.tiers.secondary_converted_aligned);
    println!("  Term fallback:     {}", report.tiers.term_fallback);
    println!("  Unresolved:        {}", report.tiers.unresolved);
    println!("  Text changed:      {}", report.labels_changed);
    if report.layout_only_changes > 0 {
        println!("  Layout only:       {}", report.layout_only_changes);
    }
    if report.length_mismatches > 0 {
        println!("  Word count mismatches: {}", report.length_mismatches);
    }
    if report.conversion_failures > 0 {
        println!("  Conversion failures:   {}", report.conversion_failures);
    }
    for (source, hits) in &report.source_hits {
        println!("  From {source}: {hits}");
    }

    let failed: Vec<_> = report
        .files
        .iter()
        .filter_map(|file| match &file.outcome {
            DocumentOutcome::LoadFailed { error } | DocumentOutcome::SaveFailed { error } => {
                Some((file.file_name.as_str(), error.as_str()))
            }
            _ => None,
        })
        .collect();
    if !failed.is_empty() {
        println!();
        println!("Failed files:");
        for (name, error) in failed {
            println!("  {name}: {error}");
        }
    }

    if let Some(path) = report_path {
        print_step(3, steps, DISK, &format!("Writing report to {}", path.display()));
        batch::write_report(path, &to_json_string(&report, OutputStyle::Pretty)?)?;
    }

    print_done(started.elapsed());
    Ok(())
}
