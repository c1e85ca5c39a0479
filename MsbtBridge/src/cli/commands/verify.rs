//! CLI command for structure verification

use std::path::Path;

use crate::batch;
use crate::document::{OutputStyle, to_json_string};

/// Check produced exports against their templates
pub fn execute(
    produced_dir: &Path,
    produced_lang: &str,
    template_dir: &Path,
    template_lang: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let report = batch::verify(produced_dir, produced_lang, template_dir, template_lang);
    let json = to_json_string(&report, OutputStyle::Pretty)?;

    match output {
        Some(path) => {
            batch::write_report(path, &json)?;
            let summary = &report.summary;
            println!("Checked {} files", summary.files_checked);
            println!("  Top-level keys equal: {}", summary.all_top_keys_equal);
            println!("  Label counts equal:   {}", summary.all_label_count_equal);
            println!("  Label names equal:    {}", summary.all_label_names_equal);
            println!("  Word counts equal:    {}", summary.all_word_arrays_len_equal);
            println!("Report written to {}", path.display());
        }
        None => print!("{json}"),
    }

    if !report.is_ok() {
        anyhow::bail!("Structure check failed");
    }
    Ok(())
}
