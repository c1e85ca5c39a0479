//! Command execution implementations

use super::Commands;
use super::{analyze, backfill, compare, diff, format, retarget, verify};
use crate::diff::SuffixPolicy;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Backfill {
                config,
                report,
                quiet,
            } => backfill::execute(config, report.as_deref(), *quiet),
            Commands::Analyze {
                dir_a,
                lang_a,
                dir_b,
                lang_b,
                width_suffix,
                text_suffix,
                output,
                json,
                quiet,
            } => {
                let policy = SuffixPolicy {
                    width_suffix: width_suffix.clone(),
                    text_suffix: text_suffix.clone(),
                };
                analyze::execute(dir_a, lang_a, dir_b, lang_b, &policy, output.as_deref(), *json, *quiet)
            }
            Commands::Compare {
                dir_a,
                lang_a,
                dir_b,
                lang_b,
                output,
                quiet,
            } => compare::execute(dir_a, lang_a, dir_b, lang_b, output.as_deref(), *quiet),
            Commands::Verify {
                produced_dir,
                produced_lang,
                template_dir,
                template_lang,
                output,
            } => verify::execute(produced_dir, produced_lang, template_dir, template_lang, output.as_deref()),
            Commands::Format { dir, list, quiet } => format::execute(dir.as_deref(), list.as_deref(), *quiet),
            Commands::Retarget {
                dir,
                from,
                to,
                prefix,
                rewrites,
                pretty,
                quiet,
            } => retarget::execute(dir, from, to, prefix.as_deref(), rewrites, *pretty, *quiet),
            Commands::Diff {
                file_a,
                file_b,
                format,
            } => diff::execute(file_a, file_b, *format),
        }
    }
}
