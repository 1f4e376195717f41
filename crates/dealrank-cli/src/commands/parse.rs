use dealrank_core::error::DealError;
use dealrank_core::{ingest_file_bytes, PipelineConfig};
use std::path::PathBuf;

use super::{display_name, read_file};
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), DealError> {
    let bytes = read_file(&input_file)?;
    let outcome = ingest_file_bytes(&bytes, &display_name(&input_file), &PipelineConfig::default());

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&outcome)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} deal(s) as {}, written to {}",
                outcome.deals.len(),
                outcome.layout,
                path.display()
            );
            if !outcome.skipped.is_empty() {
                eprintln!("  {} row(s) skipped during parsing", outcome.skipped.len());
            }
            if let Some(reason) = &outcome.fallback {
                eprintln!("  warning: low-confidence parse ({reason:?})");
            }
        }
        None => match output_format {
            "json" => output::json::print(&outcome)?,
            _ => println!("{}", output::table::format_outcome(&outcome)),
        },
    }

    Ok(())
}
