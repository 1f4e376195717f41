use chrono::NaiveDate;
use dealrank_core::config::{builtin, load_config};
use dealrank_core::error::DealError;
use dealrank_core::{
    ingest_deal_list, ingest_file_bytes, score_week, DealRecord, PipelineConfig,
};
use std::path::PathBuf;

use super::{display_name, read_file};
use crate::output;

pub fn run(
    input_files: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    preset: Option<String>,
    as_of: Option<String>,
    output_format: &str,
    verbose: bool,
) -> Result<(), DealError> {
    let mut config = match &config_file {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(name) = &preset {
        config.weights = builtin::load_preset(name)?.weights;
    }

    let as_of = match as_of {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
            DealError::ConfigInvalid(format!("--as-of '{s}' is not a YYYY-MM-DD date: {e}"))
        })?,
        None => chrono::Local::now().date_naive(),
    };

    let mut deals: Vec<DealRecord> = Vec::new();
    for path in &input_files {
        // Deal lists skip grid extraction
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let bytes = read_file(path)?;

        let name = display_name(path);
        if is_json {
            let mut outcome = ingest_deal_list(&bytes, &name, &config)?;
            if !outcome.skipped.is_empty() {
                eprintln!(
                    "warning: {name}: {} record(s) skipped",
                    outcome.skipped.len()
                );
            }
            tracing::info!(file = %path.display(), deals = outcome.deals.len(), "loaded deal list");
            deals.append(&mut outcome.deals);
            continue;
        }

        let mut outcome = ingest_file_bytes(&bytes, &name, &config);
        if let Some(failure) = &outcome.failure {
            eprintln!("warning: {name}: {failure}");
        }
        if let Some(reason) = &outcome.fallback {
            eprintln!("warning: {name}: low-confidence parse ({reason:?}), review before publishing");
        }
        deals.append(&mut outcome.deals);
    }

    let ranked = score_week(&deals, &config, as_of)?;

    match output_format {
        "json" => output::json::print(&ranked)?,
        _ => output::table::print_ranked(&ranked, verbose),
    }

    Ok(())
}
