use dealrank_core::config::{builtin, load_config};
use dealrank_core::error::DealError;
use dealrank_core::scoring::ScoringWeights;
use std::path::Path;

pub fn list() -> Result<(), DealError> {
    println!("Available weight presets:\n");
    for name in builtin::PRESETS {
        let preset = builtin::load_preset(name)?;
        println!("  {:<14} {}", name, preset.description);
    }
    println!();
    Ok(())
}

pub fn show(name: &str) -> Result<(), DealError> {
    let preset = builtin::load_preset(name)?;
    println!("{}\n", preset.name);
    if !preset.description.is_empty() {
        println!("{}\n", preset.description);
    }
    print_weights(&preset.weights);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), DealError> {
    let config = load_config(file)?;

    println!("Config '{}' is valid.\n", file.display());
    print_weights(&config.weights);
    println!();
    println!(
        "  Quality gate: missing cost <= {:.1}%, missing ad price <= {:.1}%, unresolved descriptions <= {:.1}%",
        config.quality.max_missing_cost * 100.0,
        config.quality.max_missing_ad_srp * 100.0,
        config.quality.max_unresolved_description * 100.0
    );
    println!("  Header scan rows: {}", config.header_scan_rows);
    println!("  Min structured rows: {}", config.min_structured_rows);
    if let Some(year) = config.default_year {
        println!("  Default year: {year}");
    }
    Ok(())
}

fn print_weights(weights: &ScoringWeights) {
    for (name, w) in weights.as_array() {
        println!("  {:<12} {:>5.2}", name, w);
    }
    println!("  {:<12} {:>5.2}", "sum", weights.sum());
}
