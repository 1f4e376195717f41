pub mod builtin;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DealError;
use crate::parsing::header::DEFAULT_HEADER_SCAN_ROWS;
use crate::parsing::ParseOptions;
use crate::quality::QualityThresholds;
use crate::scoring::ScoringWeights;

/// Minimum parsed rows for a structured parse to be trusted.
pub const DEFAULT_MIN_STRUCTURED_ROWS: usize = 3;

/// Settings for one run of the pipeline. Every field has a default, so
/// `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub quality: QualityThresholds,
    #[serde(default = "default_header_scan_rows")]
    pub header_scan_rows: usize,
    /// Fewer parsed rows than this sends a known-layout document to the
    /// fallback extractor.
    #[serde(default = "default_min_structured_rows")]
    pub min_structured_rows: usize,
    #[serde(default)]
    pub default_year: Option<i32>,
    #[serde(default = "default_private_label_keywords")]
    pub private_label_keywords: Vec<String>,
}

fn default_header_scan_rows() -> usize {
    DEFAULT_HEADER_SCAN_ROWS
}

fn default_min_structured_rows() -> usize {
    DEFAULT_MIN_STRUCTURED_ROWS
}

fn default_private_label_keywords() -> Vec<String> {
    vec!["store brand".into(), "private label".into()]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            quality: QualityThresholds::default(),
            header_scan_rows: default_header_scan_rows(),
            min_structured_rows: default_min_structured_rows(),
            default_year: None,
            private_label_keywords: default_private_label_keywords(),
        }
    }
}

impl PipelineConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            header_scan_rows: self.header_scan_rows,
            default_year: self.default_year,
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, DealError> {
    let content = std::fs::read_to_string(path).map_err(|e| DealError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: PipelineConfig =
        serde_json::from_str(&content).map_err(|e| DealError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<PipelineConfig, DealError> {
    let config: PipelineConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &PipelineConfig) -> Result<(), DealError> {
    config.weights.validate()?;

    let thresholds = [
        ("max_missing_cost", config.quality.max_missing_cost),
        ("max_missing_ad_srp", config.quality.max_missing_ad_srp),
        (
            "max_unresolved_description",
            config.quality.max_unresolved_description,
        ),
    ];
    for (name, value) in thresholds {
        if !(0.0..=1.0).contains(&value) {
            return Err(DealError::ConfigInvalid(format!(
                "quality threshold '{name}' must be between 0 and 1, got {value}"
            )));
        }
    }

    if config.header_scan_rows == 0 {
        return Err(DealError::ConfigInvalid(
            "header_scan_rows must be at least 1".into(),
        ));
    }

    if config.private_label_keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(DealError::ConfigInvalid(
            "private_label_keywords must not contain empty entries".into(),
        ));
    }

    Ok(())
}
