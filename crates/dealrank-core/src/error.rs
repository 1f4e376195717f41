use std::path::PathBuf;

use crate::quality::QualityIssue;

#[derive(Debug, thiserror::Error)]
pub enum DealError {
    #[error("grid extraction failed: {0}")]
    Extraction(String),

    #[error("unsupported file type '{extension}'. Supported: xlsx, xlsm, xls, ods, csv")]
    UnsupportedFile { extension: String },

    #[error("no header row found in the first {scanned} rows (looked for: {keys})")]
    HeaderNotFound { scanned: usize, keys: String },

    #[error("failed to parse document: {0}")]
    ParseError(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("unknown weight preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("quality gate failed with {} issue(s): {}", .0.len(), format_issues(.0))]
    QualityGate(Vec<QualityIssue>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_issues(issues: &[QualityIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
