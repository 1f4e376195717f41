pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod quality;
pub mod scoring;

use serde::{Deserialize, Serialize};

pub use config::PipelineConfig;
pub use error::DealError;
pub use model::{DealRecord, LayoutKind, SourceRef};
pub use parsing::{canonicalize_records, parse_grid, ParsedDeals, SkippedRow};
pub use quality::{check_batch, QualityReport};
pub use scoring::{score_batch, score_deal, score_week, ScoreRecord, ScoredDeal, ScoringContext};

use extraction::{file_extension, reader_for_file_name, GridReader};

/// Why a document should be offered to an external extraction service.
/// This is a confidence signal, not an error: any deals that were parsed
/// are still returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No known layout matched, or the grid could not be read at all.
    UnknownLayout,
    /// A known layout matched but yielded too few usable rows.
    TooFewRows { found: usize, minimum: usize },
    /// The file type has no grid reader (PDF, slides, ...).
    UnsupportedFile { extension: String },
}

/// Result of ingesting one vendor document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub file_name: String,
    pub layout: LayoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_row: Option<usize>,
    pub deals: Vec<DealRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
    /// Header cells that did not map onto any canonical field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmapped_columns: Vec<String>,
    /// Message of the error that stopped the structured parse, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,
}

impl DocumentOutcome {
    fn failed(file_name: &str, failure: Option<String>, fallback: FallbackReason) -> Self {
        Self {
            file_name: file_name.to_string(),
            layout: LayoutKind::Unknown,
            header_row: None,
            deals: Vec::new(),
            skipped: Vec::new(),
            unmapped_columns: Vec::new(),
            failure,
            fallback: Some(fallback),
        }
    }

    pub fn needs_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Main API entry point: turn one uploaded document into canonical deals.
///
/// Never fails. Unreadable grids, missing headers and low-confidence
/// parses are reported through `failure` and `fallback` so the caller can
/// route the document to an external extractor and feed its records back
/// through [`canonicalize_records`].
pub fn ingest_document(
    bytes: &[u8],
    file_name: &str,
    reader: &dyn GridReader,
    config: &PipelineConfig,
) -> DocumentOutcome {
    let grid = match reader.read_grid(bytes) {
        Ok(grid) => grid,
        Err(e) => {
            tracing::warn!(
                file = file_name,
                backend = reader.backend_name(),
                error = %e,
                "grid extraction failed"
            );
            return DocumentOutcome::failed(
                file_name,
                Some(e.to_string()),
                FallbackReason::UnknownLayout,
            );
        }
    };

    let parsed = match parse_grid(&grid, file_name, &config.parse_options()) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(file = file_name, error = %e, "structured parse failed");
            return DocumentOutcome::failed(
                file_name,
                Some(e.to_string()),
                FallbackReason::UnknownLayout,
            );
        }
    };

    let fallback = if !parsed.layout.is_known() {
        Some(FallbackReason::UnknownLayout)
    } else if parsed.deals.len() < config.min_structured_rows {
        Some(FallbackReason::TooFewRows {
            found: parsed.deals.len(),
            minimum: config.min_structured_rows,
        })
    } else {
        None
    };

    if let Some(reason) = &fallback {
        tracing::info!(file = file_name, ?reason, "low-confidence parse");
    }

    DocumentOutcome {
        file_name: file_name.to_string(),
        layout: parsed.layout,
        header_row: Some(parsed.header_row),
        deals: parsed.deals,
        skipped: parsed.skipped,
        unmapped_columns: parsed.unmapped_columns,
        failure: None,
        fallback,
    }
}

/// Like [`ingest_document`], choosing the grid reader from the file
/// extension. Unsupported types come back as a fallback signal.
pub fn ingest_file_bytes(bytes: &[u8], file_name: &str, config: &PipelineConfig) -> DocumentOutcome {
    match reader_for_file_name(file_name) {
        Ok(reader) => ingest_document(bytes, file_name, reader.as_ref(), config),
        Err(e) => DocumentOutcome::failed(
            file_name,
            Some(e.to_string()),
            FallbackReason::UnsupportedFile {
                extension: file_extension(file_name),
            },
        ),
    }
}

/// Ingest a JSON array of deal objects produced outside the grid path (an
/// external extractor, or a deal list exported earlier). The objects go
/// through [`canonicalize_records`], so records without an item code or a
/// description are skipped and percentages are normalized the same way as
/// spreadsheet cells.
pub fn ingest_deal_list(
    bytes: &[u8],
    file_name: &str,
    config: &PipelineConfig,
) -> Result<DocumentOutcome, DealError> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_slice(bytes)?;
    let parsed = canonicalize_records(&records, file_name, config.default_year)?;
    if !parsed.skipped.is_empty() {
        tracing::warn!(
            file = file_name,
            skipped = parsed.skipped.len(),
            "dropped records from deal list"
        );
    }
    Ok(DocumentOutcome {
        file_name: file_name.to_string(),
        layout: parsed.layout,
        header_row: None,
        deals: parsed.deals,
        skipped: parsed.skipped,
        unmapped_columns: parsed.unmapped_columns,
        failure: None,
        fallback: None,
    })
}
