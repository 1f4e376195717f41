use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::extraction::SheetGrid;
use crate::model::LayoutKind;
use crate::parsing::header::row_has_any;
use crate::parsing::layouts::{LayoutSpec, ITEM_IDENTIFIER_KEYS, LAYOUTS};

/// How strongly one layout matched one header candidate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMatch {
    pub kind: LayoutKind,
    pub row: usize,
    /// All required header tokens present.
    pub full: bool,
    pub required_hits: usize,
    pub keyword_hits: usize,
    pub file_hint: bool,
}

impl SignatureMatch {
    /// Ordering key, strongest first: full signatures beat partial ones and
    /// longer signatures beat shorter ones; department keywords come next;
    /// the file name only settles otherwise equal signatures.
    fn rank(&self, specificity: usize) -> (bool, usize, usize, usize, bool) {
        (
            self.full,
            if self.full { specificity } else { 0 },
            self.keyword_hits,
            self.required_hits,
            self.file_hint,
        )
    }

    fn is_candidate(&self) -> bool {
        self.full || self.keyword_hits > 0
    }
}

/// Result of format detection for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub layout: LayoutKind,
    /// Header candidate row the winning signature was found on.
    pub header_row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<SignatureMatch>,
}

/// Classify a grid into one of the known vendor layouts, or `Unknown`.
///
/// Only rows within the first `max_rows` that name an item are considered
/// header candidates. Each candidate is scored against every layout
/// signature; the strongest match wins and ties fall to the file name hint,
/// then to declaration order.
pub fn detect_layout(grid: &SheetGrid, file_name: &str, max_rows: usize) -> Detection {
    let file_lower = file_name.to_lowercase();
    let mut best: Option<(&LayoutSpec, SignatureMatch)> = None;

    for row in 0..grid.rows.len().min(max_rows) {
        if !row_has_any(grid, row, ITEM_IDENTIFIER_KEYS) {
            continue;
        }
        let text = grid.row_text_upper(row);

        for spec in &LAYOUTS {
            let m = match_signature(spec, row, &text, &file_lower);
            if !m.is_candidate() {
                continue;
            }
            let better = match &best {
                None => true,
                Some((best_spec, best_m)) => {
                    m.rank(spec.required.len()) > best_m.rank(best_spec.required.len())
                }
            };
            if better {
                best = Some((spec, m));
            }
        }
    }

    match best {
        Some((spec, m)) => {
            tracing::debug!(
                file = file_name,
                layout = %spec.kind,
                row = m.row,
                full = m.full,
                keyword_hits = m.keyword_hits,
                file_hint = m.file_hint,
                "detected layout"
            );
            Detection {
                layout: spec.kind,
                header_row: Some(m.row),
                signature: Some(m),
            }
        }
        None => {
            tracing::debug!(file = file_name, "no layout signature matched");
            Detection {
                layout: LayoutKind::Unknown,
                header_row: None,
                signature: None,
            }
        }
    }
}

fn match_signature(spec: &LayoutSpec, row: usize, text: &str, file_lower: &str) -> SignatureMatch {
    let required_hits = spec.required.iter().filter(|t| text.contains(*t)).count();
    let keyword_hits = spec.keywords.iter().filter(|k| text.contains(*k)).count();
    SignatureMatch {
        kind: spec.kind,
        row,
        full: required_hits == spec.required.len(),
        required_hits,
        keyword_hits,
        file_hint: spec.file_hints.iter().any(|h| file_lower.contains(h)),
    }
}

/// All layouts ranked for a grid, strongest first. Diagnostic view of the
/// same scoring `detect_layout` uses.
pub fn rank_layouts(grid: &SheetGrid, file_name: &str, max_rows: usize) -> Vec<SignatureMatch> {
    let file_lower = file_name.to_lowercase();
    let mut matches: Vec<(usize, SignatureMatch)> = Vec::new();
    for row in 0..grid.rows.len().min(max_rows) {
        if !row_has_any(grid, row, ITEM_IDENTIFIER_KEYS) {
            continue;
        }
        let text = grid.row_text_upper(row);
        for (order, spec) in LAYOUTS.iter().enumerate() {
            let m = match_signature(spec, row, &text, &file_lower);
            if m.is_candidate() {
                matches.push((order, m));
            }
        }
    }
    matches.sort_by_key(|(order, m)| {
        let spec = &LAYOUTS[*order];
        (Reverse(m.rank(spec.required.len())), m.row, *order)
    });
    matches.into_iter().map(|(_, m)| m).collect()
}
