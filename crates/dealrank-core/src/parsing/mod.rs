pub mod detect;
pub mod generic;
pub mod header;
pub mod layouts;
pub mod normalize;
pub mod values;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DealError;
use crate::extraction::{Cell, SheetGrid};
use crate::model::{DealRecord, LayoutKind, SourceRef};
use detect::detect_layout;
use generic::map_generic_columns;
use header::{locate_header_row, DEFAULT_HEADER_SCAN_ROWS};
use layouts::{layout_spec, ColumnAliases, Field, GENERIC_COLUMNS, GENERIC_ITEM_KEYS};
use normalize::{header_key, normalize_department};
use values::{
    clean_upc, parse_date_cell, parse_date_range, parse_decimal_cell, parse_f64_cell,
    parse_percent_cell,
};

/// Knobs for turning a grid into canonical deals.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub header_scan_rows: usize,
    /// Year for promotion dates written without one ("3/4 - 3/10").
    pub default_year: Option<i32>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            default_year: None,
        }
    }
}

/// Why a data row was dropped. Dropped rows are counted, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingItemCode,
    MissingDescription,
    SubtotalRow,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingItemCode => write!(f, "missing item code"),
            SkipReason::MissingDescription => write!(f, "missing description"),
            SkipReason::SubtotalRow => write!(f, "subtotal or footer row"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_index: usize,
    pub reason: SkipReason,
}

/// Canonical deals parsed from one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDeals {
    pub layout: LayoutKind,
    pub header_row: usize,
    pub deals: Vec<DealRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Header cells that did not map onto any canonical field.
    pub unmapped_columns: Vec<String>,
}

/// Parse a vendor grid into canonical deal records.
///
/// Detects the layout, locates the header row with that layout's item
/// keys (or the generic keys for unknown layouts), maps columns and
/// canonicalizes every data row below the header.
pub fn parse_grid(
    grid: &SheetGrid,
    file_name: &str,
    options: &ParseOptions,
) -> Result<ParsedDeals, DealError> {
    let detection = detect_layout(grid, file_name, options.header_scan_rows);

    let (item_keys, aliases, default_dept) = match layout_spec(detection.layout) {
        Some(spec) => (spec.item_keys, Some(spec.columns), spec.default_dept),
        None => (GENERIC_ITEM_KEYS, None, None),
    };

    let header_row = locate_header_row(grid, item_keys, options.header_scan_rows).ok_or_else(
        || DealError::HeaderNotFound {
            scanned: grid.rows.len().min(options.header_scan_rows),
            keys: item_keys.join(", "),
        },
    )?;

    let header_cells = &grid.rows[header_row];
    let columns = match aliases {
        Some(aliases) => map_known_columns(header_cells, aliases),
        None => map_generic_columns(&header_texts(header_cells), GENERIC_COLUMNS),
    };

    let source = RowSource {
        file_name,
        sheet: grid.sheet_name.as_deref(),
    };
    let canon = Canonicalizer {
        columns: &columns,
        default_dept,
        default_year: options.default_year,
    };
    let parsed = canon.run(
        detection.layout,
        header_row,
        header_cells,
        grid.rows.iter().enumerate().skip(header_row + 1),
        &source,
    )?;

    tracing::info!(
        file = file_name,
        layout = %parsed.layout,
        header_row,
        deals = parsed.deals.len(),
        skipped = parsed.skipped.len(),
        "parsed document"
    );

    Ok(parsed)
}

/// Run pre-structured records (one JSON object per deal, e.g. from an
/// external extraction service) through the generic canonicalizer. Object
/// keys act as column headers.
pub fn canonicalize_records(
    records: &[serde_json::Map<String, serde_json::Value>],
    file_name: &str,
    default_year: Option<i32>,
) -> Result<ParsedDeals, DealError> {
    let mut keys: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }

    let header_cells: Vec<Cell> = keys.iter().map(|k| Cell::Text(k.clone())).collect();
    let rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            keys.iter()
                .map(|k| record.get(k).map(json_to_cell).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();

    let columns = map_generic_columns(&header_texts(&header_cells), GENERIC_COLUMNS);
    let canon = Canonicalizer {
        columns: &columns,
        default_dept: None,
        default_year,
    };
    let source = RowSource {
        file_name,
        sheet: None,
    };
    canon.run(
        LayoutKind::Unknown,
        0,
        &header_cells,
        rows.iter().enumerate(),
        &source,
    )
}

fn json_to_cell(value: &serde_json::Value) -> Cell {
    match value {
        serde_json::Value::Null => Cell::Empty,
        serde_json::Value::Bool(b) => Cell::Bool(*b),
        serde_json::Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
        serde_json::Value::String(s) => Cell::from(s.as_str()),
        other => Cell::Text(other.to_string()),
    }
}

fn header_texts(cells: &[Cell]) -> Vec<Option<String>> {
    cells.iter().map(Cell::as_text).collect()
}

/// Map header cells of a known layout: exact (normalized) header spelling,
/// first accepted spelling present wins.
pub fn map_known_columns(header: &[Cell], aliases: ColumnAliases) -> BTreeMap<Field, usize> {
    let mut by_key: BTreeMap<String, usize> = BTreeMap::new();
    for (col, cell) in header.iter().enumerate() {
        if let Some(text) = cell.as_text() {
            // Keep the leftmost column for duplicated headers.
            by_key.entry(header_key(&text)).or_insert(col);
        }
    }

    aliases
        .iter()
        .filter_map(|(field, spellings)| {
            spellings
                .iter()
                .find_map(|s| by_key.get(*s).copied())
                .map(|col| (*field, col))
        })
        .collect()
}

struct RowSource<'a> {
    file_name: &'a str,
    sheet: Option<&'a str>,
}

struct Canonicalizer<'a> {
    columns: &'a BTreeMap<Field, usize>,
    default_dept: Option<&'static str>,
    default_year: Option<i32>,
}

impl Canonicalizer<'_> {
    fn run<'r>(
        &self,
        layout: LayoutKind,
        header_row: usize,
        header_cells: &[Cell],
        rows: impl Iterator<Item = (usize, &'r Vec<Cell>)>,
        source: &RowSource<'_>,
    ) -> Result<ParsedDeals, DealError> {
        for required in [Field::ItemCode, Field::Description] {
            if !self.columns.contains_key(&required) {
                return Err(DealError::ParseError(format!(
                    "header row {header_row} has no {} column",
                    match required {
                        Field::ItemCode => "item identifier",
                        _ => "description",
                    }
                )));
            }
        }

        let mapped: Vec<usize> = self.columns.values().copied().collect();
        let unmapped_columns = header_cells
            .iter()
            .enumerate()
            .filter(|(col, _)| !mapped.contains(col))
            .filter_map(|(_, cell)| cell.as_text())
            .collect();

        let mut deals = Vec::new();
        let mut skipped = Vec::new();
        for (row_index, cells) in rows {
            if cells.iter().all(Cell::is_blank) {
                continue;
            }
            let src = SourceRef {
                file_name: source.file_name.to_string(),
                sheet: source.sheet.map(str::to_string),
                row: row_index,
            };
            match self.row(cells, src) {
                Ok(deal) => deals.push(deal),
                Err(reason) => {
                    tracing::debug!(row = row_index, %reason, "skipped row");
                    skipped.push(SkippedRow { row_index, reason });
                }
            }
        }

        Ok(ParsedDeals {
            layout,
            header_row,
            deals,
            skipped,
            unmapped_columns,
        })
    }

    fn cell<'c>(&self, cells: &'c [Cell], field: Field) -> Option<&'c Cell> {
        self.columns.get(&field).and_then(|&col| cells.get(col))
    }

    fn text(&self, cells: &[Cell], field: Field) -> Option<String> {
        self.cell(cells, field).and_then(Cell::as_text)
    }

    fn row(&self, cells: &[Cell], source: SourceRef) -> Result<DealRecord, SkipReason> {
        let item_code = self
            .text(cells, Field::ItemCode)
            .ok_or(SkipReason::MissingItemCode)?;
        let description = self
            .text(cells, Field::Description)
            .ok_or(SkipReason::MissingDescription)?;
        if description.to_lowercase().contains("total") {
            return Err(SkipReason::SubtotalRow);
        }

        let decimal = |field| self.cell(cells, field).and_then(parse_decimal_cell);

        let cost = decimal(Field::Cost);
        let (promo_start, promo_end) = self.promo_dates(cells);

        Ok(DealRecord {
            item_code,
            description,
            dept: self
                .text(cells, Field::Dept)
                .and_then(|d| normalize_department(&d))
                .or_else(|| self.default_dept.map(str::to_string)),
            upc: self.cell(cells, Field::Upc).and_then(clean_upc),
            cost,
            net_unit_cost: decimal(Field::NetUnitCost).or(cost),
            srp: decimal(Field::Srp),
            ad_srp: decimal(Field::AdSrp),
            vendor_funding_pct: self
                .cell(cells, Field::VendorFundingPct)
                .and_then(parse_percent_cell),
            mvmt: self.cell(cells, Field::Mvmt).and_then(parse_f64_cell),
            ad_scan: decimal(Field::AdScan),
            tpr_scan: decimal(Field::TprScan),
            edlc_scan: decimal(Field::EdlcScan),
            competitor_price: decimal(Field::CompetitorPrice),
            pack: self.text(cells, Field::Pack),
            size: self.text(cells, Field::Size),
            promo_start,
            promo_end,
            source,
        })
    }

    fn promo_dates(
        &self,
        cells: &[Cell],
    ) -> (Option<chrono::NaiveDate>, Option<chrono::NaiveDate>) {
        let start = self
            .cell(cells, Field::PromoStart)
            .and_then(|c| parse_date_cell(c, self.default_year));
        let end = self
            .cell(cells, Field::PromoEnd)
            .and_then(|c| parse_date_cell(c, self.default_year));
        if start.is_some() || end.is_some() {
            return (start, end);
        }

        match self.cell(cells, Field::PromoDates) {
            Some(Cell::Date(d)) => (Some(*d), None),
            Some(Cell::Text(s)) => parse_date_range(s, self.default_year),
            _ => (None, None),
        }
    }
}
