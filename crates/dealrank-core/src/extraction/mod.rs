pub mod csv;
pub mod xlsx;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DealError;

/// A single spreadsheet cell as handed over by a grid reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Trimmed text form of the cell, `None` when blank.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Cell::Number(f) => Some(f.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// The first sheet of a document as a row-major grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetGrid {
    pub sheet_name: Option<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            sheet_name: None,
            rows,
        }
    }

    /// Upper-cased, space-joined text of a row, used for keyword scans.
    pub fn row_text_upper(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|cells| {
                cells
                    .iter()
                    .filter_map(Cell::as_text)
                    .map(|s| s.to_uppercase())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}

/// Trait for tabular document backends.
pub trait GridReader: Send + Sync {
    /// Read the first sheet of a document into a grid.
    fn read_grid(&self, bytes: &[u8]) -> Result<SheetGrid, DealError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Lower-cased extension of a file name, empty if there is none.
pub fn file_extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Pick a reader from the document's file name.
///
/// Slide decks, PDFs and anything else without exploitable cell structure are
/// rejected here and left to the caller's fallback extraction.
pub fn reader_for_file_name(file_name: &str) -> Result<Box<dyn GridReader>, DealError> {
    let extension = file_extension(file_name);
    match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Box::new(xlsx::XlsxReader)),
        "csv" | "txt" => Ok(Box::new(csv::CsvReader::default())),
        _ => Err(DealError::UnsupportedFile { extension }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_text() {
        assert_eq!(Cell::Text("  Milk ".into()).as_text().as_deref(), Some("Milk"));
        assert_eq!(Cell::Text("   ".into()).as_text(), None);
        assert_eq!(Cell::Number(12345.0).as_text().as_deref(), Some("12345"));
        assert_eq!(Cell::Number(4.99).as_text().as_deref(), Some("4.99"));
        assert!(Cell::Empty.is_blank());
    }

    #[test]
    fn test_row_text_upper() {
        let grid = SheetGrid::from_rows(vec![vec![
            Cell::from("Order #"),
            Cell::Empty,
            Cell::from("Item Desc"),
        ]]);
        assert_eq!(grid.row_text_upper(0), "ORDER # ITEM DESC");
        assert_eq!(grid.row_text_upper(5), "");
    }

    #[test]
    fn test_reader_selection() {
        assert_eq!(
            reader_for_file_name("Week 12 Ad Planner.XLSX").unwrap().backend_name(),
            "calamine"
        );
        assert_eq!(reader_for_file_name("deals.csv").unwrap().backend_name(), "csv");
        assert!(matches!(
            reader_for_file_name("promo deck.pptx"),
            Err(DealError::UnsupportedFile { .. })
        ));
    }
}
