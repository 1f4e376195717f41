use std::io::Cursor;

use calamine::{Data, Reader};
use chrono::NaiveDate;

use super::{Cell, GridReader, SheetGrid};
use crate::error::DealError;

/// Spreadsheet backend for xlsx/xlsm/xls/xlsb/ods workbooks.
///
/// Only the first worksheet is read. Leading empty rows and columns that
/// calamine trims from the used range are restored so row indices match what
/// a buyer sees in the spreadsheet.
pub struct XlsxReader;

impl GridReader for XlsxReader {
    fn read_grid(&self, bytes: &[u8]) -> Result<SheetGrid, DealError> {
        let cursor = Cursor::new(bytes);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| DealError::Extraction(format!("failed to open workbook: {e}")))?;

        let sheet_name = workbook.sheet_names().first().cloned();
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DealError::Extraction("workbook has no worksheets".into()))?
            .map_err(|e| DealError::Extraction(format!("failed to read first sheet: {e}")))?;

        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<Cell>> = (0..start_row).map(|_| Vec::new()).collect();
        for row in range.rows() {
            let mut cells: Vec<Cell> = (0..start_col).map(|_| Cell::Empty).collect();
            cells.extend(row.iter().map(convert_cell));
            rows.push(cells);
        }

        tracing::debug!(
            sheet = sheet_name.as_deref().unwrap_or("?"),
            rows = rows.len(),
            "read workbook grid"
        );

        Ok(SheetGrid { sheet_name, rows })
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| Cell::Date(d.date()))
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => iso_date(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

fn iso_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
