use super::{Cell, GridReader, SheetGrid};
use crate::error::DealError;

/// Delimited-text backend. Every field becomes a text cell; numeric
/// coercion happens later during canonicalization.
pub struct CsvReader {
    pub delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl GridReader for CsvReader {
    fn read_grid(&self, bytes: &[u8]) -> Result<SheetGrid, DealError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                DealError::Extraction(format!("CSV parse error at line {}: {}", line_num + 1, e))
            })?;
            rows.push(record.iter().map(Cell::from).collect());
        }

        Ok(SheetGrid {
            sheet_name: None,
            rows,
        })
    }

    fn backend_name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Weekly Ad Planner,,
,,
ORDER #,ITEM DESC,AD SRP
10234,\"Cola 12pk, cans\",$5.99
";

    #[test]
    fn test_read_ragged_rows() {
        let grid = CsvReader::default().read_grid(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(grid.rows.len(), 4);
        assert_eq!(grid.rows[0][0], Cell::Text("Weekly Ad Planner".into()));
        assert!(grid.rows[1].iter().all(Cell::is_blank));
        assert_eq!(grid.rows[3][1], Cell::Text("Cola 12pk, cans".into()));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let reader = CsvReader { delimiter: b';' };
        let grid = reader.read_grid(b"SKU;DESCRIPTION\n1;Apples\n").unwrap();
        assert_eq!(grid.rows[1][1], Cell::Text("Apples".into()));
    }
}
