use crate::extraction::SheetGrid;

/// Number of leading rows searched for a header when no limit is configured.
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 10;

/// Find the header row of a vendor grid.
///
/// Scans top-down through at most `max_rows` rows and returns the index of
/// the first row whose upper-cased cell text contains any of `item_keys`.
/// Title rows, logos pasted as cells and merged banners above the real
/// header are passed over. `None` means the document has no usable header
/// and must be treated as a parse failure, not as an empty document.
pub fn locate_header_row(grid: &SheetGrid, item_keys: &[&str], max_rows: usize) -> Option<usize> {
    (0..grid.rows.len().min(max_rows)).find(|&row| row_has_any(grid, row, item_keys))
}

/// True if the upper-cased text of `row` contains any of `keys`.
pub fn row_has_any(grid: &SheetGrid, row: usize, keys: &[&str]) -> bool {
    let text = grid.row_text_upper(row);
    !text.is_empty() && keys.iter().any(|k| text.contains(k))
}
