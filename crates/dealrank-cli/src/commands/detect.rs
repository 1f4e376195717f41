use dealrank_core::error::DealError;
use dealrank_core::extraction::reader_for_file_name;
use dealrank_core::parsing::detect::{detect_layout, rank_layouts};
use dealrank_core::parsing::header::DEFAULT_HEADER_SCAN_ROWS;
use std::path::PathBuf;

use super::{display_name, read_file};

pub fn run(input_file: PathBuf) -> Result<(), DealError> {
    let name = display_name(&input_file);
    let reader = reader_for_file_name(&name)?;
    let grid = reader.read_grid(&read_file(&input_file)?)?;

    let detection = detect_layout(&grid, &name, DEFAULT_HEADER_SCAN_ROWS);
    println!("File:       {name}");
    println!("Backend:    {}", reader.backend_name());
    println!("Layout:     {}", detection.layout);
    match detection.header_row {
        Some(row) => println!("Header row: {} (1-based: {})", row, row + 1),
        None => println!("Header row: not found by layout signatures"),
    }

    let ranked = rank_layouts(&grid, &name, DEFAULT_HEADER_SCAN_ROWS);
    if !ranked.is_empty() {
        println!("\nCandidates:");
        for m in &ranked {
            println!(
                "  {:<20} row {:<3} {} required={} keywords={}{}",
                m.kind.tag(),
                m.row,
                if m.full { "full   " } else { "partial" },
                m.required_hits,
                m.keyword_hits,
                if m.file_hint { " file-hint" } else { "" }
            );
        }
    }

    Ok(())
}
