pub mod detect;
pub mod parse;
pub mod score;
pub mod weights;

use dealrank_core::error::DealError;
use std::path::Path;

/// File name used for layout hints and provenance.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, DealError> {
    Ok(std::fs::read(path)?)
}
