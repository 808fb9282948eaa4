use std::path::Path;

use error_stack::{Report, ResultExt};

use crate::error::SourceError;

/// Split coin list contents into trimmed, non-empty asset identifiers.
///
/// Duplicates are preserved; each occurrence gets its own fetch.
pub fn parse_identifiers(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Read the configured coin list file.
///
/// An unreadable file aborts the whole invocation; there is no per-item
/// fallback at this stage.
pub fn read_identifiers(path: &Path) -> Result<Vec<String>, Report<SourceError>> {
    let contents = std::fs::read_to_string(path)
        .change_context(SourceError::ReadFile)
        .attach_with(|| format!("path: {}", path.display()))?;

    Ok(parse_identifiers(&contents))
}
