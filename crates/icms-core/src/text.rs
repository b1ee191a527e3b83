//! Helpers for extracted invoice text and the files that cache it.

use std::path::Path;

/// Join words split by a hyphen at a line break.
pub fn dehyphenate(text: &str) -> String {
    text.replace("-\n", "")
}

/// Document identifier of a file: its name up to the first dot.
pub fn document_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    match name.find('.') {
        Some(0) | None => name.into_owned(),
        Some(dot) => name[..dot].to_string(),
    }
}

/// Name of the text file that caches the extracted text of `source`.
pub fn text_file_name(source: &Path, extension: &str) -> String {
    format!("{}.{}", document_id(source), extension)
}
