//! PDF Text Extractor
//!
//! Pulls the plain-text content out of a PDF with pdf_oxide, page by page in
//! physical order. Page boundaries are not preserved in the output. Any
//! failure aborts the whole extraction; the caller never sees a partial
//! result.

use crate::error::ExtractionError;
use pdf_oxide::converters::ConversionOptions;
use std::path::Path;

/// Extract the concatenated text of every page of `path`.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    let mut doc = pdf_oxide::PdfDocument::open(path)
        .map_err(|e| ExtractionError::Open(e.to_string()))?;

    let page_count = doc
        .page_count()
        .map_err(|e| ExtractionError::PageCount(e.to_string()))?;

    let mut text = String::new();
    let options = ConversionOptions::default();

    for page_idx in 0..page_count {
        let page_text = doc.to_markdown(page_idx, &options).map_err(|e| {
            ExtractionError::Page {
                page: page_idx + 1,
                detail: e.to_string(),
            }
        })?;
        text.push_str(&page_text);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_an_error() {
        let result = extract_text(Path::new("/nonexistent/document.pdf"));
        assert!(matches!(result, Err(ExtractionError::Open(_))));
    }

    #[test]
    fn test_garbage_input_is_an_error_not_a_partial_result() {
        let mut file = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(b"this is not a pdf at all")
            .expect("Failed to write temp file");

        let result = extract_text(file.path());
        assert!(result.is_err(), "Unreadable input must not yield text");
    }
}
