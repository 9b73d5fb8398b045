//! Error types surfaced to the user.
//!
//! Both kinds are caught at the point of invocation and shown inline;
//! neither terminates the session.

use thiserror::Error;

/// Errors from PDF text extraction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    #[error("could not open PDF: {0}")]
    Open(String),
    #[error("could not read PDF page count: {0}")]
    PageCount(String),
    #[error("could not extract text from page {page}: {detail}")]
    Page { page: usize, detail: String },
}

/// Errors from the content generation pipeline: a failed service call or a
/// model response that does not decode to the requested shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generation service returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("generation service returned an empty response")]
    EmptyResponse,
    #[error("could not parse {kind} response as JSON: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} response has the wrong shape: {detail}")]
    Shape { kind: &'static str, detail: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
