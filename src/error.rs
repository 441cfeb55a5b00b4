//! Error types for webarchive-extract.
//!
//! HTML extraction itself never fails: malformed markup degrades to
//! best-effort output. Errors only arise when writing WET conversion
//! records, where missing capture metadata means the input archive is
//! structurally invalid.

/// Error type for output operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required metadata field is absent from the record envelope.
    #[error("No {0} found")]
    MissingMetadata(String),

    /// The capture date is not of the form `YYYY-MM-DDThh:mm:ssZ`.
    #[error("Invalid WARC date: {0}")]
    InvalidDate(String),

    /// The record envelope has a format no writer is known for.
    #[error("Unknown Envelope.Format: {0}")]
    UnknownFormat(String),

    /// Writing the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata could not be encoded as or decoded from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for output operations.
pub type Result<T> = std::result::Result<T, Error>;
