//! Error types for the docsift library.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout analysis and ranking.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document has no extractable text spans.
    ///
    /// Recovered by the pipeline: the document yields an empty outline and
    /// an empty title instead of failing the batch.
    #[error("Document has no extractable text")]
    EmptyDocument,

    /// A span is missing required fields or carries invalid values.
    ///
    /// The pipeline skips the offending span, logs it, and continues.
    #[error("Malformed span: {0}")]
    MalformedSpan(String),

    /// A document exceeded its per-document processing budget.
    ///
    /// Recovered by the pipeline: the document yields whatever was
    /// classified before the deadline.
    #[error("Processing budget exceeded for document '{0}'")]
    Timeout(String),

    /// Input data could not be interpreted (bad JSON shape, bad arguments).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error serializing results to an output format.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}
