//! Error types for word-processor export

use thiserror::Error;

/// Errors that can occur while building a word-processor file
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error while writing the archive
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Content could not be normalized or parsed
    #[error("Content error: {0}")]
    Content(#[from] markup::MarkupError),

    /// The produced buffer failed output validation; the file is never
    /// returned to the caller in this state
    #[error("Invalid output package: {0}")]
    InvalidOutput(String),
}

pub type DocxResult<T> = std::result::Result<T, DocxError>;
