//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Invalid signature image data: {0}")]
    InvalidImageData(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
