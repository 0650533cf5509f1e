//! Error types for preview simulation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Content measurement failed: {0}")]
    Measurement(String),

    #[error("Viewport width must be positive, got {0}")]
    InvalidViewport(f32),
}

pub type Result<T> = std::result::Result<T, PreviewError>;
