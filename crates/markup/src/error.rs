//! Error types for markup processing

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    /// No visible content was supplied; exports require a non-empty body
    #[error("Content is empty")]
    EmptyContent,

    #[error("Markup parse error: {0}")]
    Parse(String),
}

impl From<quick_xml::Error> for MarkupError {
    fn from(err: quick_xml::Error) -> Self {
        MarkupError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MarkupError>;
