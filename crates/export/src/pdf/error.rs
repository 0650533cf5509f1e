//! Error types for the PDF pipeline

use thiserror::Error;

/// Errors that can occur while driving the print route to a PDF
#[derive(Debug, Error)]
pub enum PdfError {
    /// Browser could not be configured or launched
    #[error("Browser launch failed: {0}")]
    Browser(String),

    /// Underlying automation protocol error
    #[error("Automation protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// Navigation to the print route failed outright
    #[error("Navigation to {url} failed: {detail}")]
    Navigation { url: String, detail: String },

    /// The print route answered with an error status
    #[error("Print route {url} answered with HTTP status {status}")]
    HttpStatus { url: String, status: i64 },

    /// A script evaluation on the page failed
    #[error("Script evaluation failed: {0}")]
    Script(String),

    /// A readiness gate did not pass within its timeout
    #[error("Readiness gate '{gate}' timed out at {url}: {detail}")]
    GateTimeout {
        gate: &'static str,
        url: String,
        detail: String,
    },

    /// The produced buffer failed output validation
    #[error("Invalid PDF output: {0}")]
    InvalidOutput(String),
}

pub type PdfResult<T> = std::result::Result<T, PdfError>;
