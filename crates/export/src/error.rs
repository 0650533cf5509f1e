//! Top-level export error type

use crate::docx::DocxError;
use crate::orchestrator::ExportFormat;
use crate::pdf::PdfError;
use thiserror::Error;

/// Errors surfaced by the export orchestrator
#[derive(Debug, Error)]
pub enum ExportError {
    /// Content could not be normalized or parsed (configuration error,
    /// never retried)
    #[error("Content error: {0}")]
    Content(#[from] markup::MarkupError),

    /// Word-processor export failed
    #[error("Word export failed: {0}")]
    Docx(#[from] DocxError),

    /// PDF export failed
    #[error("PDF export failed: {0}")]
    Pdf(#[from] PdfError),

    /// No exporter path is available for the requested format
    #[error("Export unavailable for format {format}")]
    Unavailable { format: ExportFormat },
}

impl ExportError {
    /// Whether a fallback exporter is worth attempting after this error
    ///
    /// Transient rendering errors (navigation, hydration, font loading)
    /// are retryable; configuration and output-validation errors are
    /// not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExportError::Content(_) => false,
            ExportError::Unavailable { .. } => false,
            ExportError::Docx(DocxError::Content(_)) => false,
            ExportError::Docx(DocxError::InvalidOutput(_)) => false,
            ExportError::Docx(_) => true,
            ExportError::Pdf(PdfError::InvalidOutput(_)) => false,
            ExportError::Pdf(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
