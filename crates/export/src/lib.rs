//! Export - PDF and word-processor export pipelines
//!
//! This crate turns one abstract document (content + style configuration
//! + signatures) into downloadable bytes: a paged PDF rasterized from
//! the print route by a shared headless browser, a word-processor
//! package rebuilt from the parsed block model, or the standalone
//! self-contained markup document. The orchestrator selects the exporter
//! per format, probes availability first, and falls back to a registered
//! legacy implementation on transient failure.

pub mod docx;
mod error;
mod orchestrator;
pub mod pdf;

pub use error::{ExportError, Result};
pub use orchestrator::{
    DocumentExporter, ExportFormat, ExportOutput, ExportRequest, ExportService,
    PdfRouteExporter, StandaloneMarkupExporter, WordDocumentExporter,
};

// Re-export the per-format entry points
pub use docx::{export_word_document, WordExportRequest};
pub use pdf::{
    BrowserLaunchConfig, Credential, PageFormat, PdfExportOptions, PdfExporter, PdfMargins,
    PrintRoute, SessionCookie,
};
