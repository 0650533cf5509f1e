//! PDF export module
//!
//! Rasterizes the standalone print view of a document into a paged PDF
//! by driving a shared headless browser.
//!
//! # Architecture
//!
//! - `browser`: lifecycle-managed shared browser handle
//! - `route`: print route addressing and credential material
//! - `gates`: ordered readiness gates with per-gate timeouts
//! - `options`: page format, margins, and timeout configuration
//! - `exporter`: the export flow tying the pieces together

mod browser;
mod error;
mod exporter;
mod gates;
mod options;
mod route;

pub use browser::{BrowserLaunchConfig, BrowserSession, SharedBrowser};
pub use error::{PdfError, PdfResult};
pub use exporter::PdfExporter;
pub use gates::gate;
pub use options::{PageFormat, PdfExportOptions, PdfMargins};
pub use route::{Credential, PrintRoute, SessionCookie};
