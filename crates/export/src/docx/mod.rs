//! Word-processor export module
//!
//! Builds Office Open XML (ECMA-376) wordprocessing packages from the
//! parsed block model.
//!
//! ## Structure
//!
//! The produced file is a ZIP archive containing XML parts:
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `word/document.xml` - Main document content
//! - `word/styles.xml` - Style definitions
//! - `word/numbering.xml` - List definitions (only with list content)
//! - `word/settings.xml` - Compatibility settings
//! - `word/_rels/document.xml.rels` - Document relationships
//! - `word/media/` - Embedded signature images
//! - `docProps/core.xml` - Title and timestamps

mod api;
mod content_types;
mod core_props;
mod document_writer;
mod error;
mod media_writer;
mod numbering_writer;
mod relationships;
mod styles_writer;
mod writer;

pub use api::{export_word_document, WordExportRequest};
pub use error::{DocxError, DocxResult};

/// XML namespaces used in wordprocessing packages
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Package relationships namespace
    pub const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    /// Wordprocessing drawing namespace
    pub const WP: &str =
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
    /// DrawingML main namespace
    pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    /// DrawingML picture namespace
    pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
}

/// Relationship type URIs
pub mod relationship_types {
    pub const DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SETTINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
}

/// Content types for the fixed part inventory
pub mod part_types {
    pub const DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const NUMBERING: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
    pub const SETTINGS: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const CORE_PROPERTIES: &str =
        "application/vnd.openxmlformats-package.core-properties+xml";
}
