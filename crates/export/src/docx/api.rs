//! Word-processor export public API

use super::writer::DocxWriter;
use super::{DocxError, DocxResult};
use doc_model::style::DocumentStyle;
use doc_model::{Content, SignatureRecord};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// ZIP container signature every valid package starts with
const PACKAGE_SIGNATURE: &[u8] = b"PK";

/// Inputs for a word-processor export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordExportRequest {
    pub content: Content,
    pub style: DocumentStyle,
    #[serde(default)]
    pub signatures: Vec<SignatureRecord>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Export a document as word-processor file bytes
///
/// The content is normalized and parsed into blocks in document order,
/// rebuilt as word-processor paragraphs with resolver-derived numeric
/// styling, and validated before the buffer is returned: an empty buffer
/// or a missing container signature is a fatal error, never a silent
/// corrupt download.
pub fn export_word_document(request: &WordExportRequest) -> DocxResult<Vec<u8>> {
    let normalized = markup::normalize(&request.content)?;
    let blocks = markup::parse_blocks(&normalized)?;

    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(
        &blocks,
        &request.style,
        &request.signatures,
        request.title.as_deref(),
    )?;
    let bytes = cursor.into_inner();

    validate_package(&bytes)?;
    Ok(bytes)
}

/// Validate the produced buffer before it leaves the exporter
fn validate_package(bytes: &[u8]) -> DocxResult<()> {
    if bytes.is_empty() {
        return Err(DocxError::InvalidOutput("produced buffer is empty".into()));
    }
    if !bytes.starts_with(PACKAGE_SIGNATURE) {
        return Err(DocxError::InvalidOutput(
            "buffer does not start with the container signature".into(),
        ));
    }
    Ok(())
}
