//! Package writer infrastructure
//!
//! Assembles the ZIP archive with the correct part structure.

use super::content_types::ContentTypes;
use super::core_props::core_props_xml;
use super::document_writer::DocumentWriter;
use super::media_writer::MediaWriter;
use super::numbering_writer::NumberingWriter;
use super::relationships::{create_document_rels, create_root_rels, Relationships};
use super::styles_writer::StylesWriter;
use super::{part_types, relationship_types};
use super::DocxResult;
use chrono::Utc;
use doc_model::style::DocumentStyle;
use doc_model::{Block, SignatureRecord};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Main package writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new package writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: ContentTypes::new(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write a complete file from the parsed blocks
    ///
    /// Returns the underlying writer once the archive is finished.
    pub fn write(
        mut self,
        blocks: &[Block],
        style: &DocumentStyle,
        signatures: &[SignatureRecord],
        title: Option<&str>,
    ) -> DocxResult<W> {
        // Media first so document.xml can reference the relationship IDs
        let media_rels = MediaWriter::new().write_media(signatures, &mut self)?;

        let doc_xml = DocumentWriter::new(*style).write(blocks, signatures, &media_rels)?;
        self.write_file("word/document.xml", &doc_xml)?;
        self.content_types
            .add_override("word/document.xml", part_types::DOCUMENT);

        let styles_xml = StylesWriter::new(*style).write()?;
        self.write_file("word/styles.xml", &styles_xml)?;
        self.content_types
            .add_override("word/styles.xml", part_types::STYLES);

        // Numbering only exists when the document carries list items
        if blocks.iter().any(Block::is_list_item) {
            let numbering_xml = NumberingWriter::new().write()?;
            self.write_file("word/numbering.xml", &numbering_xml)?;
            self.content_types
                .add_override("word/numbering.xml", part_types::NUMBERING);
            self.doc_rels
                .add(relationship_types::NUMBERING, "numbering.xml");
        }

        self.write_file("word/settings.xml", &generate_settings_xml())?;
        self.content_types
            .add_override("word/settings.xml", part_types::SETTINGS);

        self.write_file("docProps/core.xml", &core_props_xml(title, Utc::now()))?;
        self.content_types
            .add_override("docProps/core.xml", part_types::CORE_PROPERTIES);

        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;
        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        Ok(self.zip.finish()?)
    }

    /// Write a text part to the archive
    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write binary data to the archive without compressing it
    pub fn write_binary(&mut self, path: &str, data: &[u8]) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        self.zip.start_file(path, options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    /// Get mutable access to content types
    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Get mutable access to document relationships
    pub fn doc_rels_mut(&mut self) -> &mut Relationships {
        &mut self.doc_rels
    }
}

/// Generate a minimal settings.xml
pub fn generate_settings_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:compat>
        <w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>
    </w:compat>
</w:settings>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writer_starts_with_standard_relationships() {
        let writer = DocxWriter::new(Cursor::new(Vec::new()));
        assert!(writer
            .root_rels
            .get_by_type(relationship_types::DOCUMENT)
            .is_some());
        assert!(writer
            .doc_rels
            .get_by_type(relationship_types::STYLES)
            .is_some());
    }

    #[test]
    fn settings_declare_compatibility_mode() {
        let settings = generate_settings_xml();
        assert!(settings.contains("w:settings"));
        assert!(settings.contains("compatibilityMode"));
    }
}
