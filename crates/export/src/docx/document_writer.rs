//! Document.xml writer
//!
//! Converts the parsed block sequence into WordprocessingML. All numeric
//! styling comes from the typography resolver: point sizes become
//! half-points, millimeter margins become twips, and paragraph spacing
//! uses the same rem-derived value the screen renderer applies.

use super::namespaces;
use super::DocxResult;
use doc_model::style::{
    mm_to_twips, paragraph_spacing_twips, pt_to_half_points, px_to_emu, rem_to_twips,
    resolve_typography, DocumentStyle, HeadingCase, HeadingIndent, HeadingWeight,
    ResolvedTypography, HEADING_INDENT_REM, LIST_INDENT_REM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
    SIGNATURE_IMAGE_HEIGHT_PX, SIGNATURE_IMAGE_WIDTH_PX,
};
use doc_model::{Block, InlineSpan, SignatureRecord};

/// Spacing after each list item, matching the canonical fragment
const LIST_ITEM_SPACING_REM: f32 = 0.2;

/// Secondary text (email, date) renders this much smaller than the body
const SECONDARY_SIZE_DELTA_PT: f32 = 1.5;

/// Formatting applied to a single run
#[derive(Debug, Clone, Copy)]
struct RunStyle {
    size_half_points: i32,
    bold: bool,
    italic: bool,
    caps: bool,
}

/// Writer for document.xml
pub struct DocumentWriter {
    style: DocumentStyle,
    typo: ResolvedTypography,
    next_drawing_id: u32,
}

impl DocumentWriter {
    pub fn new(style: DocumentStyle) -> Self {
        Self {
            style,
            typo: resolve_typography(&style),
            next_drawing_id: 1,
        }
    }

    /// Generate document.xml content
    ///
    /// `media_rels` carries, per signature, the relationship ID of its
    /// embedded image or `None` when the image was absent or rejected.
    pub fn write(
        &mut self,
        blocks: &[Block],
        signatures: &[SignatureRecord],
        media_rels: &[Option<String>],
    ) -> DocxResult<String> {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}">"#,
            namespaces::W,
            namespaces::R,
            namespaces::WP,
            namespaces::A,
        ));
        xml.push_str("<w:body>");

        for block in blocks {
            self.write_block(&mut xml, block)?;
        }

        if !signatures.is_empty() {
            self.write_signatures(&mut xml, signatures, media_rels)?;
        }

        self.write_section_properties(&mut xml);
        xml.push_str("</w:body>");
        xml.push_str("</w:document>");
        Ok(xml)
    }

    fn write_block(&mut self, xml: &mut String, block: &Block) -> DocxResult<()> {
        match block {
            Block::Heading { level, spans } => self.write_heading(xml, *level, spans),
            Block::Paragraph { spans } => self.write_paragraph(xml, spans),
            Block::ListItem { ordered, spans, .. } => self.write_list_item(xml, *ordered, spans),
        }
        Ok(())
    }

    fn write_heading(&mut self, xml: &mut String, level: u8, spans: &[InlineSpan]) {
        let after = paragraph_spacing_twips(&self.style);
        let before = (after as f32 * 1.5).round() as i32;
        let size = pt_to_half_points(self.typo.heading_point_size(level));

        xml.push_str("<w:p>");
        xml.push_str("<w:pPr>");
        xml.push_str(&format!(r#"<w:pStyle w:val="Heading{level}"/>"#));
        xml.push_str("<w:keepNext/>");
        if self.style.heading_indent == HeadingIndent::Indented {
            xml.push_str(&format!(
                r#"<w:ind w:left="{}"/>"#,
                rem_to_twips(HEADING_INDENT_REM)
            ));
        }
        xml.push_str(&format!(
            r#"<w:spacing w:before="{before}" w:after="{after}" w:line="{}" w:lineRule="auto"/>"#,
            self.line_twips(),
        ));
        xml.push_str("</w:pPr>");

        let base = RunStyle {
            size_half_points: size,
            bold: self.style.heading_weight == HeadingWeight::Bold,
            italic: false,
            caps: self.style.heading_case == HeadingCase::Uppercase,
        };
        self.write_spans(xml, spans, base);
        xml.push_str("</w:p>");
    }

    fn write_paragraph(&mut self, xml: &mut String, spans: &[InlineSpan]) {
        xml.push_str("<w:p>");
        xml.push_str("<w:pPr>");
        xml.push_str(&format!(
            r#"<w:spacing w:after="{}" w:line="{}" w:lineRule="auto"/>"#,
            paragraph_spacing_twips(&self.style),
            self.line_twips(),
        ));
        xml.push_str("</w:pPr>");
        self.write_spans(xml, spans, self.body_run_style());
        xml.push_str("</w:p>");
    }

    fn write_list_item(&mut self, xml: &mut String, ordered: bool, spans: &[InlineSpan]) {
        let num_id = if ordered {
            super::numbering_writer::ORDERED_NUM_ID
        } else {
            super::numbering_writer::BULLET_NUM_ID
        };
        let indent = rem_to_twips(LIST_INDENT_REM);

        xml.push_str("<w:p>");
        xml.push_str("<w:pPr>");
        xml.push_str(r#"<w:pStyle w:val="ListParagraph"/>"#);
        xml.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{num_id}"/></w:numPr>"#
        ));
        xml.push_str(&format!(
            r#"<w:ind w:left="{indent}" w:hanging="{indent}"/>"#
        ));
        xml.push_str(&format!(
            r#"<w:spacing w:after="{}" w:line="{}" w:lineRule="auto"/>"#,
            rem_to_twips(LIST_ITEM_SPACING_REM),
            self.line_twips(),
        ));
        xml.push_str("</w:pPr>");
        self.write_spans(xml, spans, self.body_run_style());
        xml.push_str("</w:p>");
    }

    /// Signatures always start on a fresh page; the page break paragraph
    /// is only emitted when signatures exist at all
    fn write_signatures(
        &mut self,
        xml: &mut String,
        signatures: &[SignatureRecord],
        media_rels: &[Option<String>],
    ) -> DocxResult<()> {
        xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);

        self.write_heading(xml, 3, &[InlineSpan::plain("Signatures")]);

        let secondary = RunStyle {
            size_half_points: pt_to_half_points(self.typo.point_size - SECONDARY_SIZE_DELTA_PT),
            bold: false,
            italic: false,
            caps: false,
        };

        for (i, sig) in signatures.iter().enumerate() {
            if let Some(rel_id) = media_rels.get(i).and_then(|r| r.as_ref()) {
                self.write_image_paragraph(xml, rel_id, &sig.signer_name);
            }

            let name_style = RunStyle {
                bold: true,
                ..self.body_run_style()
            };
            self.write_text_paragraph(xml, &sig.signer_name, name_style, 0);
            self.write_text_paragraph(xml, &sig.signer_email, secondary, 0);
            self.write_text_paragraph(
                xml,
                &format!("Signed {}", sig.formatted_signed_at()),
                secondary,
                paragraph_spacing_twips(&self.style),
            );
        }
        Ok(())
    }

    fn write_image_paragraph(&mut self, xml: &mut String, rel_id: &str, signer: &str) {
        let cx = px_to_emu(SIGNATURE_IMAGE_WIDTH_PX);
        let cy = px_to_emu(SIGNATURE_IMAGE_HEIGHT_PX);
        let id = self.next_drawing_id;
        self.next_drawing_id += 1;
        let name = escape_xml(&format!("Signature of {signer}"));

        xml.push_str("<w:p><w:r><w:drawing>");
        xml.push_str(&format!(
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="{name}"/>"#
        ));
        xml.push_str(&format!(r#"<a:graphic><a:graphicData uri="{}">"#, namespaces::PIC));
        xml.push_str(&format!(r#"<pic:pic xmlns:pic="{}">"#, namespaces::PIC));
        xml.push_str(&format!(
            r#"<pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#
        ));
        xml.push_str(&format!(
            r#"<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#
        ));
        xml.push_str(&format!(
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#
        ));
        xml.push_str("</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>");
    }

    fn write_text_paragraph(&self, xml: &mut String, text: &str, style: RunStyle, after: i32) {
        xml.push_str("<w:p>");
        xml.push_str("<w:pPr>");
        xml.push_str(&format!(
            r#"<w:spacing w:after="{after}" w:line="{}" w:lineRule="auto"/>"#,
            self.line_twips(),
        ));
        xml.push_str("</w:pPr>");
        self.write_run(xml, text, style);
        xml.push_str("</w:p>");
    }

    fn write_spans(&self, xml: &mut String, spans: &[InlineSpan], base: RunStyle) {
        for span in spans {
            let style = RunStyle {
                bold: base.bold || span.bold,
                italic: base.italic || span.italic,
                ..base
            };
            self.write_run(xml, &span.text, style);
        }
    }

    fn write_run(&self, xml: &mut String, text: &str, style: RunStyle) {
        xml.push_str("<w:r>");
        xml.push_str("<w:rPr>");
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
            escape_xml(self.typo.font_word_name)
        ));
        if style.bold {
            xml.push_str("<w:b/>");
        }
        if style.italic {
            xml.push_str("<w:i/>");
        }
        if style.caps {
            xml.push_str("<w:caps/>");
        }
        xml.push_str(&format!(
            r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
            style.size_half_points
        ));
        xml.push_str("</w:rPr>");

        let needs_preserve = text.starts_with(' ') || text.ends_with(' ');
        if needs_preserve {
            xml.push_str(r#"<w:t xml:space="preserve">"#);
        } else {
            xml.push_str("<w:t>");
        }
        xml.push_str(&escape_xml(text));
        xml.push_str("</w:t>");
        xml.push_str("</w:r>");
    }

    fn write_section_properties(&self, xml: &mut String) {
        let factor = self.style.layout.width_factor();
        let width = mm_to_twips(PAGE_WIDTH_MM * factor);
        let height = mm_to_twips(PAGE_HEIGHT_MM * factor);
        let margin = mm_to_twips(self.style.layout.margin_mm());

        xml.push_str("<w:sectPr>");
        xml.push_str(&format!(r#"<w:pgSz w:w="{width}" w:h="{height}"/>"#));
        xml.push_str(&format!(
            r#"<w:pgMar w:top="{margin}" w:right="{margin}" w:bottom="{margin}" w:left="{margin}" w:header="0" w:footer="0" w:gutter="0"/>"#
        ));
        xml.push_str("</w:sectPr>");
    }

    fn body_run_style(&self) -> RunStyle {
        RunStyle {
            size_half_points: pt_to_half_points(self.typo.point_size),
            bold: false,
            italic: false,
            caps: false,
        }
    }

    /// Line spacing in 240ths of a line, the auto line-rule unit
    fn line_twips(&self) -> i32 {
        (self.typo.line_height * 240.0).round() as i32
    }
}

/// Escape special characters for XML content
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::style::{FontFamily, FontSize};
    use doc_model::InlineSpan;

    fn heading(level: u8, text: &str) -> Block {
        Block::Heading {
            level,
            spans: vec![InlineSpan::plain(text)],
        }
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            spans: vec![InlineSpan::plain(text)],
        }
    }

    #[test]
    fn heading_sizes_are_base_plus_offset_in_half_points() {
        let style = DocumentStyle {
            font_family: FontFamily::Classic,
            font_size: FontSize::Medium,
            heading_case: HeadingCase::Uppercase,
            ..Default::default()
        };
        let xml = DocumentWriter::new(style)
            .write(&[heading(1, "Title"), paragraph("Body text.")], &[], &[])
            .unwrap();
        // 11.5pt base + 4pt offset = 15.5pt = 31 half-points
        assert!(xml.contains(r#"<w:sz w:val="31"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="23"/>"#));
        assert!(xml.contains("<w:caps/>"));
        assert!(xml.contains(r#"w:ascii="Georgia""#));
    }

    #[test]
    fn no_signatures_means_no_page_break() {
        let xml = DocumentWriter::new(DocumentStyle::default())
            .write(&[paragraph("x")], &[], &[])
            .unwrap();
        assert!(!xml.contains(r#"w:type="page""#));
        assert!(!xml.contains("Signatures"));
    }

    #[test]
    fn text_is_xml_escaped() {
        let xml = DocumentWriter::new(DocumentStyle::default())
            .write(&[paragraph("a < b & c")], &[], &[])
            .unwrap();
        assert!(xml.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn section_properties_use_layout_geometry() {
        let xml = DocumentWriter::new(DocumentStyle::default())
            .write(&[paragraph("x")], &[], &[])
            .unwrap();
        // A4: 210mm x 297mm in twips
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
        // 24mm margins
        assert!(xml.contains(r#"w:top="1361""#));
    }
}
