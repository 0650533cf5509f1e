//! Styles.xml writer
//!
//! Generates the style definitions backing the document: defaults plus
//! Normal, Heading1-3, and ListParagraph, all derived from the
//! typography resolver.

use super::document_writer::escape_xml;
use super::namespaces;
use super::DocxResult;
use doc_model::style::{
    paragraph_spacing_twips, pt_to_half_points, rem_to_twips, resolve_typography, DocumentStyle,
    HeadingCase, HeadingIndent, HeadingWeight, ResolvedTypography, HEADING_INDENT_REM,
    LIST_INDENT_REM,
};

/// Writer for styles.xml
pub struct StylesWriter {
    style: DocumentStyle,
    typo: ResolvedTypography,
}

impl StylesWriter {
    pub fn new(style: DocumentStyle) -> Self {
        Self {
            style,
            typo: resolve_typography(&style),
        }
    }

    /// Generate styles.xml content
    pub fn write(&self) -> DocxResult<String> {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        self.write_doc_defaults(&mut xml);
        self.write_normal(&mut xml);
        for level in 1..=3u8 {
            self.write_heading_style(&mut xml, level);
        }
        self.write_list_paragraph(&mut xml);

        xml.push_str("</w:styles>");
        Ok(xml)
    }

    fn write_doc_defaults(&self, xml: &mut String) {
        let size = pt_to_half_points(self.typo.point_size);
        let after = paragraph_spacing_twips(&self.style);
        let line = (self.typo.line_height * 240.0).round() as i32;

        xml.push_str("<w:docDefaults>");
        xml.push_str("<w:rPrDefault><w:rPr>");
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
            escape_xml(self.typo.font_word_name)
        ));
        xml.push_str(&format!(
            r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#
        ));
        xml.push_str("</w:rPr></w:rPrDefault>");
        xml.push_str("<w:pPrDefault><w:pPr>");
        xml.push_str(&format!(
            r#"<w:spacing w:after="{after}" w:line="{line}" w:lineRule="auto"/>"#
        ));
        xml.push_str("</w:pPr></w:pPrDefault>");
        xml.push_str("</w:docDefaults>");
    }

    fn write_normal(&self, xml: &mut String) {
        xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Normal" w:default="1">"#);
        xml.push_str(r#"<w:name w:val="Normal"/>"#);
        xml.push_str("</w:style>");
    }

    fn write_heading_style(&self, xml: &mut String, level: u8) {
        let size = pt_to_half_points(self.typo.heading_point_size(level));
        let after = paragraph_spacing_twips(&self.style);
        let before = (after as f32 * 1.5).round() as i32;

        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}">"#
        ));
        xml.push_str(&format!(r#"<w:name w:val="heading {level}"/>"#));
        xml.push_str(r#"<w:basedOn w:val="Normal"/>"#);
        xml.push_str(r#"<w:next w:val="Normal"/>"#);

        xml.push_str("<w:pPr>");
        xml.push_str("<w:keepNext/>");
        xml.push_str(&format!(
            r#"<w:spacing w:before="{before}" w:after="{after}"/>"#
        ));
        if self.style.heading_indent == HeadingIndent::Indented {
            xml.push_str(&format!(
                r#"<w:ind w:left="{}"/>"#,
                rem_to_twips(HEADING_INDENT_REM)
            ));
        }
        xml.push_str(&format!(
            r#"<w:outlineLvl w:val="{}"/>"#,
            level.saturating_sub(1)
        ));
        xml.push_str("</w:pPr>");

        xml.push_str("<w:rPr>");
        if self.style.heading_weight == HeadingWeight::Bold {
            xml.push_str("<w:b/>");
        }
        if self.style.heading_case == HeadingCase::Uppercase {
            xml.push_str("<w:caps/>");
        }
        xml.push_str(&format!(
            r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#
        ));
        xml.push_str("</w:rPr>");
        xml.push_str("</w:style>");
    }

    fn write_list_paragraph(&self, xml: &mut String) {
        let indent = rem_to_twips(LIST_INDENT_REM);
        xml.push_str(r#"<w:style w:type="paragraph" w:styleId="ListParagraph">"#);
        xml.push_str(r#"<w:name w:val="List Paragraph"/>"#);
        xml.push_str(r#"<w:basedOn w:val="Normal"/>"#);
        xml.push_str("<w:pPr>");
        xml.push_str(&format!(
            r#"<w:ind w:left="{indent}" w:hanging="{indent}"/>"#
        ));
        xml.push_str("<w:contextualSpacing/>");
        xml.push_str("</w:pPr>");
        xml.push_str("</w:style>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::style::FontSize;

    #[test]
    fn defaults_carry_resolver_numbers() {
        let style = DocumentStyle {
            font_size: FontSize::Large,
            ..Default::default()
        };
        let xml = StylesWriter::new(style).write().unwrap();
        // 13pt body = 26 half-points
        assert!(xml.contains(r#"<w:sz w:val="26"/>"#));
        assert!(xml.contains(r#"w:ascii="Helvetica""#));
    }

    #[test]
    fn three_heading_styles_are_defined() {
        let xml = StylesWriter::new(DocumentStyle::default()).write().unwrap();
        for level in 1..=3 {
            assert!(xml.contains(&format!(r#"w:styleId="Heading{level}""#)));
        }
        assert!(xml.contains(r#"w:styleId="ListParagraph""#));
    }

    #[test]
    fn normal_weight_headings_carry_no_bold() {
        let style = DocumentStyle {
            heading_weight: doc_model::style::HeadingWeight::Normal,
            ..Default::default()
        };
        let xml = StylesWriter::new(style).write().unwrap();
        assert!(!xml.contains("<w:b/>"));
    }
}
