//! Numbering.xml writer
//!
//! Defines the two list numbering schemes the document model uses: a
//! bullet list and a decimal ordered list, each single-level with a
//! hanging indent.

use super::namespaces;
use super::DocxResult;
use doc_model::style::{rem_to_twips, LIST_INDENT_REM};

/// numId referenced by bullet list paragraphs
pub const BULLET_NUM_ID: u32 = 1;

/// numId referenced by ordered list paragraphs
pub const ORDERED_NUM_ID: u32 = 2;

const BULLET_ABSTRACT_ID: u32 = 0;
const ORDERED_ABSTRACT_ID: u32 = 1;

/// Writer for numbering.xml
pub struct NumberingWriter;

impl NumberingWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate numbering.xml content
    pub fn write(&self) -> DocxResult<String> {
        let indent = rem_to_twips(LIST_INDENT_REM);
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:numbering xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        self.write_abstract_num(&mut xml, BULLET_ABSTRACT_ID, "bullet", "\u{2022}", indent);
        self.write_abstract_num(&mut xml, ORDERED_ABSTRACT_ID, "decimal", "%1.", indent);

        xml.push_str(&format!(
            r#"<w:num w:numId="{BULLET_NUM_ID}"><w:abstractNumId w:val="{BULLET_ABSTRACT_ID}"/></w:num>"#
        ));
        xml.push_str(&format!(
            r#"<w:num w:numId="{ORDERED_NUM_ID}"><w:abstractNumId w:val="{ORDERED_ABSTRACT_ID}"/></w:num>"#
        ));

        xml.push_str("</w:numbering>");
        Ok(xml)
    }

    fn write_abstract_num(
        &self,
        xml: &mut String,
        id: u32,
        format: &str,
        text: &str,
        indent: i32,
    ) {
        xml.push_str(&format!(r#"<w:abstractNum w:abstractNumId="{id}">"#));
        xml.push_str(r#"<w:multiLevelType w:val="singleLevel"/>"#);
        xml.push_str(r#"<w:lvl w:ilvl="0">"#);
        xml.push_str(r#"<w:start w:val="1"/>"#);
        xml.push_str(&format!(r#"<w:numFmt w:val="{format}"/>"#));
        xml.push_str(&format!(r#"<w:lvlText w:val="{text}"/>"#));
        xml.push_str(r#"<w:lvlJc w:val="left"/>"#);
        xml.push_str(&format!(
            r#"<w:pPr><w:ind w:left="{indent}" w:hanging="{indent}"/></w:pPr>"#
        ));
        xml.push_str("</w:lvl>");
        xml.push_str("</w:abstractNum>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_schemes_are_defined_and_wired() {
        let xml = NumberingWriter::new().write().unwrap();
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains(r#"<w:numFmt w:val="decimal"/>"#));
        assert!(xml.contains(r#"<w:num w:numId="1">"#));
        assert!(xml.contains(r#"<w:num w:numId="2">"#));
    }
}
