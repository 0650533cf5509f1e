//! [Content_Types].xml generation
//!
//! Declares the content type of every part in the package. The part
//! inventory here is fixed at export time; there is no parsing path.

use std::collections::BTreeMap;

/// Content types for all parts in the package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by extension (e.g., "xml" -> "application/xml")
    defaults: BTreeMap<String, String>,
    /// Override content types by part name
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    /// Create content types pre-populated with the standard defaults
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default(
            "rels",
            "application/vnd.openxmlformats-package.relationships+xml",
        );
        ct.add_default("xml", "application/xml");
        ct
    }

    /// Register a default content type for a file extension
    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_string(), content_type.to_string());
    }

    /// Register an override for a specific part
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let normalized = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{part_name}")
        };
        self.overrides.insert(normalized, content_type.to_string());
    }

    /// Generate XML content for [Content_Types].xml
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );

        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{ext}" ContentType="{ct}"/>"#
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{part}" ContentType="{ct}"/>"#
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_defaults_are_present() {
        let xml = ContentTypes::new().to_xml();
        assert!(xml.contains(r#"Extension="rels""#));
        assert!(xml.contains(r#"Extension="xml""#));
    }

    #[test]
    fn overrides_are_normalized_to_absolute_part_names() {
        let mut ct = ContentTypes::new();
        ct.add_override("word/document.xml", "application/test");
        assert!(ct.to_xml().contains(r#"PartName="/word/document.xml""#));
    }
}
