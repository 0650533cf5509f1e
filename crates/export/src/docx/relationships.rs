//! Relationships (.rels) generation
//!
//! The package connects its parts through relationship files; every
//! relationship produced here targets another part inside the archive.

/// A single relationship in a .rels file
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Unique ID within the rels file (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path relative to the source part
    pub target: String,
}

/// Collection of relationships for one .rels file
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    relationships: Vec<Relationship>,
    next_id: u32,
}

impl Relationships {
    pub fn new() -> Self {
        Self {
            relationships: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a relationship and return its ID
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;
        self.relationships.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
        });
        id
    }

    /// Get a relationship by ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Find the first relationship of a given type
    pub fn get_by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.rel_type == rel_type)
    }

    /// Generate the .rels XML content
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<Relationships xmlns="{}">"#,
            super::namespaces::PKG_REL
        ));
        for rel in &self.relationships {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.id, rel.rel_type, rel.target
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// Root relationships for a fresh package
pub fn create_root_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(
        super::relationship_types::DOCUMENT,
        "word/document.xml",
    );
    rels.add(
        super::relationship_types::CORE_PROPERTIES,
        "docProps/core.xml",
    );
    rels
}

/// Document-level relationships for a fresh package
pub fn create_document_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(super::relationship_types::STYLES, "styles.xml");
    rels.add(super::relationship_types::SETTINGS, "settings.xml");
    rels
}
