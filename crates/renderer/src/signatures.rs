//! Signatures section rendering
//!
//! The signatures section is always the last content in a document and
//! always starts on a new page. Rendering an empty signature list
//! produces nothing, page break included.

use crate::escape::{escape_attr, escape_html};
use doc_model::style::{ResolvedTypography, SIGNATURE_IMAGE_HEIGHT_PX};
use doc_model::SignatureRecord;

/// Render the signatures section, or an empty string without signatures
pub fn signatures_section(signatures: &[SignatureRecord], typo: &ResolvedTypography) -> String {
    if signatures.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    html.push_str(
        r#"<div class="signatures" style="page-break-before: always; break-before: page;">"#,
    );
    html.push_str(&format!(
        r#"<h3 style="font-size: {}pt; margin: 0 0 {}rem 0;">Signatures</h3>"#,
        typo.heading_point_size(3),
        typo.paragraph_spacing_rem,
    ));

    for sig in signatures {
        html.push_str(&format!(
            r#"<div class="signature-card" style="margin: 0 0 {}rem 0;">"#,
            typo.paragraph_spacing_rem * 1.5,
        ));
        if let Some(image) = &sig.signature_image {
            html.push_str(&format!(
                r#"<img src="{}" alt="Signature of {}" style="max-height: {SIGNATURE_IMAGE_HEIGHT_PX}px;"/>"#,
                escape_attr(image),
                escape_attr(&sig.signer_name),
            ));
        }
        html.push_str(&format!(
            r#"<div style="font-weight: bold;">{}</div>"#,
            escape_html(&sig.signer_name),
        ));
        html.push_str(&format!(
            r#"<div style="font-size: {}pt;">{}</div>"#,
            typo.point_size - 1.5,
            escape_html(&sig.signer_email),
        ));
        html.push_str(&format!(
            r#"<div style="font-size: {}pt;">Signed {}</div>"#,
            typo.point_size - 1.5,
            escape_html(&sig.formatted_signed_at()),
        ));
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use doc_model::style::{resolve_typography, DocumentStyle};

    fn record(image: Option<&str>) -> SignatureRecord {
        SignatureRecord {
            signer_name: "Ada Lovelace".into(),
            signer_email: "ada@example.com".into(),
            signature_image: image.map(Into::into),
            signed_at: Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_list_renders_nothing() {
        let typo = resolve_typography(&DocumentStyle::default());
        assert_eq!(signatures_section(&[], &typo), "");
    }

    #[test]
    fn section_starts_with_a_forced_page_break() {
        let typo = resolve_typography(&DocumentStyle::default());
        let html = signatures_section(&[record(None)], &typo);
        assert!(html.contains("page-break-before: always"));
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("ada@example.com"));
        assert!(html.contains("Signed March 04, 2026"));
    }

    #[test]
    fn image_renders_when_present() {
        let typo = resolve_typography(&DocumentStyle::default());
        let with = signatures_section(&[record(Some("data:image/png;base64,AAAA"))], &typo);
        let without = signatures_section(&[record(None)], &typo);
        assert!(with.contains("<img src=\"data:image/png;base64,AAAA\""));
        assert!(!without.contains("<img"));
    }
}
