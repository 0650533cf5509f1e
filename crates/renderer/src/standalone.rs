//! Standalone document generation
//!
//! Serializes content and style into a fully self-contained markup
//! document: the canonical fragment embedded verbatim, a small style
//! sheet for the page box, and a marker script that flips
//! `data-fonts-ready` on the root container once font loading completes.
//! This document is the only interface between content/style and the PDF
//! pipeline; it carries no dependency on any live application runtime.

use crate::escape::escape_html;
use crate::fragment::FragmentRenderer;
use doc_model::style::{mm_to_px, DocumentStyle, PAGE_WIDTH_MM};
use doc_model::{Block, SignatureRecord};

/// Attribute set on the root container once fonts have loaded; the PDF
/// pipeline polls for it before rasterizing
pub const FONTS_READY_ATTR: &str = "data-fonts-ready";

/// Id of the root container in the standalone document
pub const DOC_ROOT_ID: &str = "doc-root";

/// CSS class of the content container inside the root
pub const DOC_CONTENT_CLASS: &str = "doc-content";

/// Render a self-contained markup document for the given content
pub fn render_standalone(
    blocks: &[Block],
    style: &DocumentStyle,
    signatures: &[SignatureRecord],
    title: Option<&str>,
) -> String {
    let fragment = FragmentRenderer::new(*style).render(blocks, signatures);
    let page_width_px = mm_to_px(PAGE_WIDTH_MM * style.layout.width_factor());
    let margin_px = mm_to_px(style.layout.margin_mm());

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n");
    html.push_str(&format!(
        "<title>{}</title>\n",
        escape_html(title.unwrap_or("Document"))
    ));
    html.push_str("<style>\n");
    html.push_str("html, body { margin: 0; padding: 0; background: #ffffff; }\n");
    html.push_str(&format!(
        "#{DOC_ROOT_ID} {{ max-width: {page_width_px:.0}px; margin: 0 auto; padding: {margin_px:.0}px; box-sizing: border-box; }}\n",
    ));
    html.push_str("@media print {\n");
    html.push_str(&format!(
        "  #{DOC_ROOT_ID} {{ max-width: none; padding: 0; margin: 0; }}\n"
    ));
    html.push_str("  .signatures { page-break-before: always; }\n");
    html.push_str("}\n");
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!(r#"<div id="{DOC_ROOT_ID}">"#));
    html.push_str(&fragment);
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<script>\ndocument.fonts.ready.then(function () {{\n  document.getElementById('{DOC_ROOT_ID}').setAttribute('{FONTS_READY_ATTR}', 'true');\n}});\n</script>\n",
    ));
    html.push_str("</body>\n</html>\n");
    html
}
