//! Canonical styled fragment
//!
//! Renders blocks as a styled markup fragment using only values derived
//! by the typography resolver. This fragment is the reference appearance:
//! the standalone document embeds it verbatim, and the word-processor
//! exporter mirrors its numeric styling, so all three outputs share one
//! derivation.

use crate::escape::escape_html;
use crate::signatures::signatures_section;
use doc_model::style::{
    resolve_typography, DocumentStyle, HeadingCase, HeadingIndent, HeadingWeight,
    ResolvedTypography, HEADING_INDENT_REM, LIST_INDENT_REM,
};
use doc_model::{Block, InlineSpan, SignatureRecord};

/// Renderer for the canonical content fragment
pub struct FragmentRenderer {
    style: DocumentStyle,
    typo: ResolvedTypography,
}

impl FragmentRenderer {
    pub fn new(style: DocumentStyle) -> Self {
        Self {
            style,
            typo: resolve_typography(&style),
        }
    }

    /// Render blocks plus the trailing signatures section
    ///
    /// Consecutive list items are grouped into a shared list element;
    /// everything else renders in document order. With no signatures, no
    /// signatures section (and no page break) is emitted at all.
    pub fn render(&self, blocks: &[Block], signatures: &[SignatureRecord]) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            r#"<div class="doc-content" style="font-family: {}; font-size: {}pt; line-height: {};">"#,
            self.typo.font_stack_css, self.typo.point_size, self.typo.line_height,
        ));

        let mut i = 0;
        while i < blocks.len() {
            match &blocks[i] {
                Block::Heading { level, spans } => {
                    self.write_heading(&mut html, *level, spans);
                    i += 1;
                }
                Block::Paragraph { spans } => {
                    self.write_paragraph(&mut html, spans);
                    i += 1;
                }
                Block::ListItem { ordered, .. } => {
                    // Group the run of consecutive items sharing this
                    // list kind under one list element
                    let ordered = *ordered;
                    let tag = if ordered { "ol" } else { "ul" };
                    html.push_str(&format!(
                        r#"<{tag} style="margin: 0 0 {}rem 0; padding-left: {LIST_INDENT_REM}rem;">"#,
                        self.typo.paragraph_spacing_rem,
                    ));
                    while i < blocks.len() {
                        let Block::ListItem {
                            ordered: item_ordered,
                            spans,
                            ..
                        } = &blocks[i]
                        else {
                            break;
                        };
                        if *item_ordered != ordered {
                            break;
                        }
                        html.push_str(r#"<li style="margin: 0 0 0.2rem 0;">"#);
                        self.write_spans(&mut html, spans);
                        html.push_str("</li>");
                        i += 1;
                    }
                    html.push_str(&format!("</{tag}>"));
                }
            }
        }

        html.push_str(&signatures_section(signatures, &self.typo));
        html.push_str("</div>");
        html
    }

    fn write_heading(&self, html: &mut String, level: u8, spans: &[InlineSpan]) {
        let size = self.typo.heading_point_size(level);
        let weight = match self.style.heading_weight {
            HeadingWeight::Bold => "bold",
            HeadingWeight::Normal => "normal",
        };
        let transform = match self.style.heading_case {
            HeadingCase::Uppercase => "uppercase",
            HeadingCase::Normal => "none",
        };
        let indent = match self.style.heading_indent {
            HeadingIndent::Indented => HEADING_INDENT_REM,
            HeadingIndent::Flush => 0.0,
        };
        html.push_str(&format!(
            r#"<h{level} style="font-size: {size}pt; font-weight: {weight}; text-transform: {transform}; margin: {top}rem 0 {bottom}rem {indent}rem; line-height: {lh};">"#,
            top = self.typo.paragraph_spacing_rem * 1.5,
            bottom = self.typo.paragraph_spacing_rem,
            lh = self.typo.line_height,
        ));
        self.write_spans(html, spans);
        html.push_str(&format!("</h{level}>"));
    }

    fn write_paragraph(&self, html: &mut String, spans: &[InlineSpan]) {
        html.push_str(&format!(
            r#"<p style="margin: 0 0 {}rem 0;">"#,
            self.typo.paragraph_spacing_rem,
        ));
        self.write_spans(html, spans);
        html.push_str("</p>");
    }

    fn write_spans(&self, html: &mut String, spans: &[InlineSpan]) {
        for span in spans {
            if span.bold {
                html.push_str("<strong>");
            }
            if span.italic {
                html.push_str("<em>");
            }
            html.push_str(&escape_html(&span.text));
            if span.italic {
                html.push_str("</em>");
            }
            if span.bold {
                html.push_str("</strong>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::style::{FontFamily, FontSize};

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

    fn item(ordered: bool, index: Option<u32>, text: &str) -> Block {
        Block::ListItem {
            ordered,
            index,
            spans: vec![InlineSpan::plain(text)],
        }
    }

    #[test]
    fn uppercase_classic_heading_renders_at_base_plus_four() {
        let style = DocumentStyle {
            font_family: FontFamily::Classic,
            font_size: FontSize::Medium,
            heading_case: HeadingCase::Uppercase,
            ..Default::default()
        };
        let html = FragmentRenderer::new(style).render(
            &[heading(1, "Title"), paragraph("Body text.")],
            &[],
        );
        assert!(html.contains("font-size: 15.5pt"));
        assert!(html.contains("text-transform: uppercase"));
        assert!(html.contains("font-size: 11.5pt"));
        assert!(html.contains("Georgia"));
    }

    #[test]
    fn consecutive_list_items_share_one_list() {
        let blocks = vec![
            item(false, None, "a"),
            item(false, None, "b"),
            item(true, Some(1), "c"),
        ];
        let html = FragmentRenderer::new(DocumentStyle::default()).render(&blocks, &[]);
        assert_eq!(html.matches("<ul").count(), 1);
        assert_eq!(html.matches("<ol").count(), 1);
        assert_eq!(html.matches("<li").count(), 3);
    }

    #[test]
    fn spans_render_emphasis_tags() {
        let blocks = vec![Block::Paragraph {
            spans: vec![
                InlineSpan::plain("a "),
                InlineSpan {
                    text: "b".into(),
                    bold: true,
                    italic: true,
                },
            ],
        }];
        let html = FragmentRenderer::new(DocumentStyle::default()).render(&blocks, &[]);
        assert!(html.contains("<strong><em>b</em></strong>"));
    }

    #[test]
    fn text_content_is_escaped() {
        let blocks = vec![paragraph("1 < 2 & 3 > 2")];
        let html = FragmentRenderer::new(DocumentStyle::default()).render(&blocks, &[]);
        assert!(html.contains("1 &lt; 2 &amp; 3 &gt; 2"));
    }

    #[test]
    fn no_signatures_means_no_section() {
        let html = FragmentRenderer::new(DocumentStyle::default()).render(&[paragraph("x")], &[]);
        assert!(!html.contains("signatures"));
        assert!(!html.contains("page-break-before"));
    }
}
