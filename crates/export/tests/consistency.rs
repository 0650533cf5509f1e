//! Cross-renderer consistency tests
//!
//! The screen fragment, the standalone document, and the word-processor
//! output must all derive their numbers from the same typography
//! resolution. These tests render the same document through each path
//! and check the numeric styling agrees.

use doc_model::style::{
    pt_to_half_points, resolve_typography, DocumentStyle, FontFamily, FontSize, HeadingCase,
    LineSpacing, ParagraphSpacing,
};
use doc_model::Content;
use export::{export_word_document, WordExportRequest};
use renderer::{render_standalone, FragmentRenderer};
use std::io::{Cursor, Read};
use zip::ZipArchive;

const CONTENT: &str = "# Title\n\nBody text with **bold** emphasis.\n\n- a\n- b\n- c\n";

fn style_matrix() -> Vec<DocumentStyle> {
    let mut styles = Vec::new();
    for font_family in [FontFamily::Modern, FontFamily::Classic, FontFamily::Mono] {
        for font_size in [FontSize::Small, FontSize::Medium, FontSize::Large] {
            styles.push(DocumentStyle {
                font_family,
                font_size,
                ..Default::default()
            });
        }
    }
    styles
}

fn document_xml(style: DocumentStyle) -> String {
    let request = WordExportRequest {
        content: Content::detect(CONTENT),
        style,
        signatures: Vec::new(),
        title: None,
    };
    let bytes = export_word_document(&request).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn fragment_html(style: DocumentStyle) -> String {
    let normalized = markup::normalize(&Content::detect(CONTENT)).unwrap();
    let blocks = markup::parse_blocks(&normalized).unwrap();
    FragmentRenderer::new(style).render(&blocks, &[])
}

#[test]
fn body_size_agrees_across_renderers_for_every_style() {
    for style in style_matrix() {
        let typo = resolve_typography(&style);
        let html = fragment_html(style);
        let xml = document_xml(style);

        assert!(
            html.contains(&format!("font-size: {}pt", typo.point_size)),
            "fragment missing body size for {style:?}"
        );
        assert!(
            xml.contains(&format!(
                r#"<w:sz w:val="{}"/>"#,
                pt_to_half_points(typo.point_size)
            )),
            "document.xml missing body size for {style:?}"
        );
    }
}

#[test]
fn heading_offset_agrees_across_renderers_for_every_style() {
    for style in style_matrix() {
        let typo = resolve_typography(&style);
        let html = fragment_html(style);
        let xml = document_xml(style);

        assert!(
            html.contains(&format!("font-size: {}pt", typo.heading_point_size(1))),
            "fragment missing h1 size for {style:?}"
        );
        assert!(
            xml.contains(&format!(
                r#"<w:sz w:val="{}"/>"#,
                pt_to_half_points(typo.heading_point_size(1))
            )),
            "document.xml missing h1 size for {style:?}"
        );
    }
}

#[test]
fn font_faces_come_from_one_derivation() {
    for style in style_matrix() {
        let typo = resolve_typography(&style);
        let html = fragment_html(style);
        let xml = document_xml(style);
        assert!(html.contains(typo.font_stack_css));
        assert!(xml.contains(&format!(r#"w:ascii="{}""#, typo.font_word_name)));
    }
}

#[test]
fn line_height_and_spacing_agree() {
    let style = DocumentStyle {
        line_spacing: LineSpacing::OnePointFive,
        paragraph_spacing: ParagraphSpacing::Roomy,
        ..Default::default()
    };
    let typo = resolve_typography(&style);
    let html = fragment_html(style);
    let xml = document_xml(style);

    assert!(html.contains(&format!("line-height: {}", typo.line_height)));
    assert!(html.contains(&format!("margin: 0 0 {}rem 0", typo.paragraph_spacing_rem)));
    // 1.9 x 240 = 456, 1.3 rem = 312 twips
    assert!(xml.contains(r#"w:line="456""#));
    assert!(xml.contains(r#"w:after="312""#));
}

#[test]
fn uppercase_scenario_matches_in_markup_and_word_outputs() {
    let style = DocumentStyle {
        font_family: FontFamily::Classic,
        font_size: FontSize::Medium,
        heading_case: HeadingCase::Uppercase,
        ..Default::default()
    };
    let normalized = markup::normalize(&Content::detect("# Title\nBody text.")).unwrap();
    let blocks = markup::parse_blocks(&normalized).unwrap();

    let fragment = FragmentRenderer::new(style).render(&blocks, &[]);
    assert!(fragment.contains("text-transform: uppercase"));
    assert!(fragment.contains("font-size: 15.5pt"));

    let standalone = render_standalone(&blocks, &style, &[], Some("Title"));
    assert!(standalone.contains("text-transform: uppercase"));
    assert!(standalone.contains("font-size: 15.5pt"));

    let xml = document_xml(style);
    assert!(xml.contains("<w:caps/>"));
    assert!(xml.contains(r#"<w:sz w:val="31"/>"#));
}
