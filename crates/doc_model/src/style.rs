//! Style configuration and typography resolution
//!
//! This module is the single source of truth for every numeric value the
//! render paths share: point sizes, line-height multipliers, paragraph
//! spacing, heading offsets, page geometry, and the unit conversions
//! between CSS pixels/points, word-processor twips/half-points, and image
//! EMUs. The screen renderer, the standalone document generator, and the
//! word-processor exporter all import their numbers from here; none of
//! them defines a spacing or size constant locally.

use serde::{Deserialize, Serialize};

// =============================================================================
// Style Configuration
// =============================================================================

/// Font family class selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Clean sans-serif stack
    #[default]
    Modern,
    /// Serif stack for traditional documents
    Classic,
    /// Monospace stack
    Mono,
}

/// Base font size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Line spacing class
///
/// Serialized tokens match the user-facing configuration object
/// ("single", "1.15", "1.5").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineSpacing {
    #[default]
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "1.15")]
    OnePointOneFive,
    #[serde(rename = "1.5")]
    OnePointFive,
}

/// Vertical spacing between paragraphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphSpacing {
    Compact,
    #[default]
    Normal,
    Roomy,
}

/// Heading font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingWeight {
    #[default]
    Bold,
    Normal,
}

/// Heading letter case transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingCase {
    #[default]
    Normal,
    Uppercase,
}

/// Heading left indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingIndent {
    #[default]
    Flush,
    Indented,
}

/// Page layout class, controls page width and margins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    #[default]
    Standard,
    Wide,
}

/// User-selected document style configuration
///
/// Immutable value object shared by all render paths. Unknown enum tokens
/// fail at deserialization; there is no silent fallback for an
/// unrecognized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentStyle {
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub line_spacing: LineSpacing,
    #[serde(default)]
    pub paragraph_spacing: ParagraphSpacing,
    /// Heading weight; the configuration object calls this `headingStyle`
    #[serde(default, rename = "headingStyle")]
    pub heading_weight: HeadingWeight,
    #[serde(default)]
    pub heading_case: HeadingCase,
    #[serde(default)]
    pub heading_indent: HeadingIndent,
    #[serde(default)]
    pub layout: PageLayout,
}

// =============================================================================
// Resolved Typography
// =============================================================================

/// Point size offsets added to the body size for each heading level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingOffsets {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl HeadingOffsets {
    /// Offset for a 1-based heading level; levels beyond 3 clamp to h3
    pub fn for_level(&self, level: u8) -> f32 {
        match level {
            0 | 1 => self.h1,
            2 => self.h2,
            _ => self.h3,
        }
    }
}

/// Concrete typography values derived from a [`DocumentStyle`]
///
/// Produced by [`resolve_typography`]; consumed identically by the screen
/// renderer, the standalone document generator, and the word-processor
/// exporter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTypography {
    /// CSS font-family stack
    pub font_stack_css: &'static str,
    /// Face name used by the word-processor exporter
    pub font_word_name: &'static str,
    /// Body text size in points
    pub point_size: f32,
    /// Unitless CSS line-height multiplier
    pub line_height: f32,
    /// Space after each paragraph in rem
    pub paragraph_spacing_rem: f32,
    /// Heading point-size offsets relative to the body size
    pub heading_offsets: HeadingOffsets,
}

impl ResolvedTypography {
    /// Point size of a heading at the given 1-based level
    pub fn heading_point_size(&self, level: u8) -> f32 {
        self.point_size + self.heading_offsets.for_level(level)
    }
}

/// Derive concrete typography from a style configuration
///
/// Pure function, no I/O. The enums are closed, so resolution is total;
/// an unrecognized token is rejected earlier, at the serde boundary.
pub fn resolve_typography(style: &DocumentStyle) -> ResolvedTypography {
    let (font_stack_css, font_word_name) = match style.font_family {
        FontFamily::Modern => (
            "'Helvetica Neue', Helvetica, Arial, sans-serif",
            "Helvetica",
        ),
        FontFamily::Classic => ("Georgia, 'Times New Roman', serif", "Georgia"),
        FontFamily::Mono => ("'Courier New', Courier, monospace", "Courier New"),
    };

    let point_size = match style.font_size {
        FontSize::Small => 10.0,
        FontSize::Medium => 11.5,
        FontSize::Large => 13.0,
    };

    let line_height = match style.line_spacing {
        LineSpacing::Single => 1.35,
        LineSpacing::OnePointOneFive => 1.55,
        LineSpacing::OnePointFive => 1.9,
    };

    let paragraph_spacing_rem = match style.paragraph_spacing {
        ParagraphSpacing::Compact => 0.45,
        ParagraphSpacing::Normal => 0.8,
        ParagraphSpacing::Roomy => 1.3,
    };

    ResolvedTypography {
        font_stack_css,
        font_word_name,
        point_size,
        line_height,
        paragraph_spacing_rem,
        heading_offsets: HeadingOffsets {
            h1: 4.0,
            h2: 2.0,
            h3: 1.0,
        },
    }
}

// =============================================================================
// Page Geometry Constants
// =============================================================================

/// Physical page width (A4) in millimeters
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// Physical page height (A4) in millimeters
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Left indent applied to indented headings, in rem
pub const HEADING_INDENT_REM: f32 = 1.5;

/// Hanging indent for list items, in rem
pub const LIST_INDENT_REM: f32 = 1.5;

/// Display width of an embedded signature image, in CSS pixels
pub const SIGNATURE_IMAGE_WIDTH_PX: u32 = 180;

/// Display height of an embedded signature image, in CSS pixels
pub const SIGNATURE_IMAGE_HEIGHT_PX: u32 = 60;

impl PageLayout {
    /// Multiplier applied to the physical page width
    pub fn width_factor(&self) -> f32 {
        match self {
            PageLayout::Standard => 1.0,
            PageLayout::Wide => 1.18,
        }
    }

    /// Page margin in millimeters, uniform on all four sides
    pub fn margin_mm(&self) -> f32 {
        match self {
            PageLayout::Standard => 24.0,
            PageLayout::Wide => 16.0,
        }
    }
}

// =============================================================================
// Unit Conversions
// =============================================================================

/// Twips per millimeter (1440 per inch / 25.4 mm per inch)
const TWIPS_PER_MM: f32 = 1440.0 / 25.4;

/// Twips per rem (16 px per rem, 15 twips per CSS px at 96 dpi)
const TWIPS_PER_REM: f32 = 240.0;

/// EMUs per CSS pixel at 96 dpi
const EMU_PER_PX: i64 = 9525;

/// CSS pixels per millimeter at 96 dpi
const PX_PER_MM: f32 = 96.0 / 25.4;

/// Convert points to word-processor half-points
pub fn pt_to_half_points(pt: f32) -> i32 {
    (pt * 2.0).round() as i32
}

/// Convert millimeters to twips
pub fn mm_to_twips(mm: f32) -> i32 {
    (mm * TWIPS_PER_MM).round() as i32
}

/// Convert rem to twips
pub fn rem_to_twips(rem: f32) -> i32 {
    (rem * TWIPS_PER_REM).round() as i32
}

/// Convert CSS pixels to millimeters
pub fn px_to_mm(px: f32) -> f32 {
    px / PX_PER_MM
}

/// Convert millimeters to CSS pixels
pub fn mm_to_px(mm: f32) -> f32 {
    mm * PX_PER_MM
}

/// Convert a pixel extent to EMUs for drawing elements
pub fn px_to_emu(px: u32) -> i64 {
    px as i64 * EMU_PER_PX
}

/// Convert millimeters to inches
pub fn mm_to_inches(mm: f32) -> f64 {
    mm as f64 / 25.4
}

/// Space after a paragraph in twips for the given style
pub fn paragraph_spacing_twips(style: &DocumentStyle) -> i32 {
    rem_to_twips(resolve_typography(style).paragraph_spacing_rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_deterministic() {
        let style = DocumentStyle::default();
        assert_eq!(resolve_typography(&style), resolve_typography(&style));
    }

    #[test]
    fn classic_medium_resolves_expected_values() {
        let style = DocumentStyle {
            font_family: FontFamily::Classic,
            font_size: FontSize::Medium,
            ..Default::default()
        };
        let typo = resolve_typography(&style);
        assert_eq!(typo.point_size, 11.5);
        assert_eq!(typo.font_word_name, "Georgia");
        assert!(typo.font_stack_css.contains("Georgia"));
        assert_eq!(typo.heading_point_size(1), 15.5);
        assert_eq!(typo.heading_point_size(2), 13.5);
        assert_eq!(typo.heading_point_size(3), 12.5);
    }

    #[test]
    fn heading_levels_beyond_three_clamp() {
        let typo = resolve_typography(&DocumentStyle::default());
        assert_eq!(typo.heading_point_size(4), typo.heading_point_size(3));
    }

    #[test]
    fn conversions_round_trip_reference_values() {
        assert_eq!(pt_to_half_points(11.5), 23);
        assert_eq!(pt_to_half_points(15.5), 31);
        assert_eq!(mm_to_twips(25.4), 1440);
        assert_eq!(rem_to_twips(1.5), 360);
        assert_eq!(px_to_emu(120), 1_143_000);
    }

    #[test]
    fn paragraph_spacing_tracks_class() {
        let compact = DocumentStyle {
            paragraph_spacing: ParagraphSpacing::Compact,
            ..Default::default()
        };
        let roomy = DocumentStyle {
            paragraph_spacing: ParagraphSpacing::Roomy,
            ..Default::default()
        };
        assert!(paragraph_spacing_twips(&compact) < paragraph_spacing_twips(&roomy));
        assert_eq!(paragraph_spacing_twips(&roomy), rem_to_twips(1.3));
    }

    #[test]
    fn style_deserializes_from_configuration_tokens() {
        let style: DocumentStyle = serde_json::from_str(
            r#"{
                "fontFamily": "classic",
                "fontSize": "large",
                "lineSpacing": "1.15",
                "paragraphSpacing": "roomy",
                "headingStyle": "normal",
                "headingCase": "uppercase",
                "headingIndent": "indented",
                "layout": "wide"
            }"#,
        )
        .unwrap();
        assert_eq!(style.font_family, FontFamily::Classic);
        assert_eq!(style.line_spacing, LineSpacing::OnePointOneFive);
        assert_eq!(style.heading_weight, HeadingWeight::Normal);
        assert_eq!(style.heading_case, HeadingCase::Uppercase);
        assert_eq!(style.layout, PageLayout::Wide);
    }

    #[test]
    fn unknown_enum_token_is_rejected() {
        let result: std::result::Result<DocumentStyle, _> =
            serde_json::from_str(r#"{"fontFamily": "comic-sans"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn line_spacing_uses_configuration_tokens() {
        assert_eq!(
            serde_json::to_string(&LineSpacing::OnePointFive).unwrap(),
            r#""1.5""#
        );
        let spacing: LineSpacing = serde_json::from_str(r#""1.15""#).unwrap();
        assert_eq!(spacing, LineSpacing::OnePointOneFive);
    }

    #[test]
    fn wide_layout_widens_page_and_narrows_margins() {
        assert!(PageLayout::Wide.width_factor() > PageLayout::Standard.width_factor());
        assert!(PageLayout::Wide.margin_mm() < PageLayout::Standard.margin_mm());
    }
}
