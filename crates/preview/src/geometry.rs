//! Page geometry derivation
//!
//! All physical constants (page size, layout width factor, margin
//! millimeters) live in `doc_model::style`; this module only converts
//! them into the pixel box the preview scales against.

use doc_model::style::{mm_to_px, PageLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use serde::{Deserialize, Serialize};

/// Pixel geometry of a single preview page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    /// Unscaled page width in CSS pixels
    pub page_width_px: f32,
    /// Unscaled page height in CSS pixels
    pub page_height_px: f32,
    /// Uniform margin in CSS pixels
    pub margin_px: f32,
}

impl PageGeometry {
    /// Derive geometry for a layout class
    pub fn for_layout(layout: PageLayout) -> Self {
        let factor = layout.width_factor();
        Self {
            page_width_px: mm_to_px(PAGE_WIDTH_MM * factor),
            page_height_px: mm_to_px(PAGE_HEIGHT_MM * factor),
            margin_px: mm_to_px(layout.margin_mm()),
        }
    }

    /// Width available to content between the margins
    pub fn content_width_px(&self) -> f32 {
        self.page_width_px - 2.0 * self.margin_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_matches_a4_at_96_dpi() {
        let geo = PageGeometry::for_layout(PageLayout::Standard);
        assert!((geo.page_width_px - 793.7).abs() < 0.1);
        assert!((geo.page_height_px - 1122.5).abs() < 0.1);
    }

    #[test]
    fn wide_layout_scales_page_and_shrinks_margins() {
        let standard = PageGeometry::for_layout(PageLayout::Standard);
        let wide = PageGeometry::for_layout(PageLayout::Wide);
        assert!(wide.page_width_px > standard.page_width_px);
        assert!(wide.margin_px < standard.margin_px);
        // Aspect ratio is preserved by the uniform factor
        let ratio_std = standard.page_height_px / standard.page_width_px;
        let ratio_wide = wide.page_height_px / wide.page_width_px;
        assert!((ratio_std - ratio_wide).abs() < 1e-4);
    }

    #[test]
    fn content_width_subtracts_both_margins() {
        let geo = PageGeometry::for_layout(PageLayout::Standard);
        assert!((geo.content_width_px() - (geo.page_width_px - 2.0 * geo.margin_px)).abs() < f32::EPSILON);
    }
}
