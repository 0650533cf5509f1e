//! PDF export options

use doc_model::style::{mm_to_inches, PageLayout};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Physical page format for the rasterized PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    Letter,
    #[default]
    A4,
}

impl PageFormat {
    /// Paper width and height in inches
    pub fn dimensions_inches(&self) -> (f64, f64) {
        match self {
            PageFormat::Letter => (8.5, 11.0),
            PageFormat::A4 => (8.27, 11.69),
        }
    }
}

/// Page margins in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfMargins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl PdfMargins {
    /// Uniform margins on all four sides
    pub fn uniform(mm: f32) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }

    /// Margins matching a page layout class
    pub fn from_layout(layout: PageLayout) -> Self {
        Self::uniform(layout.margin_mm())
    }

    /// Margins converted to the inches the automation protocol expects
    pub fn to_inches(&self) -> (f64, f64, f64, f64) {
        (
            mm_to_inches(self.top),
            mm_to_inches(self.right),
            mm_to_inches(self.bottom),
            mm_to_inches(self.left),
        )
    }
}

impl Default for PdfMargins {
    fn default() -> Self {
        Self::from_layout(PageLayout::Standard)
    }
}

/// Options for a PDF export call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Page format to rasterize at
    #[serde(default)]
    pub format: PageFormat,
    /// Page margins
    #[serde(default)]
    pub margins: PdfMargins,
    /// Minimum rendered text length before the page counts as hydrated
    #[serde(default = "default_min_content_len")]
    pub min_content_len: usize,
    /// Timeout for the navigation itself, in milliseconds
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
    /// Timeout for the content-length gate, in milliseconds
    #[serde(default = "default_content_timeout_ms")]
    pub content_timeout_ms: u64,
    /// Timeout for each remaining readiness gate, in milliseconds
    #[serde(default = "default_gate_timeout_ms")]
    pub gate_timeout_ms: u64,
    /// Interval between readiness polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_min_content_len() -> usize {
    80
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_content_timeout_ms() -> u64 {
    30_000
}

fn default_gate_timeout_ms() -> u64 {
    15_000
}

fn default_poll_interval_ms() -> u64 {
    250
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            format: PageFormat::default(),
            margins: PdfMargins::default(),
            min_content_len: default_min_content_len(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            content_timeout_ms: default_content_timeout_ms(),
            gate_timeout_ms: default_gate_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl PdfExportOptions {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_millis(self.content_timeout_ms)
    }

    pub fn gate_timeout(&self) -> Duration {
        Duration::from_millis(self.gate_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_map_to_paper_dimensions() {
        assert_eq!(PageFormat::Letter.dimensions_inches(), (8.5, 11.0));
        assert_eq!(PageFormat::A4.dimensions_inches(), (8.27, 11.69));
    }

    #[test]
    fn default_margins_follow_the_standard_layout() {
        let margins = PdfMargins::default();
        assert_eq!(margins, PdfMargins::uniform(PageLayout::Standard.margin_mm()));
        let (top, ..) = margins.to_inches();
        assert!((top - 24.0 / 25.4).abs() < 1e-6);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: PdfExportOptions = serde_json::from_str(r#"{"format": "letter"}"#).unwrap();
        assert_eq!(options.format, PageFormat::Letter);
        assert_eq!(options.min_content_len, 80);
        assert_eq!(options.navigation_timeout_ms, 30_000);
    }
}
