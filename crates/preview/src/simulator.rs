//! Pagination simulator
//!
//! Presents the canonical rendering inside a fixed-geometry page and
//! scales it to the viewport, preserving the unscaled content height for
//! the page count. This is an approximation, not a layout engine:
//! content is never split at page boundaries, and the page count is
//! derived purely from measured height. Rendered height is not stable on
//! the first layout pass, so the simulator re-measures after a settle
//! delay before computing anything.

use crate::error::{PreviewError, Result};
use crate::geometry::PageGeometry;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lower bound on the preview scale; avoids degenerate zero-scale states
/// when the viewport collapses
pub const MIN_SCALE: f32 = 0.1;

/// Delay before the post-settle re-measurement
pub const SETTLE_DELAY: Duration = Duration::from_millis(120);

/// Source of measured content height, implemented over the live render
/// surface in production and scripted in tests
pub trait ContentMeasurer {
    /// Measure the current unscaled rendered content height in CSS pixels
    fn measure_height(&self) -> impl std::future::Future<Output = Result<f32>> + Send;
}

/// Computed geometry for the on-screen paged preview
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePreview {
    /// Uniform scale transform applied to the page
    pub scale: f32,
    /// Number of page-like segments the container spans
    pub page_count: u32,
    /// Unscaled container height: content plus vertical margins
    pub container_height_px: f32,
    /// Unscaled page width the scale was computed against
    pub page_width_px: f32,
}

/// Simulator producing scale and page count from measured content
pub struct PaginationSimulator<M> {
    geometry: PageGeometry,
    measurer: M,
    settle_delay: Duration,
}

impl<M: ContentMeasurer> PaginationSimulator<M> {
    pub fn new(geometry: PageGeometry, measurer: M) -> Self {
        Self {
            geometry,
            measurer,
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Override the settle delay (tests use zero)
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Measure, settle, re-measure, then derive the preview geometry
    pub async fn simulate(&self, viewport_width_px: f32) -> Result<PagePreview> {
        if viewport_width_px <= 0.0 {
            return Err(PreviewError::InvalidViewport(viewport_width_px));
        }

        let first = self.measurer.measure_height().await?;
        tokio::time::sleep(self.settle_delay).await;
        let settled = self.measurer.measure_height().await?;
        if (settled - first).abs() > f32::EPSILON {
            tracing::debug!(first = %first, settled = %settled, "content height moved during settle");
        }

        let content_height = settled.max(0.0);
        let container_height = content_height + 2.0 * self.geometry.margin_px;
        let scale = (viewport_width_px / self.geometry.page_width_px).max(MIN_SCALE);
        let page_count = (container_height / self.geometry.page_height_px).ceil().max(1.0) as u32;

        Ok(PagePreview {
            scale,
            page_count,
            container_height_px: container_height,
            page_width_px: self.geometry.page_width_px,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::style::PageLayout;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Measurer replaying a script of heights
    struct ScriptedMeasurer {
        heights: Mutex<VecDeque<f32>>,
    }

    impl ScriptedMeasurer {
        fn new(heights: &[f32]) -> Self {
            Self {
                heights: Mutex::new(heights.iter().copied().collect()),
            }
        }
    }

    impl ContentMeasurer for ScriptedMeasurer {
        async fn measure_height(&self) -> Result<f32> {
            let mut heights = self.heights.lock().unwrap();
            heights
                .pop_front()
                .ok_or_else(|| PreviewError::Measurement("script exhausted".into()))
        }
    }

    fn simulator(heights: &[f32]) -> PaginationSimulator<ScriptedMeasurer> {
        PaginationSimulator::new(
            PageGeometry::for_layout(PageLayout::Standard),
            ScriptedMeasurer::new(heights),
        )
        .with_settle_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn settled_measurement_wins() {
        // First pass reports a partial layout; the settled value drives
        // the page count
        let sim = simulator(&[100.0, 2400.0]);
        let preview = sim.simulate(800.0).await.unwrap();
        let geo = PageGeometry::for_layout(PageLayout::Standard);
        assert_eq!(
            preview.container_height_px,
            2400.0 + 2.0 * geo.margin_px
        );
        assert_eq!(preview.page_count, 3);
    }

    #[tokio::test]
    async fn scale_fits_viewport_width() {
        let sim = simulator(&[500.0, 500.0]);
        let preview = sim.simulate(400.0).await.unwrap();
        let geo = PageGeometry::for_layout(PageLayout::Standard);
        assert!((preview.scale - 400.0 / geo.page_width_px).abs() < 1e-4);
    }

    #[tokio::test]
    async fn scale_clamps_to_minimum() {
        let sim = simulator(&[500.0, 500.0]);
        let preview = sim.simulate(1.0).await.unwrap();
        assert_eq!(preview.scale, MIN_SCALE);
    }

    #[tokio::test]
    async fn short_content_still_fills_one_page() {
        let sim = simulator(&[10.0, 10.0]);
        let preview = sim.simulate(800.0).await.unwrap();
        assert_eq!(preview.page_count, 1);
    }

    #[tokio::test]
    async fn invalid_viewport_is_rejected() {
        let sim = simulator(&[10.0, 10.0]);
        assert!(sim.simulate(0.0).await.is_err());
    }

    #[tokio::test]
    async fn measurement_failure_propagates() {
        let sim = simulator(&[]);
        assert!(matches!(
            sim.simulate(800.0).await,
            Err(PreviewError::Measurement(_))
        ));
    }
}
