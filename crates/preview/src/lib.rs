//! Preview - Paged preview approximation
//!
//! Presents the canonical rendering as a scrollable sequence of
//! page-like segments: fixed page geometry, a uniform scale transform to
//! fit the viewport, and a page count derived from measured content
//! height. This is deliberately an approximation; a real pagination/flow
//! engine that splits content at page boundaries is out of scope, and
//! callers should not treat segment edges as true page breaks.

mod error;
mod geometry;
mod simulator;

pub use error::*;
pub use geometry::PageGeometry;
pub use simulator::{ContentMeasurer, PagePreview, PaginationSimulator, MIN_SCALE, SETTLE_DELAY};
