//! Document Model - Style configuration, typography resolution, and content model
//!
//! This crate provides the shared foundation for the render and export
//! paths: the user-facing style configuration, the pure typography
//! resolver every renderer imports its numbers from, the content input
//! union, signature records, and the typed block model the exporters
//! consume.

mod block;
mod content;
mod error;
mod raster;
mod signature;
pub mod style;

pub use block::*;
pub use content::*;
pub use error::*;
pub use raster::*;
pub use signature::*;
pub use style::*;
