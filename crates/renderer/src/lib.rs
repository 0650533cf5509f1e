//! Renderer - Canonical styled markup and standalone document generation
//!
//! The canonical fragment is the reference appearance every export is
//! validated against; the standalone document wraps that fragment into a
//! self-contained page the PDF pipeline rasterizes. Both derive every
//! numeric value from the typography resolver in `doc_model` and define
//! no styling constants of their own.

mod escape;
mod fragment;
mod signatures;
mod standalone;

pub use escape::{escape_attr, escape_html};
pub use fragment::FragmentRenderer;
pub use signatures::signatures_section;
pub use standalone::{
    render_standalone, DOC_CONTENT_CLASS, DOC_ROOT_ID, FONTS_READY_ATTR,
};
