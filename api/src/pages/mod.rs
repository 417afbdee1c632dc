//! Pages module
//!
//! HTML rendering of the public poll pages.

pub mod renderer;

pub use renderer::PageRenderer;
