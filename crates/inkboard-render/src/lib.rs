//! Inkboard Render Library
//!
//! Renderer abstraction and a CPU raster backend for the inkboard canvas.

pub mod color;
pub mod fonts;
mod raster;
mod renderer;

pub use color::{color_or, parse_css_color};
pub use fonts::FontLibrary;
pub use raster::RasterRenderer;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
