//! CSS color strings stored on shapes.

use peniko::Color;
use peniko::color::{Srgb, parse_color};

/// Fallback stroke color for shapes whose color cannot be parsed.
pub const FALLBACK_STROKE: Color = Color::from_rgba8(255, 255, 255, 255);
/// Fallback fill for text whose color cannot be parsed.
pub const FALLBACK_TEXT: Color = Color::from_rgba8(0, 0, 0, 255);
/// Selection overlay color (`#4f46e5`).
pub const SELECTION_COLOR: Color = Color::from_rgba8(0x4f, 0x46, 0xe5, 255);

/// Parse a CSS color (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` or a
/// named color).
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match parse_color(value) {
        Ok(color) => Some(color.to_alpha_color::<Srgb>()),
        Err(e) => {
            log::trace!("Unparseable color {:?}: {}", value, e);
            None
        }
    }
}

/// Parse `value`, falling back to `fallback` when it is absent or invalid.
pub fn color_or(value: &str, fallback: Color) -> Color {
    parse_css_color(value).unwrap_or(fallback)
}

pub(crate) fn to_skia(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}
