//! Font registry and glyph outlines.

use crate::renderer::{RenderResult, RendererError};
use ab_glyph::{Font, FontArc, OutlineCurve, PxScale, ScaleFont};
use kurbo::{BezPath, Point};

/// Fonts registered by family name.
///
/// Lookups are case-insensitive; unknown families fall back to the first
/// registered font.
#[derive(Default, Clone)]
pub struct FontLibrary {
    fonts: Vec<(String, FontArc)>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register TrueType/OpenType bytes under `family`, replacing any earlier
    /// font of that family.
    pub fn register(&mut self, family: &str, data: Vec<u8>) -> RenderResult<()> {
        let font = FontArc::try_from_vec(data)
            .map_err(|e| RendererError::Font(format!("{}: {}", family, e)))?;
        let key = family.to_lowercase();
        match self.fonts.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = font,
            None => self.fonts.push((key, font)),
        }
        log::debug!("Registered font family {}", family);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn get(&self, family: &str) -> Option<&FontArc> {
        let key = family.to_lowercase();
        self.fonts
            .iter()
            .find(|(name, _)| *name == key)
            .or_else(|| self.fonts.first())
            .map(|(_, font)| font)
    }

    /// Glyph outlines for `text` laid out on one line from `origin` (baseline).
    ///
    /// Returns `None` when no font is registered.
    pub fn layout(&self, family: &str, size: f64, origin: Point, text: &str) -> Option<BezPath> {
        let Some(font) = self.get(family) else {
            log::trace!("No font for {:?}, skipping text", family);
            return None;
        };
        let scaled = font.as_scaled(PxScale::from(size as f32));
        let (hs, vs) = (scaled.h_scale_factor() as f64, scaled.v_scale_factor() as f64);

        let mut path = BezPath::new();
        let mut caret = origin.x;
        let mut previous = None;
        for c in text.chars() {
            let glyph = font.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, glyph) as f64;
            }
            if let Some(outline) = font.outline(glyph) {
                let to_canvas = |p: ab_glyph::Point| Point::new(caret + p.x as f64 * hs, origin.y - p.y as f64 * vs);
                let mut pen: Option<Point> = None;
                for curve in &outline.curves {
                    let (from, to) = match curve {
                        OutlineCurve::Line(a, b) => (to_canvas(*a), to_canvas(*b)),
                        OutlineCurve::Quad(a, _, b) => (to_canvas(*a), to_canvas(*b)),
                        OutlineCurve::Cubic(a, _, _, b) => (to_canvas(*a), to_canvas(*b)),
                    };
                    if pen != Some(from) {
                        if pen.is_some() {
                            path.close_path();
                        }
                        path.move_to(from);
                    }
                    match curve {
                        OutlineCurve::Line(..) => path.line_to(to),
                        OutlineCurve::Quad(_, c1, _) => path.quad_to(to_canvas(*c1), to),
                        OutlineCurve::Cubic(_, c1, c2, _) => path.curve_to(to_canvas(*c1), to_canvas(*c2), to),
                    }
                    pen = Some(to);
                }
                if pen.is_some() {
                    path.close_path();
                }
            }
            caret += scaled.h_advance(glyph) as f64;
            previous = Some(glyph);
        }
        Some(path)
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.fonts.iter().map(|(name, _)| name)).finish()
    }
}
