//! CPU raster renderer on a tiny-skia pixmap.

use crate::color::{FALLBACK_STROKE, FALLBACK_TEXT, color_or, to_skia};
use crate::fonts::FontLibrary;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use inkboard_core::geometry::text_box;
use inkboard_core::selection::{HANDLE_SIZE, HandleKind, get_handles};
use inkboard_core::shapes::{Shape, Text};
use inkboard_core::text_edit::TextEdit;
use kurbo::{BezPath, PathEl, Point, Rect, Shape as KurboShape};
use peniko::Color;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

const STROKE_WIDTH: f32 = 2.0;
const OVERLAY_WIDTH: f32 = 1.0;
const OVERLAY_DASH: [f32; 2] = [5.0, 3.0];
const ROTATE_DOT_RADIUS: f64 = 5.0;

/// Renders canvas frames into an RGBA pixmap.
pub struct RasterRenderer {
    pixmap: Pixmap,
    fonts: FontLibrary,
}

impl RasterRenderer {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            fonts: FontLibrary::new(),
        })
    }

    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        &mut self.fonts
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Resize the surface. Returns true when it was reallocated.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<bool> {
        if self.pixmap.width() == width && self.pixmap.height() == height {
            return Ok(false);
        }
        log::debug!("Resizing raster surface to {}x{}", width, height);
        self.pixmap = allocate(width, height)?;
        Ok(true)
    }

    /// Encode the current surface as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgba)?;
            writer.finish()?;
        }
        Ok(png_data)
    }

    fn paint_shape(&mut self, shape: &Shape) {
        let transform = rotation_transform(shape);
        match shape {
            Shape::Text(text) => self.paint_text(text, transform),
            _ => {
                let color = color_or(shape.color(), FALLBACK_STROKE);
                stroke_path(&mut self.pixmap, &shape.to_path(), color, &solid(STROKE_WIDTH), transform);
            }
        }
    }

    fn paint_text(&mut self, text: &Text, transform: Transform) {
        if text.text.is_empty() {
            return;
        }
        let color = color_or(&text.color, FALLBACK_TEXT);
        if let Some(glyphs) = self
            .fonts
            .layout(&text.font_family, text.font_size, text.position, &text.text)
        {
            fill_path(&mut self.pixmap, &glyphs, color, transform);
        }
    }

    fn paint_selection(&mut self, shape: &Shape, color: Color) {
        let bbox = shape.bounding_box();
        let outline = match shape {
            Shape::Line(line) => segment(line.start, line.end),
            Shape::Arrow(arrow) => segment(arrow.start, arrow.end),
            Shape::Circle(circle) => circle.as_circle().to_path(0.1),
            Shape::Rectangle(_) | Shape::Text(_) | Shape::Freehand(_) => bbox.as_rect().to_path(0.1),
        };
        stroke_path(&mut self.pixmap, &outline, color, &dashed(), Transform::identity());

        for handle in get_handles(shape) {
            match handle.kind {
                HandleKind::Rotate => {
                    let guide = segment(bbox.top_center(), handle.position);
                    stroke_path(&mut self.pixmap, &guide, color, &solid(OVERLAY_WIDTH), Transform::identity());
                    let dot = kurbo::Circle::new(handle.position, ROTATE_DOT_RADIUS).to_path(0.1);
                    fill_path(&mut self.pixmap, &dot, color, Transform::identity());
                }
                _ => {
                    let half = HANDLE_SIZE / 2.0;
                    let p = handle.position;
                    let square = Rect::new(p.x - half, p.y - half, p.x + half, p.y + half).to_path(0.1);
                    fill_path(&mut self.pixmap, &square, color, Transform::identity());
                }
            }
        }
    }

    fn paint_text_edit(&mut self, edit: &TextEdit, color: Color) {
        let chars = edit.buffer().chars().count();
        let frame = text_box(edit.position.x, edit.position.y, edit.font_size, chars);
        stroke_path(
            &mut self.pixmap,
            &frame.as_rect().to_path(0.1),
            color,
            &solid(OVERLAY_WIDTH),
            Transform::identity(),
        );

        if let Some(glyphs) = self
            .fonts
            .layout("", edit.font_size, edit.position, edit.buffer())
        {
            fill_path(&mut self.pixmap, &glyphs, color, Transform::identity());
        }

        let caret_x = edit.position.x + edit.font_size * 0.6 * edit.cursor() as f64;
        let caret = segment(
            Point::new(caret_x, edit.position.y - edit.font_size),
            Point::new(caret_x, edit.position.y),
        );
        stroke_path(&mut self.pixmap, &caret, color, &solid(OVERLAY_WIDTH), Transform::identity());
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, ctx: &RenderContext) {
        self.pixmap.fill(to_skia(self.background_color(ctx)));

        // The shape under an inline edit is shown through the edit overlay.
        let editing = ctx.text_edit.and_then(|edit| edit.id.as_ref());
        for shape in ctx.shapes {
            if editing == Some(shape.id()) {
                continue;
            }
            self.paint_shape(shape);
        }

        if let Some(preview) = ctx.preview {
            self.paint_shape(preview);
        }

        if let Some(selected) = ctx.selected_shape() {
            self.paint_selection(selected, ctx.selection_color);
        }

        if let Some(edit) = ctx.text_edit {
            self.paint_text_edit(edit, ctx.selection_color);
        }
        log::trace!("Rendered {} shapes", ctx.shapes.len());
    }
}

fn allocate(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height)
        .ok_or_else(|| RendererError::InitFailed(format!("cannot allocate a {}x{} surface", width, height)))
}

/// Rotation about the shape's pivot. Angles are reduced to one turn so that
/// θ and θ + 360 paint identically.
fn rotation_transform(shape: &Shape) -> Transform {
    match shape.rotation() {
        Some(degrees) if degrees.rem_euclid(360.0) != 0.0 => {
            let pivot = shape.pivot();
            Transform::from_rotate_at(degrees.rem_euclid(360.0) as f32, pivot.x as f32, pivot.y as f32)
        }
        _ => Transform::identity(),
    }
}

fn segment(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}

fn solid(width: f32) -> Stroke {
    Stroke {
        width,
        ..Default::default()
    }
}

fn dashed() -> Stroke {
    Stroke {
        width: OVERLAY_WIDTH,
        dash: StrokeDash::new(OVERLAY_DASH.to_vec(), 0.0),
        ..Default::default()
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path. Returns `None` for paths with nothing to draw.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn stroke_path(pixmap: &mut Pixmap, path: &BezPath, color: Color, stroke: &Stroke, transform: Transform) {
    if let Some(path) = to_skia_path(path) {
        pixmap.stroke_path(&path, &paint(color), stroke, transform, None);
    }
}

fn fill_path(pixmap: &mut Pixmap, path: &BezPath, color: Color, transform: Transform) {
    if let Some(path) = to_skia_path(path) {
        pixmap.fill_path(&path, &paint(color), FillRule::Winding, transform, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SELECTION_COLOR;
    use inkboard_core::canvas::Canvas;
    use inkboard_core::shapes::{Freehand, Line, Rectangle, ShapeId};
    use inkboard_core::tools::ToolKind;

    fn rgba_at(renderer: &RasterRenderer, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let c = renderer.pixmap().pixel(x, y).unwrap().demultiply();
        (c.red(), c.green(), c.blue(), c.alpha())
    }

    fn rect(id: &str, from: (f64, f64), to: (f64, f64)) -> Shape {
        Shape::Rectangle(Rectangle::new(
            ShapeId::from(id),
            Point::new(from.0, from.1),
            Point::new(to.0, to.1),
            "#000000",
        ))
    }

    #[test]
    fn test_background_fill() {
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        let ctx = RenderContext::new(&[]).with_background(Color::from_rgba8(0x0f, 0x17, 0x2a, 255));
        renderer.render(&ctx);
        assert_eq!(rgba_at(&renderer, 0, 0), (0x0f, 0x17, 0x2a, 255));
        assert_eq!(rgba_at(&renderer, 199, 199), (0x0f, 0x17, 0x2a, 255));
    }

    #[test]
    fn test_rectangle_stroke() {
        let shapes = vec![rect("r", (10.0, 10.0), (50.0, 50.0))];
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        renderer.render(&RenderContext::new(&shapes));
        assert_eq!(rgba_at(&renderer, 10, 30), (0, 0, 0, 255));
        assert_eq!(rgba_at(&renderer, 30, 30), (255, 255, 255, 255));
    }

    #[test]
    fn test_invalid_color_falls_back_to_white() {
        let shapes = vec![Shape::Line(Line::new(
            ShapeId::from("l"),
            Point::new(0.0, 100.0),
            Point::new(200.0, 100.0),
            "bogus",
        ))];
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        let ctx = RenderContext::new(&shapes).with_background(Color::from_rgba8(0, 0, 0, 255));
        renderer.render(&ctx);
        assert_eq!(rgba_at(&renderer, 100, 100), (255, 255, 255, 255));
    }

    #[test]
    fn test_selection_handles() {
        let shapes = vec![rect("r", (10.0, 10.0), (50.0, 50.0))];
        let id = ShapeId::from("r");
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        renderer.render(&RenderContext::new(&shapes).with_selected(Some(&id)));
        let c = SELECTION_COLOR.to_rgba8();
        assert_eq!(rgba_at(&renderer, 52, 52), (c.r, c.g, c.b, 255));

        renderer.render(&RenderContext::new(&shapes));
        assert_eq!(rgba_at(&renderer, 52, 52), (255, 255, 255, 255));
    }

    #[test]
    fn test_stale_selection_ignored() {
        let shapes = vec![rect("r", (10.0, 10.0), (50.0, 50.0))];
        let gone = ShapeId::from("gone");
        let mut a = RasterRenderer::new(200, 200).unwrap();
        let mut b = RasterRenderer::new(200, 200).unwrap();
        a.render(&RenderContext::new(&shapes).with_selected(Some(&gone)));
        b.render(&RenderContext::new(&shapes));
        assert_eq!(a.pixmap().data(), b.pixmap().data());
    }

    #[test]
    fn test_render_is_idempotent() {
        let shapes = vec![
            rect("r", (20.0, 20.0), (120.0, 90.0)),
            Shape::Freehand(Freehand::from_points(
                ShapeId::from("f"),
                vec![Point::new(5.0, 5.0), Point::new(60.0, 150.0), Point::new(180.0, 20.0)],
                "#22c55e",
            )),
        ];
        let id = ShapeId::from("f");
        let ctx = RenderContext::new(&shapes).with_selected(Some(&id));
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        renderer.render(&ctx);
        let first = renderer.pixmap().data().to_vec();
        renderer.render(&ctx);
        assert_eq!(renderer.pixmap().data(), &first[..]);
    }

    #[test]
    fn test_full_turn_rotation_paints_identically() {
        let rotated = |degrees: f64| match rect("r", (50.0, 50.0), (150.0, 100.0)) {
            Shape::Rectangle(r) => vec![Shape::Rectangle(r.with_rotation(degrees))],
            _ => unreachable!(),
        };
        let mut a = RasterRenderer::new(200, 200).unwrap();
        let mut b = RasterRenderer::new(200, 200).unwrap();
        a.render(&RenderContext::new(&rotated(90.0)));
        b.render(&RenderContext::new(&rotated(450.0)));
        assert_eq!(a.pixmap().data(), b.pixmap().data());
        // Rotated a quarter turn about (100, 75): the right edge sits at x = 125.
        assert_eq!(rgba_at(&a, 124, 75), (0, 0, 0, 255));
        assert_eq!(rgba_at(&a, 100, 51), (255, 255, 255, 255));
    }

    #[test]
    fn test_text_without_fonts_still_renders_frame() {
        let shapes = vec![
            Shape::Text(Text::new(ShapeId::from("t"), Point::new(20.0, 40.0), "hello", "#000000")),
            rect("r", (10.0, 100.0), (50.0, 150.0)),
        ];
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        renderer.render(&RenderContext::new(&shapes));
        assert_eq!(rgba_at(&renderer, 10, 120), (0, 0, 0, 255));
    }

    #[test]
    fn test_canvas_frame_with_preview_and_edit() {
        let mut canvas = Canvas::default();
        canvas.set_tool(ToolKind::Line);
        canvas.pointer_down(Point::new(0.0, 100.0));
        canvas.pointer_move(Point::new(200.0, 100.0));
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        renderer.render(&RenderContext::for_canvas(&canvas));
        assert_eq!(rgba_at(&renderer, 100, 100), (0, 0, 0, 255));

        canvas.pointer_up();
        canvas.set_tool(ToolKind::None);
        canvas.begin_text_entry(Point::new(20.0, 40.0));
        let before = renderer.pixmap().data().to_vec();
        renderer.render(&RenderContext::for_canvas(&canvas));
        assert_ne!(renderer.pixmap().data(), &before[..]);
    }

    #[test]
    fn test_resize_only_when_changed() {
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        assert!(!renderer.resize(200, 200).unwrap());
        assert!(renderer.resize(320, 240).unwrap());
        assert_eq!((renderer.width(), renderer.height()), (320, 240));
        assert!(renderer.resize(0, 10).is_err());
    }

    #[test]
    fn test_png_export() {
        let mut renderer = RasterRenderer::new(200, 200).unwrap();
        renderer.render(&RenderContext::new(&[]));
        let png = renderer.encode_png().unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
