//! Text shape.

use super::{ShapeId, ShapeTrait};
use crate::geometry::{BoundingBox, text_box};
use kurbo::{BezPath, Point, Vec2};

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// A single line of text anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Baseline origin.
    pub position: Point,
    pub text: String,
    pub color: String,
    pub font_size: f64,
    pub font_family: String,
    /// Rotation in degrees around the text box center.
    pub rotation: f64,
}

impl Text {
    pub fn new(id: ShapeId, position: Point, text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            position,
            text: text.into(),
            color: color.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            rotation: 0.0,
        }
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        text_box(
            self.position.x,
            self.position.y,
            self.font_size,
            self.text.chars().count(),
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }

    fn to_path(&self) -> BezPath {
        // Drawn from font glyphs, not a stroke outline.
        BezPath::new()
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let text = Text::new(ShapeId::from("t"), Point::new(10.0, 20.0), "Hello", "#000");
        assert!((text.font_size - 16.0).abs() < f64::EPSILON);
        assert_eq!(text.font_family, "Arial");
        assert!((text.rotation).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_sit_above_baseline() {
        let text = Text::new(ShapeId::from("t"), Point::new(10.0, 40.0), "Hi", "#000").with_font("Mono", 20.0);
        let bb = text.bounding_box();
        assert!((bb.x - 10.0).abs() < 1e-9);
        assert!((bb.y - 20.0).abs() < 1e-9);
        assert!((bb.w - 24.0).abs() < 1e-9);
        assert_eq!(text.to_path().elements().len(), 0);
    }

    #[test]
    fn test_hit_test() {
        let text = Text::new(ShapeId::from("t"), Point::new(0.0, 16.0), "abc", "#000");
        assert!(text.hit_test(Point::new(5.0, 10.0)));
        assert!(!text.hit_test(Point::new(5.0, 20.0)));
        assert!(!text.hit_test(Point::new(30.0, 10.0)));
    }
}
