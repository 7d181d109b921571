//! Rectangle shape.

use super::{ShapeId, ShapeTrait};
use crate::geometry::BoundingBox;
use kurbo::{BezPath, Point, Shape as KurboShape, Vec2};

/// An axis-aligned rectangle spanned by two corners, optionally rotated.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Corner where drawing started.
    pub start: Point,
    /// Opposite corner, moved by the resize handle.
    pub end: Point,
    /// Rotation angle in degrees (around the box center).
    pub rotation: f64,
    pub color: String,
}

impl Rectangle {
    /// Create an unrotated rectangle.
    pub fn new(id: ShapeId, start: Point, end: Point, color: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            rotation: 0.0,
            color: color.into(),
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start, self.end)
    }

    // The stored rotation is not applied here.
    fn hit_test(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.bounding_box().as_rect().to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
