//! Circle defined by its center and a point on the circumference.

use super::{ShapeId, ShapeTrait};
use crate::geometry::BoundingBox;
use kurbo::{BezPath, Point, Shape as KurboShape, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center.
    pub start: Point,
    /// A point on the circumference.
    pub end: Point,
    pub color: String,
}

impl Circle {
    pub fn new(id: ShapeId, start: Point, end: Point, color: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            color: color.into(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn as_circle(&self) -> kurbo::Circle {
        kurbo::Circle::new(self.start, self.radius())
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        let r = self.radius();
        BoundingBox::new(self.start.x - r, self.start.y - r, r * 2.0, r * 2.0)
    }

    fn hit_test(&self, point: Point) -> bool {
        point.distance(self.start) <= self.radius()
    }

    fn to_path(&self) -> BezPath {
        self.as_circle().to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
