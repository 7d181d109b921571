//! Straight line segment.

use super::{ShapeId, ShapeTrait};
use crate::geometry::{BoundingBox, STROKE_HIT_TOLERANCE, distance_point_to_segment};
use kurbo::{BezPath, Point, Vec2};

/// A straight line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    pub start: Point,
    pub end: Point,
    pub color: String,
}

impl Line {
    pub fn new(id: ShapeId, start: Point, end: Point, color: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            color: color.into(),
        }
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start, self.end)
    }

    fn hit_test(&self, point: Point) -> bool {
        distance_point_to_segment(point, self.start, self.end) <= STROKE_HIT_TOLERANCE
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
