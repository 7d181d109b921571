//! Arrow: a line with a two-barb head at its end point.

use super::{ShapeId, ShapeTrait};
use crate::geometry::{BoundingBox, STROKE_HIT_TOLERANCE, arrow_head, distance_point_to_segment};
use kurbo::{BezPath, Point, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    pub start: Point,
    /// Tip of the arrow.
    pub end: Point,
    pub color: String,
}

impl Arrow {
    pub fn new(id: ShapeId, start: Point, end: Point, color: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            color: color.into(),
        }
    }
}

impl ShapeTrait for Arrow {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start, self.end)
    }

    // Only the shaft is hittable, the head is decoration.
    fn hit_test(&self, point: Point) -> bool {
        distance_point_to_segment(point, self.start, self.end) <= STROKE_HIT_TOLERANCE
    }

    fn to_path(&self) -> BezPath {
        let (left, right) = arrow_head(self.start, self.end);
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path.move_to(self.end);
        path.line_to(left);
        path.move_to(self.end);
        path.line_to(right);
        path
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
