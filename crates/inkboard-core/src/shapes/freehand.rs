//! Freehand pencil stroke.

use super::{ShapeId, ShapeTrait};
use crate::geometry::{BoundingBox, STROKE_HIT_TOLERANCE, point_to_polyline_dist};
use kurbo::{BezPath, Point, Vec2};

/// A freehand stroke (series of points).
#[derive(Debug, Clone, PartialEq)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Points in drawing order. Never empty once committed.
    pub path: Vec<Point>,
    pub color: String,
}

impl Freehand {
    /// Start a stroke at `start`.
    pub fn new(id: ShapeId, start: Point, color: impl Into<String>) -> Self {
        Self::from_points(id, vec![start], color)
    }

    pub fn from_points(id: ShapeId, path: Vec<Point>, color: impl Into<String>) -> Self {
        Self {
            id,
            path,
            color: color.into(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.path.push(point);
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.path)
    }

    fn hit_test(&self, point: Point) -> bool {
        point_to_polyline_dist(point, &self.path) <= STROKE_HIT_TOLERANCE
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some((first, rest)) = self.path.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.path {
            *p += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Freehand {
        Freehand::from_points(
            ShapeId::from("f"),
            vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0), Point::new(20.0, 20.0)],
            "#000",
        )
    }

    #[test]
    fn test_freehand_creation() {
        let f = Freehand::new(ShapeId::from("f"), Point::new(3.0, 4.0), "#fff");
        assert_eq!(f.path, vec![Point::new(3.0, 4.0)]);
        assert_eq!(f.color, "#fff");
    }

    #[test]
    fn test_hit_test_near_any_segment() {
        let f = zigzag();
        assert!(f.hit_test(Point::new(10.0, 5.0)));
        assert!(f.hit_test(Point::new(25.0, 10.0)));
        assert!(!f.hit_test(Point::new(10.0, 7.0)));
    }

    #[test]
    fn test_single_point_has_no_segments() {
        let f = Freehand::new(ShapeId::from("f"), Point::new(0.0, 0.0), "#000");
        assert!(!f.hit_test(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_bounds() {
        let bb = zigzag().bounding_box();
        assert_eq!(bb, BoundingBox::new(0.0, 0.0, 20.0, 20.0));
    }
}
