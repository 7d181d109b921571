//! Selection handles.
//!
//! A selected shape exposes a small set of handles. Their order in
//! [`get_handles`] is the order in which they are hit-tested, so the first
//! handle under the pointer wins.

use crate::geometry::BoundingBox;
use crate::shapes::Shape;
use kurbo::Point;

/// Side length of a drawn square handle.
pub const HANDLE_SIZE: f64 = 6.0;
/// Handle hit tolerance in pixels (half-size of the box, or circle radius).
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Distance of the rotate handle above the top edge.
pub const ROTATE_HANDLE_OFFSET: f64 = 20.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Bottom-right corner of a rectangle.
    BottomRight,
    /// First endpoint of a line or arrow.
    Start,
    /// Second endpoint of a line or arrow, or the radius point of a circle.
    End,
    /// Rotation handle above the shape.
    Rotate,
}

impl HandleKind {
    pub fn is_resize(self) -> bool {
        !matches!(self, HandleKind::Rotate)
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Resize handles hit inside a square box, the rotate handle inside a circle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.kind {
            HandleKind::Rotate => point.distance(self.position) <= tolerance,
            _ => {
                (point.x - self.position.x).abs() <= tolerance
                    && (point.y - self.position.y).abs() <= tolerance
            }
        }
    }
}

/// Position of the rotate handle for a box.
pub fn rotate_handle_position(bbox: &BoundingBox) -> Point {
    let top = bbox.top_center();
    Point::new(top.x, top.y - ROTATE_HANDLE_OFFSET)
}

/// Get the selection handles for a shape, in hit-test order.
pub fn get_handles(shape: &Shape) -> Vec<Handle> {
    match shape {
        Shape::Rectangle(_) => {
            let bbox = shape.bounding_box();
            vec![
                Handle::new(bbox.bottom_right(), HandleKind::BottomRight),
                Handle::new(rotate_handle_position(&bbox), HandleKind::Rotate),
            ]
        }
        Shape::Line(line) => vec![
            Handle::new(line.start, HandleKind::Start),
            Handle::new(line.end, HandleKind::End),
        ],
        Shape::Arrow(arrow) => vec![
            Handle::new(arrow.start, HandleKind::Start),
            Handle::new(arrow.end, HandleKind::End),
        ],
        Shape::Circle(circle) => vec![Handle::new(circle.end, HandleKind::End)],
        Shape::Text(_) => vec![Handle::new(
            rotate_handle_position(&shape.bounding_box()),
            HandleKind::Rotate,
        )],
        Shape::Freehand(_) => Vec::new(),
    }
}

/// Move the part of `shape` controlled by `handle` to `point`.
///
/// Returns false when the handle does not belong to the shape's kind.
pub fn apply_resize(shape: &mut Shape, handle: HandleKind, point: Point) -> bool {
    match (shape, handle) {
        (Shape::Rectangle(rect), HandleKind::BottomRight) => rect.end = point,
        (Shape::Circle(circle), HandleKind::End) => circle.end = point,
        (Shape::Line(line), HandleKind::Start) => line.start = point,
        (Shape::Line(line), HandleKind::End) => line.end = point,
        (Shape::Arrow(arrow), HandleKind::Start) => arrow.start = point,
        (Shape::Arrow(arrow), HandleKind::End) => arrow.end = point,
        _ => return false,
    }
    true
}

/// First handle of `shape` under `point`.
pub fn hit_test_handles(shape: &Shape, point: Point) -> Option<HandleKind> {
    get_handles(shape)
        .into_iter()
        .find(|h| h.hit_test(point, HANDLE_HIT_TOLERANCE))
        .map(|h| h.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Arrow, Circle, Freehand, Rectangle, ShapeId, Text};

    fn rect() -> Shape {
        Shape::Rectangle(Rectangle::new(
            ShapeId::from("r"),
            Point::new(100.0, 100.0),
            Point::new(200.0, 200.0),
            "#fff",
        ))
    }

    #[test]
    fn test_rectangle_handles() {
        let handles = get_handles(&rect());
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0], Handle::new(Point::new(200.0, 200.0), HandleKind::BottomRight));
        assert_eq!(handles[1], Handle::new(Point::new(150.0, 80.0), HandleKind::Rotate));
    }

    #[test]
    fn test_bottom_right_box_tolerance() {
        let shape = rect();
        assert_eq!(hit_test_handles(&shape, Point::new(207.0, 193.0)), Some(HandleKind::BottomRight));
        assert_eq!(hit_test_handles(&shape, Point::new(208.0, 208.0)), Some(HandleKind::BottomRight));
        assert_eq!(hit_test_handles(&shape, Point::new(209.0, 200.0)), None);
    }

    #[test]
    fn test_rotate_handle_is_circular() {
        let shape = rect();
        assert_eq!(hit_test_handles(&shape, Point::new(155.0, 85.0)), Some(HandleKind::Rotate));
        // Inside the 8px box but outside the 8px circle.
        assert_eq!(hit_test_handles(&shape, Point::new(157.0, 87.0)), None);
    }

    #[test]
    fn test_arrow_start_wins_when_endpoints_overlap() {
        let arrow = Shape::Arrow(Arrow::new(
            ShapeId::from("a"),
            Point::new(10.0, 10.0),
            Point::new(14.0, 10.0),
            "#fff",
        ));
        assert_eq!(hit_test_handles(&arrow, Point::new(12.0, 10.0)), Some(HandleKind::Start));
        assert_eq!(hit_test_handles(&arrow, Point::new(21.0, 10.0)), Some(HandleKind::End));
    }

    #[test]
    fn test_circle_only_far_endpoint() {
        let circle = Shape::Circle(Circle::new(
            ShapeId::from("c"),
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            "#fff",
        ));
        let handles = get_handles(&circle);
        assert_eq!(handles, vec![Handle::new(Point::new(50.0, 0.0), HandleKind::End)]);
        assert_eq!(hit_test_handles(&circle, Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_text_only_rotate() {
        let text = Shape::Text(Text::new(ShapeId::from("t"), Point::new(0.0, 100.0), "Hi", "#000"));
        let handles = get_handles(&text);
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].kind, HandleKind::Rotate);
        // Box spans y 84..100, so the handle sits at y 64.
        assert!((handles[0].position - Point::new(9.6, 64.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_apply_resize() {
        let mut shape = rect();
        assert!(apply_resize(&mut shape, HandleKind::BottomRight, Point::new(250.0, 260.0)));
        match &shape {
            Shape::Rectangle(r) => {
                assert_eq!(r.start, Point::new(100.0, 100.0));
                assert_eq!(r.end, Point::new(250.0, 260.0));
            }
            other => panic!("unexpected shape {:?}", other),
        }
        assert!(!apply_resize(&mut shape, HandleKind::Start, Point::ZERO));
        assert!(!apply_resize(&mut shape, HandleKind::Rotate, Point::ZERO));

        let mut arrow = Shape::Arrow(Arrow::new(ShapeId::from("a"), Point::ZERO, Point::new(5.0, 5.0), "#fff"));
        assert!(apply_resize(&mut arrow, HandleKind::Start, Point::new(-1.0, -2.0)));
        match &arrow {
            Shape::Arrow(a) => {
                assert_eq!(a.start, Point::new(-1.0, -2.0));
                assert_eq!(a.end, Point::new(5.0, 5.0));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_freehand_has_no_handles() {
        let f = Shape::Freehand(Freehand::new(ShapeId::from("f"), Point::ZERO, "#fff"));
        assert!(get_handles(&f).is_empty());
    }
}
