//! Geometry helpers shared by hit testing, handles and rendering.
//!
//! Every function here is total: degenerate inputs (zero-length segments,
//! empty polylines, zero-size boxes) produce a well-defined value.

use kurbo::{Point, Rect, Vec2};

/// Maximum distance, in pixels, at which a stroke counts as hit.
pub const STROKE_HIT_TOLERANCE: f64 = 6.0;

/// Width of a text glyph relative to the font size.
const TEXT_ADVANCE_RATIO: f64 = 0.6;

/// Length of each arrow head barb.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;

/// Angle between the arrow shaft and each barb.
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Distance from a point to the segment `a`..`b`.
///
/// A degenerate segment (`a == b`) reduces to the distance between points.
pub fn distance_point_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline.
///
/// Returns infinity when there are fewer than two points, so no segment exists.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| distance_point_to_segment(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// An axis-aligned box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Box spanned by two opposite corners, in any order.
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self {
            x: start.x.min(end.x),
            y: start.y.min(end.y),
            w: (end.x - start.x).abs(),
            h: (end.y - start.y).abs(),
        }
    }

    /// Smallest box containing all points; zero-size at the origin when empty.
    pub fn from_points(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        };
        let rect = points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |acc, p| {
                acc.union_pt(*p)
            });
        Self::from_rect(rect)
    }

    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Midpoint of the top edge.
    pub fn top_center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.w, self.y + self.h)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Approximate box for a run of text whose baseline starts at `(x, y)`.
///
/// Width is a fixed advance per character; the box sits above the baseline.
pub fn text_box(x: f64, y: f64, font_size: f64, char_count: usize) -> BoundingBox {
    let w = font_size * char_count.max(1) as f64 * TEXT_ADVANCE_RATIO;
    let h = font_size;
    BoundingBox::new(x, y - h, w, h)
}

/// Angle of `point` around `pivot`, in degrees.
pub fn angle_degrees(pivot: Point, point: Point) -> f64 {
    (point.y - pivot.y).atan2(point.x - pivot.x).to_degrees()
}

/// Rotate `point` around `pivot` by `degrees` (clockwise in screen space).
pub fn rotate_point(point: Point, pivot: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = point - pivot;
    pivot + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// The two barb end points of an arrow head drawn at `end`.
pub fn arrow_head(start: Point, end: Point) -> (Point, Point) {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let barb = |offset: f64| {
        let a = angle + offset;
        Point::new(
            end.x - ARROW_HEAD_LENGTH * a.cos(),
            end.y - ARROW_HEAD_LENGTH * a.sin(),
        )
    };
    (barb(-ARROW_HEAD_ANGLE), barb(ARROW_HEAD_ANGLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance_at_endpoints_and_midpoint() {
        let a = Point::new(3.0, -4.0);
        let b = Point::new(17.5, 22.0);
        assert!(distance_point_to_segment(a, a, b).abs() < 1e-9);
        assert!(distance_point_to_segment(b, a, b).abs() < 1e-9);
        assert!(distance_point_to_segment(a.midpoint(b), a, b).abs() < 1e-9);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((distance_point_to_segment(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        assert!((distance_point_to_segment(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-9);
        assert!((distance_point_to_segment(Point::new(-3.0, -4.0), a, b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Point::new(1.0, 1.0);
        let d = distance_point_to_segment(Point::new(4.0, 5.0), a, a);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_polyline_distance() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert!((point_to_polyline_dist(Point::new(12.0, 5.0), &pts) - 2.0).abs() < 1e-9);
        assert!(point_to_polyline_dist(Point::new(0.0, 0.0), &pts[..1]).is_infinite());
    }

    #[test]
    fn test_bounding_box_from_corners() {
        let bb = BoundingBox::from_corners(Point::new(150.0, 120.0), Point::new(50.0, 50.0));
        assert!((bb.x - 50.0).abs() < f64::EPSILON);
        assert!((bb.y - 50.0).abs() < f64::EPSILON);
        assert!((bb.w - 100.0).abs() < f64::EPSILON);
        assert!((bb.h - 70.0).abs() < f64::EPSILON);
        assert_eq!(bb.center(), Point::new(100.0, 85.0));
        assert!(bb.contains(Point::new(150.0, 120.0)));
        assert!(!bb.contains(Point::new(151.0, 120.0)));
    }

    #[test]
    fn test_bounding_box_from_points() {
        let bb = BoundingBox::from_points(&[
            Point::new(5.0, 8.0),
            Point::new(-2.0, 10.0),
            Point::new(3.0, 1.0),
        ]);
        assert_eq!(bb, BoundingBox::new(-2.0, 1.0, 7.0, 9.0));
        assert_eq!(BoundingBox::from_points(&[]), BoundingBox::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_text_box() {
        let bb = text_box(10.0, 40.0, 20.0, 5);
        assert!((bb.w - 60.0).abs() < 1e-9);
        assert!((bb.h - 20.0).abs() < 1e-9);
        assert!((bb.y - 20.0).abs() < 1e-9);

        // Empty text still occupies one character cell.
        let empty = text_box(0.0, 16.0, 16.0, 0);
        assert!((empty.w - 9.6).abs() < 1e-9);
    }

    #[test]
    fn test_angle_degrees() {
        let pivot = Point::new(100.0, 100.0);
        assert!((angle_degrees(pivot, Point::new(200.0, 100.0))).abs() < 1e-9);
        assert!((angle_degrees(pivot, Point::new(100.0, 200.0)) - 90.0).abs() < 1e-9);
        assert!((angle_degrees(pivot, Point::new(100.0, 0.0)) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_point_full_turn() {
        let pivot = Point::new(10.0, 10.0);
        let p = Point::new(30.0, 15.0);
        let a = rotate_point(p, pivot, 37.0);
        let b = rotate_point(p, pivot, 397.0);
        assert!((a - b).hypot() < 1e-9);
        let q = rotate_point(p, pivot, 90.0);
        assert!((q - Point::new(5.0, 30.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_arrow_head_barbs() {
        let (left, right) = arrow_head(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(((left - Point::new(100.0, 0.0)).hypot() - ARROW_HEAD_LENGTH).abs() < 1e-9);
        assert!((left.x - right.x).abs() < 1e-9);
        assert!((left.y + right.y).abs() < 1e-9);
        assert!(left.x < 100.0);
    }
}
