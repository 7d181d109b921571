//! Shape definitions for the canvas.

mod arrow;
mod circle;
mod freehand;
mod line;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Text};

use crate::geometry::BoundingBox;
use crate::wire::ShapeRecord;
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, never-reused shape identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Shape discriminant, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[serde(rename = "pencil")]
    Freehand,
    Line,
    Circle,
    Rectangle,
    Arrow,
    Text,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Freehand => "pencil",
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pencil" => Some(ShapeKind::Freehand),
            "line" => Some(ShapeKind::Line),
            "circle" => Some(ShapeKind::Circle),
            "rectangle" => Some(ShapeKind::Rectangle),
            "arrow" => Some(ShapeKind::Arrow),
            "text" => Some(ShapeKind::Text),
            _ => None,
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &ShapeId;

    /// Unrotated axis-aligned bounds in canvas coordinates.
    fn bounding_box(&self) -> BoundingBox;

    /// Whether a point lies on the shape body. Rotation is not considered.
    fn hit_test(&self, point: Point) -> bool;

    /// Outline for stroking. Empty for shapes drawn as glyphs.
    fn to_path(&self) -> BezPath;

    /// Move every coordinate of the shape by `delta`.
    fn translate(&mut self, delta: Vec2);
}

/// A drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRecord", into = "ShapeRecord")]
pub enum Shape {
    Freehand(Freehand),
    Line(Line),
    Circle(Circle),
    Rectangle(Rectangle),
    Arrow(Arrow),
    Text(Text),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Freehand(s) => s,
            Shape::Line(s) => s,
            Shape::Circle(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Arrow(s) => s,
            Shape::Text(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Freehand(s) => s,
            Shape::Line(s) => s,
            Shape::Circle(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Arrow(s) => s,
            Shape::Text(s) => s,
        }
    }

    pub fn id(&self) -> &ShapeId {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Freehand(_) => ShapeKind::Freehand,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    /// Stored CSS color. Empty when the record carried none.
    pub fn color(&self) -> &str {
        match self {
            Shape::Freehand(s) => &s.color,
            Shape::Line(s) => &s.color,
            Shape::Circle(s) => &s.color,
            Shape::Rectangle(s) => &s.color,
            Shape::Arrow(s) => &s.color,
            Shape::Text(s) => &s.color,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.as_trait().bounding_box()
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.as_trait().hit_test(point)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    /// Copy of the shape moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Shape {
        let mut shape = self.clone();
        shape.translate(delta);
        shape
    }

    /// Rotation in degrees for kinds that carry one.
    pub fn rotation(&self) -> Option<f64> {
        match self {
            Shape::Rectangle(s) => Some(s.rotation),
            Shape::Text(s) => Some(s.rotation),
            _ => None,
        }
    }

    /// Set the rotation. Returns false for kinds that cannot rotate.
    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        match self {
            Shape::Rectangle(s) => {
                s.rotation = degrees;
                true
            }
            Shape::Text(s) => {
                s.rotation = degrees;
                true
            }
            _ => false,
        }
    }

    /// Rotation pivot: the center of the unrotated bounds.
    pub fn pivot(&self) -> Point {
        self.bounding_box().center()
    }

    /// Extend a shape being drawn to follow the pointer.
    pub fn extend_to(&mut self, point: Point) {
        match self {
            Shape::Freehand(s) => s.add_point(point),
            Shape::Line(s) => s.end = point,
            Shape::Circle(s) => s.end = point,
            Shape::Rectangle(s) => s.end = point,
            Shape::Arrow(s) => s.end = point,
            Shape::Text(_) => {}
        }
    }
}

/// Find a shape's position in a list by id.
pub fn index_of(shapes: &[Shape], id: &ShapeId) -> Option<usize> {
    shapes.iter().position(|s| s.id() == id)
}
