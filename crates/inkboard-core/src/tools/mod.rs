//! Tools and the drawing context supplied by the toolbar.

use crate::shapes::{
    Arrow, Circle, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Freehand, Line, Rectangle, Shape,
    ShapeId,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// No drawing tool: pointer presses select and move.
    #[default]
    None,
    Pencil,
    Line,
    Circle,
    Rectangle,
    Arrow,
    Text,
}

impl ToolKind {
    /// Whether a press on empty canvas starts a drag-to-draw gesture.
    pub fn draws_shape(self) -> bool {
        matches!(
            self,
            ToolKind::Pencil
                | ToolKind::Line
                | ToolKind::Circle
                | ToolKind::Rectangle
                | ToolKind::Arrow
        )
    }

    /// Seed the pending shape for a drawing gesture started at `point`.
    ///
    /// Start and end both sit at `point`; the pencil path holds just `point`.
    pub fn begin_shape(self, id: ShapeId, point: Point, color: &str) -> Option<Shape> {
        let shape = match self {
            ToolKind::Pencil => Shape::Freehand(Freehand::new(id, point, color)),
            ToolKind::Line => Shape::Line(Line::new(id, point, point, color)),
            ToolKind::Circle => Shape::Circle(Circle::new(id, point, point, color)),
            ToolKind::Rectangle => Shape::Rectangle(Rectangle::new(id, point, point, color)),
            ToolKind::Arrow => Shape::Arrow(Arrow::new(id, point, point, color)),
            ToolKind::None | ToolKind::Text => return None,
        };
        Some(shape)
    }
}

/// Tool, color and font chosen outside the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolContext {
    pub tool: ToolKind,
    /// CSS stroke color for new shapes.
    pub color: String,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self {
            tool: ToolKind::None,
            color: "#000000".to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ToolContext {
    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}
