//! Renderer trait abstraction.

use crate::color::{SELECTION_COLOR, color_or};
use inkboard_core::canvas::Canvas;
use inkboard_core::shapes::{Shape, ShapeId, index_of};
use inkboard_core::text_edit::TextEdit;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Invalid font: {0}")]
    Font(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Shapes in paint order.
    pub shapes: &'a [Shape],
    pub selected: Option<&'a ShapeId>,
    /// Shape being drawn, painted above the list.
    pub preview: Option<&'a Shape>,
    /// Open inline text edit.
    pub text_edit: Option<&'a TextEdit>,
    pub background_color: Color,
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Context for `shapes` on a white background with nothing selected.
    pub fn new(shapes: &'a [Shape]) -> Self {
        Self {
            shapes,
            selected: None,
            preview: None,
            text_edit: None,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: SELECTION_COLOR,
        }
    }

    /// Context for the active page of a canvas session.
    pub fn for_canvas(canvas: &'a Canvas) -> Self {
        Self::new(canvas.shapes())
            .with_selected(canvas.selected())
            .with_preview(canvas.preview_shape())
            .with_text_edit(canvas.text_edit())
            .with_background(color_or(canvas.background_color(), Color::from_rgba8(255, 255, 255, 255)))
    }

    pub fn with_selected(mut self, selected: Option<&'a ShapeId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_preview(mut self, preview: Option<&'a Shape>) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_text_edit(mut self, edit: Option<&'a TextEdit>) -> Self {
        self.text_edit = edit;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// The selected shape, if it is still in the list.
    pub fn selected_shape(&self) -> Option<&'a Shape> {
        let id = self.selected?;
        index_of(self.shapes, id).map(|i| &self.shapes[i])
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Paint a full frame. The same context always yields the same output.
    fn render(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
