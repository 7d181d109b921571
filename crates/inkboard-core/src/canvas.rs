//! Canvas session: pages, toolbar state and the interaction engine together.

use crate::board::{Board, Page};
use crate::config::{CanvasConfig, Theme, clamp_surface_size};
use crate::error::BoardResult;
use crate::event_handler::{EventHandler, EventOutcome};
use crate::ids::{IdGenerator, UuidIds};
use crate::input::{InputEvent, Key};
use crate::prompt::{NoPrompt, TextPrompt};
use crate::shapes::{Shape, ShapeId};
use crate::text_edit::TextEdit;
use crate::tools::{ToolContext, ToolKind};
use kurbo::Point;

/// What one input event changed, as reported to the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasUpdate {
    /// The frame needs repainting.
    pub redraw: bool,
    /// The active page published a new shape list.
    pub shapes_changed: bool,
    /// New selection, present only when the selection changed.
    pub selection: Option<Option<ShapeId>>,
}

impl CanvasUpdate {
    pub fn selection_changed(&self) -> bool {
        self.selection.is_some()
    }
}

/// The canvas state seen by the host application.
pub struct Canvas {
    board: Board,
    tools: ToolContext,
    handler: EventHandler,
    theme: Theme,
    size: (u32, u32),
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_collaborators(config, Box::new(UuidIds), Box::new(UuidIds), Box::new(NoPrompt))
    }

    /// Build with explicit id sources for shapes and pages, and a text prompt.
    pub fn with_collaborators(
        config: CanvasConfig,
        shape_ids: Box<dyn IdGenerator>,
        page_ids: Box<dyn IdGenerator>,
        prompt: Box<dyn TextPrompt>,
    ) -> Self {
        let tools = ToolContext {
            tool: ToolKind::None,
            color: config.initial_color(),
            font_family: config.font_family.clone(),
            font_size: config.font_size,
        };
        Self {
            board: Board::new(page_ids),
            tools,
            handler: EventHandler::new(shape_ids, prompt, config.text_entry),
            theme: config.theme,
            size: clamp_surface_size(config.width, config.height),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_page(&self) -> &Page {
        self.board.active_page()
    }

    /// Shapes of the active page in paint order.
    pub fn shapes(&self) -> &[Shape] {
        self.board.active_page().shapes()
    }

    pub fn selected(&self) -> Option<&ShapeId> {
        self.handler.selected()
    }

    pub fn preview_shape(&self) -> Option<&Shape> {
        self.handler.preview()
    }

    pub fn text_edit(&self) -> Option<&TextEdit> {
        self.handler.text_edit()
    }

    pub fn tools(&self) -> &ToolContext {
        &self.tools
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn background_color(&self) -> &'static str {
        self.theme.background()
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Publish an outcome to the active page and report it to the host.
    fn apply(&mut self, outcome: EventOutcome) -> CanvasUpdate {
        let shapes_changed = outcome.changed_shapes();
        if let Some(shapes) = outcome.shapes {
            self.board.active_page_mut().replace_shapes(shapes);
        }
        if let Some(selection) = &outcome.selection {
            log::trace!("Selection changed to {:?}", selection);
        }
        CanvasUpdate {
            redraw: outcome.redraw,
            shapes_changed,
            selection: outcome.selection,
        }
    }

    pub fn pointer_down(&mut self, pos: Point) -> CanvasUpdate {
        let outcome = self
            .handler
            .pointer_down(self.board.active_page().shapes(), &self.tools, pos);
        self.apply(outcome)
    }

    pub fn pointer_move(&mut self, pos: Point) -> CanvasUpdate {
        let outcome = self.handler.pointer_move(self.board.active_page().shapes(), pos);
        self.apply(outcome)
    }

    pub fn pointer_up(&mut self) -> CanvasUpdate {
        let outcome = self.handler.pointer_up(self.board.active_page().shapes());
        self.apply(outcome)
    }

    pub fn double_click(&mut self, pos: Point) -> CanvasUpdate {
        let outcome = self
            .handler
            .double_click(self.board.active_page().shapes(), &self.tools, pos);
        self.apply(outcome)
    }

    pub fn key_down(&mut self, key: &Key) -> CanvasUpdate {
        let outcome = self
            .handler
            .key_down(self.board.active_page().shapes(), &self.tools, key);
        self.apply(outcome)
    }

    pub fn blur(&mut self) -> CanvasUpdate {
        let outcome = self.handler.blur(self.board.active_page().shapes(), &self.tools);
        self.apply(outcome)
    }

    /// Open an inline edit for new text at `pos`.
    pub fn begin_text_entry(&mut self, pos: Point) -> CanvasUpdate {
        let outcome = self
            .handler
            .begin_text_entry(self.board.active_page().shapes(), &self.tools, pos);
        self.apply(outcome)
    }

    pub fn set_text_buffer(&mut self, text: &str) -> CanvasUpdate {
        let outcome = self.handler.set_text_buffer(text);
        self.apply(outcome)
    }

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> CanvasUpdate {
        match event {
            InputEvent::PointerDown(pos) => self.pointer_down(pos),
            InputEvent::PointerMove(pos) => self.pointer_move(pos),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::DoubleClick(pos) => self.double_click(pos),
            InputEvent::KeyDown(key) => self.key_down(&key),
            InputEvent::Blur => self.blur(),
        }
    }

    /// Resize the drawing surface. Shapes are not affected.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let size = clamp_surface_size(width, height);
        let changed = size != self.size;
        self.size = size;
        changed
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.tools.color = color.into();
    }

    pub fn set_font(&mut self, family: impl Into<String>, size: f64) {
        self.tools.font_family = family.into();
        self.tools.font_size = size;
    }

    /// Switch theme; the stroke color follows the theme's default.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.theme {
            return false;
        }
        self.theme = theme;
        self.tools.color = theme.default_color().to_string();
        true
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.set_theme(self.theme.toggle())
    }

    /// Finish any edit on the current page and forget the gesture and selection.
    fn leave_page(&mut self) {
        self.blur();
        self.handler.reset();
    }

    pub fn create_page(&mut self) -> String {
        self.leave_page();
        self.board.create_page()
    }

    pub fn select_page(&mut self, id: &str) -> BoardResult<()> {
        if id == self.board.active_page().id() {
            return Ok(());
        }
        self.leave_page();
        self.board.select_page(id)
    }

    pub fn rename_page(&mut self, id: &str, name: impl Into<String>) -> BoardResult<()> {
        self.board.rename_page(id, name)
    }

    /// Remove a page. Deleting the active page drops its open gesture, edit
    /// and selection; other pages leave them alone.
    pub fn delete_page(&mut self, id: &str) -> BoardResult<()> {
        let was_active = id == self.board.active_page().id();
        self.board.delete_page(id)?;
        if was_active {
            self.handler.reset();
        }
        Ok(())
    }

    /// Replace a page's shapes from CRUD JSON, skipping malformed records.
    pub fn load_page_json(&mut self, id: &str, json: &str) -> BoardResult<usize> {
        let count = self.board.load_page_json(id, json)?;
        if id == self.board.active_page().id() {
            self.handler.reset();
        }
        Ok(count)
    }
}
