//! Pointer and keyboard interaction state machine.
//!
//! The handler borrows the active page's shape list for the duration of one
//! event and answers with an [`EventOutcome`]. Whenever shapes change the
//! outcome carries a complete replacement list; the caller swaps it in.
//!
//! ```text
//!            down on handle          down on body           down on empty
//!   Idle ─────────────────▶ Resizing / Rotating   Moving    Drawing (drawing tools)
//!    ▲                              │               │          │
//!    └──────────── up ──────────────┴───────────────┴──────────┘
//!
//!   Idle ── double-click on text / begin_text_entry ──▶ EditingText
//!   EditingText ── Enter / blur / next press ──▶ commit ──▶ Idle
//!   EditingText ── Escape ──▶ Idle
//! ```

use crate::config::TextEntryMode;
use crate::geometry::angle_degrees;
use crate::hit::hit_test;
use crate::ids::{IdGenerator, UuidIds};
use crate::input::Key;
use crate::prompt::{NoPrompt, TextPrompt};
use crate::selection::{HandleKind, apply_resize};
use crate::shapes::{Shape, ShapeId, Text, index_of};
use crate::text_edit::{TextEdit, TextEditResult};
use crate::tools::{ToolContext, ToolKind};
use kurbo::Point;

/// What the current gesture is doing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A new shape follows the pointer; it is not in the list yet.
    Drawing(Shape),
    Moving {
        id: ShapeId,
        last: Point,
    },
    Resizing {
        id: ShapeId,
        handle: HandleKind,
        start: Point,
    },
    Rotating {
        id: ShapeId,
        pivot: Point,
    },
    EditingText(TextEdit),
}

impl InteractionState {
    fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Drawing(_) => "drawing",
            InteractionState::Moving { .. } => "moving",
            InteractionState::Resizing { .. } => "resizing",
            InteractionState::Rotating { .. } => "rotating",
            InteractionState::EditingText(_) => "editing-text",
        }
    }
}

/// Effects of one event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventOutcome {
    /// Replacement shape list, present only when shapes changed.
    pub shapes: Option<Vec<Shape>>,
    /// New selection, present only when the selection changed.
    pub selection: Option<Option<ShapeId>>,
    /// The frame needs repainting (shapes, selection, preview or edit buffer).
    pub redraw: bool,
}

impl EventOutcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Default::default()
        }
    }

    fn with_shapes(shapes: Vec<Shape>) -> Self {
        Self {
            shapes: Some(shapes),
            redraw: true,
            ..Default::default()
        }
    }

    fn with_selection(selection: Option<Option<ShapeId>>) -> Self {
        Self {
            redraw: true,
            selection,
            ..Default::default()
        }
    }

    /// Combine with the outcome of a later step of the same event.
    fn then(self, later: EventOutcome) -> Self {
        Self {
            shapes: later.shapes.or(self.shapes),
            selection: later.selection.or(self.selection),
            redraw: self.redraw || later.redraw,
        }
    }

    /// Whether the event changed any shape.
    pub fn changed_shapes(&self) -> bool {
        self.shapes.is_some()
    }
}

/// Copy the list, apply `edit` to the shape with `id`, and return the copy.
///
/// Nothing is emitted when the shape is gone or `edit` reports no change.
fn update_shape(shapes: &[Shape], id: &ShapeId, edit: impl FnOnce(&mut Shape) -> bool) -> EventOutcome {
    let Some(index) = index_of(shapes, id) else {
        log::debug!("Shape {} no longer exists, ignoring update", id);
        return EventOutcome::default();
    };
    let mut next = shapes.to_vec();
    if edit(&mut next[index]) {
        EventOutcome::with_shapes(next)
    } else {
        EventOutcome::default()
    }
}

/// Turns pointer and keyboard events into shape edits.
pub struct EventHandler {
    state: InteractionState,
    selected: Option<ShapeId>,
    ids: Box<dyn IdGenerator>,
    prompt: Box<dyn TextPrompt>,
    text_entry: TextEntryMode,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Box::new(UuidIds), Box::new(NoPrompt), TextEntryMode::Prompt)
    }
}

impl EventHandler {
    pub fn new(ids: Box<dyn IdGenerator>, prompt: Box<dyn TextPrompt>, text_entry: TextEntryMode) -> Self {
        Self {
            state: InteractionState::Idle,
            selected: None,
            ids,
            prompt,
            text_entry,
        }
    }

    pub fn selected(&self) -> Option<&ShapeId> {
        self.selected.as_ref()
    }

    /// Replace the selection from outside (e.g. after loading a page).
    pub fn select(&mut self, id: Option<ShapeId>) {
        self.selected = id;
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    /// Shape being drawn, for the live preview.
    pub fn preview(&self) -> Option<&Shape> {
        match &self.state {
            InteractionState::Drawing(shape) => Some(shape),
            _ => None,
        }
    }

    /// Open text edit, for drawing the edit buffer.
    pub fn text_edit(&self) -> Option<&TextEdit> {
        match &self.state {
            InteractionState::EditingText(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn text_entry_mode(&self) -> TextEntryMode {
        self.text_entry
    }

    pub fn set_text_entry_mode(&mut self, mode: TextEntryMode) {
        self.text_entry = mode;
    }

    fn transition(&mut self, next: InteractionState) {
        log::debug!("Interaction {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Set the selection, returning the change if there was one.
    fn set_selection(&mut self, id: Option<ShapeId>) -> Option<Option<ShapeId>> {
        if self.selected == id {
            return None;
        }
        self.selected = id.clone();
        Some(id)
    }

    pub fn pointer_down(&mut self, shapes: &[Shape], tools: &ToolContext, pos: Point) -> EventOutcome {
        let committed = self.commit_text(shapes, tools);
        if !self.is_idle() {
            // Missed pointer-up: the unfinished gesture is dropped.
            self.transition(InteractionState::Idle);
        }
        let pressed = {
            let current = committed.shapes.as_deref().unwrap_or(shapes);
            self.press(current, tools, pos)
        };
        committed.then(pressed)
    }

    fn press(&mut self, shapes: &[Shape], tools: &ToolContext, pos: Point) -> EventOutcome {
        if let Some(hit) = hit_test(pos, shapes, self.selected.as_ref()) {
            let selection = self.set_selection(Some(hit.id.clone()));
            let next = match hit.handle {
                Some(HandleKind::Rotate) => match index_of(shapes, &hit.id) {
                    Some(index) => InteractionState::Rotating {
                        pivot: shapes[index].pivot(),
                        id: hit.id,
                    },
                    None => InteractionState::Idle,
                },
                Some(handle) => InteractionState::Resizing {
                    id: hit.id,
                    handle,
                    start: pos,
                },
                None => InteractionState::Moving { id: hit.id, last: pos },
            };
            self.transition(next);
            return EventOutcome::with_selection(selection);
        }

        match tools.tool {
            ToolKind::Text => match self.text_entry {
                TextEntryMode::Prompt => self.prompt_text(shapes, tools, pos),
                TextEntryMode::Inline => {
                    self.transition(InteractionState::EditingText(TextEdit::new_text(pos, tools.font_size)));
                    EventOutcome::redraw()
                }
            },
            tool if tool.draws_shape() => {
                let id = self.ids.next_shape_id();
                match tool.begin_shape(id, pos, &tools.color) {
                    Some(shape) => {
                        self.transition(InteractionState::Drawing(shape));
                        EventOutcome::redraw()
                    }
                    None => EventOutcome::default(),
                }
            }
            _ => EventOutcome::with_selection(self.set_selection(None)),
        }
    }

    /// Ask the prompt for new text and place it at `pos`.
    fn prompt_text(&mut self, shapes: &[Shape], tools: &ToolContext, pos: Point) -> EventOutcome {
        let Some(answer) = self.prompt.request_text("") else {
            return EventOutcome::default();
        };
        let content = answer.trim();
        if content.is_empty() {
            return EventOutcome::default();
        }
        let mut next = shapes.to_vec();
        next.push(self.new_text(pos, content, tools));
        EventOutcome::with_shapes(next)
    }

    fn new_text(&mut self, pos: Point, content: &str, tools: &ToolContext) -> Shape {
        Shape::Text(
            Text::new(self.ids.next_shape_id(), pos, content, tools.color.as_str())
                .with_font(tools.font_family.as_str(), tools.font_size),
        )
    }

    pub fn pointer_move(&mut self, shapes: &[Shape], pos: Point) -> EventOutcome {
        match &mut self.state {
            InteractionState::Idle | InteractionState::EditingText(_) => EventOutcome::default(),
            InteractionState::Drawing(shape) => {
                shape.extend_to(pos);
                EventOutcome::redraw()
            }
            InteractionState::Moving { id, last } => {
                let delta = pos - *last;
                let outcome = update_shape(shapes, id, |shape| {
                    shape.translate(delta);
                    true
                });
                if outcome.changed_shapes() {
                    *last = pos;
                }
                outcome
            }
            InteractionState::Resizing { id, handle, .. } => {
                let handle = *handle;
                update_shape(shapes, id, |shape| apply_resize(shape, handle, pos))
            }
            InteractionState::Rotating { id, pivot } => {
                let angle = angle_degrees(*pivot, pos);
                update_shape(shapes, id, |shape| shape.set_rotation(angle))
            }
        }
    }

    pub fn pointer_up(&mut self, shapes: &[Shape]) -> EventOutcome {
        match std::mem::take(&mut self.state) {
            InteractionState::Drawing(shape) => {
                log::debug!("Interaction drawing -> idle, adding {} {}", shape.kind().name(), shape.id());
                let mut next = shapes.to_vec();
                next.push(shape);
                EventOutcome::with_shapes(next)
            }
            // An open edit outlives the gesture that opened it.
            edit @ InteractionState::EditingText(_) => {
                self.state = edit;
                EventOutcome::default()
            }
            InteractionState::Idle => EventOutcome::default(),
            gesture => {
                log::debug!("Interaction {} -> idle", gesture.name());
                EventOutcome::default()
            }
        }
    }

    /// Double-click on a text shape opens it for editing.
    pub fn double_click(&mut self, shapes: &[Shape], tools: &ToolContext, pos: Point) -> EventOutcome {
        let committed = self.commit_text(shapes, tools);
        let opened = {
            let current = committed.shapes.as_deref().unwrap_or(shapes);
            let text = hit_test(pos, current, self.selected.as_ref())
                .and_then(|hit| index_of(current, &hit.id))
                .and_then(|index| match &current[index] {
                    Shape::Text(text) => Some(TextEdit::existing(
                        text.id.clone(),
                        text.position,
                        &text.text,
                        text.font_size,
                    )),
                    _ => None,
                });
            match text {
                Some(edit) => {
                    self.transition(InteractionState::EditingText(edit));
                    EventOutcome::redraw()
                }
                None => EventOutcome::default(),
            }
        };
        committed.then(opened)
    }

    /// Open an inline edit for new text at `pos`.
    pub fn begin_text_entry(&mut self, shapes: &[Shape], tools: &ToolContext, pos: Point) -> EventOutcome {
        let committed = self.commit_text(shapes, tools);
        self.transition(InteractionState::EditingText(TextEdit::new_text(pos, tools.font_size)));
        committed.then(EventOutcome::redraw())
    }

    /// Replace the edit buffer wholesale. Ignored when no edit is open.
    pub fn set_text_buffer(&mut self, text: &str) -> EventOutcome {
        match &mut self.state {
            InteractionState::EditingText(edit) => {
                edit.set_buffer(text);
                EventOutcome::redraw()
            }
            _ => EventOutcome::default(),
        }
    }

    pub fn key_down(&mut self, shapes: &[Shape], tools: &ToolContext, key: &Key) -> EventOutcome {
        let edit_result = match &mut self.state {
            InteractionState::EditingText(edit) => Some(edit.handle_key(key)),
            _ => None,
        };
        match edit_result {
            Some(TextEditResult::Handled) => EventOutcome::redraw(),
            Some(TextEditResult::Commit) => self.commit_text(shapes, tools),
            Some(TextEditResult::Cancel) => {
                self.transition(InteractionState::Idle);
                EventOutcome::redraw()
            }
            Some(TextEditResult::NotHandled) => EventOutcome::default(),
            None if self.is_idle() && key.is_delete() => self.delete_selected(shapes),
            None => EventOutcome::default(),
        }
    }

    fn delete_selected(&mut self, shapes: &[Shape]) -> EventOutcome {
        let Some(id) = self.selected.take() else {
            return EventOutcome::default();
        };
        log::debug!("Deleting shape {}", id);
        let mut outcome = EventOutcome::with_selection(Some(None));
        if index_of(shapes, &id).is_some() {
            outcome.shapes = Some(shapes.iter().filter(|s| s.id() != &id).cloned().collect());
        }
        outcome
    }

    /// Focus left the canvas: commit an open edit.
    pub fn blur(&mut self, shapes: &[Shape], tools: &ToolContext) -> EventOutcome {
        self.commit_text(shapes, tools)
    }

    /// Close an open text edit, writing its trimmed buffer.
    ///
    /// An existing shape takes the text even when it is empty. New text is
    /// only added when something was typed.
    fn commit_text(&mut self, shapes: &[Shape], tools: &ToolContext) -> EventOutcome {
        let edit = match &self.state {
            InteractionState::EditingText(edit) => edit.clone(),
            _ => return EventOutcome::default(),
        };
        self.transition(InteractionState::Idle);
        let content = edit.committed_text();
        let outcome = match &edit.id {
            Some(id) => update_shape(shapes, id, |shape| match shape {
                Shape::Text(text) => {
                    text.text = content.to_string();
                    true
                }
                _ => false,
            }),
            None if content.is_empty() => EventOutcome::default(),
            None => {
                let mut next = shapes.to_vec();
                next.push(self.new_text(edit.position, content, tools));
                EventOutcome::with_shapes(next)
            }
        };
        EventOutcome::redraw().then(outcome)
    }

    /// Drop any gesture or open edit without applying it, and clear the selection.
    pub fn reset(&mut self) -> EventOutcome {
        self.transition(InteractionState::Idle);
        EventOutcome::with_selection(self.set_selection(None))
    }
}
