//! Inkboard Core Library
//!
//! Platform-agnostic shape model, hit testing and interaction engine for the
//! inkboard drawing canvas. Rendering lives in `inkboard-render`.

pub mod board;
pub mod canvas;
pub mod config;
pub mod error;
pub mod event_handler;
pub mod geometry;
pub mod hit;
pub mod ids;
pub mod input;
pub mod prompt;
pub mod selection;
pub mod shapes;
pub mod text_edit;
pub mod tools;
pub mod wire;

pub use board::{Board, Page};
pub use canvas::{Canvas, CanvasUpdate};
pub use config::{CanvasConfig, TextEntryMode, Theme};
pub use error::{BoardError, BoardResult, ConfigError, ShapeError};
pub use event_handler::{EventHandler, EventOutcome, InteractionState};
pub use geometry::BoundingBox;
pub use hit::{Hit, hit_test};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use input::{ClickTracker, InputEvent, Key};
pub use prompt::{NoPrompt, ScriptedPrompt, TextPrompt};
pub use selection::{Handle, HandleKind, get_handles};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeTrait};
pub use text_edit::{TextEdit, TextEditResult};
pub use tools::{ToolContext, ToolKind};
pub use wire::{ShapeRecord, decode_shapes, encode_shapes};
