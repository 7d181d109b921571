//! Hit testing: which shape, and which handle, is under the pointer.

use crate::selection::{HandleKind, hit_test_handles};
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: ShapeId,
    /// Set when the pointer is on a handle of the selected shape.
    pub handle: Option<HandleKind>,
}

/// Resolve what is under `point`.
///
/// Handles of the selected shape are tested before any shape body, so they
/// stay reachable when another shape is drawn over them. Bodies are scanned
/// from the top of the paint order down.
pub fn hit_test(point: Point, shapes: &[Shape], selected: Option<&ShapeId>) -> Option<Hit> {
    if let Some(shape) = selected.and_then(|id| shapes.iter().find(|s| s.id() == id)) {
        if let Some(handle) = hit_test_handles(shape, point) {
            return Some(Hit {
                id: shape.id().clone(),
                handle: Some(handle),
            });
        }
    }

    shapes
        .iter()
        .rev()
        .find(|s| s.hit_test(point))
        .map(|s| Hit {
            id: s.id().clone(),
            handle: None,
        })
}
