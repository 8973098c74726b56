//! Drag gesture state for the synced probe

use super::geometry::{CanvasPoint, ImagePoint};
use super::stack::ViewId;

/// Pointer position reported by a drag event, in both coordinate spaces
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPoints {
    /// Position on the source slice's pixel grid
    pub image: ImagePoint,
    /// Position on the source view's canvas
    pub canvas: CanvasPoint,
}

impl PointerPoints {
    pub fn new(image: ImagePoint, canvas: CanvasPoint) -> Self {
        Self { image, canvas }
    }
}

/// Most recent pointer position while a drag is active
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Drag in progress on `source`
    Dragging { source: ViewId, points: PointerPoints },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// View the drag started on
    pub fn source(&self) -> Option<ViewId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { source, .. } => Some(*source),
        }
    }

    /// Latest pointer position, if `view` is the drag source
    pub fn points_for(&self, view: ViewId) -> Option<PointerPoints> {
        match self {
            DragState::Dragging { source, points } if *source == view => Some(*points),
            _ => None,
        }
    }
}
