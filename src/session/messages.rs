//! Message types for the probe session
//!
//! This module contains:
//! - DragEvent, the pointer input the interaction adapter consumes
//! - RedrawRequest, sent to the host when views need repainting

use crate::domain::{PointerPoints, ViewId};

/// Pointer drag lifecycle on a view (mouse or touch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Drag began at position
    Start { view: ViewId, points: PointerPoints },
    /// Pointer moved while dragging
    Move { view: ViewId, points: PointerPoints },
    /// Pointer released
    End { view: ViewId },
}

/// Request for the host to repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawRequest {
    /// Repaint every enabled view
    AllViews,
}
