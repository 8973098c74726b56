//! Drag state tracking for the synced probe

use tokio::sync::mpsc::UnboundedSender;

use super::messages::{DragEvent, RedrawRequest};
use crate::domain::{DragState, PointerPoints, ViewId};

/// Turns pointer drags into [`DragState`] and redraw requests
///
/// IDLE becomes DRAGGING on drag start (or a move without a start), moves
/// update the pointer position, and drag end returns to IDLE. Every
/// transition asks the host to repaint all views.
#[derive(Debug)]
pub struct InteractionAdapter {
    drag: DragState,
    enabled: bool,
    redraw_tx: UnboundedSender<RedrawRequest>,
}

impl InteractionAdapter {
    pub fn new(redraw_tx: UnboundedSender<RedrawRequest>) -> Self {
        Self {
            drag: DragState::Idle,
            enabled: true,
            redraw_tx,
        }
    }

    /// Current drag state
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the probe; disabling ends any active drag
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled && self.drag.is_dragging() {
            self.drag = DragState::Idle;
            self.request_redraw();
        }
    }

    /// Dispatch a drag event
    pub fn handle(&mut self, event: DragEvent) {
        if !self.enabled {
            return;
        }
        match event {
            DragEvent::Start { view, points } => self.on_drag_start(view, points),
            DragEvent::Move { view, points } => self.on_drag_move(view, points),
            DragEvent::End { view } => self.on_drag_end(view),
        }
    }

    pub fn on_drag_start(&mut self, view: ViewId, points: PointerPoints) {
        log::debug!("Probe drag started on {view}");
        self.track(view, points);
    }

    pub fn on_drag_move(&mut self, view: ViewId, points: PointerPoints) {
        self.track(view, points);
    }

    pub fn on_drag_end(&mut self, view: ViewId) {
        if let Some(source) = self.drag.source() {
            if source != view {
                log::debug!("Drag on {source} ended from {view}");
            }
        }
        self.drag = DragState::Idle;
        self.request_redraw();
    }

    fn track(&mut self, view: ViewId, points: PointerPoints) {
        self.drag = DragState::Dragging {
            source: view,
            points,
        };
        self.request_redraw();
    }

    fn request_redraw(&self) {
        if self.redraw_tx.send(RedrawRequest::AllViews).is_err() {
            log::debug!("Redraw receiver closed, dropping request");
        }
    }
}
