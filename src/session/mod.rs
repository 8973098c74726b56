//! Probe session
//!
//! This module contains:
//! - Drag and redraw message types
//! - The interaction adapter tracking drag state
//! - The probe tool tying input, local marker and cross-referencing together

pub mod messages;
pub mod probe;
pub mod state;

pub use messages::{DragEvent, RedrawRequest};
pub use probe::ProbeTool;
pub use state::InteractionAdapter;
