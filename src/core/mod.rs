//! Cross-reference core
//!
//! This module contains:
//! - Collaborator traits the host viewer implements
//! - Per-view marker registration slots
//! - The cross-reference coordinator
//! - Task spawning helpers

pub mod coordinator;
#[cfg(test)]
pub(crate) mod fakes;
pub mod host;
pub mod overlay;
pub mod spawn;

pub use coordinator::{CrossReferenceCoordinator, PassReport};
pub use host::{ImageLoader, MarkerCanvas, MarkerPoint, MetadataProvider, ViewRegistry};
pub use overlay::{MarkerRegistration, OverlaySlots, PassTicket};
pub use spawn::TokioLocalSpawner;
