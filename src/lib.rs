//! Synchronized probe cross-referencing for multi-viewport slice viewers
//!
//! A point picked on one view's slice is mapped into patient space; every
//! other view then switches to its slice nearest to that point and draws a
//! marker at the projected location on its next render.
//!
//! The host viewer supplies views, plane metadata, image loading and
//! drawing through the traits in [`crate::core::host`].

pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod locator;
pub mod metadata;
pub mod session;

pub use crate::config::{MarkerColor, MarkerStyle, ProbeConfig};
pub use crate::core::{
    CrossReferenceCoordinator, ImageLoader, MarkerCanvas, MarkerPoint, MetadataProvider,
    PassReport, TokioLocalSpawner, ViewRegistry,
};
pub use crate::error::{CrossReferenceError, LoadError};
pub use crate::locator::{LocatedSlice, SliceLocator};
pub use crate::metadata::MetadataStore;
pub use crate::session::{DragEvent, InteractionAdapter, ProbeTool, RedrawRequest};
