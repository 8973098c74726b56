//! Pure domain types with minimal dependencies
//!
//! This module contains the geometry, plane metadata, stack and selection
//! types used throughout the crate. Types here hold no references to the
//! host viewer and perform no I/O.

pub mod geometry;
pub mod plane;
pub mod selection;
pub mod stack;

pub use geometry::*;
pub use plane::*;
pub use selection::*;
pub use stack::*;
