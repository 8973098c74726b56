//! Error types for cross-reference passes and slice loads

use thiserror::Error;

use crate::domain::{ImageId, ViewId};

/// Failure reported by an [`ImageLoader`](crate::core::ImageLoader)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to fetch {image_id}: {reason}")]
    Fetch { image_id: ImageId, reason: String },
    #[error("failed to decode {image_id}: {reason}")]
    Decode { image_id: ImageId, reason: String },
    /// The load was dropped before producing a result
    #[error("load of {0} was aborted")]
    Aborted(ImageId),
}

/// Reasons a view could not be cross-referenced
///
/// Only [`MissingSourcePlane`](CrossReferenceError::MissingSourcePlane)
/// aborts a whole pass; the other kinds affect a single target view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossReferenceError {
    #[error("source {view} has no image plane metadata (image: {})", display_image(.image_id))]
    MissingSourcePlane {
        view: ViewId,
        image_id: Option<ImageId>,
    },
    #[error("{view} has no slice stack")]
    MissingStackMetadata { view: ViewId },
    #[error("no slice in the stack of {view} has plane metadata")]
    NoUsableSlice { view: ViewId },
    #[error("failed to switch {view} to {image_id}: {source}")]
    LoadFailure {
        view: ViewId,
        image_id: ImageId,
        #[source]
        source: LoadError,
    },
}

impl CrossReferenceError {
    /// View the error applies to
    pub fn view(&self) -> ViewId {
        match self {
            CrossReferenceError::MissingSourcePlane { view, .. }
            | CrossReferenceError::MissingStackMetadata { view }
            | CrossReferenceError::NoUsableSlice { view }
            | CrossReferenceError::LoadFailure { view, .. } => *view,
        }
    }
}

fn display_image(image_id: &Option<ImageId>) -> &str {
    image_id.as_ref().map_or("none displayed", ImageId::as_str)
}
