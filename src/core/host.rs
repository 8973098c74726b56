//! Collaborator interfaces provided by the host viewer
//!
//! The cross-reference core never reaches into global registries; every
//! service it needs is injected through one of these traits.

use futures::future::LocalBoxFuture;

use crate::config::MarkerStyle;
use crate::domain::{
    CachePolicy, CanvasPoint, Image, ImageId, ImagePlane, ImagePlaneModule, ImagePoint, Stack,
    ViewId,
};
use crate::error::LoadError;

/// Access to the open views and their displayed content
pub trait ViewRegistry {
    /// All currently enabled views
    fn enabled_views(&self) -> Vec<ViewId>;

    /// Image currently displayed in `view`
    fn current_image(&self, view: ViewId) -> Option<Image>;

    /// Snapshot of the stack shown in `view`, if it is a steppable series
    fn stack_of(&self, view: ViewId) -> Option<Stack>;

    /// Move the stack of `view` to `index`
    fn set_stack_index(&self, view: ViewId, index: usize);

    /// Make `image` the visible content of `view` and schedule a render
    ///
    /// The view's existing viewport (zoom, pan, window/level) is kept.
    fn display(&self, view: ViewId, image: Image);
}

/// Lookup of per-slice plane metadata
pub trait MetadataProvider {
    fn image_plane_module(&self, image_id: &ImageId) -> Option<ImagePlaneModule>;

    /// Validated plane for `image_id`, `None` if missing or incomplete
    fn image_plane(&self, image_id: &ImageId) -> Option<ImagePlane> {
        self.image_plane_module(image_id)?.to_plane()
    }
}

/// Asynchronous slice loading
pub trait ImageLoader {
    fn load_image(
        &self,
        image_id: &ImageId,
        policy: CachePolicy,
    ) -> LocalBoxFuture<'static, Result<Image, LoadError>>;
}

/// Where a marker is placed on a view
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerPoint {
    /// Canvas pixels of the view
    Canvas(CanvasPoint),
    /// Pixel grid of the displayed image
    Pixel(ImagePoint),
}

/// Drawing surface a render pass hands to the core
pub trait MarkerCanvas {
    fn draw_marker(&mut self, view: ViewId, point: MarkerPoint, style: &MarkerStyle);
}
