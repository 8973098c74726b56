//! In-memory collaborators for tests

use std::cell::RefCell;
use std::collections::BTreeMap;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

use super::host::{ImageLoader, MarkerCanvas, MarkerPoint, ViewRegistry};
use crate::config::MarkerStyle;
use crate::domain::{CachePolicy, Image, ImageId, ImagePlaneModule, Stack, ViewId};
use crate::error::LoadError;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Axial slice at height `z` with unit spacing
pub fn axial_module(z: f64) -> ImagePlaneModule {
    ImagePlaneModule {
        image_position_patient: Some([0.0, 0.0, z]),
        row_cosines: Some([1.0, 0.0, 0.0]),
        column_cosines: Some([0.0, 1.0, 0.0]),
        row_pixel_spacing: Some(1.0),
        column_pixel_spacing: Some(1.0),
    }
}

#[derive(Default)]
struct FakeView {
    image: Option<Image>,
    stack: Option<Stack>,
}

/// View registry backed by a map, recording every effect
#[derive(Default)]
pub struct FakeViews {
    views: RefCell<BTreeMap<ViewId, FakeView>>,
    displayed: RefCell<Vec<(ViewId, ImageId)>>,
    index_updates: RefCell<Vec<(ViewId, usize)>>,
}

impl FakeViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_view(&self, view: ViewId, image: Option<Image>, stack: Option<Stack>) {
        self.views
            .borrow_mut()
            .insert(view, FakeView { image, stack });
    }

    pub fn set_current_image(&self, view: ViewId, image: Option<Image>) {
        self.views.borrow_mut().entry(view).or_default().image = image;
    }

    pub fn set_stack(&self, view: ViewId, stack: Option<Stack>) {
        self.views.borrow_mut().entry(view).or_default().stack = stack;
    }

    /// Move a stack without recording an effect
    pub fn seek(&self, view: ViewId, index: usize) {
        if let Some(stack) = self
            .views
            .borrow_mut()
            .get_mut(&view)
            .and_then(|v| v.stack.as_mut())
        {
            stack.current_index = index;
        }
    }

    pub fn stack(&self, view: ViewId) -> Stack {
        self.stack_of(view).expect("view has a stack")
    }

    pub fn displayed(&self) -> Vec<(ViewId, ImageId)> {
        self.displayed.borrow().clone()
    }

    pub fn index_updates(&self) -> Vec<(ViewId, usize)> {
        self.index_updates.borrow().clone()
    }
}

impl ViewRegistry for FakeViews {
    fn enabled_views(&self) -> Vec<ViewId> {
        self.views.borrow().keys().copied().collect()
    }

    fn current_image(&self, view: ViewId) -> Option<Image> {
        self.views.borrow().get(&view)?.image.clone()
    }

    fn stack_of(&self, view: ViewId) -> Option<Stack> {
        self.views.borrow().get(&view)?.stack.clone()
    }

    fn set_stack_index(&self, view: ViewId, index: usize) {
        self.index_updates.borrow_mut().push((view, index));
        self.seek(view, index);
    }

    fn display(&self, view: ViewId, image: Image) {
        self.displayed
            .borrow_mut()
            .push((view, image.image_id.clone()));
        self.set_current_image(view, Some(image));
    }
}

type PendingLoad = (ImageId, oneshot::Sender<Result<Image, LoadError>>);

/// Loader whose requests stay pending until a test resolves them
#[derive(Default)]
pub struct FakeLoader {
    requests: RefCell<Vec<(ImageId, CachePolicy)>>,
    pending: RefCell<Vec<PendingLoad>>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every load requested so far, in order
    pub fn requests(&self) -> Vec<(ImageId, CachePolicy)> {
        self.requests.borrow().clone()
    }

    /// Resolve the oldest pending load of `image_id`
    pub fn complete(&self, image_id: &str, result: Result<Image, LoadError>) {
        let mut pending = self.pending.borrow_mut();
        let position = pending
            .iter()
            .position(|(id, _)| id.as_str() == image_id)
            .expect("no pending load for image");
        let (_, tx) = pending.remove(position);
        let _ = tx.send(result);
    }

    /// Drop every pending load without resolving it
    pub fn abandon_all(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl ImageLoader for FakeLoader {
    fn load_image(
        &self,
        image_id: &ImageId,
        policy: CachePolicy,
    ) -> LocalBoxFuture<'static, Result<Image, LoadError>> {
        self.requests
            .borrow_mut()
            .push((image_id.clone(), policy));
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push((image_id.clone(), tx));
        let image_id = image_id.clone();
        async move {
            rx.await
                .unwrap_or_else(|_| Err(LoadError::Aborted(image_id)))
        }
        .boxed_local()
    }
}

/// Canvas that remembers where markers were drawn
#[derive(Default)]
pub struct RecordingCanvas {
    pub markers: Vec<(ViewId, MarkerPoint)>,
    pub styles: Vec<MarkerStyle>,
}

impl MarkerCanvas for RecordingCanvas {
    fn draw_marker(&mut self, view: ViewId, point: MarkerPoint, style: &MarkerStyle) {
        self.markers.push((view, point));
        self.styles.push(style.clone());
    }
}
