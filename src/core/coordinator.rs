//! Cross-reference passes across all open views
//!
//! A pass takes a point picked on a source view, maps it to patient space
//! and, for every other view, selects the nearest slice, switches to it if
//! needed and registers a one-shot marker at the projected point. Views are
//! independent: a slow or failed load on one view never holds up another.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawn, LocalSpawnExt};

use super::host::{ImageLoader, MarkerCanvas, MarkerPoint, MetadataProvider, ViewRegistry};
use super::overlay::{MarkerRegistration, OverlaySlots, PassTicket};
use crate::config::MarkerStyle;
use crate::domain::{
    Image, ImageId, ImagePlane, ImagePoint, Vector3, ViewId, image_point_to_patient_point,
    project_patient_point_to_image_plane,
};
use crate::error::{CrossReferenceError, LoadError};
use crate::locator::SliceLocator;

/// What a pass did to each target view, as known when the call returns
#[derive(Debug, Default)]
pub struct PassReport {
    /// Views whose marker was registered immediately
    pub marked: Vec<ViewId>,
    /// Views waiting on a slice load before their marker is registered
    pub loading: Vec<ViewId>,
    /// Views without a displayed image
    pub idle: Vec<ViewId>,
    /// Views that could not be cross-referenced
    pub skipped: Vec<CrossReferenceError>,
}

enum Outcome {
    Marked,
    Loading,
    Idle,
}

/// Coordinates cross-reference passes between a source view and all others
pub struct CrossReferenceCoordinator {
    views: Rc<dyn ViewRegistry>,
    metadata: Rc<dyn MetadataProvider>,
    loader: Rc<dyn ImageLoader>,
    spawner: Box<dyn LocalSpawn>,
    style: MarkerStyle,
    overlays: Rc<RefCell<OverlaySlots>>,
}

impl CrossReferenceCoordinator {
    pub fn new(
        views: Rc<dyn ViewRegistry>,
        metadata: Rc<dyn MetadataProvider>,
        loader: Rc<dyn ImageLoader>,
        spawner: impl LocalSpawn + 'static,
    ) -> Self {
        Self {
            views,
            metadata,
            loader,
            spawner: Box::new(spawner),
            style: MarkerStyle::default(),
            overlays: Rc::new(RefCell::new(OverlaySlots::new())),
        }
    }

    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: MarkerStyle) {
        self.style = style;
    }

    /// Pending marker for `view`, if any
    pub fn pending_marker(&self, view: ViewId) -> Option<MarkerRegistration> {
        self.overlays.borrow().pending(view).cloned()
    }

    /// Cross-reference `image_point` on `source` into every other view
    ///
    /// Fails only when the source slice has no plane metadata, in which case
    /// no view is touched. Per-view problems are logged and collected in the
    /// returned report.
    pub fn on_point_selected(
        &self,
        source: ViewId,
        image_point: ImagePoint,
    ) -> Result<PassReport, CrossReferenceError> {
        let source_plane = self.source_plane(source).inspect_err(|err| {
            log::warn!("Cannot cross-reference: {err}");
        })?;
        let patient_point = image_point_to_patient_point(image_point, &source_plane);
        log::debug!("Probe on {source} at {image_point:?} -> patient {patient_point:?}");

        let mut report = PassReport::default();
        for view in self.views.enabled_views() {
            if view == source {
                continue;
            }
            match self.reference_view(view, &patient_point) {
                Ok(Outcome::Marked) => report.marked.push(view),
                Ok(Outcome::Loading) => report.loading.push(view),
                Ok(Outcome::Idle) => report.idle.push(view),
                Err(err) => {
                    match err {
                        CrossReferenceError::LoadFailure { .. } => log::error!("{err}"),
                        _ => log::warn!("Skipping {view}: {err}"),
                    }
                    report.skipped.push(err);
                }
            }
        }
        Ok(report)
    }

    /// Draw the pending marker for `view`, if any, and drop its registration
    ///
    /// Call after every completed render of `view`. Returns whether a marker
    /// was drawn.
    pub fn render_complete(&self, view: ViewId, canvas: &mut dyn MarkerCanvas) -> bool {
        // Release the borrow before calling into the host
        let registration = self.overlays.borrow_mut().take(view);
        let Some(registration) = registration else {
            return false;
        };
        log::debug!(
            "Drawing probe marker on {view} at {:?} ({})",
            registration.point,
            registration.image_id
        );
        canvas.draw_marker(view, MarkerPoint::Pixel(registration.point), &registration.style);
        true
    }

    fn source_plane(&self, source: ViewId) -> Result<ImagePlane, CrossReferenceError> {
        let image_id = self.views.current_image(source).map(|image| image.image_id);
        image_id
            .as_ref()
            .and_then(|id| self.metadata.image_plane(id))
            .ok_or(CrossReferenceError::MissingSourcePlane {
                view: source,
                image_id,
            })
    }

    fn reference_view(
        &self,
        view: ViewId,
        patient_point: &Vector3,
    ) -> Result<Outcome, CrossReferenceError> {
        if self.views.current_image(view).is_none() {
            log::debug!("Skipping {view}: no image displayed");
            return Ok(Outcome::Idle);
        }

        let stack = self
            .views
            .stack_of(view)
            .ok_or(CrossReferenceError::MissingStackMetadata { view })?;
        let located = SliceLocator::new(self.metadata.as_ref())
            .locate(patient_point, &stack)
            .ok_or(CrossReferenceError::NoUsableSlice { view })?;

        let ticket = self.overlays.borrow_mut().begin_pass(view);
        let projected = project_patient_point_to_image_plane(patient_point, &located.plane);
        let registration = MarkerRegistration {
            point: projected,
            image_id: located.image_id.clone(),
            style: self.style.clone(),
        };

        if located.index == stack.current_index {
            self.overlays.borrow_mut().register(&ticket, registration);
            return Ok(Outcome::Marked);
        }

        let image_id = located.image_id;
        if !self
            .overlays
            .borrow_mut()
            .await_load(&ticket, located.index, registration)
        {
            log::trace!("{view} already loading {image_id}, moving its marker");
            return Ok(Outcome::Loading);
        }

        log::debug!(
            "Switching {view} from slice {} to {} ({image_id})",
            stack.current_index,
            located.index,
        );
        let load = self.loader.load_image(&image_id, stack.cache_policy());
        let switch = SliceSwitch {
            ticket,
            image_id: image_id.clone(),
            views: Rc::clone(&self.views),
            overlays: Rc::clone(&self.overlays),
        };
        if let Err(err) = self.spawner.spawn_local(switch.run(load)) {
            self.overlays.borrow_mut().finish_load(&ticket);
            log::debug!("Spawn for {view} refused: {err}");
            return Err(CrossReferenceError::LoadFailure {
                view,
                image_id: image_id.clone(),
                source: LoadError::Aborted(image_id),
            });
        }
        Ok(Outcome::Loading)
    }
}

/// Continuation of a pass on one view once its slice load resolves
struct SliceSwitch {
    ticket: PassTicket,
    image_id: ImageId,
    views: Rc<dyn ViewRegistry>,
    overlays: Rc<RefCell<OverlaySlots>>,
}

impl SliceSwitch {
    async fn run(self, load: LocalBoxFuture<'static, Result<Image, LoadError>>) {
        let view = self.ticket.view();
        let result = load.await;
        let finished = self.overlays.borrow_mut().finish_load(&self.ticket);

        let image = match result {
            Ok(image) => image,
            Err(source) => {
                let err = CrossReferenceError::LoadFailure {
                    view,
                    image_id: self.image_id,
                    source,
                };
                log::error!("{err}");
                return;
            }
        };

        let Some((index, registration)) = finished else {
            log::debug!(
                "Ignoring load of {} for {view}: superseded by a newer probe",
                image.image_id
            );
            return;
        };

        if image.image_id != self.image_id {
            log::warn!(
                "Loader returned {} for {view} instead of {}, keeping current slice",
                image.image_id,
                self.image_id
            );
            return;
        }

        self.views.set_stack_index(view, index);
        // Registered before display so a render triggered from inside
        // display() already carries the marker
        self.overlays.borrow_mut().place(view, registration);
        self.views.display(view, image);
    }
}
