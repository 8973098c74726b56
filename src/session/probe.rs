//! Synced probe tool: drag input, local marker and cross-reference passes

use tokio::sync::mpsc::UnboundedSender;

use super::messages::{DragEvent, RedrawRequest};
use super::state::InteractionAdapter;
use crate::config::ProbeConfig;
use crate::core::{CrossReferenceCoordinator, MarkerCanvas, MarkerPoint, PassReport};
use crate::domain::{DragState, Image, ViewId};
use crate::error::CrossReferenceError;

/// Ties the interaction adapter to the coordinator
///
/// The host forwards drag events to [`ProbeTool::handle`], repaints when a
/// [`RedrawRequest`] arrives and calls [`ProbeTool::image_rendered`] after
/// every view render.
pub struct ProbeTool {
    adapter: InteractionAdapter,
    coordinator: CrossReferenceCoordinator,
}

impl ProbeTool {
    pub fn new(
        coordinator: CrossReferenceCoordinator,
        redraw_tx: UnboundedSender<RedrawRequest>,
        config: &ProbeConfig,
    ) -> Self {
        let mut tool = Self {
            adapter: InteractionAdapter::new(redraw_tx),
            coordinator,
        };
        tool.apply_config(config);
        tool
    }

    pub fn apply_config(&mut self, config: &ProbeConfig) {
        self.adapter.set_enabled(config.enabled);
        self.coordinator.set_style(config.marker.clone());
    }

    pub fn handle(&mut self, event: DragEvent) {
        self.adapter.handle(event);
    }

    pub fn drag_state(&self) -> DragState {
        self.adapter.drag_state()
    }

    pub fn coordinator(&self) -> &CrossReferenceCoordinator {
        &self.coordinator
    }

    /// Render hook for `view`, which just finished drawing `image`
    ///
    /// Draws any marker a previous pass registered for this view. If `view`
    /// is the drag source and the pointer is on the image, also draws the
    /// local marker and runs a cross-reference pass. Returns `None` when no
    /// pass ran.
    pub fn image_rendered(
        &self,
        view: ViewId,
        image: &Image,
        canvas: &mut dyn MarkerCanvas,
    ) -> Option<Result<PassReport, CrossReferenceError>> {
        self.coordinator.render_complete(view, canvas);

        let points = self.adapter.drag_state().points_for(view)?;
        if !image.contains_pixel(points.image.rounded()) {
            return None;
        }

        canvas.draw_marker(
            view,
            MarkerPoint::Canvas(points.canvas),
            self.coordinator.style(),
        );
        Some(self.coordinator.on_point_selected(view, points.image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MarkerColor, MarkerStyle};
    use crate::core::ViewRegistry;
    use crate::core::fakes::{FakeLoader, FakeViews, RecordingCanvas, axial_module, init_logging};
    use crate::domain::{CanvasPoint, ImagePoint, PointerPoints, Stack};
    use crate::metadata::MetadataStore;
    use futures::executor::LocalPool;
    use std::rc::Rc;
    use tokio::sync::mpsc;

    const SOURCE: ViewId = ViewId(1);
    const TARGET: ViewId = ViewId(2);

    struct Setup {
        tool: ProbeTool,
        views: Rc<FakeViews>,
        redraws: mpsc::UnboundedReceiver<RedrawRequest>,
        _pool: LocalPool,
    }

    fn setup(config: &ProbeConfig) -> Setup {
        init_logging();
        let mut store = MetadataStore::new();
        store.insert("src", axial_module(5.0));
        store.insert("t-0", axial_module(0.0));
        store.insert("t-5", axial_module(5.0));
        let views = Rc::new(FakeViews::new());
        views.add_view(SOURCE, Some(Image::new("src", 32, 32)), None);
        views.add_view(
            TARGET,
            Some(Image::new("t-5", 32, 32)),
            Some(Stack::new(["t-0", "t-5"]).with_current_index(1)),
        );
        let pool = LocalPool::new();
        let coordinator = CrossReferenceCoordinator::new(
            views.clone(),
            Rc::new(store),
            Rc::new(FakeLoader::new()),
            pool.spawner(),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        Setup {
            tool: ProbeTool::new(coordinator, tx, config),
            views,
            redraws: rx,
            _pool: pool,
        }
    }

    fn drag(view: ViewId, x: f64, y: f64) -> DragEvent {
        DragEvent::Move {
            view,
            points: PointerPoints::new(ImagePoint::new(x, y), CanvasPoint::new(x * 3.0, y * 3.0)),
        }
    }

    #[test]
    fn test_drag_draws_local_and_target_markers() {
        let mut s = setup(&ProbeConfig::default());
        s.tool.handle(drag(SOURCE, 10.0, 20.0));
        assert_eq!(s.redraws.try_recv(), Ok(RedrawRequest::AllViews));

        let mut canvas = RecordingCanvas::default();
        let source_image = s.views.current_image(SOURCE).unwrap();
        let report = s
            .tool
            .image_rendered(SOURCE, &source_image, &mut canvas)
            .unwrap()
            .unwrap();
        assert_eq!(report.marked, vec![TARGET]);

        let target_image = s.views.current_image(TARGET).unwrap();
        assert!(s.tool.image_rendered(TARGET, &target_image, &mut canvas).is_none());

        assert_eq!(
            canvas.markers,
            vec![
                (SOURCE, MarkerPoint::Canvas(CanvasPoint::new(30.0, 60.0))),
                (TARGET, MarkerPoint::Pixel(ImagePoint::new(10.0, 20.0))),
            ]
        );
    }

    #[test]
    fn test_out_of_bounds_point_skips_everything() {
        let mut s = setup(&ProbeConfig::default());
        s.tool.handle(drag(SOURCE, 31.6, 4.0));

        let mut canvas = RecordingCanvas::default();
        let source_image = s.views.current_image(SOURCE).unwrap();
        assert!(s.tool.image_rendered(SOURCE, &source_image, &mut canvas).is_none());
        assert!(canvas.markers.is_empty());
        assert!(s.tool.coordinator().pending_marker(TARGET).is_none());
    }

    #[test]
    fn test_half_pixel_edge_rounds_up() {
        let mut s = setup(&ProbeConfig::default());
        let mut canvas = RecordingCanvas::default();
        let source_image = s.views.current_image(SOURCE).unwrap();

        s.tool.handle(drag(SOURCE, -0.5, 4.0));
        assert!(s.tool.image_rendered(SOURCE, &source_image, &mut canvas).is_some());

        s.tool.handle(drag(SOURCE, -0.51, 4.0));
        assert!(s.tool.image_rendered(SOURCE, &source_image, &mut canvas).is_none());
        assert_eq!(canvas.markers.len(), 1);
    }

    #[test]
    fn test_non_source_render_does_not_probe() {
        let mut s = setup(&ProbeConfig::default());
        s.tool.handle(drag(SOURCE, 1.0, 1.0));
        let mut canvas = RecordingCanvas::default();
        let target_image = s.views.current_image(TARGET).unwrap();
        assert!(s.tool.image_rendered(TARGET, &target_image, &mut canvas).is_none());
        assert!(canvas.markers.is_empty());
    }

    #[test]
    fn test_drag_end_stops_probing() {
        let mut s = setup(&ProbeConfig::default());
        s.tool.handle(drag(SOURCE, 1.0, 1.0));
        s.tool.handle(DragEvent::End { view: SOURCE });
        assert!(!s.tool.drag_state().is_dragging());

        let mut canvas = RecordingCanvas::default();
        let source_image = s.views.current_image(SOURCE).unwrap();
        assert!(s.tool.image_rendered(SOURCE, &source_image, &mut canvas).is_none());
        assert!(canvas.markers.is_empty());
    }

    #[test]
    fn test_missing_source_plane_still_draws_local_marker() {
        let mut s = setup(&ProbeConfig::default());
        s.views.set_current_image(SOURCE, Some(Image::new("no-meta", 32, 32)));
        s.tool.handle(drag(SOURCE, 2.0, 2.0));

        let mut canvas = RecordingCanvas::default();
        let source_image = s.views.current_image(SOURCE).unwrap();
        let result = s.tool.image_rendered(SOURCE, &source_image, &mut canvas).unwrap();
        assert!(matches!(
            result,
            Err(CrossReferenceError::MissingSourcePlane { .. })
        ));
        assert_eq!(canvas.markers.len(), 1);
        assert!(s.tool.coordinator().pending_marker(TARGET).is_none());
    }

    #[test]
    fn test_config_style_and_enabled() {
        let style = MarkerStyle {
            color: MarkerColor {
                r: 0.0,
                g: 0.5,
                b: 1.0,
            },
            radius: 5.0,
            shadow: false,
        };
        let config = ProbeConfig {
            enabled: false,
            marker: style.clone(),
        };
        let mut s = setup(&config);
        s.tool.handle(drag(SOURCE, 1.0, 1.0));
        assert!(!s.tool.drag_state().is_dragging());
        assert!(s.redraws.try_recv().is_err());

        s.tool.apply_config(&ProbeConfig {
            enabled: true,
            marker: style.clone(),
        });
        s.tool.handle(drag(SOURCE, 1.0, 1.0));
        let mut canvas = RecordingCanvas::default();
        let source_image = s.views.current_image(SOURCE).unwrap();
        s.tool.image_rendered(SOURCE, &source_image, &mut canvas);
        let target_image = s.views.current_image(TARGET).unwrap();
        s.tool.image_rendered(TARGET, &target_image, &mut canvas);
        assert_eq!(canvas.styles, vec![style.clone(), style]);
    }
}
