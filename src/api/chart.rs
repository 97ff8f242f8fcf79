use tracing::{debug, trace, warn};

use crate::animation::{
    FrameHandle, FrameHost, FrameScheduler, ManualFrameHost, SchedulerState, Transition,
};
use crate::core::{Snapshot, SnapshotChange, SurfaceLayout};
use crate::error::ChartResult;
use crate::interaction::{HitRegistry, HoverChange, HoverController, HoverState};
use crate::mapping::{
    GeometryMapper, GroupedBarConfig, GroupedBarMapper, RingConfig, RingMapper, SeriesConfig,
    SeriesMapper, SparklineConfig, SparklineMapper, ViewMode,
};
use crate::render::{Scene, SceneBuilder, Surface, TargetId};

use super::ChartOptions;

/// Instance-scoped mutable state: snapshots, scheduler, hover and the
/// retained scene.
#[derive(Debug)]
struct ChartState<T> {
    /// Last accepted snapshot; `None` until the first `update`.
    target: Option<Snapshot<T>>,
    /// Snapshot currently drawn (interpolated while a transition runs).
    displayed: Snapshot<T>,
    /// Eased progress the current scene was mapped with.
    displayed_progress: f64,
    scheduler: FrameScheduler<T>,
    hover: HoverState,
    hits: HitRegistry,
    scene: Scene,
    disposed: bool,
}

/// One animated chart bound to a drawing surface and a frame host.
///
/// `update` compares the incoming snapshot with the previous one and starts
/// a transition from whatever is on screen; frame callbacks delivered through
/// `on_frame` redraw the scene until the transition settles. Runtime
/// operations never fail: dropped work is logged instead.
pub struct Chart<M: GeometryMapper, S: Surface, H: FrameHost> {
    mapper: M,
    surface: S,
    host: H,
    options: ChartOptions,
    state: ChartState<M::Datum>,
}

pub type SeriesChart<S, H> = Chart<SeriesMapper, S, H>;
pub type RingChart<S, H> = Chart<RingMapper, S, H>;
pub type GroupedBarChart<S, H> = Chart<GroupedBarMapper, S, H>;
pub type SparklineChart<S, H> = Chart<SparklineMapper, S, H>;

impl<M: GeometryMapper, S: Surface, H: FrameHost> Chart<M, S, H> {
    pub fn new(surface: S, host: H, mapper: M, options: ChartOptions) -> ChartResult<Self> {
        let options = options.validate()?;
        let layout = mapper.layout().validate()?;
        debug!(
            width = layout.width,
            height = layout.height,
            duration_ms = options.transition_duration_ms,
            "construct chart"
        );
        Ok(Self {
            mapper,
            surface,
            host,
            options,
            state: ChartState {
                target: None,
                displayed: Snapshot::default(),
                displayed_progress: 1.0,
                scheduler: FrameScheduler::new(),
                hover: HoverState::default(),
                hits: HitRegistry::new(),
                scene: Scene::new(layout),
                disposed: false,
            },
        })
    }

    /// Replaces the chart data.
    ///
    /// The first snapshot is drawn immediately at full progress. Later
    /// snapshots equal to the previous one are ignored; anything else starts
    /// a transition from the currently displayed snapshot, superseding a
    /// transition still in flight.
    pub fn update(&mut self, snapshot: Snapshot<M::Datum>) {
        if self.state.disposed {
            warn!(points = snapshot.len(), "ignoring update on disposed chart");
            return;
        }

        let previous = self.state.target.as_ref();
        let Some(change) = previous.map(|previous| previous.compare(&snapshot)) else {
            debug!(points = snapshot.len(), "initial mount");
            self.state.displayed = snapshot.clone();
            self.state.target = Some(snapshot);
            self.redraw(1.0);
            return;
        };
        debug!(?change, points = snapshot.len(), "snapshot update");
        if change == SnapshotChange::Unchanged {
            return;
        }

        let transition = Transition::new(
            self.state.displayed.clone(),
            snapshot.clone(),
            self.options.transition_duration_ms,
            self.options.easing,
        );
        self.state.target = Some(snapshot);
        self.state.scheduler.start(transition, &mut self.host);
    }

    /// Frame callback. Returns `true` when a frame was drawn.
    ///
    /// Stale handles, disposed charts and detached surfaces are no-ops; a
    /// detached surface also cancels the running transition.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.state.disposed {
            trace!(handle = handle.raw(), "frame after dispose ignored");
            return false;
        }
        if !self.surface.is_attached() {
            if self.state.scheduler.cancel(&mut self.host) {
                debug!("surface detached, transition cancelled");
            }
            return false;
        }
        let Some(tick) = self.state.scheduler.tick(handle, &mut self.host) else {
            return false;
        };
        self.state.displayed = tick.snapshot;
        self.redraw(tick.eased);
        true
    }

    /// Cancels any in-flight transition and detaches every hover target.
    /// Idempotent.
    pub fn dispose(&mut self) {
        if self.state.disposed {
            return;
        }
        self.state.scheduler.cancel(&mut self.host);
        self.state.hits.clear();
        HoverController::reset(&mut self.state.hover);
        self.state.scene.remove_tooltips();
        self.state.disposed = true;
        debug!("chart disposed");
    }

    pub fn pointer_enter(&mut self, id: TargetId) -> HoverChange {
        if self.state.disposed {
            return HoverChange::None;
        }
        let state = &mut self.state;
        let change = HoverController::enter(&mut state.hover, &mut state.scene, &state.hits, id);
        self.present_if_changed(change)
    }

    pub fn pointer_leave(&mut self, id: TargetId) -> HoverChange {
        if self.state.disposed {
            return HoverChange::None;
        }
        let change = HoverController::leave(&mut self.state.hover, &mut self.state.scene, id);
        self.present_if_changed(change)
    }

    /// Hit-tests a raw pointer position against the current targets.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> HoverChange {
        if self.state.disposed {
            return HoverChange::None;
        }
        let state = &mut self.state;
        let change =
            HoverController::pointer_move(&mut state.hover, &mut state.scene, &state.hits, x, y);
        self.present_if_changed(change)
    }

    pub fn pointer_exit(&mut self) -> HoverChange {
        if self.state.disposed {
            return HoverChange::None;
        }
        let change = HoverController::pointer_exit(&mut self.state.hover, &mut self.state.scene);
        self.present_if_changed(change)
    }

    #[must_use]
    pub fn layout(&self) -> SurfaceLayout {
        self.mapper.layout()
    }

    #[must_use]
    pub fn options(&self) -> ChartOptions {
        self.options
    }

    #[must_use]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.state.scene
    }

    /// Last accepted snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot<M::Datum>> {
        self.state.target.as_ref()
    }

    /// Snapshot the current scene was drawn from.
    #[must_use]
    pub fn displayed(&self) -> &Snapshot<M::Datum> {
        &self.state.displayed
    }

    #[must_use]
    pub fn displayed_progress(&self) -> f64 {
        self.state.displayed_progress
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.state.scheduler.state()
    }

    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler<M::Datum> {
        &self.state.scheduler
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.state.hover
    }

    #[must_use]
    pub fn hit_registry(&self) -> &HitRegistry {
        &self.state.hits
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.disposed
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn redraw(&mut self, progress: f64) {
        let frame = self.mapper.map(&self.state.displayed, progress);
        let state = &mut self.state;
        HoverController::reset(&mut state.hover);
        SceneBuilder::rebuild(&mut state.scene, &mut state.hits, frame);
        state.displayed_progress = progress;
        self.present();
    }

    fn present_if_changed(&mut self, change: HoverChange) -> HoverChange {
        if change != HoverChange::None {
            self.present();
        }
        change
    }

    fn present(&mut self) {
        if !self.surface.is_attached() {
            trace!("surface detached, skipping present");
            return;
        }
        if let Err(err) = self.surface.present(&self.state.scene) {
            warn!(error = %err, "surface rejected scene");
        }
    }
}

impl<S: Surface, H: FrameHost> Chart<SeriesMapper, S, H> {
    pub fn series(
        surface: S,
        host: H,
        config: SeriesConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        Self::new(surface, host, SeriesMapper::new(config)?, options)
    }
}

impl<S: Surface, H: FrameHost> Chart<RingMapper, S, H> {
    pub fn ring(
        surface: S,
        host: H,
        config: RingConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        Self::new(surface, host, RingMapper::new(config)?, options)
    }
}

impl<S: Surface, H: FrameHost> Chart<SparklineMapper, S, H> {
    pub fn sparkline(
        surface: S,
        host: H,
        config: SparklineConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        Self::new(surface, host, SparklineMapper::new(config)?, options)
    }
}

impl<S: Surface, H: FrameHost> Chart<GroupedBarMapper, S, H> {
    pub fn grouped_bars(
        surface: S,
        host: H,
        config: GroupedBarConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        Self::new(surface, host, GroupedBarMapper::new(config)?, options)
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.mapper.view_mode()
    }

    /// Switches visible series and re-maps the displayed snapshot right away.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.state.disposed || self.mapper.view_mode() == mode {
            return;
        }
        self.mapper.set_view_mode(mode);
        debug!(?mode, "view mode changed");
        if self.state.target.is_some() {
            self.redraw(self.state.displayed_progress);
        }
    }
}

impl<M: GeometryMapper, S: Surface> Chart<M, S, ManualFrameHost> {
    /// Advances the manual clock and delivers every due frame. Returns the
    /// number of frames drawn.
    pub fn advance_frames(&mut self, delta_ms: f64) -> usize {
        let handles = self.host.advance(delta_ms);
        handles
            .into_iter()
            .filter(|handle| self.on_frame(*handle))
            .count()
    }

    /// Steps frames of `frame_ms` until the running transition completes.
    pub fn settle(&mut self, frame_ms: f64) -> usize {
        if !frame_ms.is_finite() || frame_ms <= 0.0 {
            return 0;
        }
        let mut drawn = 0;
        while self.state.scheduler.is_running() && !self.host.pending_frames().is_empty() {
            drawn += self.advance_frames(frame_ms);
        }
        drawn
    }
}
