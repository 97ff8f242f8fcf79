//! Geometry mappers: pure `(snapshot, progress) -> primitives` functions.
//!
//! Each mapper is parameterized by the surface layout it was constructed
//! with. `progress` is the eased transition progress; decoration (opacity,
//! marker radius, gradient strength) scales with it while data geometry is
//! derived from the already interpolated snapshot.

mod axis;
mod grouped_bar;
mod ring;
mod series;
mod sparkline;

pub use axis::AxisStyle;
pub use grouped_bar::{GroupedBarConfig, GroupedBarMapper, ViewMode};
pub use ring::{RING_PALETTE, RingConfig, RingMapper};
pub use series::{SeriesConfig, SeriesMapper};
pub use sparkline::{SparklineConfig, SparklineMapper};

use crate::core::{Datum, Snapshot, SurfaceLayout};
use crate::interaction::HoverTarget;
use crate::render::{Definition, Primitive};

/// Min-max extent of the values being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Extent of `values`; an empty set spans `0..=1`.
    pub(crate) fn of(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                (min.min(value), max.max(value))
            });
        if min > max {
            return Self { min: 0.0, max: 1.0 };
        }
        Self { min, max }
    }

    /// Position of `value` between `min` (0) and `max` (1). A flat range
    /// spans 1 above `min`.
    ///
    /// Operands are halved before subtracting so values of opposite extreme
    /// magnitude cannot overflow the span.
    pub(crate) fn normalize(self, value: f64) -> f64 {
        let half_span = self.max / 2.0 - self.min / 2.0;
        if half_span > 0.0 {
            (value / 2.0 - self.min / 2.0) / half_span
        } else {
            value - self.min
        }
    }

    /// Value shown at the top of the axis.
    pub(crate) fn axis_max(self) -> f64 {
        if self.max > self.min {
            self.max
        } else {
            self.min + 1.0
        }
    }
}

/// Output of one mapping pass, consumed by `SceneBuilder`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedFrame {
    /// Shared resources, redeclared on every frame under stable ids.
    pub definitions: Vec<Definition>,
    /// Paint-ordered primitives.
    pub primitives: Vec<Primitive>,
    /// Interactive targets to register against the rebuilt scene.
    pub targets: Vec<HoverTarget>,
}

impl MappedFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, definition: Definition) {
        self.definitions.push(definition);
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend<I: IntoIterator<Item = Primitive>>(&mut self, primitives: I) {
        self.primitives.extend(primitives);
    }

    pub fn attach(&mut self, target: HoverTarget) {
        self.targets.push(target);
    }
}

/// Contract implemented by every chart kind.
pub trait GeometryMapper {
    type Datum: Datum;

    fn layout(&self) -> SurfaceLayout;

    /// Maps an interpolated snapshot at eased `progress` in `[0, 1]`.
    fn map(&self, snapshot: &Snapshot<Self::Datum>, progress: f64) -> MappedFrame;
}
