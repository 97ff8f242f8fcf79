mod defs;
mod null_surface;
mod primitives;
mod scene;
mod scene_builder;
mod svg;
mod tag;

pub use defs::{Definition, GradientStop};
pub use null_surface::NullSurface;
pub use primitives::{
    ArcGeometry, CircleGeometry, Color, Emphasis, LineGeometry, Paint, PathCommand, PathGeometry,
    Primitive, RectGeometry, Shape, Stroke, Style, TextGeometry, TextHAlign, TextVAlign,
};
pub use scene::Scene;
pub use scene_builder::{RebuildStats, SceneBuilder};
pub use svg::{SvgSurface, render_svg};
pub use tag::{BarSeries, PrimitiveTag, TargetId};

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive the fully rebuilt retained `Scene` so drawing code stays
/// isolated from chart data, animation and hover logic.
pub trait Surface {
    fn present(&mut self, scene: &Scene) -> ChartResult<()>;

    /// `false` once the underlying drawing handle is gone; pending frames
    /// become no-ops.
    fn is_attached(&self) -> bool {
        true
    }
}
