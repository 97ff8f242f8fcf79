use serde::{Deserialize, Serialize};

use crate::core::{SeriesPoint, Snapshot, SurfaceLayout, clamp_progress};
use crate::error::ChartResult;
use crate::render::{Color, PathGeometry, Primitive, Stroke};

use super::{GeometryMapper, MappedFrame, ValueRange};

/// Mini trend line configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineConfig {
    pub layout: SurfaceLayout,
    pub color: Color,
    pub stroke_width: f64,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            layout: SurfaceLayout::new(60.0, 20.0),
            color: Color::rgb8(0x3b, 0x82, 0xf6),
            stroke_width: 1.5,
        }
    }
}

/// Unlabeled, non-interactive polyline spanning the whole surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineMapper {
    config: SparklineConfig,
}

impl SparklineMapper {
    pub fn new(config: SparklineConfig) -> ChartResult<Self> {
        config.layout.validate()?;
        Ok(Self { config })
    }

    /// Wraps bare values, keyed by position.
    pub fn snapshot_from_values(values: &[f64]) -> ChartResult<Snapshot<SeriesPoint>> {
        Snapshot::new(
            values
                .iter()
                .enumerate()
                .map(|(index, value)| SeriesPoint::new(index.to_string(), *value))
                .collect(),
        )
    }
}

impl GeometryMapper for SparklineMapper {
    type Datum = SeriesPoint;

    fn layout(&self) -> SurfaceLayout {
        self.config.layout
    }

    fn map(&self, snapshot: &Snapshot<SeriesPoint>, progress: f64) -> MappedFrame {
        let mut frame = MappedFrame::new();
        if snapshot.is_empty() {
            return frame;
        }
        let layout = self.config.layout;
        let range = ValueRange::of(snapshot.iter().map(|point| point.value));
        let last = snapshot.len().saturating_sub(1);

        let points: Vec<(f64, f64)> = snapshot
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let x = if last == 0 {
                    layout.plot_left() + layout.plot_width() / 2.0
                } else {
                    layout.plot_left() + index as f64 / last as f64 * layout.plot_width()
                };
                let y = layout.plot_bottom() - range.normalize(point.value) * layout.plot_height();
                (x, y)
            })
            .collect();

        frame.push(
            Primitive::path(PathGeometry::polyline(&points))
                .with_stroke(Stroke::solid(self.config.color, self.config.stroke_width))
                .with_opacity(clamp_progress(progress)),
        );
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::{SparklineConfig, SparklineMapper};
    use crate::mapping::GeometryMapper;
    use crate::render::Shape;

    #[test]
    fn polyline_spans_the_surface() {
        let mapper = SparklineMapper::new(SparklineConfig::default()).expect("mapper");
        let snapshot = SparklineMapper::snapshot_from_values(&[3.0, 1.0, 5.0]).expect("snapshot");
        let frame = mapper.map(&snapshot, 1.0);
        assert_eq!(frame.primitives.len(), 1);
        let Shape::Path(path) = &frame.primitives[0].shape else {
            panic!("sparkline must be a path");
        };
        assert_eq!(path.vertices(), vec![(0.0, 10.0), (30.0, 20.0), (60.0, 0.0)]);
        assert!(frame.targets.is_empty());
    }

    #[test]
    fn flat_values_do_not_divide_by_zero() {
        let mapper = SparklineMapper::new(SparklineConfig::default()).expect("mapper");
        let snapshot = SparklineMapper::snapshot_from_values(&[2.0, 2.0]).expect("snapshot");
        let frame = mapper.map(&snapshot, 1.0);
        let Shape::Path(path) = &frame.primitives[0].shape else {
            panic!("sparkline must be a path");
        };
        assert!(path.vertices().iter().all(|&(_, y)| y == 20.0));
    }
}
