use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::core::{
    AXIS_LABEL_CHARS, Margins, SeriesPoint, Snapshot, SurfaceLayout, ValueFormat, clamp_progress,
    truncate_label,
};
use crate::error::ChartResult;
use crate::interaction::{HitShape, HoverTarget, TooltipLine, TooltipSpec};
use crate::render::{
    Color, Definition, Emphasis, GradientStop, PathGeometry, Primitive, PrimitiveTag, Stroke,
    TargetId,
};

use super::axis::{self, AxisStyle};
use super::{GeometryMapper, MappedFrame, ValueRange};

pub(crate) const AREA_GRADIENT_ID: &str = "area-gradient";
pub(crate) const GLOW_FILTER_ID: &str = "glow";

const MARKER_RADIUS: f64 = 5.0;
const HOVER_MARKER_RADIUS: f64 = 7.0;
const HALO_RADIUS: f64 = 8.0;
const HALO_OPACITY: f64 = 0.3;
const HOVER_HALO_OPACITY: f64 = 0.6;
const LINE_WIDTH: f64 = 3.0;
const TOOLTIP_WIDTH: f64 = 80.0;
const TOOLTIP_HEIGHT: f64 = 35.0;

/// Area + line chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub layout: SurfaceLayout,
    pub color: Color,
    /// Area gradient opacity at the top and bottom edge, at full progress.
    pub area_opacity: [f64; 2],
    pub glow_std_deviation: f64,
    pub axis: AxisStyle,
    pub y_format: ValueFormat,
    pub tooltip_format: ValueFormat,
    pub tooltip_background: Color,
    pub tooltip_label_color: Color,
    pub tooltip_value_color: Color,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            layout: SurfaceLayout::new(800.0, 400.0)
                .with_margins(Margins::new(40.0, 40.0, 60.0, 80.0)),
            color: Color::rgb8(0x63, 0x66, 0xf1),
            area_opacity: [0.8, 0.1],
            glow_std_deviation: 3.0,
            axis: AxisStyle {
                grid_color: Color::rgb8(0xe2, 0xe8, 0xf0),
                grid_dash: [2.0, 2.0],
                grid_opacity: 0.6,
                label_color: Color::rgb8(0x64, 0x74, 0x8b),
                label_font_size_px: 12.0,
            },
            y_format: ValueFormat::CurrencyThousands,
            tooltip_format: ValueFormat::Currency,
            tooltip_background: Color::rgb8(0x1f, 0x29, 0x37),
            tooltip_label_color: Color::WHITE,
            tooltip_value_color: Color::rgb8(0x10, 0xb9, 0x81),
        }
    }
}

/// Maps a series snapshot onto an area fill, a glowing line and one
/// hoverable marker per point.
///
/// x is spaced linearly by index; y is min-max normalized over the snapshot
/// being drawn, so the vertical scale follows the interpolated values.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMapper {
    config: SeriesConfig,
}

impl SeriesMapper {
    pub fn new(config: SeriesConfig) -> ChartResult<Self> {
        config.layout.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Screen position of every point, in snapshot order.
    #[must_use]
    pub fn project(&self, snapshot: &Snapshot<SeriesPoint>) -> Vec<(f64, f64)> {
        let layout = self.config.layout;
        let range = value_range(snapshot);
        let count = snapshot.len();
        snapshot
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let x = if count > 1 {
                    layout.plot_left() + layout.plot_width() / (count - 1) as f64 * index as f64
                } else {
                    layout.plot_left() + layout.plot_width() / 2.0
                };
                let y = layout.plot_bottom() - range.normalize(point.value) * layout.plot_height();
                (x, y)
            })
            .collect()
    }

    fn tooltip(&self, point: &SeriesPoint, x: f64, y: f64) -> TooltipSpec {
        let config = &self.config;
        TooltipSpec {
            x: x - TOOLTIP_WIDTH / 2.0,
            y: y - 50.0,
            width: TOOLTIP_WIDTH,
            height: TOOLTIP_HEIGHT,
            corner_radius: 6.0,
            background: config.tooltip_background,
            background_opacity: 0.9,
            lines: smallvec![
                TooltipLine {
                    text: point.label.clone(),
                    x,
                    y: y - 35.0,
                    font_size_px: 12.0,
                    bold: true,
                    color: config.tooltip_label_color,
                },
                TooltipLine {
                    text: config.tooltip_format.format(point.value),
                    x,
                    y: y - 20.0,
                    font_size_px: 11.0,
                    bold: false,
                    color: config.tooltip_value_color,
                },
            ],
        }
    }
}

impl GeometryMapper for SeriesMapper {
    type Datum = SeriesPoint;

    fn layout(&self) -> SurfaceLayout {
        self.config.layout
    }

    fn map(&self, snapshot: &Snapshot<SeriesPoint>, progress: f64) -> MappedFrame {
        let progress = clamp_progress(progress);
        let config = &self.config;
        let layout = config.layout;
        let mut frame = MappedFrame::new();

        frame.declare(Definition::linear(
            AREA_GRADIENT_ID,
            GradientStop::new(0.0, config.color, config.area_opacity[0] * progress),
            GradientStop::new(1.0, config.color, config.area_opacity[1] * progress),
        ));
        frame.declare(Definition::glow(GLOW_FILTER_ID, config.glow_std_deviation));
        frame.extend(axis::grid_lines(layout, &config.axis, progress));

        if snapshot.is_empty() {
            return frame;
        }

        let points = self.project(snapshot);

        let mut area = PathGeometry::new();
        area.move_to(layout.plot_left(), layout.plot_bottom());
        for &(x, y) in &points {
            area.line_to(x, y);
        }
        area.line_to(layout.plot_right(), layout.plot_bottom());
        area.close();
        frame.push(
            Primitive::path(area)
                .with_paint_ref(AREA_GRADIENT_ID)
                .with_opacity(progress),
        );

        frame.push(
            Primitive::path(PathGeometry::polyline(&points))
                .with_stroke(Stroke::solid(config.color, LINE_WIDTH))
                .with_filter(GLOW_FILTER_ID)
                .with_opacity(progress),
        );

        for (index, (point, &(x, y))) in snapshot.iter().zip(&points).enumerate() {
            let id = TargetId::Point(index);
            frame.push(
                Primitive::circle(x, y, HALO_RADIUS * progress)
                    .with_fill(config.color)
                    .with_opacity(HALO_OPACITY * progress)
                    .with_tag(PrimitiveTag::Decoration(id)),
            );
            frame.push(
                Primitive::circle(x, y, MARKER_RADIUS * progress)
                    .with_fill(Color::WHITE)
                    .with_stroke(Stroke::solid(config.color, LINE_WIDTH))
                    .with_tag(PrimitiveTag::Target(id)),
            );
            frame.attach(HoverTarget {
                id,
                hit: HitShape::Circle {
                    cx: x,
                    cy: y,
                    radius: HALO_RADIUS * progress,
                },
                emphasis: Emphasis::NONE.scaled(HOVER_MARKER_RADIUS / MARKER_RADIUS),
                decoration_emphasis: Some(Emphasis::NONE.with_opacity(HOVER_HALO_OPACITY)),
                tooltip: self.tooltip(point, x, y),
            });
        }

        for (point, &(x, _)) in snapshot.iter().zip(&points) {
            frame.push(axis::x_label(
                layout,
                &config.axis,
                truncate_label(&point.label, AXIS_LABEL_CHARS),
                x,
                progress,
            ));
        }

        let range = value_range(snapshot);
        frame.extend(axis::y_labels(
            layout,
            &config.axis,
            config.y_format,
            range.min,
            range.axis_max(),
            progress,
        ));
        frame
    }
}

fn value_range(snapshot: &Snapshot<SeriesPoint>) -> ValueRange {
    ValueRange::of(snapshot.iter().map(|point| point.value))
}

#[cfg(test)]
mod tests {
    use super::{SeriesConfig, SeriesMapper};
    use crate::core::{SeriesPoint, Snapshot, SurfaceLayout};
    use crate::mapping::GeometryMapper;
    use crate::render::{PrimitiveTag, Shape, TargetId};

    fn snapshot(values: &[f64]) -> Snapshot<SeriesPoint> {
        Snapshot::new(
            values
                .iter()
                .enumerate()
                .map(|(i, value)| SeriesPoint::new(format!("M{i}"), *value))
                .collect(),
        )
        .expect("valid snapshot")
    }

    #[test]
    fn extremes_touch_plot_edges() {
        let mapper = SeriesMapper::new(SeriesConfig::default()).expect("mapper");
        let points = mapper.project(&snapshot(&[10.0, 30.0, 20.0]));
        assert_eq!(points[0], (80.0, 340.0));
        assert_eq!(points[1], (420.0, 40.0));
        assert_eq!(points[2], (760.0, 190.0));
    }

    #[test]
    fn flat_series_sits_on_the_baseline() {
        let mapper = SeriesMapper::new(SeriesConfig::default()).expect("mapper");
        let points = mapper.project(&snapshot(&[5.0, 5.0]));
        assert!(points.iter().all(|&(_, y)| y == 340.0));
        let single = mapper.project(&snapshot(&[5.0]));
        assert_eq!(single, vec![(420.0, 340.0)]);
    }

    #[test]
    fn markers_grow_with_progress() {
        let mapper = SeriesMapper::new(SeriesConfig::default()).expect("mapper");
        let frame = mapper.map(&snapshot(&[1.0, 2.0]), 0.5);
        let marker = frame
            .primitives
            .iter()
            .find(|primitive| primitive.tag == Some(PrimitiveTag::Target(TargetId::Point(1))))
            .expect("marker");
        let Shape::Circle(circle) = marker.shape else {
            panic!("marker must be a circle");
        };
        assert_eq!(circle.radius, 2.5);
        assert_eq!(frame.targets.len(), 2);
    }

    #[test]
    fn empty_snapshot_draws_only_the_grid() {
        let mapper = SeriesMapper::new(SeriesConfig::default()).expect("mapper");
        let frame = mapper.map(&Snapshot::empty(), 1.0);
        assert_eq!(frame.primitives.len(), 6);
        assert!(frame.targets.is_empty());
    }

    #[test]
    fn rejects_degenerate_layout() {
        let config = SeriesConfig {
            layout: SurfaceLayout::new(0.0, 400.0),
            ..SeriesConfig::default()
        };
        assert!(SeriesMapper::new(config).is_err());
    }
}
