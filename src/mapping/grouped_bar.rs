use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::core::{
    AXIS_LABEL_CHARS, GroupedPoint, Margins, Snapshot, SurfaceLayout, ValueFormat,
    clamp_progress, truncate_label,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HitShape, HoverTarget, TooltipLine, TooltipSpec};
use crate::render::{
    BarSeries, Color, Definition, Emphasis, GradientStop, Primitive, PrimitiveTag, TargetId,
};

use super::axis::{self, AxisStyle};
use super::{GeometryMapper, MappedFrame};

pub(crate) const BAR_GLOW_FILTER_ID: &str = "bar-glow";

const TOOLTIP_WIDTH: f64 = 60.0;
const TOOLTIP_HEIGHT: f64 = 25.0;
const TOOLTIP_GAP: f64 = 35.0;

/// Which grouped series are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Both series side by side, each half a bar width.
    #[default]
    All,
    /// Only series A, full bar width.
    SeriesA,
    /// Only series B, full bar width.
    SeriesB,
}

impl ViewMode {
    #[must_use]
    pub const fn shows(self, series: BarSeries) -> bool {
        matches!(
            (self, series),
            (Self::All, _) | (Self::SeriesA, BarSeries::A) | (Self::SeriesB, BarSeries::B)
        )
    }
}

/// Grouped-bar chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupedBarConfig {
    pub layout: SurfaceLayout,
    /// Fraction of each label band covered by its bar group.
    pub band_fill: f64,
    pub corner_radius: f64,
    /// Top and bottom gradient colors of series A.
    pub series_a_colors: [Color; 2],
    /// Top and bottom gradient colors of series B.
    pub series_b_colors: [Color; 2],
    pub glow_std_deviation: f64,
    pub hover_brightness: f64,
    pub axis: AxisStyle,
    pub y_format: ValueFormat,
    pub tooltip_format: ValueFormat,
}

impl Default for GroupedBarConfig {
    fn default() -> Self {
        Self {
            layout: SurfaceLayout::new(800.0, 400.0)
                .with_margins(Margins::new(60.0, 40.0, 60.0, 80.0)),
            band_fill: 0.7,
            corner_radius: 4.0,
            series_a_colors: [Color::rgb8(0x10, 0xb9, 0x81), Color::rgb8(0x05, 0x96, 0x69)],
            series_b_colors: [Color::rgb8(0x3b, 0x82, 0xf6), Color::rgb8(0x1d, 0x4e, 0xd8)],
            glow_std_deviation: 2.0,
            hover_brightness: 1.1,
            axis: AxisStyle {
                grid_color: Color::rgb8(0xe5, 0xe7, 0xeb),
                grid_dash: [3.0, 3.0],
                grid_opacity: 0.5,
                label_color: Color::rgb8(0x6b, 0x72, 0x80),
                label_font_size_px: 12.0,
            },
            y_format: ValueFormat::Thousands { decimals: 1 },
            tooltip_format: ValueFormat::Integer,
        }
    }
}

/// Maps two-series samples onto side-by-side bars, one group per label.
///
/// Bar heights are proportional to the largest visible `a + b` of the
/// snapshot being drawn. Hidden series count as zero and zero values emit
/// no bar at all.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBarMapper {
    config: GroupedBarConfig,
    view_mode: ViewMode,
}

impl GroupedBarMapper {
    pub fn new(config: GroupedBarConfig) -> ChartResult<Self> {
        config.layout.validate()?;
        if !config.band_fill.is_finite() || config.band_fill <= 0.0 || config.band_fill > 1.0 {
            return Err(ChartError::InvalidData(
                "bar band fill must be in (0, 1]".to_owned(),
            ));
        }
        Ok(Self {
            config,
            view_mode: ViewMode::All,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GroupedBarConfig {
        &self.config
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    fn visible(&self, point: &GroupedPoint, series: BarSeries) -> f64 {
        if !self.view_mode.shows(series) {
            return 0.0;
        }
        match series {
            BarSeries::A => point.value_a,
            BarSeries::B => point.value_b,
        }
    }

    fn colors(&self, series: BarSeries) -> [Color; 2] {
        match series {
            BarSeries::A => self.config.series_a_colors,
            BarSeries::B => self.config.series_b_colors,
        }
    }

    fn tooltip(&self, series: BarSeries, value: f64, bar_center: f64, bar_top: f64) -> TooltipSpec {
        let x = bar_center - TOOLTIP_WIDTH / 2.0;
        let y = bar_top - TOOLTIP_GAP;
        TooltipSpec {
            x,
            y,
            width: TOOLTIP_WIDTH,
            height: TOOLTIP_HEIGHT,
            corner_radius: 4.0,
            background: self.colors(series)[0],
            background_opacity: 0.9,
            lines: smallvec![TooltipLine {
                text: self.config.tooltip_format.format(value),
                x: x + TOOLTIP_WIDTH / 2.0,
                y: y + 16.0,
                font_size_px: 12.0,
                bold: true,
                color: Color::WHITE,
            }],
        }
    }
}

impl GeometryMapper for GroupedBarMapper {
    type Datum = GroupedPoint;

    fn layout(&self) -> SurfaceLayout {
        self.config.layout
    }

    fn map(&self, snapshot: &Snapshot<GroupedPoint>, progress: f64) -> MappedFrame {
        let progress = clamp_progress(progress);
        let config = &self.config;
        let layout = config.layout;
        let mut frame = MappedFrame::new();

        for series in [BarSeries::A, BarSeries::B] {
            let [top, bottom] = self.colors(series);
            frame.declare(Definition::linear(
                gradient_id(series),
                GradientStop::new(0.0, top, progress),
                GradientStop::new(1.0, bottom, 0.8 * progress),
            ));
        }
        frame.declare(Definition::glow(BAR_GLOW_FILTER_ID, config.glow_std_deviation));
        frame.extend(axis::grid_lines(layout, &config.axis, progress));

        if snapshot.is_empty() {
            return frame;
        }

        let max = snapshot
            .iter()
            .map(|point| self.visible(point, BarSeries::A) + self.visible(point, BarSeries::B))
            .fold(0.0_f64, f64::max);
        let scale = if max > 0.0 { max } else { 1.0 };

        let band = layout.plot_width() / snapshot.len() as f64;
        let bar_width = band * config.band_fill;
        let both = self.view_mode == ViewMode::All;
        let series_width = if both { bar_width / 2.0 } else { bar_width };

        for (index, point) in snapshot.iter().enumerate() {
            let group_x = layout.plot_left() + band * index as f64 + (band - bar_width) / 2.0;
            for series in [BarSeries::A, BarSeries::B] {
                let value = self.visible(point, series);
                if !self.view_mode.shows(series) || value <= 0.0 {
                    continue;
                }
                let x = if both && series == BarSeries::B {
                    group_x + series_width
                } else {
                    group_x
                };
                let height = value / scale * layout.plot_height();
                let y = layout.plot_bottom() - height;
                let id = TargetId::Bar { series, index };

                frame.push(
                    Primitive::rect(x, y, series_width, height, config.corner_radius)
                        .with_paint_ref(gradient_id(series))
                        .with_filter(BAR_GLOW_FILTER_ID)
                        .with_tag(PrimitiveTag::Target(id)),
                );
                frame.attach(HoverTarget {
                    id,
                    hit: HitShape::Rect {
                        x,
                        y,
                        width: series_width,
                        height,
                    },
                    emphasis: Emphasis::NONE.brightened(config.hover_brightness),
                    decoration_emphasis: None,
                    tooltip: self.tooltip(series, value, x + series_width / 2.0, y),
                });
            }
        }

        for (index, point) in snapshot.iter().enumerate() {
            let center = layout.plot_left() + band * index as f64 + band / 2.0;
            frame.push(axis::x_label(
                layout,
                &config.axis,
                truncate_label(&point.label, AXIS_LABEL_CHARS),
                center,
                progress,
            ));
        }
        frame.extend(axis::y_labels(
            layout,
            &config.axis,
            config.y_format,
            0.0,
            max,
            progress,
        ));
        frame
    }
}

fn gradient_id(series: BarSeries) -> String {
    format!("bar-gradient-{}", series.as_str())
}
