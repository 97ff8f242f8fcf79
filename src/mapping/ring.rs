use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::core::{
    RingSlice, Snapshot, SurfaceLayout, ValueFormat, clamp_progress, format_percent,
    group_thousands, round_to,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverTarget, TooltipLine, TooltipSpec};
use crate::render::{
    ArcGeometry, Color, Definition, Emphasis, GradientStop, Primitive, PrimitiveTag, Stroke,
    TargetId, TextGeometry, TextHAlign, TextVAlign,
};

use super::{GeometryMapper, MappedFrame};

/// Segment colors, cycled by segment index.
pub const RING_PALETTE: [Color; 6] = [
    Color::rgb8(0x63, 0x66, 0xf1),
    Color::rgb8(0x10, 0xb9, 0x81),
    Color::rgb8(0xf5, 0x9e, 0x0b),
    Color::rgb8(0xef, 0x44, 0x44),
    Color::rgb8(0x8b, 0x5c, 0xf6),
    Color::rgb8(0x06, 0xb6, 0xd4),
];

pub(crate) const RING_GLOW_FILTER_ID: &str = "ring-glow";

/// Segments start at twelve o'clock.
const START_ANGLE: f64 = -FRAC_PI_2;
/// Segments whose rounded share is at or below this percentage stay unlabeled.
const LABEL_MIN_PERCENT: f64 = 5.0;
const HOVER_OFFSET: f64 = 5.0;
const HOVER_BRIGHTNESS: f64 = 1.2;
const TOOLTIP_WIDTH: f64 = 90.0;
const TOOLTIP_HEIGHT: f64 = 35.0;
/// Distance from the outer edge to the tooltip center.
const TOOLTIP_DISTANCE: f64 = 30.0;

/// Donut chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub layout: SurfaceLayout,
    /// Vertical shift of the ring center above the surface center.
    pub center_lift: f64,
    /// Inner radius as a fraction of the outer radius.
    pub inner_ratio: f64,
    pub palette: Vec<Color>,
    pub separator_color: Color,
    pub placeholder_color: Color,
    pub glow_std_deviation: f64,
    pub center_fill: Color,
    pub center_stroke: Color,
    pub total_caption: String,
    pub caption_color: Color,
    pub total_color: Color,
    pub label_color: Color,
    pub tooltip_format: ValueFormat,
    pub tooltip_background: Color,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            layout: SurfaceLayout::new(400.0, 350.0),
            center_lift: 20.0,
            inner_ratio: 0.5,
            palette: RING_PALETTE.to_vec(),
            separator_color: Color::WHITE,
            placeholder_color: Color::rgb8(0xe2, 0xe8, 0xf0),
            glow_std_deviation: 3.0,
            center_fill: Color::rgb8(0xf8, 0xfa, 0xfc),
            center_stroke: Color::rgb8(0xe2, 0xe8, 0xf0),
            total_caption: "Total".to_owned(),
            caption_color: Color::rgb8(0x37, 0x41, 0x51),
            total_color: Color::rgb8(0x63, 0x66, 0xf1),
            label_color: Color::WHITE,
            tooltip_format: ValueFormat::Integer,
            tooltip_background: Color::rgb8(0x1f, 0x29, 0x37),
        }
    }
}

/// Maps categorical shares onto annulus segments laid out clockwise from
/// the top.
#[derive(Debug, Clone, PartialEq)]
pub struct RingMapper {
    config: RingConfig,
}

impl RingMapper {
    pub fn new(config: RingConfig) -> ChartResult<Self> {
        config.layout.validate()?;
        if config.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "ring palette must not be empty".to_owned(),
            ));
        }
        if !config.inner_ratio.is_finite() || !(0.0..1.0).contains(&config.inner_ratio) {
            return Err(ChartError::InvalidData(
                "ring inner ratio must be in [0, 1)".to_owned(),
            ));
        }
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        let layout = self.config.layout;
        (
            layout.width / 2.0,
            layout.height / 2.0 - self.config.center_lift,
        )
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        let layout = self.config.layout;
        layout.width.min(layout.height) / 3.0
    }

    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.outer_radius() * self.config.inner_ratio
    }

    /// Segment arc per snapshot index; `None` for zero-valued categories or
    /// when the total is not positive.
    ///
    /// The last drawn segment ends exactly one full turn after the start.
    #[must_use]
    pub fn segments(&self, snapshot: &Snapshot<RingSlice>) -> Vec<Option<ArcGeometry>> {
        let Some(shares) = shares(snapshot) else {
            return vec![None; snapshot.len()];
        };
        let (cx, cy) = self.center();
        let last_positive = snapshot.iter().rposition(|slice| slice.value > 0.0);
        let mut angle = START_ANGLE;
        snapshot
            .iter()
            .enumerate()
            .map(|(index, slice)| {
                if slice.value <= 0.0 {
                    return None;
                }
                let start_angle = angle;
                let end_angle = if Some(index) == last_positive {
                    START_ANGLE + TAU
                } else {
                    (start_angle + shares[index] * TAU).min(START_ANGLE + TAU)
                };
                angle = end_angle;
                Some(ArcGeometry {
                    cx,
                    cy,
                    inner_radius: self.inner_radius(),
                    outer_radius: self.outer_radius(),
                    start_angle,
                    end_angle,
                })
            })
            .collect()
    }

    fn color(&self, index: usize) -> Color {
        self.config.palette[index % self.config.palette.len()]
    }

    fn tooltip(&self, slice: &RingSlice, share: f64, arc: ArcGeometry, color: Color) -> TooltipSpec {
        let (x, y) = arc.point_at(arc.outer_radius + TOOLTIP_DISTANCE, arc.mid_angle());
        let top = y - TOOLTIP_HEIGHT / 2.0;
        TooltipSpec {
            x: x - TOOLTIP_WIDTH / 2.0,
            y: top,
            width: TOOLTIP_WIDTH,
            height: TOOLTIP_HEIGHT,
            corner_radius: 6.0,
            background: self.config.tooltip_background,
            background_opacity: 0.9,
            lines: smallvec![
                TooltipLine {
                    text: slice.category.clone(),
                    x,
                    y: top + 15.0,
                    font_size_px: 12.0,
                    bold: true,
                    color: Color::WHITE,
                },
                TooltipLine {
                    text: format!(
                        "{} ({})",
                        self.config.tooltip_format.format(slice.value),
                        format_percent(share)
                    ),
                    x,
                    y: top + 30.0,
                    font_size_px: 11.0,
                    bold: false,
                    color,
                },
            ],
        }
    }

    fn push_center(&self, frame: &mut MappedFrame, total: f64, progress: f64) {
        let config = &self.config;
        let (cx, cy) = self.center();
        frame.push(
            Primitive::circle(cx, cy, (self.inner_radius() - 5.0).max(0.0))
                .with_fill(config.center_fill)
                .with_stroke(Stroke::solid(config.center_stroke, 2.0))
                .with_opacity(progress),
        );
        if !config.total_caption.is_empty() {
            frame.push(
                Primitive::text(
                    TextGeometry::new(config.total_caption.clone(), cx, cy - 8.0, 14.0).bold(),
                )
                .with_fill(config.caption_color)
                .with_opacity(progress),
            );
        }
        frame.push(
            Primitive::text(TextGeometry::new(group_thousands(total), cx, cy + 8.0, 16.0).bold())
                .with_fill(config.total_color)
                .with_opacity(progress),
        );
    }
}

impl GeometryMapper for RingMapper {
    type Datum = RingSlice;

    fn layout(&self) -> SurfaceLayout {
        self.config.layout
    }

    fn map(&self, snapshot: &Snapshot<RingSlice>, progress: f64) -> MappedFrame {
        let progress = clamp_progress(progress);
        let config = &self.config;
        let mut frame = MappedFrame::new();
        let total: f64 = snapshot.iter().map(|slice| slice.value).sum();

        for index in 0..snapshot.len() {
            let color = self.color(index);
            frame.declare(Definition::radial(
                gradient_id(index),
                GradientStop::new(0.0, color, progress),
                GradientStop::new(1.0, color, 0.7 * progress),
            ));
        }
        frame.declare(Definition::glow(RING_GLOW_FILTER_ID, config.glow_std_deviation));

        let Some(shares) = shares(snapshot) else {
            let (cx, cy) = self.center();
            frame.push(
                Primitive::arc(ArcGeometry {
                    cx,
                    cy,
                    inner_radius: self.inner_radius(),
                    outer_radius: self.outer_radius(),
                    start_angle: START_ANGLE,
                    end_angle: START_ANGLE + TAU,
                })
                .with_fill(config.placeholder_color)
                .with_opacity(progress),
            );
            self.push_center(&mut frame, 0.0, progress);
            return frame;
        };

        for (index, (slice, arc)) in snapshot.iter().zip(self.segments(snapshot)).enumerate() {
            let Some(arc) = arc else {
                continue;
            };
            let id = TargetId::Segment(index);
            let share = shares[index];
            let mid = arc.mid_angle();
            let segment = Primitive::arc(arc)
                .with_paint_ref(gradient_id(index))
                .with_stroke(Stroke::solid(config.separator_color, 2.0))
                .with_filter(RING_GLOW_FILTER_ID)
                .with_opacity(progress)
                .with_tag(PrimitiveTag::Target(id));
            if let Some(hit) = segment.shape.hit_shape() {
                frame.attach(HoverTarget {
                    id,
                    hit,
                    emphasis: Emphasis::NONE
                        .offset(mid.cos() * HOVER_OFFSET, mid.sin() * HOVER_OFFSET)
                        .brightened(HOVER_BRIGHTNESS),
                    decoration_emphasis: None,
                    tooltip: self.tooltip(slice, share, arc, self.color(index)),
                });
            }
            frame.push(segment);

            if round_to(share * 100.0, 1) > LABEL_MIN_PERCENT {
                let (x, y) = arc.point_at((arc.inner_radius + arc.outer_radius) / 2.0, mid);
                frame.push(
                    Primitive::text(
                        TextGeometry::new(format_percent(share), x, y, 12.0)
                            .bold()
                            .aligned(TextHAlign::Center, TextVAlign::Middle),
                    )
                    .with_fill(config.label_color)
                    .with_opacity(progress),
                );
            }
        }

        self.push_center(&mut frame, total, progress);
        frame
    }
}

fn gradient_id(index: usize) -> String {
    format!("ring-gradient-{index}")
}

/// Fraction of the ring taken by each slice, or `None` when nothing is
/// positive. Values are scaled by the largest one so the sum stays finite.
fn shares(snapshot: &Snapshot<RingSlice>) -> Option<Vec<f64>> {
    let largest = snapshot.iter().map(|slice| slice.value).fold(0.0, f64::max);
    if largest <= 0.0 {
        return None;
    }
    let scaled_total: f64 = snapshot.iter().map(|slice| slice.value / largest).sum();
    Some(
        snapshot
            .iter()
            .map(|slice| slice.value / largest / scaled_total)
            .collect(),
    )
}
