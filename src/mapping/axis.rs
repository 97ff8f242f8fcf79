use serde::{Deserialize, Serialize};

use crate::core::{SurfaceLayout, ValueFormat};
use crate::render::{Color, Primitive, Stroke, TextGeometry, TextHAlign, TextVAlign};

/// Horizontal grid intervals; `GRID_INTERVALS + 1` lines are drawn.
pub(crate) const GRID_INTERVALS: usize = 5;

/// Distance between the plot bottom and x-axis label baselines.
const X_LABEL_OFFSET: f64 = 25.0;
/// Distance between the plot left edge and right-aligned y-axis labels.
const Y_LABEL_OFFSET: f64 = 15.0;
/// Baseline nudge that visually centers y labels on their grid line.
const Y_LABEL_BASELINE_SHIFT: f64 = 4.0;

/// Grid and axis-label styling shared by the cartesian mappers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub grid_color: Color,
    /// Dash and gap lengths of grid lines.
    pub grid_dash: [f64; 2],
    /// Grid opacity at full progress.
    pub grid_opacity: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
}

/// Dashed horizontal lines from the plot top to the plot bottom.
pub(crate) fn grid_lines(layout: SurfaceLayout, style: &AxisStyle, progress: f64) -> Vec<Primitive> {
    let step = layout.plot_height() / GRID_INTERVALS as f64;
    (0..=GRID_INTERVALS)
        .map(|i| {
            let y = layout.plot_top() + step * i as f64;
            Primitive::line(layout.plot_left(), y, layout.plot_right(), y)
                .with_stroke(Stroke::dashed(
                    style.grid_color,
                    1.0,
                    style.grid_dash[0],
                    style.grid_dash[1],
                ))
                .with_opacity(style.grid_opacity * progress)
        })
        .collect()
}

/// One label per grid line, top to bottom, for values spanning `min..=max`.
pub(crate) fn y_labels(
    layout: SurfaceLayout,
    style: &AxisStyle,
    format: ValueFormat,
    min: f64,
    max: f64,
    progress: f64,
) -> Vec<Primitive> {
    let step = layout.plot_height() / GRID_INTERVALS as f64;
    (0..=GRID_INTERVALS)
        .map(|i| {
            let share = (GRID_INTERVALS - i) as f64 / GRID_INTERVALS as f64;
            let value = min * (1.0 - share) + max * share;
            let y = layout.plot_top() + step * i as f64 + Y_LABEL_BASELINE_SHIFT;
            label(
                TextGeometry::new(
                    format.format(value),
                    layout.plot_left() - Y_LABEL_OFFSET,
                    y,
                    style.label_font_size_px,
                )
                .aligned(TextHAlign::Right, TextVAlign::Baseline),
                style,
                progress,
            )
        })
        .collect()
}

/// Centered label under the plot at `x`.
pub(crate) fn x_label(
    layout: SurfaceLayout,
    style: &AxisStyle,
    text: String,
    x: f64,
    progress: f64,
) -> Primitive {
    label(
        TextGeometry::new(
            text,
            x,
            layout.plot_bottom() + X_LABEL_OFFSET,
            style.label_font_size_px,
        ),
        style,
        progress,
    )
}

fn label(text: TextGeometry, style: &AxisStyle, progress: f64) -> Primitive {
    Primitive::text(text)
        .with_fill(style.label_color)
        .with_opacity(progress)
}

#[cfg(test)]
mod tests {
    use super::{AxisStyle, grid_lines, y_labels};
    use crate::core::{Margins, SurfaceLayout, ValueFormat};
    use crate::render::{Color, Shape};

    fn style() -> AxisStyle {
        AxisStyle {
            grid_color: Color::rgb8(0xe2, 0xe8, 0xf0),
            grid_dash: [2.0, 2.0],
            grid_opacity: 0.6,
            label_color: Color::rgb8(0x64, 0x74, 0x8b),
            label_font_size_px: 12.0,
        }
    }

    #[test]
    fn grid_spans_plot_with_six_lines() {
        let layout =
            SurfaceLayout::new(800.0, 400.0).with_margins(Margins::new(40.0, 40.0, 60.0, 80.0));
        let lines = grid_lines(layout, &style(), 0.5);
        assert_eq!(lines.len(), 6);
        let Shape::Line(first) = lines[0].shape else {
            panic!("grid primitive must be a line");
        };
        let Shape::Line(last) = lines[5].shape else {
            panic!("grid primitive must be a line");
        };
        assert_eq!((first.x1, first.y1, first.x2), (80.0, 40.0, 760.0));
        assert_eq!(last.y1, 340.0);
        assert!((lines[0].style.opacity - 0.3).abs() <= 1e-12);
    }

    #[test]
    fn y_labels_run_from_max_to_min() {
        let layout =
            SurfaceLayout::new(800.0, 400.0).with_margins(Margins::new(40.0, 40.0, 60.0, 80.0));
        let labels = y_labels(
            layout,
            &style(),
            ValueFormat::CurrencyThousands,
            30_000.0,
            80_000.0,
            1.0,
        );
        let texts: Vec<&str> = labels
            .iter()
            .filter_map(|primitive| match &primitive.shape {
                Shape::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["$80k", "$70k", "$60k", "$50k", "$40k", "$30k"]);
    }
}
