use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::PrimitiveTag;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels (`#6366f1` -> `rgb8(0x63, 0x66, 0xf1)`).
    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// `#rrggbb`; alpha is emitted separately by backends.
    #[must_use]
    pub fn to_hex(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextGeometry::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextGeometry::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVAlign {
    Baseline,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Close,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathGeometry {
    pub commands: Vec<PathCommand>,
}

impl PathGeometry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open polyline through `points`; empty input yields an empty path.
    #[must_use]
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        let mut path = Self::new();
        for (index, &(x, y)) in points.iter().enumerate() {
            if index == 0 {
                path.move_to(x, y);
            } else {
                path.line_to(x, y);
            }
        }
        path
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Coordinates of every move/line command in order.
    #[must_use]
    pub fn vertices(&self) -> Vec<(f64, f64)> {
        self.commands
            .iter()
            .filter_map(|command| match *command {
                PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => Some((x, y)),
                PathCommand::Close => None,
            })
            .collect()
    }
}

/// Annulus segment. Angles are radians, clockwise in screen space, `0` at
/// three o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcGeometry {
    #[must_use]
    pub fn sweep(self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn mid_angle(self) -> f64 {
        self.start_angle + self.sweep() / 2.0
    }

    #[must_use]
    pub fn is_full_circle(self) -> bool {
        self.sweep() >= std::f64::consts::TAU - 1e-9
    }

    #[must_use]
    pub fn point_at(self, radius: f64, angle: f64) -> (f64, f64) {
        (
            self.cx + radius * angle.cos(),
            self.cy + radius * angle.sin(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub bold: bool,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextGeometry {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_size_px: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            bold: false,
            h_align: TextHAlign::Center,
            v_align: TextVAlign::Baseline,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign, v_align: TextVAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Path(PathGeometry),
    Arc(ArcGeometry),
    Rect(RectGeometry),
    Circle(CircleGeometry),
    Line(LineGeometry),
    Text(TextGeometry),
    Group(Vec<Primitive>),
}

impl Shape {
    /// Reference point for emphasis scaling.
    #[must_use]
    pub fn anchor(&self) -> (f64, f64) {
        match self {
            Self::Path(path) => {
                let vertices = path.vertices();
                if vertices.is_empty() {
                    return (0.0, 0.0);
                }
                let count = vertices.len() as f64;
                let (sum_x, sum_y) = vertices
                    .iter()
                    .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
                (sum_x / count, sum_y / count)
            }
            Self::Arc(arc) => arc.point_at(
                (arc.inner_radius + arc.outer_radius) / 2.0,
                arc.mid_angle(),
            ),
            Self::Rect(rect) => (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0),
            Self::Circle(circle) => (circle.cx, circle.cy),
            Self::Line(line) => ((line.x1 + line.x2) / 2.0, (line.y1 + line.y2) / 2.0),
            Self::Text(text) => (text.x, text.y),
            Self::Group(children) => children
                .first()
                .map_or((0.0, 0.0), |child| child.shape.anchor()),
        }
    }
}

/// Fill or stroke source: a flat color or a declared gradient id.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Reference(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash and gap lengths.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    #[must_use]
    pub const fn dashed(color: Color, width: f64, dash: f64, gap: f64) -> Self {
        Self {
            color,
            width,
            dash: Some([dash, gap]),
        }
    }
}

/// Hover highlight applied on top of the base style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub scale: f64,
    pub brightness: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Replaces `Style::opacity` while set.
    pub opacity: Option<f64>,
}

impl Emphasis {
    pub const NONE: Self = Self {
        scale: 1.0,
        brightness: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
        opacity: None,
    };

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[must_use]
    pub const fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub const fn brightened(mut self, brightness: f64) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub opacity: f64,
    /// Id of a declared filter definition.
    pub filter: Option<String>,
    pub emphasis: Emphasis,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            opacity: 1.0,
            filter: None,
            emphasis: Emphasis::NONE,
        }
    }
}

/// One drawable unit of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub style: Style,
    pub tag: Option<PrimitiveTag>,
}

impl Primitive {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            style: Style::default(),
            tag: None,
        }
    }

    #[must_use]
    pub fn path(path: PathGeometry) -> Self {
        Self::new(Shape::Path(path))
    }

    #[must_use]
    pub fn arc(arc: ArcGeometry) -> Self {
        Self::new(Shape::Arc(arc))
    }

    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64, corner_radius: f64) -> Self {
        Self::new(Shape::Rect(RectGeometry {
            x,
            y,
            width,
            height,
            corner_radius,
        }))
    }

    #[must_use]
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(Shape::Circle(CircleGeometry { cx, cy, radius }))
    }

    #[must_use]
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Shape::Line(LineGeometry { x1, y1, x2, y2 }))
    }

    #[must_use]
    pub fn text(text: TextGeometry) -> Self {
        Self::new(Shape::Text(text))
    }

    #[must_use]
    pub fn group(children: Vec<Primitive>) -> Self {
        Self::new(Shape::Group(children))
    }

    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.style.fill = Some(Paint::Solid(color));
        self
    }

    #[must_use]
    pub fn with_paint_ref(mut self, id: impl Into<String>) -> Self {
        self.style.fill = Some(Paint::Reference(id.into()));
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.style.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, id: impl Into<String>) -> Self {
        self.style.filter = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: PrimitiveTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Opacity after emphasis overrides.
    #[must_use]
    pub fn effective_opacity(&self) -> f64 {
        self.style.emphasis.opacity.unwrap_or(self.style.opacity)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.validate_style()?;
        match &self.shape {
            Shape::Path(path) => validate_path(path),
            Shape::Arc(arc) => validate_arc(*arc),
            Shape::Rect(rect) => {
                ensure_finite(&[rect.x, rect.y, rect.width, rect.height, rect.corner_radius], "rect")?;
                if rect.width < 0.0 || rect.height < 0.0 || rect.corner_radius < 0.0 {
                    return Err(ChartError::InvalidData(
                        "rect extents must be >= 0".to_owned(),
                    ));
                }
                Ok(())
            }
            Shape::Circle(circle) => {
                ensure_finite(&[circle.cx, circle.cy, circle.radius], "circle")?;
                if circle.radius < 0.0 {
                    return Err(ChartError::InvalidData(
                        "circle radius must be >= 0".to_owned(),
                    ));
                }
                Ok(())
            }
            Shape::Line(line) => ensure_finite(&[line.x1, line.y1, line.x2, line.y2], "line"),
            Shape::Text(text) => {
                if text.text.is_empty() {
                    return Err(ChartError::InvalidData(
                        "text primitive must not be empty".to_owned(),
                    ));
                }
                ensure_finite(&[text.x, text.y], "text")?;
                if !text.font_size_px.is_finite() || text.font_size_px <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "font size must be finite and > 0".to_owned(),
                    ));
                }
                Ok(())
            }
            Shape::Group(children) => children.iter().try_for_each(Primitive::validate),
        }
    }

    fn validate_style(&self) -> ChartResult<()> {
        let style = &self.style;
        if !style.opacity.is_finite() || !(0.0..=1.0).contains(&style.opacity) {
            return Err(ChartError::InvalidData(
                "opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if let Some(Paint::Solid(color)) = &style.fill {
            color.validate()?;
        }
        if let Some(stroke) = style.stroke {
            stroke.color.validate()?;
            if !stroke.width.is_finite() || stroke.width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "stroke width must be finite and > 0".to_owned(),
                ));
            }
        }
        let emphasis = style.emphasis;
        ensure_finite(
            &[
                emphasis.scale,
                emphasis.brightness,
                emphasis.offset_x,
                emphasis.offset_y,
            ],
            "emphasis",
        )?;
        if emphasis.scale <= 0.0 || emphasis.brightness < 0.0 {
            return Err(ChartError::InvalidData(
                "emphasis scale must be > 0 and brightness >= 0".to_owned(),
            ));
        }
        if let Some(opacity) = emphasis.opacity
            && (!opacity.is_finite() || !(0.0..=1.0).contains(&opacity))
        {
            return Err(ChartError::InvalidData(
                "emphasis opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().any(|value| !value.is_finite()) {
        return Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )));
    }
    Ok(())
}

fn validate_path(path: &PathGeometry) -> ChartResult<()> {
    match path.commands.first() {
        Some(PathCommand::MoveTo { .. }) => {}
        _ => {
            return Err(ChartError::InvalidData(
                "path must start with a move command".to_owned(),
            ));
        }
    }
    let coordinates: Vec<f64> = path
        .vertices()
        .into_iter()
        .flat_map(|(x, y)| [x, y])
        .collect();
    ensure_finite(&coordinates, "path")
}

fn validate_arc(arc: ArcGeometry) -> ChartResult<()> {
    ensure_finite(
        &[
            arc.cx,
            arc.cy,
            arc.inner_radius,
            arc.outer_radius,
            arc.start_angle,
            arc.end_angle,
        ],
        "arc",
    )?;
    if arc.inner_radius < 0.0 || arc.outer_radius < arc.inner_radius {
        return Err(ChartError::InvalidData(
            "arc radii must satisfy 0 <= inner <= outer".to_owned(),
        ));
    }
    if arc.end_angle < arc.start_angle {
        return Err(ChartError::InvalidData(
            "arc end angle must not precede start angle".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Color, Emphasis, PathGeometry, Primitive, TextGeometry};

    #[test]
    fn hex_round_trips_eight_bit_channels() {
        assert_eq!(Color::rgb8(0x63, 0x66, 0xf1).to_hex(), "#6366f1");
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn validation_catches_bad_geometry() {
        assert!(Primitive::circle(1.0, 2.0, -1.0).validate().is_err());
        assert!(Primitive::path(PathGeometry::new()).validate().is_err());
        assert!(Primitive::text(TextGeometry::new("", 0.0, 0.0, 12.0)).validate().is_err());
        assert!(Primitive::rect(0.0, 0.0, 10.0, 5.0, 2.0).with_opacity(1.5).validate().is_err());
        assert!(Primitive::line(0.0, 0.0, f64::NAN, 1.0).validate().is_err());
        assert!(
            Primitive::path(PathGeometry::polyline(&[(0.0, 0.0), (5.0, 5.0)]))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn emphasis_opacity_overrides_base_opacity() {
        let mut halo = Primitive::circle(0.0, 0.0, 8.0).with_opacity(0.3);
        assert_eq!(halo.effective_opacity(), 0.3);
        halo.style.emphasis = Emphasis::NONE.with_opacity(0.6);
        assert_eq!(halo.effective_opacity(), 0.6);
        assert!(!halo.style.emphasis.is_none());
    }
}
