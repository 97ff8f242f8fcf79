//! Standalone SVG serialization of a retained scene.

use crate::error::ChartResult;

use super::{
    ArcGeometry, Color, Definition, Emphasis, Paint, PathCommand, Primitive, PrimitiveTag, Scene,
    Shape, Stroke, Surface, TextHAlign, TextVAlign,
};

/// Surface that serializes every presented scene into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    document: Option<String>,
    presents: usize,
    attached: bool,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            document: None,
            presents: 0,
            attached: true,
        }
    }
}

impl SvgSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the latest `present`.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    #[must_use]
    pub fn present_count(&self) -> usize {
        self.presents
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl Surface for SvgSurface {
    fn present(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.document = Some(render_svg(scene));
        self.presents += 1;
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Serializes `scene` in paint order, definitions first.
#[must_use]
pub fn render_svg(scene: &Scene) -> String {
    let layout = scene.layout();
    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(layout.width),
        h = num(layout.height),
    ));
    out.push('\n');

    if scene.definition_count() > 0 {
        out.push_str("<defs>\n");
        for definition in scene.definitions() {
            write_definition(&mut out, definition);
        }
        out.push_str("</defs>\n");
    }
    for primitive in scene.primitives() {
        write_primitive(&mut out, primitive);
    }
    out.push_str("</svg>\n");
    out
}

fn write_definition(out: &mut String, definition: &Definition) {
    match definition {
        Definition::LinearGradient { id, stops } => {
            out.push_str(&format!(
                r#"<linearGradient id="{}" x1="0" y1="0" x2="0" y2="1">"#,
                escape_xml(id)
            ));
            for stop in stops {
                write_stop(out, stop.offset, stop.color, stop.opacity);
            }
            out.push_str("</linearGradient>\n");
        }
        Definition::RadialGradient { id, stops } => {
            out.push_str(&format!(
                r#"<radialGradient id="{}" cx="50%" cy="50%" r="50%">"#,
                escape_xml(id)
            ));
            for stop in stops {
                write_stop(out, stop.offset, stop.color, stop.opacity);
            }
            out.push_str("</radialGradient>\n");
        }
        Definition::GlowFilter { id, std_deviation } => {
            out.push_str(&format!(
                concat!(
                    r#"<filter id="{}">"#,
                    r#"<feGaussianBlur stdDeviation="{}" result="coloredBlur"/>"#,
                    r#"<feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
                    "</filter>\n"
                ),
                escape_xml(id),
                num(*std_deviation)
            ));
        }
    }
}

fn write_stop(out: &mut String, offset: f64, color: Color, opacity: f64) {
    out.push_str(&format!(
        r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
        num(offset),
        color.to_hex(),
        num(opacity)
    ));
}

fn write_primitive(out: &mut String, primitive: &Primitive) {
    match &primitive.shape {
        Shape::Group(children) => {
            out.push_str("<g");
            write_common(out, primitive);
            out.push_str(">\n");
            for child in children {
                write_primitive(out, child);
            }
            out.push_str("</g>\n");
        }
        Shape::Path(path) => {
            let mut d = String::new();
            for command in &path.commands {
                if !d.is_empty() {
                    d.push(' ');
                }
                match *command {
                    PathCommand::MoveTo { x, y } => d.push_str(&format!("M {} {}", num(x), num(y))),
                    PathCommand::LineTo { x, y } => d.push_str(&format!("L {} {}", num(x), num(y))),
                    PathCommand::Close => d.push('Z'),
                }
            }
            out.push_str(&format!(r#"<path d="{d}""#));
            write_common(out, primitive);
            out.push_str("/>\n");
        }
        Shape::Arc(arc) => {
            out.push_str(&format!(r#"<path d="{}""#, arc_path(*arc)));
            if arc.is_full_circle() && arc.inner_radius > 0.0 {
                out.push_str(r#" fill-rule="evenodd""#);
            }
            write_common(out, primitive);
            out.push_str("/>\n");
        }
        Shape::Rect(rect) => {
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height)
            ));
            if rect.corner_radius > 0.0 {
                out.push_str(&format!(r#" rx="{}""#, num(rect.corner_radius)));
            }
            write_common(out, primitive);
            out.push_str("/>\n");
        }
        Shape::Circle(circle) => {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}""#,
                num(circle.cx),
                num(circle.cy),
                num(circle.radius)
            ));
            write_common(out, primitive);
            out.push_str("/>\n");
        }
        Shape::Line(line) => {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                num(line.x1),
                num(line.y1),
                num(line.x2),
                num(line.y2)
            ));
            write_common(out, primitive);
            out.push_str("/>\n");
        }
        Shape::Text(text) => {
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}""#,
                num(text.x),
                num(text.y),
                num(text.font_size_px)
            ));
            out.push_str(match text.h_align {
                TextHAlign::Left => r#" text-anchor="start""#,
                TextHAlign::Center => r#" text-anchor="middle""#,
                TextHAlign::Right => r#" text-anchor="end""#,
            });
            if text.v_align == TextVAlign::Middle {
                out.push_str(r#" dominant-baseline="middle""#);
            }
            if text.bold {
                out.push_str(r#" font-weight="bold""#);
            }
            write_common(out, primitive);
            out.push('>');
            out.push_str(&escape_xml(&text.text));
            out.push_str("</text>\n");
        }
    }
}

/// Tag, paint, opacity, filter and emphasis attributes.
fn write_common(out: &mut String, primitive: &Primitive) {
    if let Some(tag) = primitive.tag {
        match tag {
            PrimitiveTag::Tooltip(_) => out.push_str(&format!(r#" id="{tag}""#)),
            PrimitiveTag::Target(_) | PrimitiveTag::Decoration(_) => {
                out.push_str(&format!(r#" data-tag="{tag}""#));
            }
        }
    }

    let style = &primitive.style;
    if !matches!(primitive.shape, Shape::Group(_)) {
        match &style.fill {
            Some(Paint::Solid(color)) => write_color(out, "fill", *color),
            Some(Paint::Reference(id)) => {
                out.push_str(&format!(r#" fill="url(#{})""#, escape_xml(id)));
            }
            None => out.push_str(r#" fill="none""#),
        }
    }
    if let Some(stroke) = style.stroke {
        write_stroke(out, stroke);
    }

    let opacity = primitive.effective_opacity();
    if opacity < 1.0 {
        out.push_str(&format!(r#" opacity="{}""#, num(opacity)));
    }

    let emphasis = style.emphasis;
    if emphasis.brightness != 1.0 {
        let mut filter = String::new();
        if let Some(id) = &style.filter {
            filter.push_str(&format!("url(#{}) ", escape_xml(id)));
        }
        filter.push_str(&format!("brightness({})", num(emphasis.brightness)));
        out.push_str(&format!(r#" style="filter: {filter}""#));
    } else if let Some(id) = &style.filter {
        out.push_str(&format!(r#" filter="url(#{})""#, escape_xml(id)));
    }

    if let Some(transform) = emphasis_transform(emphasis, primitive.shape.anchor()) {
        out.push_str(&format!(r#" transform="{transform}""#));
    }
}

fn write_color(out: &mut String, name: &str, color: Color) {
    out.push_str(&format!(r#" {name}="{}""#, color.to_hex()));
    if color.alpha < 1.0 {
        out.push_str(&format!(r#" {name}-opacity="{}""#, num(color.alpha)));
    }
}

fn write_stroke(out: &mut String, stroke: Stroke) {
    write_color(out, "stroke", stroke.color);
    out.push_str(&format!(r#" stroke-width="{}""#, num(stroke.width)));
    if let Some([dash, gap]) = stroke.dash {
        out.push_str(&format!(
            r#" stroke-dasharray="{},{}""#,
            num(dash),
            num(gap)
        ));
    }
}

fn emphasis_transform(emphasis: Emphasis, (ax, ay): (f64, f64)) -> Option<String> {
    let mut parts = Vec::new();
    if emphasis.offset_x != 0.0 || emphasis.offset_y != 0.0 {
        parts.push(format!(
            "translate({} {})",
            num(emphasis.offset_x),
            num(emphasis.offset_y)
        ));
    }
    if emphasis.scale != 1.0 {
        parts.push(format!(
            "translate({} {}) scale({}) translate({} {})",
            num(ax),
            num(ay),
            num(emphasis.scale),
            num(-ax),
            num(-ay)
        ));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Annulus outline; full turns are drawn as two half arcs per ring.
fn arc_path(arc: ArcGeometry) -> String {
    let ArcGeometry {
        cx,
        cy,
        inner_radius,
        outer_radius,
        start_angle,
        end_angle,
    } = arc;

    if arc.is_full_circle() {
        let mut d = full_circle(cx, cy, outer_radius, true);
        if inner_radius > 0.0 {
            d.push(' ');
            d.push_str(&full_circle(cx, cy, inner_radius, false));
        }
        return d;
    }

    let large = u8::from(arc.sweep() > std::f64::consts::PI);
    let (ox1, oy1) = arc.point_at(outer_radius, start_angle);
    let (ox2, oy2) = arc.point_at(outer_radius, end_angle);
    let mut d = if inner_radius > 0.0 {
        let (ix1, iy1) = arc.point_at(inner_radius, start_angle);
        format!("M {} {} L {} {}", num(ix1), num(iy1), num(ox1), num(oy1))
    } else {
        format!("M {} {} L {} {}", num(cx), num(cy), num(ox1), num(oy1))
    };
    d.push_str(&format!(
        " A {r} {r} 0 {large} 1 {} {}",
        num(ox2),
        num(oy2),
        r = num(outer_radius)
    ));
    if inner_radius > 0.0 {
        let (ix1, iy1) = arc.point_at(inner_radius, start_angle);
        let (ix2, iy2) = arc.point_at(inner_radius, end_angle);
        d.push_str(&format!(
            " L {} {} A {r} {r} 0 {large} 0 {} {}",
            num(ix2),
            num(iy2),
            num(ix1),
            num(iy1),
            r = num(inner_radius)
        ));
    }
    d.push_str(" Z");
    d
}

fn full_circle(cx: f64, cy: f64, radius: f64, clockwise: bool) -> String {
    let sweep = u8::from(clockwise);
    format!(
        "M {x1} {y} A {r} {r} 0 1 {sweep} {x2} {y} A {r} {r} 0 1 {sweep} {x1} {y} Z",
        x1 = num(cx + radius),
        x2 = num(cx - radius),
        y = num(cy),
        r = num(radius),
    )
}

/// Up to three decimals, trailing zeros trimmed.
fn num(value: f64) -> String {
    let mut text = format!("{value:.3}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_owned();
    }
    text
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
