use std::f64::consts::TAU;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::render::{
    Color, Emphasis, Primitive, PrimitiveTag, Shape, TargetId, TextGeometry, TextHAlign,
    TextVAlign,
};

/// Pointer-sensitive area of an interactive primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Angles follow `ArcGeometry`: radians, clockwise, `0` at three o'clock.
    Annulus {
        cx: f64,
        cy: f64,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl HitShape {
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        match self {
            Self::Circle { cx, cy, radius } => (x - cx).hypot(y - cy) <= radius,
            Self::Rect {
                x: left,
                y: top,
                width,
                height,
            } => x >= left && x <= left + width && y >= top && y <= top + height,
            Self::Annulus {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
            } => {
                let distance = (x - cx).hypot(y - cy);
                if distance < inner_radius || distance > outer_radius {
                    return false;
                }
                if end_angle - start_angle >= TAU {
                    return true;
                }
                let angle = start_angle + ((y - cy).atan2(x - cx) - start_angle).rem_euclid(TAU);
                angle <= end_angle
            }
        }
    }

    /// Reference point used to break ties between overlapping targets.
    #[must_use]
    pub fn anchor(self) -> (f64, f64) {
        match self {
            Self::Circle { cx, cy, .. } => (cx, cy),
            Self::Rect {
                x,
                y,
                width,
                height,
            } => (x + width / 2.0, y + height / 2.0),
            Self::Annulus {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
            } => {
                let radius = (inner_radius + outer_radius) / 2.0;
                let angle = (start_angle + end_angle) / 2.0;
                (cx + radius * angle.cos(), cy + radius * angle.sin())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub bold: bool,
    pub color: Color,
}

/// Geometry of the ephemeral tooltip spawned while a target is hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub background: Color,
    pub background_opacity: f64,
    pub lines: SmallVec<[TooltipLine; 2]>,
}

impl TooltipSpec {
    /// Background rectangle followed by the text lines, tagged for removal.
    #[must_use]
    pub fn to_primitive(&self, id: TargetId) -> Primitive {
        let mut children = Vec::with_capacity(1 + self.lines.len());
        children.push(
            Primitive::rect(self.x, self.y, self.width, self.height, self.corner_radius)
                .with_fill(self.background)
                .with_opacity(self.background_opacity),
        );
        for line in &self.lines {
            let mut text = TextGeometry::new(line.text.clone(), line.x, line.y, line.font_size_px)
                .aligned(TextHAlign::Center, TextVAlign::Baseline);
            if line.bold {
                text = text.bold();
            }
            children.push(Primitive::text(text).with_fill(line.color));
        }
        Primitive::group(children).with_tag(PrimitiveTag::Tooltip(id))
    }
}

/// Everything the hover controller needs to know about one interactive primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTarget {
    pub id: TargetId,
    pub hit: HitShape,
    /// Applied to the `PrimitiveTag::Target` primitive while hovered.
    pub emphasis: Emphasis,
    /// Applied to the `PrimitiveTag::Decoration` primitive while hovered, if any.
    pub decoration_emphasis: Option<Emphasis>,
    pub tooltip: TooltipSpec,
}

/// Tag-keyed table of interactive targets for the currently drawn scene.
///
/// Rebuilt on every redraw: attaching registers a target, detaching removes
/// it, and clearing drops every registration of the previous scene.
#[derive(Debug, Clone, Default)]
pub struct HitRegistry {
    targets: IndexMap<TargetId, HoverTarget>,
}

impl HitRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `target`; a target with the same id is replaced and moved
    /// to the top.
    pub fn attach(&mut self, target: HoverTarget) {
        self.targets.shift_remove(&target.id);
        self.targets.insert(target.id, target);
    }

    pub fn detach(&mut self, id: TargetId) -> Option<HoverTarget> {
        self.targets.shift_remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: TargetId) -> Option<&HoverTarget> {
        self.targets.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HoverTarget> {
        self.targets.values()
    }

    /// Target under the pointer.
    ///
    /// Among targets containing the point, the one whose anchor is closest
    /// wins; equal distances go to the most recently attached target.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<TargetId> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.targets
            .values()
            .enumerate()
            .filter(|(_, target)| target.hit.contains(x, y))
            .min_by_key(|(order, target)| {
                let (ax, ay) = target.hit.anchor();
                (OrderedFloat((x - ax).hypot(y - ay)), std::cmp::Reverse(*order))
            })
            .map(|(_, target)| target.id)
    }
}

impl Shape {
    /// Hit area matching the drawn footprint of rects, circles and arcs.
    #[must_use]
    pub fn hit_shape(&self) -> Option<HitShape> {
        match self {
            Self::Rect(rect) => Some(HitShape::Rect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            }),
            Self::Circle(circle) => Some(HitShape::Circle {
                cx: circle.cx,
                cy: circle.cy,
                radius: circle.radius,
            }),
            Self::Arc(arc) => Some(HitShape::Annulus {
                cx: arc.cx,
                cy: arc.cy,
                inner_radius: arc.inner_radius,
                outer_radius: arc.outer_radius,
                start_angle: arc.start_angle,
                end_angle: arc.end_angle,
            }),
            Self::Path(_) | Self::Line(_) | Self::Text(_) | Self::Group(_) => None,
        }
    }
}
