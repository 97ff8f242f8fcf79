use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two series of a grouped-bar snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarSeries {
    A,
    B,
}

impl BarSeries {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

/// Identity of an interactive primitive, stable for a given source index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetId {
    Point(usize),
    Bar { series: BarSeries, index: usize },
    Segment(usize),
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(index) => write!(f, "point-{index}"),
            Self::Bar { series, index } => write!(f, "bar-{}-{index}", series.as_str()),
            Self::Segment(index) => write!(f, "segment-{index}"),
        }
    }
}

/// Lookup key attached to a scene primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveTag {
    /// The hoverable primitive itself.
    Target(TargetId),
    /// Secondary primitive that follows the target's hover state (marker halo).
    Decoration(TargetId),
    /// Ephemeral tooltip spawned while the target is hovered.
    Tooltip(TargetId),
}

impl PrimitiveTag {
    #[must_use]
    pub const fn target(self) -> TargetId {
        match self {
            Self::Target(id) | Self::Decoration(id) | Self::Tooltip(id) => id,
        }
    }

    #[must_use]
    pub const fn is_tooltip(self) -> bool {
        matches!(self, Self::Tooltip(_))
    }
}

impl fmt::Display for PrimitiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(id) => write!(f, "{id}"),
            Self::Decoration(id) => write!(f, "decoration-{id}"),
            Self::Tooltip(id) => write!(f, "tooltip-{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BarSeries, PrimitiveTag, TargetId};

    #[test]
    fn tags_render_as_dom_style_ids() {
        assert_eq!(TargetId::Point(3).to_string(), "point-3");
        assert_eq!(
            PrimitiveTag::Tooltip(TargetId::Bar {
                series: BarSeries::B,
                index: 2
            })
            .to_string(),
            "tooltip-bar-b-2"
        );
        assert_eq!(
            PrimitiveTag::Decoration(TargetId::Segment(0)).to_string(),
            "decoration-segment-0"
        );
    }
}
