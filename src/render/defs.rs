use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    pub color: Color,
    pub opacity: f64,
}

impl GradientStop {
    #[must_use]
    pub const fn new(offset: f64, color: Color, opacity: f64) -> Self {
        Self {
            offset,
            color,
            opacity,
        }
    }
}

/// Shared paint/filter resource referenced by id from primitive styles.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// Top-to-bottom gradient across the primitive's bounding box.
    LinearGradient {
        id: String,
        stops: SmallVec<[GradientStop; 2]>,
    },
    /// Center-out gradient across the primitive's bounding box.
    RadialGradient {
        id: String,
        stops: SmallVec<[GradientStop; 2]>,
    },
    /// Gaussian blur merged under the source graphic.
    GlowFilter { id: String, std_deviation: f64 },
}

impl Definition {
    #[must_use]
    pub fn linear(id: impl Into<String>, top: GradientStop, bottom: GradientStop) -> Self {
        Self::LinearGradient {
            id: id.into(),
            stops: SmallVec::from_buf([top, bottom]),
        }
    }

    #[must_use]
    pub fn radial(id: impl Into<String>, center: GradientStop, edge: GradientStop) -> Self {
        Self::RadialGradient {
            id: id.into(),
            stops: SmallVec::from_buf([center, edge]),
        }
    }

    #[must_use]
    pub fn glow(id: impl Into<String>, std_deviation: f64) -> Self {
        Self::GlowFilter {
            id: id.into(),
            std_deviation,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::LinearGradient { id, .. }
            | Self::RadialGradient { id, .. }
            | Self::GlowFilter { id, .. } => id,
        }
    }

    #[must_use]
    pub fn is_filter(&self) -> bool {
        matches!(self, Self::GlowFilter { .. })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.id().is_empty() {
            return Err(ChartError::InvalidData(
                "definition id must not be empty".to_owned(),
            ));
        }
        match self {
            Self::LinearGradient { stops, .. } | Self::RadialGradient { stops, .. } => {
                for stop in stops {
                    stop.color.validate()?;
                    for (name, value) in [("offset", stop.offset), ("opacity", stop.opacity)] {
                        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                            return Err(ChartError::InvalidData(format!(
                                "gradient stop `{name}` must be finite and in [0, 1]"
                            )));
                        }
                    }
                }
                Ok(())
            }
            Self::GlowFilter { std_deviation, .. } => {
                if !std_deviation.is_finite() || *std_deviation < 0.0 {
                    return Err(ChartError::InvalidData(
                        "glow std deviation must be finite and >= 0".to_owned(),
                    ));
                }
                Ok(())
            }
        }
    }
}
