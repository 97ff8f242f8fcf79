use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Outer spacing between the surface edge and the plot area, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .into_iter()
            .all(|value| value.is_finite() && value >= 0.0)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Drawing-surface extents supplied at chart construction.
///
/// Every mapper derives its plot rectangle from this value; the plot area is
/// the surface minus the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margins: Margins,
}

impl SurfaceLayout {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Margins::ZERO,
        }
    }

    #[must_use]
    pub const fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn plot_left(self) -> f64 {
        self.margins.left
    }

    #[must_use]
    pub fn plot_top(self) -> f64 {
        self.margins.top
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    #[must_use]
    pub fn plot_right(self) -> f64 {
        self.plot_left() + self.plot_width()
    }

    #[must_use]
    pub fn plot_bottom(self) -> f64 {
        self.plot_top() + self.plot_height()
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.margins.is_valid()
            && self.plot_width() > 0.0
            && self.plot_height() > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidLayout {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}
