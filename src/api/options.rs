use serde::{Deserialize, Serialize};

use crate::animation::DEFAULT_TRANSITION_DURATION_MS;
use crate::core::Easing;
use crate::error::{ChartError, ChartResult};

/// Per-instance animation settings.
///
/// This type is serializable so host applications can persist/load chart
/// setup next to the per-kind mapper configs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Duration of the animated transition started by a data replacement.
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            transition_duration_ms: default_transition_duration_ms(),
            easing: Easing::default(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: f64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.transition_duration_ms.is_finite() || self.transition_duration_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "transition duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::Serialization(format!("failed to parse chart options: {e}"))
        })?;
        options.validate()
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize chart options: {e}"))
        })
    }
}

fn default_transition_duration_ms() -> f64 {
    DEFAULT_TRANSITION_DURATION_MS
}
