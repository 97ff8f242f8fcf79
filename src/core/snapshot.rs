use std::fmt;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::interpolate::lerp;
use crate::error::{ChartError, ChartResult};

/// One record of a chart snapshot.
///
/// `key` identifies the record across snapshots (x-axis label or ring
/// category); values are matched by key when a transition interpolates.
pub trait Datum: Clone + PartialEq + fmt::Debug {
    fn key(&self) -> &str;

    fn validate(&self) -> ChartResult<()>;

    /// Same key, every value set to zero. Used as the origin of records that
    /// did not exist in the previous snapshot.
    #[must_use]
    fn zeroed(&self) -> Self;

    /// Blends values at eased progress; the key always comes from `to`.
    #[must_use]
    fn interpolate(from: &Self, to: &Self, eased: f64) -> Self;
}

fn ensure_finite(value: f64, what: &str) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}

fn ensure_key(key: &str, what: &str) -> ChartResult<()> {
    if key.is_empty() {
        return Err(ChartError::InvalidData(format!("{what} must not be empty")));
    }
    Ok(())
}

fn ensure_non_negative(value: f64, what: &str) -> ChartResult<()> {
    ensure_finite(value, what)?;
    if value < 0.0 {
        return Err(ChartError::InvalidData(format!("{what} must be >= 0")));
    }
    Ok(())
}

/// Time-series sample (area/line and sparkline charts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(alias = "month")]
    pub label: String,
    #[serde(alias = "revenue")]
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl Datum for SeriesPoint {
    fn key(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_key(&self.label, "series label")?;
        ensure_finite(self.value, "series value")
    }

    fn zeroed(&self) -> Self {
        Self::new(self.label.clone(), 0.0)
    }

    fn interpolate(from: &Self, to: &Self, eased: f64) -> Self {
        Self::new(to.label.clone(), lerp(from.value, to.value, eased))
    }
}

/// Two-series sample for grouped bars (for example new vs returning users).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedPoint {
    #[serde(alias = "month")]
    pub label: String,
    #[serde(alias = "valueA", alias = "newUsers")]
    pub value_a: f64,
    #[serde(alias = "valueB", alias = "returningUsers")]
    pub value_b: f64,
}

impl GroupedPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value_a: f64, value_b: f64) -> Self {
        Self {
            label: label.into(),
            value_a,
            value_b,
        }
    }
}

impl Datum for GroupedPoint {
    fn key(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_key(&self.label, "grouped label")?;
        ensure_non_negative(self.value_a, "grouped value_a")?;
        ensure_non_negative(self.value_b, "grouped value_b")
    }

    fn zeroed(&self) -> Self {
        Self::new(self.label.clone(), 0.0, 0.0)
    }

    fn interpolate(from: &Self, to: &Self, eased: f64) -> Self {
        Self::new(
            to.label.clone(),
            lerp(from.value_a, to.value_a, eased),
            lerp(from.value_b, to.value_b, eased),
        )
    }
}

/// Categorical share for the ring chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSlice {
    #[serde(alias = "source")]
    pub category: String,
    #[serde(alias = "conversions")]
    pub value: f64,
}

impl RingSlice {
    #[must_use]
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

impl Datum for RingSlice {
    fn key(&self) -> &str {
        &self.category
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_key(&self.category, "ring category")?;
        ensure_non_negative(self.value, "ring value")
    }

    fn zeroed(&self) -> Self {
        Self::new(self.category.clone(), 0.0)
    }

    fn interpolate(from: &Self, to: &Self, eased: f64) -> Self {
        Self::new(to.category.clone(), lerp(from.value, to.value, eased))
    }
}

/// Outcome of comparing a stored snapshot with an incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotChange {
    Unchanged,
    /// Same length and same key at every index; only values differ.
    Values,
    /// Length or key order changed.
    Structure,
}

/// Ordered, immutable dataset one chart renders.
///
/// Serializes as a bare JSON array; deserializing runs the same validation
/// as [`Snapshot::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot<T> {
    points: Vec<T>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T: Datum> Snapshot<T> {
    pub fn new(points: Vec<T>) -> ChartResult<Self> {
        for point in &points {
            point.validate()?;
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps records produced inside the crate that are valid by construction.
    pub(crate) fn from_valid(points: Vec<T>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[T] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.points.iter().map(Datum::key).collect()
    }

    #[must_use]
    pub fn compare(&self, next: &Self) -> SnapshotChange {
        if self.points.len() != next.points.len()
            || self
                .points
                .iter()
                .zip(&next.points)
                .any(|(current, incoming)| current.key() != incoming.key())
        {
            return SnapshotChange::Structure;
        }
        if self.points == next.points {
            SnapshotChange::Unchanged
        } else {
            SnapshotChange::Values
        }
    }

    /// Builds the intermediate snapshot at eased progress.
    ///
    /// The result always has the key set and order of `to`. Each record
    /// starts from the same-index record of `from` when keys match, else from
    /// the first `from` record with the same key, else from zero.
    #[must_use]
    pub fn interpolate(from: &Self, to: &Self, eased: f64) -> Self {
        let points = to
            .points
            .iter()
            .enumerate()
            .map(|(index, target)| {
                let origin = from
                    .points
                    .get(index)
                    .filter(|candidate| candidate.key() == target.key())
                    .or_else(|| {
                        from.points
                            .iter()
                            .find(|candidate| candidate.key() == target.key())
                    });
                match origin {
                    Some(origin) => T::interpolate(origin, target, eased),
                    None => T::interpolate(&target.zeroed(), target, eased),
                }
            })
            .collect();
        Self { points }
    }
}

impl<T: Datum + DeserializeOwned> Snapshot<T> {
    /// Parses and validates a JSON array of records.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let points: Vec<T> = serde_json::from_str(input).map_err(|e| {
            ChartError::Serialization(format!("failed to parse snapshot json: {e}"))
        })?;
        Self::new(points)
    }
}

impl<'de, T: Datum + Deserialize<'de>> Deserialize<'de> for Snapshot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<T>::deserialize(deserializer)?;
        Self::new(points).map_err(de::Error::custom)
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
