//! Synthetic dashboard data.
//!
//! Produces the three chart snapshots plus the headline metrics shown on the
//! summary cards. Values are whole numbers drawn from fixed ranges; nothing
//! here is derived from real measurements.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::core::{GroupedPoint, RingSlice, SeriesPoint, Snapshot};

pub const MONTHS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

pub const CONVERSION_SOURCES: [&str; 4] = ["organic", "paid", "social", "email"];

/// Headline numbers and their period-over-period change in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub revenue: f64,
    pub revenue_change: f64,
    pub users: f64,
    pub users_change: f64,
    pub conversions: f64,
    pub conversions_change: f64,
    pub growth: f64,
    pub growth_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub revenue: Snapshot<SeriesPoint>,
    pub user_growth: Snapshot<GroupedPoint>,
    pub conversions: Snapshot<RingSlice>,
    pub metrics: DashboardMetrics,
}

impl DashboardData {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let revenue: Vec<SeriesPoint> = MONTHS
            .iter()
            .enumerate()
            .map(|(index, month)| {
                let base = 30_000 + 5_000 * index as u32;
                SeriesPoint::new(*month, f64::from(rng.random_range(0..50_000_u32) + base))
            })
            .collect();

        let user_growth: Vec<GroupedPoint> = MONTHS
            .iter()
            .map(|month| {
                let new_users = rng.random_range(1_000..3_000_u32);
                let returning = rng.random_range(800..2_300_u32);
                GroupedPoint::new(*month, f64::from(new_users), f64::from(returning))
            })
            .collect();

        let conversions: Vec<RingSlice> = CONVERSION_SOURCES
            .iter()
            .zip([(300_u32, 500_u32), (200, 400), (150, 300), (100, 200)])
            .map(|(source, (base, spread))| {
                RingSlice::new(*source, f64::from(base + rng.random_range(0..spread)))
            })
            .collect();

        let metrics = DashboardMetrics {
            revenue: revenue.iter().map(|point| point.value).sum(),
            revenue_change: f64::from(rng.random_range(-10..10_i32)),
            users: user_growth
                .iter()
                .map(|point| point.value_a + point.value_b)
                .sum(),
            users_change: f64::from(rng.random_range(5..20_i32)),
            conversions: conversions.iter().map(|slice| slice.value).sum(),
            conversions_change: f64::from(rng.random_range(-5..20_i32)),
            growth: f64::from(rng.random_range(10..40_i32)),
            growth_change: f64::from(rng.random_range(2..12_i32)),
        };

        Self {
            revenue: Snapshot::from_valid(revenue),
            user_growth: Snapshot::from_valid(user_growth),
            conversions: Snapshot::from_valid(conversions),
            metrics,
        }
    }

    /// Deterministic variant for previews and tests.
    #[must_use]
    pub fn generate_seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(&mut rng)
    }

    /// Six-month revenue trend for the sparkline cards.
    #[must_use]
    pub fn revenue_values(&self) -> Vec<f64> {
        self.revenue.iter().map(|point| point.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CONVERSION_SOURCES, DashboardData, MONTHS};

    #[test]
    fn seeded_generation_is_deterministic() {
        assert_eq!(DashboardData::generate_seeded(7), DashboardData::generate_seeded(7));
    }

    #[test]
    fn values_stay_in_their_ranges() {
        for seed in 0..32 {
            let data = DashboardData::generate_seeded(seed);
            assert_eq!(data.revenue.keys(), MONTHS.to_vec());
            for (index, point) in data.revenue.iter().enumerate() {
                let base = 30_000.0 + 5_000.0 * index as f64;
                assert!(point.value >= base && point.value < base + 50_000.0);
            }
            for point in &data.user_growth {
                assert!((1_000.0..3_000.0).contains(&point.value_a));
                assert!((800.0..2_300.0).contains(&point.value_b));
            }
            assert_eq!(data.conversions.keys(), CONVERSION_SOURCES.to_vec());
            assert!(data.metrics.revenue_change >= -10.0 && data.metrics.revenue_change < 10.0);
            assert!(data.metrics.growth >= 10.0 && data.metrics.growth < 40.0);
        }
    }
}
