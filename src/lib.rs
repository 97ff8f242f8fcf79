//! dashboard-charts: animated vector charts for analytics dashboards.
//!
//! Charts are driven by immutable data snapshots. Replacing the snapshot on a
//! [`Chart`] starts a frame-paced transition that interpolates values by key,
//! maps them to retained-mode primitives and presents the resulting scene to a
//! [`render::Surface`]. Hover emphasis and tooltips are applied to the
//! retained scene in place.

pub mod animation;
pub mod api;
pub mod core;
pub mod demo_data;
pub mod error;
pub mod interaction;
pub mod mapping;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartOptions, GroupedBarChart, RingChart, SeriesChart, SparklineChart};
pub use error::{ChartError, ChartResult};
