mod chart;
mod options;

pub use chart::{Chart, GroupedBarChart, RingChart, SeriesChart, SparklineChart};
pub use options::ChartOptions;
