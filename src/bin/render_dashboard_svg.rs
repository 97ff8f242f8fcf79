use dashboard_charts::animation::ManualFrameHost;
use dashboard_charts::core::Snapshot;
use dashboard_charts::demo_data::DashboardData;
use dashboard_charts::mapping::{
    GeometryMapper, GroupedBarConfig, RingConfig, SeriesConfig, SparklineConfig,
    SparklineMapper, ViewMode,
};
use dashboard_charts::render::{BarSeries, SvgSurface, TargetId};
use dashboard_charts::{Chart, ChartOptions, telemetry};

const DEFAULT_SEED: u64 = 42;
const FRAME_MS: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    Series,
    Ring,
    Bars,
    Sparkline,
}

#[derive(Debug)]
struct CliArgs {
    kind: ChartKind,
    seed: u64,
    view_mode: ViewMode,
    hover: Option<usize>,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Mounts the data generated from `seed`, animates to the data of `seed + 1`
/// and prints the settled scene as SVG.
fn run() -> Result<(), String> {
    let args = parse_args()?;
    let first = DashboardData::generate_seeded(args.seed);
    let second = DashboardData::generate_seeded(args.seed.wrapping_add(1));
    let options = ChartOptions::default();

    let document = match args.kind {
        ChartKind::Series => {
            let chart = Chart::series(
                SvgSurface::new(),
                ManualFrameHost::new(),
                SeriesConfig::default(),
                options,
            )
            .map_err(|err| err.to_string())?;
            animate(chart, first.revenue, second.revenue, args.hover.map(TargetId::Point))
        }
        ChartKind::Ring => {
            let chart = Chart::ring(
                SvgSurface::new(),
                ManualFrameHost::new(),
                RingConfig::default(),
                options,
            )
            .map_err(|err| err.to_string())?;
            let hover = args.hover.map(TargetId::Segment);
            animate(chart, first.conversions, second.conversions, hover)
        }
        ChartKind::Bars => {
            let mut chart = Chart::grouped_bars(
                SvgSurface::new(),
                ManualFrameHost::new(),
                GroupedBarConfig::default(),
                options,
            )
            .map_err(|err| err.to_string())?;
            chart.set_view_mode(args.view_mode);
            let series = if args.view_mode == ViewMode::SeriesB {
                BarSeries::B
            } else {
                BarSeries::A
            };
            let hover = args.hover.map(|index| TargetId::Bar { series, index });
            animate(chart, first.user_growth, second.user_growth, hover)
        }
        ChartKind::Sparkline => {
            let chart = Chart::sparkline(
                SvgSurface::new(),
                ManualFrameHost::new(),
                SparklineConfig::default(),
                options,
            )
            .map_err(|err| err.to_string())?;
            let from = SparklineMapper::snapshot_from_values(&first.revenue_values())
                .map_err(|err| err.to_string())?;
            let to = SparklineMapper::snapshot_from_values(&second.revenue_values())
                .map_err(|err| err.to_string())?;
            animate(chart, from, to, None)
        }
    }?;

    println!("{document}");
    Ok(())
}

fn animate<M: GeometryMapper>(
    mut chart: Chart<M, SvgSurface, ManualFrameHost>,
    from: Snapshot<M::Datum>,
    to: Snapshot<M::Datum>,
    hover: Option<TargetId>,
) -> Result<String, String> {
    chart.update(from);
    chart.update(to);
    let frames = chart.settle(FRAME_MS);
    eprintln!("settled after {frames} frame(s)");
    if let Some(id) = hover {
        chart.pointer_enter(id);
    }
    chart
        .surface()
        .document()
        .map(str::to_owned)
        .ok_or_else(|| "nothing was presented".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut kind = ChartKind::Series;
    let mut seed = DEFAULT_SEED;
    let mut view_mode = ViewMode::All;
    let mut hover = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chart" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --chart".to_owned())?;
                kind = match value.as_str() {
                    "series" => ChartKind::Series,
                    "ring" => ChartKind::Ring,
                    "bars" => ChartKind::Bars,
                    "sparkline" => ChartKind::Sparkline,
                    other => return Err(format!("unknown chart kind `{other}`")),
                };
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --seed".to_owned())?;
                seed = value
                    .parse()
                    .map_err(|err| format!("invalid seed `{value}`: {err}"))?;
            }
            "--view" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --view".to_owned())?;
                view_mode = serde_json::from_value(serde_json::Value::String(value.clone()))
                    .map_err(|_| format!("unknown view mode `{value}`"))?;
            }
            "--hover" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --hover".to_owned())?;
                hover = Some(
                    value
                        .parse()
                        .map_err(|err| format!("invalid hover index `{value}`: {err}"))?,
                );
            }
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin render_dashboard_svg -- [--chart series|ring|bars|sparkline] [--seed <u64>] [--view all|seriesA|seriesB] [--hover <index>]"
                );
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    Ok(CliArgs {
        kind,
        seed,
        view_mode,
        hover,
    })
}
