use std::cell::RefCell;
use std::rc::Rc;

use dashboard_charts::animation::{ManualFrameHost, SchedulerState};
use dashboard_charts::core::{SeriesPoint, Snapshot};
use dashboard_charts::interaction::HoverChange;
use dashboard_charts::mapping::{SeriesConfig, SparklineConfig, SparklineMapper};
use dashboard_charts::render::{NullSurface, TargetId};
use dashboard_charts::{Chart, ChartOptions, SeriesChart};

fn series(values: &[f64]) -> Snapshot<SeriesPoint> {
    Snapshot::new(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| SeriesPoint::new(format!("m{index}"), *value))
            .collect(),
    )
    .expect("valid snapshot")
}

fn build_chart() -> SeriesChart<NullSurface, ManualFrameHost> {
    Chart::series(
        NullSurface::new(),
        ManualFrameHost::new(),
        SeriesConfig::default(),
        ChartOptions::default(),
    )
    .expect("chart init")
}

#[test]
fn dispose_cancels_the_pending_frame_and_is_idempotent() {
    let mut chart = build_chart();
    chart.update(series(&[1.0, 2.0]));
    chart.update(series(&[3.0, 4.0]));
    let pending = chart.host().pending_frames()[0];

    chart.dispose();
    assert!(chart.is_disposed());
    assert_eq!(chart.scheduler_state(), SchedulerState::Idle);
    assert!(chart.host().pending_frames().is_empty());
    assert!(chart.hit_registry().is_empty());

    chart.dispose();
    assert_eq!(chart.host().cancelled_count(), 1);

    let presents = chart.surface().present_count;
    assert!(!chart.on_frame(pending));
    assert_eq!(chart.surface().present_count, presents);
}

#[test]
fn operations_after_dispose_do_nothing() {
    let mut chart = build_chart();
    chart.update(series(&[1.0, 2.0]));
    chart.dispose();

    chart.update(series(&[5.0, 6.0]));
    assert_eq!(chart.snapshot(), Some(&series(&[1.0, 2.0])));
    assert_eq!(chart.scheduler().generation(), 0);
    assert!(chart.host().pending_frames().is_empty());
    assert_eq!(chart.pointer_enter(TargetId::Point(0)), HoverChange::None);
    assert_eq!(chart.pointer_move(80.0, 340.0), HoverChange::None);
    assert_eq!(chart.advance_frames(16.0), 0);
}

#[test]
fn detached_surface_cancels_the_transition_on_the_next_frame() {
    let mut chart = build_chart();
    chart.update(series(&[1.0, 2.0]));
    chart.update(series(&[3.0, 4.0]));
    chart.advance_frames(16.0);
    let presents = chart.surface().present_count;

    chart.surface_mut().detach();
    assert_eq!(chart.advance_frames(16.0), 0);
    assert_eq!(chart.scheduler_state(), SchedulerState::Idle);
    assert!(chart.host().pending_frames().is_empty());
    assert_eq!(chart.surface().present_count, presents);
}

#[test]
fn charts_sharing_one_host_only_accept_their_own_frames() {
    let host = Rc::new(RefCell::new(ManualFrameHost::new()));
    let mut first = Chart::series(
        NullSurface::new(),
        Rc::clone(&host),
        SeriesConfig::default(),
        ChartOptions::default(),
    )
    .expect("first chart");
    let mut second = Chart::sparkline(
        NullSurface::new(),
        Rc::clone(&host),
        SparklineConfig::default(),
        ChartOptions::default().with_transition_duration_ms(160.0),
    )
    .expect("second chart");

    first.update(series(&[1.0, 2.0]));
    first.update(series(&[2.0, 1.0]));
    second.update(SparklineMapper::snapshot_from_values(&[1.0, 2.0, 3.0]).expect("values"));
    second.update(SparklineMapper::snapshot_from_values(&[3.0, 2.0, 1.0]).expect("values"));
    assert_eq!(host.borrow().pending_frames().len(), 2);

    let mut first_frames = 0;
    let mut second_frames = 0;
    for _ in 0..200 {
        let due = host.borrow_mut().advance(16.0);
        if due.is_empty() {
            break;
        }
        for handle in due {
            let accepted = [first.on_frame(handle), second.on_frame(handle)];
            assert_eq!(accepted.iter().filter(|drawn| **drawn).count(), 1);
            first_frames += usize::from(accepted[0]);
            second_frames += usize::from(accepted[1]);
        }
    }

    assert_eq!(second_frames, 10);
    assert_eq!(first_frames, 75);
    assert_eq!(first.scheduler_state(), SchedulerState::Idle);
    assert_eq!(second.scheduler_state(), SchedulerState::Idle);
}
