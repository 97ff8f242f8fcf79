use dashboard_charts::animation::{ManualFrameHost, SchedulerState};
use dashboard_charts::core::{Easing, SeriesPoint, Snapshot};
use dashboard_charts::mapping::SeriesConfig;
use dashboard_charts::render::{NullSurface, PrimitiveTag, Shape, TargetId};
use dashboard_charts::{ChartOptions, SeriesChart};

fn series(values: &[f64]) -> Snapshot<SeriesPoint> {
    let labels = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    Snapshot::new(
        values
            .iter()
            .zip(labels)
            .map(|(value, label)| SeriesPoint::new(label, *value))
            .collect(),
    )
    .expect("valid snapshot")
}

fn build_chart() -> SeriesChart<NullSurface, ManualFrameHost> {
    SeriesChart::series(
        NullSurface::new(),
        ManualFrameHost::new(),
        SeriesConfig::default(),
        ChartOptions::default(),
    )
    .expect("chart init")
}

fn marker_center(chart: &SeriesChart<NullSurface, ManualFrameHost>, index: usize) -> (f64, f64) {
    let primitive = chart
        .scene()
        .find_tagged(PrimitiveTag::Target(TargetId::Point(index)))
        .expect("marker present");
    let Shape::Circle(circle) = &primitive.shape else {
        panic!("marker must be a circle");
    };
    (circle.cx, circle.cy)
}

#[test]
fn first_update_renders_statically_at_full_progress() {
    let mut chart = build_chart();
    chart.update(series(&[10.0, 20.0, 30.0]));

    assert_eq!(chart.scheduler_state(), SchedulerState::Idle);
    assert!(chart.host().pending_frames().is_empty());
    assert_eq!(chart.surface().present_count, 1);
    assert_eq!(chart.displayed_progress(), 1.0);
    assert_eq!(chart.hit_registry().len(), 3);
    assert_eq!(marker_center(&chart, 0), (80.0, 340.0));
    assert_eq!(marker_center(&chart, 2), (760.0, 40.0));
}

#[test]
fn identical_snapshot_is_a_no_op() {
    let mut chart = build_chart();
    chart.update(series(&[10.0, 20.0, 30.0]));
    chart.update(series(&[10.0, 20.0, 30.0]));

    assert_eq!(chart.scheduler_state(), SchedulerState::Idle);
    assert_eq!(chart.scheduler().generation(), 0);
    assert_eq!(chart.surface().present_count, 1);
}

#[test]
fn midpoint_frame_interpolates_by_key() {
    let mut chart = build_chart();
    chart.update(series(&[10.0, 20.0, 30.0]));
    chart.update(series(&[10.0, 50.0, 30.0]));
    assert_eq!(chart.scheduler_state(), SchedulerState::Running);
    assert_eq!(chart.host().pending_frames().len(), 1);

    assert_eq!(chart.advance_frames(600.0), 1);
    let displayed = chart.displayed();
    assert_eq!(displayed.points()[0].value, 10.0);
    assert_eq!(displayed.points()[1].value, 35.0);
    assert_eq!(displayed.points()[2].value, 30.0);
    assert_eq!(chart.displayed_progress(), 0.5);

    // Value range at this frame is [10, 35], so the middle point sits on the plot top.
    let (_, y) = marker_center(&chart, 1);
    assert!((y - 40.0).abs() <= 1e-9);
}

#[test]
fn settled_transition_reproduces_the_target_exactly() {
    let mut chart = build_chart();
    chart.update(series(&[10.0, 20.0, 30.0]));
    let target = series(&[15.0, 45.0, 5.0]);
    chart.update(target.clone());

    let frames = chart.settle(16.0);
    assert!(frames >= 75);
    assert_eq!(chart.displayed(), &target);
    assert_eq!(chart.displayed_progress(), 1.0);
    assert_eq!(chart.scheduler_state(), SchedulerState::Idle);
    assert!(chart.host().pending_frames().is_empty());
}

#[test]
fn superseding_update_starts_from_displayed_values() {
    let mut chart = build_chart();
    chart.update(series(&[10.0, 20.0, 30.0]));
    chart.update(series(&[10.0, 50.0, 30.0]));
    chart.advance_frames(600.0);

    chart.update(series(&[10.0, 0.0, 30.0]));
    assert_eq!(chart.host().cancelled_count(), 1);
    assert_eq!(chart.scheduler().generation(), 2);
    let transition = chart.scheduler().transition().expect("running transition");
    assert_eq!(transition.from.points()[1].value, 35.0);
    assert_eq!(transition.to.points()[1].value, 0.0);

    chart.settle(16.0);
    assert_eq!(chart.displayed().points()[1].value, 0.0);
}

#[test]
fn stale_frame_handles_are_ignored() {
    let mut chart = build_chart();
    chart.update(series(&[10.0, 20.0, 30.0]));
    chart.update(series(&[10.0, 50.0, 30.0]));
    let stale = chart.host().pending_frames()[0];

    chart.update(series(&[10.0, 60.0, 30.0]));
    let presents = chart.surface().present_count;
    assert!(!chart.on_frame(stale));
    assert_eq!(chart.surface().present_count, presents);
    assert_eq!(chart.scheduler_state(), SchedulerState::Running);
}

#[test]
fn structural_change_fades_new_keys_in_from_zero() {
    let mut chart = build_chart();
    chart.update(series(&[10.0, 20.0]));
    chart.update(series(&[10.0, 20.0, 40.0]));
    chart.advance_frames(600.0);

    let displayed = chart.displayed();
    assert_eq!(displayed.len(), 3);
    assert_eq!(displayed.points()[2].value, 20.0);
}

#[test]
fn linear_easing_and_custom_duration_are_honored() {
    let options = ChartOptions::default()
        .with_transition_duration_ms(400.0)
        .with_easing(Easing::Linear);
    let mut chart = SeriesChart::series(
        NullSurface::new(),
        ManualFrameHost::new(),
        SeriesConfig::default(),
        options,
    )
    .expect("chart init");
    chart.update(series(&[0.0]));
    chart.update(series(&[100.0]));

    chart.advance_frames(100.0);
    assert_eq!(chart.displayed().points()[0].value, 25.0);
    chart.advance_frames(300.0);
    assert_eq!(chart.displayed().points()[0].value, 100.0);
    assert_eq!(chart.scheduler_state(), SchedulerState::Idle);
}

#[test]
fn zero_duration_completes_on_the_first_frame() {
    let options = ChartOptions::default().with_transition_duration_ms(0.0);
    let mut chart = SeriesChart::series(
        NullSurface::new(),
        ManualFrameHost::new(),
        SeriesConfig::default(),
        options,
    )
    .expect("chart init");
    chart.update(series(&[1.0, 2.0]));
    chart.update(series(&[3.0, 4.0]));

    assert_eq!(chart.advance_frames(1.0), 1);
    assert_eq!(chart.displayed(), &series(&[3.0, 4.0]));
    assert_eq!(chart.scheduler_state(), SchedulerState::Idle);
}

#[test]
fn invalid_options_are_rejected_at_construction() {
    let options = ChartOptions::default().with_transition_duration_ms(f64::NAN);
    let result = SeriesChart::series(
        NullSurface::new(),
        ManualFrameHost::new(),
        SeriesConfig::default(),
        options,
    );
    assert!(result.is_err());
}

#[test]
fn options_json_uses_defaults_for_missing_fields() {
    let options = ChartOptions::from_json_str("{}").expect("parse options");
    assert_eq!(options, ChartOptions::default());
    assert_eq!(options.transition_duration_ms, 1200.0);

    let options = ChartOptions::from_json_str(r#"{"transition_duration_ms": 300, "easing": "linear"}"#)
        .expect("parse options");
    assert_eq!(options.easing, Easing::Linear);
    let json = options.to_json_pretty().expect("serialize options");
    assert_eq!(ChartOptions::from_json_str(&json).expect("reparse"), options);

    assert!(ChartOptions::from_json_str(r#"{"transition_duration_ms": -1}"#).is_err());
}
