use dashboard_charts::animation::ManualFrameHost;
use dashboard_charts::core::{SeriesPoint, Snapshot};
use dashboard_charts::interaction::HoverChange;
use dashboard_charts::mapping::SeriesConfig;
use dashboard_charts::render::{Emphasis, NullSurface, PrimitiveTag, TargetId};
use dashboard_charts::{Chart, ChartOptions, SeriesChart};

fn series(values: &[f64]) -> Snapshot<SeriesPoint> {
    Snapshot::new(
        values
            .iter()
            .zip(["Jan", "Feb", "Mar"])
            .map(|(value, label)| SeriesPoint::new(label, *value))
            .collect(),
    )
    .expect("valid snapshot")
}

/// Markers land at (80, 340), (420, 190) and (760, 40).
fn mounted_chart() -> SeriesChart<NullSurface, ManualFrameHost> {
    let mut chart = Chart::series(
        NullSurface::new(),
        ManualFrameHost::new(),
        SeriesConfig::default(),
        ChartOptions::default(),
    )
    .expect("chart init");
    chart.update(series(&[10.0, 20.0, 30.0]));
    chart
}

fn emphasis_of(chart: &SeriesChart<NullSurface, ManualFrameHost>, tag: PrimitiveTag) -> Emphasis {
    chart
        .scene()
        .find_tagged(tag)
        .expect("tagged primitive")
        .style
        .emphasis
}

#[test]
fn at_most_one_target_is_emphasized() {
    let mut chart = mounted_chart();
    let first = TargetId::Point(0);
    let second = TargetId::Point(1);

    assert_eq!(chart.pointer_enter(first), HoverChange::Entered(first));
    assert_eq!(chart.scene().tooltip_count(), 1);
    assert_eq!(chart.surface().last_tooltip_count, 1);
    assert_eq!(emphasis_of(&chart, PrimitiveTag::Target(first)).scale, 1.4);
    assert_eq!(
        emphasis_of(&chart, PrimitiveTag::Decoration(first)).opacity,
        Some(0.6)
    );

    assert_eq!(
        chart.pointer_enter(second),
        HoverChange::Switched {
            from: first,
            to: second
        }
    );
    assert_eq!(chart.scene().tooltip_count(), 1);
    assert!(chart.scene().find_tagged(PrimitiveTag::Tooltip(second)).is_some());
    assert_eq!(emphasis_of(&chart, PrimitiveTag::Target(first)), Emphasis::NONE);
    assert_eq!(emphasis_of(&chart, PrimitiveTag::Decoration(first)), Emphasis::NONE);
    assert_eq!(chart.hover_state().active(), Some(second));
}

#[test]
fn leave_for_an_inactive_target_is_ignored() {
    let mut chart = mounted_chart();
    chart.pointer_enter(TargetId::Point(1));
    let presents = chart.surface().present_count;

    assert_eq!(chart.pointer_leave(TargetId::Point(0)), HoverChange::None);
    assert_eq!(chart.surface().present_count, presents);
    assert_eq!(chart.scene().tooltip_count(), 1);

    assert_eq!(
        chart.pointer_leave(TargetId::Point(1)),
        HoverChange::Left(TargetId::Point(1))
    );
    assert_eq!(chart.scene().tooltip_count(), 0);
    assert_eq!(chart.surface().last_tooltip_count, 0);
    assert!(!chart.hover_state().is_active());
}

#[test]
fn unknown_targets_are_ignored() {
    let mut chart = mounted_chart();
    assert_eq!(chart.pointer_enter(TargetId::Point(9)), HoverChange::None);
    assert_eq!(chart.pointer_enter(TargetId::Segment(0)), HoverChange::None);
    assert_eq!(chart.scene().tooltip_count(), 0);
}

#[test]
fn pointer_positions_are_hit_tested() {
    let mut chart = mounted_chart();

    assert_eq!(
        chart.pointer_move(421.0, 191.0),
        HoverChange::Entered(TargetId::Point(1))
    );
    assert_eq!(chart.pointer_move(423.0, 188.0), HoverChange::None);
    assert_eq!(
        chart.pointer_move(762.0, 42.0),
        HoverChange::Switched {
            from: TargetId::Point(1),
            to: TargetId::Point(2)
        }
    );
    assert_eq!(
        chart.pointer_move(600.0, 300.0),
        HoverChange::Left(TargetId::Point(2))
    );
    assert_eq!(chart.pointer_move(600.0, 300.0), HoverChange::None);

    chart.pointer_move(80.0, 340.0);
    assert_eq!(
        chart.pointer_exit(),
        HoverChange::Left(TargetId::Point(0))
    );
    assert_eq!(chart.pointer_exit(), HoverChange::None);
}

#[test]
fn redraw_drops_hover_state_and_tooltips() {
    let mut chart = mounted_chart();
    chart.pointer_enter(TargetId::Point(2));
    chart.update(series(&[30.0, 20.0, 10.0]));
    assert_eq!(chart.scene().tooltip_count(), 1);

    assert_eq!(chart.advance_frames(16.0), 1);
    assert!(!chart.hover_state().is_active());
    assert_eq!(chart.scene().tooltip_count(), 0);
    assert_eq!(
        emphasis_of(&chart, PrimitiveTag::Target(TargetId::Point(2))),
        Emphasis::NONE
    );

    // Targets of the rebuilt scene remain hoverable.
    assert_eq!(
        chart.pointer_enter(TargetId::Point(2)),
        HoverChange::Entered(TargetId::Point(2))
    );
}
