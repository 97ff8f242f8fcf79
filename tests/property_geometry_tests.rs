use std::f64::consts::TAU;

use dashboard_charts::core::{
    Easing, GroupedPoint, RingSlice, SeriesPoint, Snapshot, ease_in_out_cubic,
};
use dashboard_charts::interaction::HitRegistry;
use dashboard_charts::mapping::{
    GeometryMapper, GroupedBarConfig, GroupedBarMapper, RingConfig, RingMapper, SeriesConfig,
    SeriesMapper, SparklineConfig, SparklineMapper, ViewMode,
};
use dashboard_charts::render::{Scene, SceneBuilder};
use proptest::prelude::*;

fn series(values: &[f64]) -> Snapshot<SeriesPoint> {
    Snapshot::new(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| SeriesPoint::new(format!("k{index}"), *value))
            .collect(),
    )
    .expect("valid series")
}

fn ring(values: &[f64]) -> Snapshot<RingSlice> {
    Snapshot::new(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| RingSlice::new(format!("c{index}"), *value))
            .collect(),
    )
    .expect("valid ring")
}

fn bars(values: &[(f64, f64)]) -> Snapshot<GroupedPoint> {
    Snapshot::new(
        values
            .iter()
            .enumerate()
            .map(|(index, (a, b))| GroupedPoint::new(format!("m{index}"), *a, *b))
            .collect(),
    )
    .expect("valid bars")
}

fn assert_scene_valid<M: GeometryMapper>(mapper: &M, snapshot: &Snapshot<M::Datum>, progress: f64) {
    let mut scene = Scene::new(mapper.layout());
    let mut registry = HitRegistry::new();
    SceneBuilder::rebuild(&mut scene, &mut registry, mapper.map(snapshot, progress));
    scene.validate().expect("mapped scene must validate");
    for target in registry.iter() {
        let (x, y) = target.hit.anchor();
        assert!(x.is_finite() && y.is_finite());
    }
}

proptest! {
    #[test]
    fn cubic_easing_is_monotonic_and_bounded(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let eased_low = ease_in_out_cubic(low);
        let eased_high = ease_in_out_cubic(high);
        prop_assert!((0.0..=1.0).contains(&eased_low));
        prop_assert!((0.0..=1.0).contains(&eased_high));
        prop_assert!(eased_low <= eased_high);
        prop_assert!((Easing::Linear.apply(low) - low).abs() <= f64::EPSILON);
    }

    #[test]
    fn interpolating_a_snapshot_with_itself_is_identity(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 0..12),
        eased in 0.0f64..=1.0
    ) {
        let snapshot = series(&values);
        prop_assert_eq!(Snapshot::interpolate(&snapshot, &snapshot, eased), snapshot);
    }

    #[test]
    fn interpolation_ends_exactly_on_the_target(
        from in prop::collection::vec(-1.0e6f64..1.0e6, 0..12),
        to in prop::collection::vec(-1.0e6f64..1.0e6, 0..12)
    ) {
        let from = series(&from);
        let to = series(&to);
        prop_assert_eq!(&Snapshot::interpolate(&from, &to, 1.0), &to);
        let start = Snapshot::interpolate(&from, &to, 0.0);
        prop_assert_eq!(start.keys(), to.keys());
    }

    #[test]
    fn series_geometry_is_always_finite(
        values in prop::collection::vec(
            prop_oneof![
                -1.0e9f64..1.0e9,
                prop::num::f64::NORMAL,
                Just(f64::MAX),
                Just(-f64::MAX)
            ],
            0..40
        ),
        progress in -0.5f64..1.5
    ) {
        let snapshot = series(&values);
        assert_scene_valid(&SeriesMapper::new(SeriesConfig::default()).expect("mapper"), &snapshot, progress);
        assert_scene_valid(&SparklineMapper::new(SparklineConfig::default()).expect("mapper"), &snapshot, progress);
    }

    #[test]
    fn transitions_between_extremes_stay_finite(
        from in prop::collection::vec(prop::num::f64::NORMAL, 1..8),
        to in prop::collection::vec(prop::num::f64::NORMAL, 1..8),
        eased in 0.0f64..=1.0
    ) {
        let mid = Snapshot::interpolate(&series(&from), &series(&to), eased);
        prop_assert!(mid.iter().all(|point| point.value.is_finite()));
        assert_scene_valid(&SeriesMapper::new(SeriesConfig::default()).expect("mapper"), &mid, eased);
    }

    #[test]
    fn ring_segments_close_the_circle(
        values in prop::collection::vec(prop_oneof![0.0f64..1.0e6, prop::num::f64::POSITIVE | prop::num::f64::NORMAL], 0..10),
        progress in 0.0f64..=1.0
    ) {
        let snapshot = ring(&values);
        let mapper = RingMapper::new(RingConfig::default()).expect("mapper");
        assert_scene_valid(&mapper, &snapshot, progress);

        let sweep: f64 = mapper.segments(&snapshot).iter().flatten().map(|arc| arc.sweep()).sum();
        if values.iter().sum::<f64>() > 0.0 {
            prop_assert!((sweep - TAU).abs() <= 1e-9);
        } else {
            prop_assert_eq!(sweep, 0.0);
        }
    }

    #[test]
    fn bar_geometry_stays_inside_the_plot(
        values in prop::collection::vec((0.0f64..1.0e6, 0.0f64..1.0e6), 0..12),
        mode in prop_oneof![Just(ViewMode::All), Just(ViewMode::SeriesA), Just(ViewMode::SeriesB)]
    ) {
        let snapshot = bars(&values);
        let mut mapper = GroupedBarMapper::new(GroupedBarConfig::default()).expect("mapper");
        mapper.set_view_mode(mode);
        assert_scene_valid(&mapper, &snapshot, 1.0);

        let layout = mapper.layout();
        for target in mapper.map(&snapshot, 1.0).targets {
            let (x, y) = target.hit.anchor();
            prop_assert!(x >= layout.plot_left() - 1e-9 && x <= layout.plot_right() + 1e-9);
            prop_assert!(y >= layout.plot_top() - 1e-9 && y <= layout.plot_bottom() + 1e-9);
        }
    }
}
