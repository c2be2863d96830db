//! Two-phase pixel-to-point resolution against real scales.

use chartboard::ChartConfig;
use chartboard::ChartCore;
use chartboard::core::hit::HitContext;
use chartboard::core::{DataPoint, LinearScale, Series};
use indexmap::IndexMap;

fn series(id: &str, values: &[f64]) -> Series {
    Series::new(
        id,
        values
            .iter()
            .enumerate()
            .map(|(index, value)| DataPoint::new(id, index as f64, *value, index))
            .collect(),
    )
}

fn core_with(targets: Vec<Series>) -> ChartCore {
    let mut core = ChartCore::new(ChartConfig::default());
    core.load_targets(targets, IndexMap::new());
    core
}

// x in [0, 10] maps to [0, 1000] pixels
fn x_scale() -> LinearScale {
    LinearScale::new((0.0, 10.0), (0.0, 1000.0)).expect("valid scale")
}

fn rendered_y(point: &DataPoint) -> f64 {
    point.base_value().unwrap_or(f64::MAX)
}

fn no_bar(_: &str) -> bool {
    false
}

fn never_contains(_: &DataPoint, _: (f64, f64)) -> bool {
    false
}

#[test]
fn nearest_point_respects_the_sensitivity_radius() {
    let core = core_with(vec![series("line", &[10.0, 20.0, 30.0])]);
    let scale = x_scale();
    let ctx = HitContext {
        x_scale: &scale,
        point_y: &rendered_y,
        is_bar: &no_bar,
        bar_contains: &never_contains,
        rotated: false,
        sensitivity: 10.0,
    };

    // point "line"[1] renders at (100, 20)
    let hit = core.nearest_visible_point((105.0, 23.0), &ctx);
    assert_eq!(hit.map(|point| point.index), Some(1));

    // exactly at the sensitivity distance: rejected, the comparison is strict
    assert!(core.nearest_visible_point((110.0, 20.0), &ctx).is_none());
}

#[test]
fn bars_win_without_distance_comparison() {
    let core = core_with(vec![
        series("line", &[10.0, 20.0, 30.0]),
        series("bar", &[500.0, 500.0, 500.0]),
    ]);
    let scale = x_scale();
    let is_bar = |id: &str| id == "bar";
    let bar_contains = |point: &DataPoint, pos: (f64, f64)| {
        let center = point.x.as_f64() * 100.0;
        (pos.0 - center).abs() <= 20.0
    };
    let ctx = HitContext {
        x_scale: &scale,
        point_y: &rendered_y,
        is_bar: &is_bar,
        bar_contains: &bar_contains,
        rotated: false,
        sensitivity: 10.0,
    };

    // position is inside bar[2]'s hit region but hundreds of pixels from
    // its rendered top; the bar still wins
    let hit = core.nearest_visible_point((210.0, 30.0), &ctx);
    assert_eq!(
        hit.map(|point| (point.id.as_str(), point.index)),
        Some(("bar", 2))
    );
}

#[test]
fn hidden_series_never_produce_hits() {
    let mut core = core_with(vec![series("line", &[10.0])]);
    let scale = x_scale();
    let ctx = HitContext {
        x_scale: &scale,
        point_y: &rendered_y,
        is_bar: &no_bar,
        bar_contains: &never_contains,
        rotated: false,
        sensitivity: 10.0,
    };

    assert!(core.nearest_visible_point((0.0, 10.0), &ctx).is_some());
    core.hide_targets(&["line".to_owned()], false);
    assert!(core.nearest_visible_point((0.0, 10.0), &ctx).is_none());
}

#[test]
fn rotated_axes_swap_the_pixel_coordinates() {
    let mut config = ChartConfig::default();
    config.axis_rotated = true;
    let mut core = ChartCore::new(config);
    core.load_targets(vec![series("line", &[10.0])], IndexMap::new());
    let scale = x_scale();
    let ctx = HitContext {
        x_scale: &scale,
        point_y: &rendered_y,
        is_bar: &no_bar,
        bar_contains: &never_contains,
        rotated: false,
        sensitivity: 5.0,
    };

    // the point renders at x-pixel 0, y-pixel 10; rotated input arrives
    // as (y, x)
    assert!(core.nearest_visible_point((10.0, 0.0), &ctx).is_some());
    assert!(core.nearest_visible_point((0.0, 10.0), &ctx).is_none());
}

#[test]
fn gap_points_are_not_hit_candidates() {
    let mut with_gap = series("line", &[10.0]);
    with_gap
        .values
        .push(DataPoint::new("line", 1.0, Option::<f64>::None, 1));
    let core = core_with(vec![with_gap]);
    let scale = x_scale();
    let ctx = HitContext {
        x_scale: &scale,
        point_y: &rendered_y,
        is_bar: &no_bar,
        bar_contains: &never_contains,
        rotated: false,
        sensitivity: 10.0,
    };

    // the gap sits at x-pixel 100 but can never be selected
    assert!(core.nearest_visible_point((100.0, 0.0), &ctx).is_none());
}
