//! Property checks over the aggregation and index-space primitives.

use chartboard::core::aggregate::{extremum, sum_of, total_sum};
use chartboard::core::hit::data_index_at_coord;
use chartboard::core::store::{unique_sorted_x, value_at};
use chartboard::core::{DataPoint, DataStore, Series, XValue};
use indexmap::IndexMap;
use proptest::prelude::*;

fn series_from(id: &str, values: &[f64]) -> Series {
    Series::new(
        id,
        values
            .iter()
            .enumerate()
            .map(|(index, value)| DataPoint::new(id, index as f64, *value, index))
            .collect(),
    )
}

fn value_vec() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0, 0..32)
}

proptest! {
    #[test]
    fn unique_x_is_sorted_deduplicated_and_bounded(
        a in prop::collection::vec(-100.0f64..100.0, 0..24),
        b in prop::collection::vec(-100.0f64..100.0, 0..24),
    ) {
        let with_xs = |id: &str, xs: &[f64]| {
            Series::new(
                id,
                xs.iter()
                    .enumerate()
                    .map(|(index, x)| DataPoint::new(id, x.round(), 1.0, index))
                    .collect(),
            )
        };
        let targets = vec![with_xs("a", &a), with_xs("b", &b)];

        let xs = unique_sorted_x(&targets);
        let total_points: usize = targets.iter().map(|series| series.values.len()).sum();
        prop_assert!(xs.len() <= total_points);
        for pair in xs.windows(2) {
            prop_assert!(pair[0].as_f64() < pair[1].as_f64());
        }
    }

    #[test]
    fn extremum_bounds_every_value(values in value_vec()) {
        let targets = vec![series_from("a", &values)];
        let bounds = extremum(&targets);
        if values.is_empty() {
            prop_assert!(!bounds.has_values());
        } else {
            for value in &values {
                prop_assert!(bounds.min <= *value && *value <= bounds.max);
            }
        }
    }

    #[test]
    fn collection_extremum_is_the_fold_of_per_series_extrema(
        a in value_vec(),
        b in value_vec(),
        c in value_vec(),
    ) {
        let targets = vec![
            series_from("a", &a),
            series_from("b", &b),
            series_from("c", &c),
        ];
        let whole = extremum(&targets);

        let mut folded_min = f64::INFINITY;
        let mut folded_max = f64::NEG_INFINITY;
        for one in targets.chunks(1) {
            let part = extremum(one);
            folded_min = folded_min.min(part.min);
            folded_max = folded_max.max(part.max);
        }

        prop_assert_eq!(whole.min, folded_min);
        prop_assert_eq!(whole.max, folded_max);
    }

    #[test]
    fn aligned_indices_round_trip_through_value_at(
        raw in prop::collection::vec(0i64..64, 1..24),
    ) {
        let mut xs = raw;
        xs.sort_unstable();
        xs.dedup();

        // points arrive in reverse x order with scrambled indices
        let values: Vec<DataPoint> = xs
            .iter()
            .rev()
            .enumerate()
            .map(|(position, x)| DataPoint::new("a", *x as f64, *x as f64, position))
            .collect();
        let mut store = DataStore::new();
        store.replace_targets(vec![Series::new("a", values)], IndexMap::new());

        let ticks: Vec<XValue> = xs.iter().map(|x| XValue::Number(*x as f64)).collect();
        store.align_indices_to_ticks(&ticks);

        for (position, tick) in ticks.iter().enumerate() {
            let found = value_at(&store.targets()[0].values, position);
            prop_assert_eq!(found.map(|point| point.x.as_f64()), Some(tick.as_f64()));
        }
    }

    #[test]
    fn hidden_subtraction_matches_direct_partition(
        a in value_vec(),
        b in value_vec(),
        hide_a in any::<bool>(),
    ) {
        let targets = vec![series_from("a", &a), series_from("b", &b)];
        let hidden: Vec<String> = if hide_a { vec!["a".to_owned()] } else { Vec::new() };

        let full = total_sum(&targets);
        let net = full - sum_of(&targets, &hidden);

        let expected: f64 = targets
            .iter()
            .filter(|series| !hidden.contains(&series.id))
            .flat_map(|series| &series.values)
            .filter_map(DataPoint::base_value)
            .sum();
        prop_assert!((net - expected).abs() < 1e-6);
    }

    #[test]
    fn coord_lookup_minimizes_distance(
        mut coords in prop::collection::vec(-500.0f64..500.0, 1..24),
        pixel in -600.0f64..600.0,
    ) {
        coords.sort_by(f64::total_cmp);
        coords.dedup();

        let found = data_index_at_coord(&coords, pixel).unwrap();
        let best = coords
            .iter()
            .map(|coord| (coord - pixel).abs())
            .fold(f64::INFINITY, f64::min);
        prop_assert!((coords[found] - pixel).abs() <= best + 1e-9);
    }
}
