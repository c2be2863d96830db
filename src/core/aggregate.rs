use tracing::trace;

use crate::core::types::{DataPoint, Series, SeriesId};

/// Numeric bounds over base values.
///
/// Empty or all-gap input leaves the seeds untouched
/// (`min = +inf`, `max = -inf`); callers treat that as "no numeric data".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub min: f64,
    pub max: f64,
}

impl Extremum {
    #[must_use]
    pub fn seed() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    #[must_use]
    pub fn has_values(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// The actual data points sitting at the collection-wide extrema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinMaxPoints {
    pub min: Vec<DataPoint>,
    pub max: Vec<DataPoint>,
}

/// Min/max fold over per-series base values.
///
/// The first series seeds the running bounds, every subsequent series
/// extends them; non-numeric entries are filtered per series, so a series
/// of pure gaps contributes nothing.
#[must_use]
pub fn extremum_of(values_per_series: &[&[DataPoint]]) -> Extremum {
    let mut bounds = Extremum::seed();
    for values in values_per_series {
        for value in values.iter().filter_map(DataPoint::base_value) {
            bounds.min = bounds.min.min(value);
            bounds.max = bounds.max.max(value);
        }
    }
    bounds
}

#[must_use]
pub fn extremum(targets: &[Series]) -> Extremum {
    let values: Vec<&[DataPoint]> = targets.iter().map(|series| series.values.as_slice()).collect();
    extremum_of(&values)
}

/// Points whose base value equals `target` exactly.
#[must_use]
pub fn filter_by_value<'a>(values: &'a [DataPoint], target: f64) -> Vec<&'a DataPoint> {
    values
        .iter()
        .filter(|point| point.base_value() == Some(target))
        .collect()
}

/// Collects, per series, the points sitting at the collection-wide min and
/// max so the chart can mark exact extremum positions.
#[must_use]
pub fn min_max_points(targets: &[Series]) -> MinMaxPoints {
    let bounds = extremum(targets);
    let mut result = MinMaxPoints::default();
    if !bounds.has_values() {
        return result;
    }

    for series in targets {
        for point in filter_by_value(&series.values, bounds.min) {
            result.min.push(point.clone());
        }
        for point in filter_by_value(&series.values, bounds.max) {
            result.max.push(point.clone());
        }
    }
    trace!(
        min_count = result.min.len(),
        max_count = result.max.len(),
        "recomputed min/max data points"
    );
    result
}

/// Sum of all series' values at each shared index, non-numeric as zero.
///
/// Buckets by each point's own `index` field rather than array position so
/// filtered or sparse series stay aligned with the shared tick domain.
#[must_use]
pub fn per_index_stack_totals(targets: &[Series]) -> Vec<f64> {
    let mut totals = Vec::new();
    for series in targets {
        for point in &series.values {
            if point.index >= totals.len() {
                totals.resize(point.index + 1, 0.0);
            }
            totals[point.index] += point.base_value().unwrap_or(0.0);
        }
    }
    totals
}

/// Sum of every numeric value across every series.
#[must_use]
pub fn total_sum(targets: &[Series]) -> f64 {
    targets
        .iter()
        .flat_map(|series| &series.values)
        .filter_map(DataPoint::base_value)
        .sum()
}

/// Sum contributed by the named series only.
#[must_use]
pub fn sum_of(targets: &[Series], ids: &[SeriesId]) -> f64 {
    targets
        .iter()
        .filter(|series| ids.contains(&series.id))
        .flat_map(|series| &series.values)
        .filter_map(DataPoint::base_value)
        .sum()
}

/// Per-index sums contributed by the named series, bucketed by each point's
/// own `index`. Indices at or beyond `len` are ignored, so hidden series of
/// differing lengths or sparse index spaces subtract only where they
/// actually hold a point.
#[must_use]
pub fn index_contributions(targets: &[Series], ids: &[SeriesId], len: usize) -> Vec<f64> {
    let mut contributions = vec![0.0; len];
    for series in targets.iter().filter(|series| ids.contains(&series.id)) {
        for point in &series.values {
            if point.index < len {
                contributions[point.index] += point.base_value().unwrap_or(0.0);
            }
        }
    }
    contributions
}
