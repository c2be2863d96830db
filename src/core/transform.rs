use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::config::StepKind;
use crate::core::store::unique_sorted_x;
use crate::core::types::{DataPoint, PointValue, Series, SeriesId, XValue};

/// Pads step-rendered values with cloned head/tail points one x unit out,
/// so the step line fully covers both gap sides. Categorized axes get a
/// second pad on the side their step variant leaves open.
///
/// Applies only to categorized axes or explicit before/after step kinds;
/// other inputs pass through untouched.
#[must_use]
pub fn values_to_step(values: &[DataPoint], step: StepKind, categorized: bool) -> Vec<DataPoint> {
    let applies = categorized || matches!(step, StepKind::StepBefore | StepKind::StepAfter);
    if !applies || values.is_empty() {
        return values.to_vec();
    }

    let mut converted: Vec<DataPoint> = values.to_vec();
    let shifted = |point: &DataPoint, offset: f64| {
        let mut clone = point.clone();
        clone.x = XValue::Number(point.x.as_f64() + offset);
        clone
    };

    let head = values[0].clone();
    let tail = values[values.len() - 1].clone();

    converted.insert(0, shifted(&head, -1.0));
    if categorized && step == StepKind::StepAfter {
        converted.insert(0, shifted(&head, -2.0));
    }

    converted.push(shifted(&tail, 1.0));
    if categorized && step == StepKind::StepBefore {
        converted.push(shifted(&tail, 2.0));
    }

    converted
}

/// Expands every range point into a `low` and a `high` plain point at the
/// same x, in that order; non-range points pass through unchanged.
#[must_use]
pub fn values_to_range(values: &[DataPoint]) -> Vec<DataPoint> {
    let mut expanded = Vec::with_capacity(values.len() * 2);
    for point in values {
        match point.value {
            PointValue::Range { low, high, .. } => {
                let mut lower = point.clone();
                lower.value = PointValue::Plain(low);
                let mut upper = point.clone();
                upper.value = PointValue::Plain(high);
                expanded.push(lower);
                expanded.push(upper);
            }
            _ => expanded.push(point.clone()),
        }
    }
    expanded
}

/// Flattens targets into id-keyed numeric vectors for export.
///
/// Ranges contribute low/mid/high, bubbles their y dimension, gaps a NaN
/// slot. In multiple-x mode plain values land at the position of their x
/// within the merged unique x domain so series stay column-aligned.
#[must_use]
pub fn values_as_id_keyed(targets: &[Series], multiple_x: bool) -> IndexMap<SeriesId, Vec<f64>> {
    let positions: IndexMap<OrderedFloat<f64>, usize> = if multiple_x {
        unique_sorted_x(targets)
            .into_iter()
            .enumerate()
            .map(|(index, x)| (OrderedFloat(x.as_f64()), index))
            .collect()
    } else {
        IndexMap::new()
    };

    let mut keyed = IndexMap::new();
    for series in targets {
        let mut flattened: Vec<f64> = Vec::with_capacity(series.values.len());
        for point in &series.values {
            match point.value {
                PointValue::Range { low, mid, high } => {
                    flattened.extend([low, mid, high]);
                }
                PointValue::Bubble { y, .. } => flattened.push(y),
                PointValue::Plain(value) => {
                    if multiple_x {
                        if let Some(&slot) = positions.get(&OrderedFloat(point.x.as_f64())) {
                            if slot >= flattened.len() {
                                flattened.resize(slot + 1, f64::NAN);
                            }
                            flattened[slot] = value;
                        }
                    } else {
                        flattened.push(value);
                    }
                }
                PointValue::Gap => flattened.push(f64::NAN),
            }
        }
        keyed.insert(series.id.clone(), flattened);
    }
    keyed
}
