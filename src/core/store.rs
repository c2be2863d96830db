use std::collections::HashMap;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::config::{DataOrder, XAxisKind};
use crate::core::types::{DataPoint, Series, SeriesId, XValue};

/// Canonical series storage plus visibility bookkeeping.
///
/// Every mutation of the series collection or the visibility sets bumps
/// `generation`; derived-value caches compare generations instead of
/// trusting ad hoc clearing, so aggregates can never be partially stale.
#[derive(Debug, Default)]
pub struct DataStore {
    targets: Vec<Series>,
    xs: IndexMap<SeriesId, Vec<XValue>>,
    hidden_target_ids: Vec<SeriesId>,
    hidden_legend_ids: Vec<SeriesId>,
    generation: u64,
}

/// First point whose stored index equals the requested index.
///
/// A linear scan on purpose: index spaces are non-contiguous after
/// filtering, so positions cannot be trusted.
#[must_use]
pub fn value_at(values: &[DataPoint], index: usize) -> Option<&DataPoint> {
    values.iter().find(|point| point.index == index)
}

/// Merged, deduplicated, ascending x values of every series.
///
/// Used to build the shared index space in multiple-x mode. The first
/// occurrence of each x decides the retained variant, so time values stay
/// chronological.
#[must_use]
pub fn unique_sorted_x(targets: &[Series]) -> Vec<XValue> {
    let mut by_key = std::collections::BTreeMap::new();
    for series in targets {
        for point in &series.values {
            by_key
                .entry(OrderedFloat(point.x.as_f64()))
                .or_insert(point.x);
        }
    }
    by_key.into_values().collect()
}

/// Points whose x equals `x` exactly, across all targets.
#[must_use]
pub fn filter_by_x<'a>(targets: &'a [Series], x: XValue) -> Vec<&'a DataPoint> {
    let key = x.as_f64();
    targets
        .iter()
        .flat_map(|series| &series.values)
        .filter(|point| point.x.as_f64() == key)
        .collect()
}

/// Series trimmed to the points whose x falls inside `[lo, hi]`.
#[must_use]
pub fn filter_by_x_domain(targets: &[Series], lo: f64, hi: f64) -> Vec<Series> {
    targets
        .iter()
        .map(|series| Series {
            id: series.id.clone(),
            id_org: series.id_org.clone(),
            name: series.name.clone(),
            values: series
                .values
                .iter()
                .filter(|point| {
                    let x = point.x.as_f64();
                    lo <= x && x <= hi
                })
                .cloned()
                .collect(),
        })
        .collect()
}

/// Points carrying a numeric base value (gap exclusion).
#[must_use]
pub fn filter_without_gaps(values: &[DataPoint]) -> Vec<&DataPoint> {
    values
        .iter()
        .filter(|point| point.base_value().is_some())
        .collect()
}

/// Regenerates a point's x through the axis-mode rules: categorized axes
/// collapse to the ordinal index, custom axes coerce to numeric, and an
/// absent or invalid raw x always falls back to the ordinal index.
#[must_use]
pub fn generate_x(axis: XAxisKind, raw: Option<XValue>, ordinal: usize) -> XValue {
    let fallback = XValue::Number(ordinal as f64);
    let raw = raw.filter(|x| x.is_finite());
    match axis {
        XAxisKind::Category => fallback,
        XAxisKind::Custom => raw.map_or(fallback, |x| XValue::Number(x.as_f64())),
        XAxisKind::TimeSeries | XAxisKind::Indexed => raw.unwrap_or(fallback),
    }
}

impl DataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn targets(&self) -> &[Series] {
        &self.targets
    }

    #[must_use]
    pub fn series(&self, id: &str) -> Option<&Series> {
        self.targets.iter().find(|series| series.id == id)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<SeriesId> {
        self.targets.iter().map(|series| series.id.clone()).collect()
    }

    #[must_use]
    pub fn has_target(&self, id: &str) -> bool {
        self.targets.iter().any(|series| series.id == id)
    }

    #[must_use]
    pub fn raw_xs(&self, id: &str) -> Option<&[XValue]> {
        self.xs.get(id).map(Vec::as_slice)
    }

    /// Replaces the series collection wholesale.
    pub fn replace_targets(&mut self, targets: Vec<Series>, xs: IndexMap<SeriesId, Vec<XValue>>) {
        debug!(
            target_count = targets.len(),
            x_vectors = xs.len(),
            "replace series collection"
        );
        self.targets = targets;
        self.xs = xs;
        self.touch();
    }

    /// Removes the named series and their raw x vectors.
    pub fn remove_targets(&mut self, ids: &[SeriesId]) {
        let before = self.targets.len();
        self.targets.retain(|series| !ids.contains(&series.id));
        self.xs.retain(|id, _| !ids.contains(id));
        debug!(removed = before - self.targets.len(), "remove series");
        self.touch();
    }

    /// Explicit raw x if present and valid, else the ordinal index.
    /// Absent x never errors; degradation to positional defaults is the
    /// contract here.
    #[must_use]
    pub fn x_value_at(&self, id: &str, index: usize) -> XValue {
        self.xs
            .get(id)
            .and_then(|xs| xs.get(index))
            .copied()
            .filter(|x| x.is_finite())
            .unwrap_or(XValue::Number(index as f64))
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        !self.hidden_target_ids.iter().any(|hidden| hidden == id)
    }

    #[must_use]
    pub fn is_legend_visible(&self, id: &str) -> bool {
        !self.hidden_legend_ids.iter().any(|hidden| hidden == id)
    }

    /// Visible series in input order (stable filter).
    #[must_use]
    pub fn visible_series(&self) -> Vec<&Series> {
        self.targets
            .iter()
            .filter(|series| self.is_visible(&series.id))
            .collect()
    }

    #[must_use]
    pub fn hidden_target_ids(&self) -> &[SeriesId] {
        &self.hidden_target_ids
    }

    #[must_use]
    pub fn hidden_legend_ids(&self) -> &[SeriesId] {
        &self.hidden_legend_ids
    }

    pub fn hide_targets(&mut self, ids: &[SeriesId]) {
        Self::add_to_set(&mut self.hidden_target_ids, ids);
        trace!(hidden = self.hidden_target_ids.len(), "hide targets");
        self.touch();
    }

    pub fn show_targets(&mut self, ids: &[SeriesId]) {
        self.hidden_target_ids.retain(|id| !ids.contains(id));
        trace!(hidden = self.hidden_target_ids.len(), "show targets");
        self.touch();
    }

    pub fn hide_legend(&mut self, ids: &[SeriesId]) {
        Self::add_to_set(&mut self.hidden_legend_ids, ids);
        self.touch();
    }

    pub fn show_legend(&mut self, ids: &[SeriesId]) {
        self.hidden_legend_ids.retain(|id| !ids.contains(id));
        self.touch();
    }

    /// All visible series' points at one shared index, optionally without
    /// gaps.
    #[must_use]
    pub fn values_on_index(&self, index: usize, filter_gaps: bool) -> Vec<&DataPoint> {
        self.visible_series()
            .into_iter()
            .filter_map(|series| value_at(&series.values, index))
            .filter(|point| !filter_gaps || point.base_value().is_some())
            .collect()
    }

    /// Longest series length.
    #[must_use]
    pub fn max_data_count(&self) -> usize {
        self.targets
            .iter()
            .map(|series| series.values.len())
            .max()
            .unwrap_or(0)
    }

    /// Shared `(x, index)` tick source across visible series: the merged
    /// unique x domain when several series are visible, a single series'
    /// own pairs otherwise.
    #[must_use]
    pub fn max_count_target(&self) -> Vec<(XValue, usize)> {
        let visible = self.visible_series();
        match visible.len() {
            0 => Vec::new(),
            1 => visible[0]
                .values
                .iter()
                .map(|point| (point.x, point.index))
                .collect(),
            _ => {
                let owned: Vec<Series> = visible.into_iter().cloned().collect();
                unique_sorted_x(&owned)
                    .into_iter()
                    .enumerate()
                    .map(|(index, x)| (x, index))
                    .collect()
            }
        }
    }

    /// Re-assigns every point's `index` to the position of its x within the
    /// tick ordering. X values absent from the tick domain keep their
    /// original ordinal position, never get dropped.
    pub fn align_indices_to_ticks(&mut self, ticks: &[XValue]) {
        let positions: HashMap<OrderedFloat<f64>, usize> = ticks
            .iter()
            .enumerate()
            .map(|(index, tick)| (OrderedFloat(tick.as_f64()), index))
            .collect();

        for series in &mut self.targets {
            for (ordinal, point) in series.values.iter_mut().enumerate() {
                point.index = positions
                    .get(&OrderedFloat(point.x.as_f64()))
                    .copied()
                    .unwrap_or(ordinal);
            }
        }
        self.touch();
    }

    /// Replaces the raw x vector of the named series and regenerates each
    /// point's x through the axis-mode rules.
    pub fn update_target_x(&mut self, axis: XAxisKind, ids: &[SeriesId], xs: &[XValue]) {
        for series in &mut self.targets {
            if !ids.contains(&series.id) {
                continue;
            }
            for (ordinal, point) in series.values.iter_mut().enumerate() {
                point.x = generate_x(axis, xs.get(ordinal).copied(), ordinal);
            }
            self.xs.insert(series.id.clone(), xs.to_vec());
        }
        self.touch();
    }

    /// Per-series variant of [`DataStore::update_target_x`]; series without
    /// an entry keep their x values.
    pub fn update_target_xs(&mut self, axis: XAxisKind, xs: &IndexMap<SeriesId, Vec<XValue>>) {
        for (id, x) in xs {
            if self.has_target(id) {
                self.update_target_x(axis, std::slice::from_ref(id), x);
            }
        }
    }

    #[must_use]
    pub fn has_positive_value(&self) -> bool {
        self.any_base_value(|value| value > 0.0)
    }

    #[must_use]
    pub fn has_negative_value(&self) -> bool {
        self.any_base_value(|value| value < 0.0)
    }

    /// Targets reordered for stacked/arc layout. `Asc` stacks the largest
    /// absolute sums first, matching legend-to-stack reading order.
    #[must_use]
    pub fn ordered_targets(&self, order: DataOrder) -> Vec<&Series> {
        let mut ordered: Vec<&Series> = self.targets.iter().collect();
        let sum_of = |series: &Series| -> f64 {
            series
                .values
                .iter()
                .filter_map(DataPoint::base_value)
                .map(f64::abs)
                .sum()
        };
        match order {
            DataOrder::None => {}
            DataOrder::Asc => ordered.sort_by(|a, b| sum_of(b).total_cmp(&sum_of(a))),
            DataOrder::Desc => ordered.sort_by(|a, b| sum_of(a).total_cmp(&sum_of(b))),
        }
        ordered
    }

    /// Targets reordered by a caller-supplied comparator, for orderings the
    /// built-in sum-based modes cannot express.
    #[must_use]
    pub fn ordered_targets_by(
        &self,
        compare: impl FnMut(&&Series, &&Series) -> std::cmp::Ordering,
    ) -> Vec<&Series> {
        let mut ordered: Vec<&Series> = self.targets.iter().collect();
        ordered.sort_by(compare);
        ordered
    }

    fn any_base_value(&self, check: impl Fn(f64) -> bool) -> bool {
        self.targets
            .iter()
            .flat_map(|series| &series.values)
            .filter_map(DataPoint::base_value)
            .any(check)
    }

    fn add_to_set(set: &mut Vec<SeriesId>, ids: &[SeriesId]) {
        for id in ids {
            if !set.contains(id) {
                set.push(id.clone());
            }
        }
    }

    fn touch(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{DataStore, filter_by_x_domain, generate_x, unique_sorted_x, value_at};
    use crate::config::{DataOrder, XAxisKind};
    use crate::core::types::{DataPoint, PointValue, Series, XValue};
    use indexmap::IndexMap;

    fn series(id: &str, values: &[(f64, f64)]) -> Series {
        Series::new(
            id,
            values
                .iter()
                .enumerate()
                .map(|(index, (x, value))| DataPoint::new(id, *x, *value, index))
                .collect(),
        )
    }

    fn store_with(targets: Vec<Series>) -> DataStore {
        let mut store = DataStore::new();
        store.replace_targets(targets, IndexMap::new());
        store
    }

    #[test]
    fn value_at_matches_stored_index_not_position() {
        let mut a = series("a", &[(0.0, 1.0), (1.0, 2.0)]);
        a.values[0].index = 7;
        let found = value_at(&a.values, 7).expect("point with index 7");
        assert_eq!(found.base_value(), Some(1.0));
        assert!(value_at(&a.values, 3).is_none());
    }

    #[test]
    fn x_value_at_falls_back_to_ordinal_index() {
        let mut store = store_with(vec![series("a", &[(0.0, 1.0)])]);
        let mut xs = IndexMap::new();
        xs.insert("a".to_owned(), vec![XValue::Number(5.0)]);
        store.replace_targets(vec![series("a", &[(5.0, 1.0), (6.0, 2.0)])], xs);

        assert_eq!(store.x_value_at("a", 0).as_f64(), 5.0);
        // index 1 has no raw x recorded
        assert_eq!(store.x_value_at("a", 1).as_f64(), 1.0);
        assert_eq!(store.x_value_at("missing", 3).as_f64(), 3.0);
    }

    #[test]
    fn visibility_sets_are_duplicate_free_and_independent() {
        let mut store = store_with(vec![series("a", &[]), series("b", &[])]);
        store.hide_targets(&["a".to_owned(), "a".to_owned()]);
        store.hide_legend(&["b".to_owned()]);

        assert_eq!(store.hidden_target_ids(), ["a".to_owned()]);
        assert!(!store.is_visible("a"));
        assert!(store.is_visible("b"));
        assert!(store.is_legend_visible("a"));
        assert!(!store.is_legend_visible("b"));

        store.show_targets(&["a".to_owned()]);
        assert!(store.is_visible("a"));
    }

    #[test]
    fn visible_series_preserves_input_order() {
        let mut store = store_with(vec![series("a", &[]), series("b", &[]), series("c", &[])]);
        store.hide_targets(&["b".to_owned()]);
        let ids: Vec<&str> = store
            .visible_series()
            .iter()
            .map(|series| series.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn unique_sorted_x_merges_dedups_and_sorts() {
        let targets = vec![
            series("a", &[(3.0, 1.0), (1.0, 1.0)]),
            series("b", &[(2.0, 1.0), (1.0, 1.0)]),
        ];
        let xs: Vec<f64> = unique_sorted_x(&targets)
            .into_iter()
            .map(XValue::as_f64)
            .collect();
        assert_eq!(xs, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn align_indices_falls_back_to_ordinal_for_unknown_x() {
        let mut store = store_with(vec![series("a", &[(10.0, 1.0), (99.0, 2.0), (30.0, 3.0)])]);
        store.align_indices_to_ticks(&[
            XValue::Number(10.0),
            XValue::Number(20.0),
            XValue::Number(30.0),
        ]);

        let target = &store.targets()[0];
        assert_eq!(target.values[0].index, 0);
        // x=99 is absent from the tick domain: original ordinal position
        assert_eq!(target.values[1].index, 1);
        assert_eq!(target.values[2].index, 2);
    }

    #[test]
    fn generate_x_per_axis_mode() {
        assert_eq!(
            generate_x(XAxisKind::Category, Some(XValue::Number(40.0)), 2).as_f64(),
            2.0
        );
        assert_eq!(
            generate_x(XAxisKind::Custom, Some(XValue::Number(40.0)), 2).as_f64(),
            40.0
        );
        assert_eq!(generate_x(XAxisKind::Indexed, None, 2).as_f64(), 2.0);
        assert_eq!(
            generate_x(XAxisKind::Indexed, Some(XValue::Number(f64::NAN)), 4).as_f64(),
            4.0
        );
    }

    #[test]
    fn update_target_x_rewrites_points_and_raw_vector() {
        let mut store = store_with(vec![series("a", &[(0.0, 1.0), (1.0, 2.0)])]);
        store.update_target_x(
            XAxisKind::Custom,
            &["a".to_owned()],
            &[XValue::Number(100.0), XValue::Number(200.0)],
        );

        let target = store.series("a").expect("series a");
        assert_eq!(target.values[0].x.as_f64(), 100.0);
        assert_eq!(target.values[1].x.as_f64(), 200.0);
        assert_eq!(store.raw_xs("a").map(<[XValue]>::len), Some(2));
    }

    #[test]
    fn ordered_targets_sorts_by_absolute_sum() {
        let store = store_with(vec![
            series("small", &[(0.0, 1.0)]),
            series("big", &[(0.0, -10.0)]),
        ]);

        let asc: Vec<&str> = store
            .ordered_targets(DataOrder::Asc)
            .iter()
            .map(|series| series.id.as_str())
            .collect();
        assert_eq!(asc, ["big", "small"]);

        let desc: Vec<&str> = store
            .ordered_targets(DataOrder::Desc)
            .iter()
            .map(|series| series.id.as_str())
            .collect();
        assert_eq!(desc, ["small", "big"]);
    }

    #[test]
    fn comparator_ordering_overrides_the_built_in_modes() {
        let store = store_with(vec![series("b", &[]), series("a", &[])]);
        let ids: Vec<&str> = store
            .ordered_targets_by(|left, right| left.id.cmp(&right.id))
            .iter()
            .map(|series| series.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn sign_probes_use_base_values() {
        let store = store_with(vec![series("a", &[(0.0, 3.0), (1.0, -2.0)])]);
        assert!(store.has_positive_value());
        assert!(store.has_negative_value());

        let gaps = store_with(vec![Series::new(
            "g",
            vec![DataPoint::new("g", 0.0, PointValue::Gap, 0)],
        )]);
        assert!(!gaps.has_positive_value());
        assert!(!gaps.has_negative_value());
    }

    #[test]
    fn x_domain_filter_keeps_ids_and_trims_values() {
        let targets = vec![series("a", &[(0.0, 1.0), (5.0, 2.0), (10.0, 3.0)])];
        let filtered = filter_by_x_domain(&targets, 1.0, 9.0);
        assert_eq!(filtered[0].id, "a");
        assert_eq!(filtered[0].values.len(), 1);
        assert_eq!(filtered[0].values[0].x.as_f64(), 5.0);
    }

    #[test]
    fn mutations_bump_the_generation() {
        let mut store = store_with(vec![series("a", &[])]);
        let after_replace = store.generation();
        store.hide_targets(&["a".to_owned()]);
        assert!(store.generation() > after_replace);
        let after_hide = store.generation();
        store.align_indices_to_ticks(&[]);
        assert!(store.generation() > after_hide);
    }
}
