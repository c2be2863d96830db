mod data_controller;
mod load;
mod redraw;

pub use redraw::{Flow, RedrawOptions, ResolvedRedraw};

use std::collections::BTreeSet;
use std::rc::Rc;

use smallvec::SmallVec;
use tracing::debug;

use crate::config::{ChartConfig, ShapeFamily};
use crate::core::aggregate::{self, MinMaxPoints};
use crate::core::hit::{self, HitContext};
use crate::core::ratio::{ArcSweep, RatioKind, ratio};
use crate::core::scale::PixelScale;
use crate::core::transform;
use crate::core::types::{DataPoint, SeriesId};
use crate::core::{DataStore, DerivedCache, XKeyMode};
use crate::extensions::{ChartPlugin, PluginContext, PluginEvent};

/// The chart engine's data and orchestration core.
///
/// Owns normalized series data, visibility state, generation-checked
/// derived aggregates and the fade-in bookkeeping; rendering stays behind
/// the [`RenderSurface`](crate::render::RenderSurface) seam.
pub struct ChartCore {
    config: ChartConfig,
    x_key: XKeyMode,
    store: DataStore,
    cache: DerivedCache,
    /// Series ids that have completed at least one redraw; their fade-in
    /// is suppressed on subsequent passes.
    shown_once: BTreeSet<SeriesId>,
    plugins: Vec<Box<dyn ChartPlugin>>,
    on_rendered: Option<Rc<dyn Fn()>>,
}

impl ChartCore {
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        let x_key = XKeyMode::from_config(&config);
        Self {
            config,
            x_key,
            store: DataStore::new(),
            cache: DerivedCache::default(),
            shown_once: BTreeSet::new(),
            plugins: Vec::new(),
            on_rendered: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    #[must_use]
    pub fn x_key(&self) -> &XKeyMode {
        &self.x_key
    }

    /// X field name feeding a series, `None` in implicit mode.
    #[must_use]
    pub fn resolve_x_key(&self, id: &str) -> Option<&str> {
        self.x_key.resolve(id)
    }

    /// Display name for a series: configured name, then the name loaded
    /// with the data, then the id itself.
    #[must_use]
    pub fn display_name(&self, id: &str) -> String {
        if let Some(name) = self.config.names.get(id) {
            return name.clone();
        }
        self.store
            .series(id)
            .map_or_else(|| id.to_owned(), |series| series.display_name().to_owned())
    }

    #[must_use]
    pub fn is_grouped(&self, id: Option<&str>) -> bool {
        self.config.is_grouped(id)
    }

    #[must_use]
    pub fn is_stack_normalized(&self) -> bool {
        self.config.is_stack_normalized()
    }

    /// Whether series own independent x domains: per-series x keys,
    /// unsorted x values, or point-cloud families.
    #[must_use]
    pub fn is_multiple_x(&self) -> bool {
        self.x_key.is_per_series()
            || !self.config.x_sort
            || self
                .families_in_use()
                .iter()
                .any(|family| matches!(family, ShapeFamily::Scatter | ShapeFamily::Bubble))
    }

    /// Distinct shape families among loaded series; the configured default
    /// when nothing is loaded yet.
    pub(crate) fn families_in_use(&self) -> SmallVec<[ShapeFamily; 4]> {
        let mut families = SmallVec::new();
        if self.store.targets().is_empty() {
            families.push(self.config.default_family);
            return families;
        }
        for series in self.store.targets() {
            let family = self.config.family_of(&series.id);
            if !families.contains(&family) {
                families.push(family);
            }
        }
        families
    }

    #[must_use]
    pub fn has_family(&self, family: ShapeFamily) -> bool {
        self.families_in_use().contains(&family)
    }

    /// Whether any loaded series renders without a cartesian axis.
    #[must_use]
    pub fn has_axis_free_family(&self) -> bool {
        self.families_in_use()
            .iter()
            .any(|family| family.is_arc() || *family == ShapeFamily::Radar)
    }

    #[must_use]
    pub fn has_been_shown(&self, id: &str) -> bool {
        self.shown_once.contains(id)
    }

    /// Largest visible base value, zero when nothing numeric is visible.
    #[must_use]
    pub fn data_max(&self) -> f64 {
        let visible: Vec<&[DataPoint]> = self
            .store
            .visible_series()
            .iter()
            .map(|series| series.values.as_slice())
            .collect();
        let bounds = aggregate::extremum_of(&visible);
        if bounds.has_values() { bounds.max } else { 0.0 }
    }

    /// Data points sitting at the collection-wide extrema, cached per
    /// store generation.
    pub fn min_max_points(&mut self) -> &MinMaxPoints {
        let store = &self.store;
        self.cache
            .min_max_points(store.generation(), || aggregate::min_max_points(store.targets()))
    }

    fn stack_totals_cached(&mut self) -> &[f64] {
        let store = &self.store;
        self.cache.stack_totals(store.generation(), || {
            aggregate::per_index_stack_totals(store.targets())
        })
    }

    /// Per-index stacked totals over every loaded series, `None` unless
    /// stack normalization is active.
    pub fn stack_totals(&mut self) -> Option<Vec<f64>> {
        self.config
            .is_stack_normalized()
            .then(|| self.stack_totals_cached().to_vec())
    }

    /// Stacked totals net of hidden series contributions, matched by each
    /// hidden point's own index.
    pub fn net_stack_totals(&mut self) -> Option<Vec<f64>> {
        if !self.config.is_stack_normalized() {
            return None;
        }
        let mut totals = self.stack_totals_cached().to_vec();
        let hidden = self.store.hidden_target_ids();
        if !hidden.is_empty() {
            let contributions =
                aggregate::index_contributions(self.store.targets(), hidden, totals.len());
            for (total, hidden_part) in totals.iter_mut().zip(contributions) {
                *total -= hidden_part;
            }
        }
        Some(totals)
    }

    /// Grand total over every loaded series. The full sum is cached;
    /// hidden contributions are subtracted on demand so toggling
    /// visibility never serves a stale total.
    pub fn total_sum(&mut self, subtract_hidden: bool) -> f64 {
        let store = &self.store;
        let full = self
            .cache
            .total_sum(store.generation(), || aggregate::total_sum(store.targets()));
        if subtract_hidden {
            full - aggregate::sum_of(self.store.targets(), self.store.hidden_target_ids())
        } else {
            full
        }
    }

    /// Stack-normalized share of a point within its index's net total.
    pub fn index_ratio(&mut self, point: &DataPoint, as_percent: bool) -> f64 {
        match self.net_stack_totals() {
            Some(totals) => ratio(RatioKind::Index { net_totals: &totals }, point, as_percent),
            None => 0.0,
        }
    }

    /// Arc segment share, from values when angular padding is configured
    /// and from the rendered sweep otherwise.
    pub fn arc_ratio(&mut self, point: &DataPoint, sweep: ArcSweep, as_percent: bool) -> f64 {
        let total = self.total_sum(true);
        let half_circle_gauge = self.config.family_of(&point.id) == ShapeFamily::Gauge
            && !self.config.gauge_full_circle;
        let kind = RatioKind::Arc {
            sweep,
            pad_angle: self.config.arc_pad_angle,
            total_excluding_hidden: total,
            half_circle_gauge,
        };
        ratio(kind, point, as_percent)
    }

    /// Share of the radar's configured radius.
    #[must_use]
    pub fn radar_ratio(&self, point: &DataPoint, as_percent: bool) -> f64 {
        let kind = RatioKind::Radar {
            data_max: self.data_max(),
            size_ratio: self.config.radar_size_ratio,
        };
        ratio(kind, point, as_percent)
    }

    /// Absolute share of the bar's y-domain span.
    #[must_use]
    pub fn bar_ratio(&self, point: &DataPoint, y_scale: &dyn PixelScale, as_percent: bool) -> f64 {
        ratio(RatioKind::Bar { domain: y_scale.domain() }, point, as_percent)
    }

    /// Nearest visible data point to a pixel position, bars first. Axis
    /// rotation and the sensitivity radius come from the chart
    /// configuration, overriding whatever the context carries.
    #[must_use]
    pub fn nearest_visible_point(
        &self,
        pos: (f64, f64),
        ctx: &HitContext<'_>,
    ) -> Option<&DataPoint> {
        let ctx = HitContext {
            rotated: self.config.axis_rotated,
            sensitivity: self.config.point_sensitivity,
            ..*ctx
        };
        let visible = self.store.visible_series();
        hit::nearest_point(&visible, pos, &ctx)
    }

    /// Targets in the configured stacking/arc order.
    #[must_use]
    pub fn ordered_targets(&self) -> Vec<&crate::core::Series> {
        self.store.ordered_targets(self.config.order)
    }

    /// Step-converts a value run under the configured step kind and axis.
    #[must_use]
    pub fn step_values(&self, values: &[DataPoint]) -> Vec<DataPoint> {
        transform::values_to_step(values, self.config.step, self.config.x_axis.is_categorized())
    }

    /// Every loaded series flattened to id-keyed numeric vectors,
    /// column-aligned across independent x domains.
    #[must_use]
    pub fn values_as_id_keyed(&self) -> indexmap::IndexMap<SeriesId, Vec<f64>> {
        transform::values_as_id_keyed(self.store.targets(), self.is_multiple_x())
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn ChartPlugin>) {
        debug!(plugin = plugin.id(), "register plugin");
        self.plugins.push(plugin);
    }

    /// Callback invoked after every redraw settles.
    pub fn set_on_rendered(&mut self, callback: impl Fn() + 'static) {
        self.on_rendered = Some(Rc::new(callback));
    }

    pub(crate) fn on_rendered(&self) -> Option<Rc<dyn Fn()>> {
        self.on_rendered.clone()
    }

    pub(crate) fn mark_all_shown(&mut self) {
        for id in self.store.ids() {
            self.shown_once.insert(id);
        }
    }

    pub(crate) fn reset_shown(&mut self) {
        self.shown_once.clear();
    }

    pub(crate) fn store_mut(&mut self) -> &mut DataStore {
        &mut self.store
    }

    pub(crate) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = PluginContext {
            target_count: self.store.targets().len(),
            visible_count: self.store.visible_series().len(),
            generation: self.store.generation(),
        };
        let mut plugins = std::mem::take(&mut self.plugins);
        for plugin in &mut plugins {
            plugin.on_event(event, context);
        }
        self.plugins = plugins;
    }
}

impl Default for ChartCore {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}
