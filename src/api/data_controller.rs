use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::types::{Series, SeriesId, XValue};
use crate::extensions::PluginEvent;

use super::ChartCore;

/// Data lifecycle: loading, unloading and visibility toggles.
impl ChartCore {
    /// Replaces the loaded series wholesale with already-normalized data.
    ///
    /// Configured display names are stamped onto the series, fade-in
    /// bookkeeping restarts, and plugins observe a data update.
    pub fn load_targets(
        &mut self,
        mut targets: Vec<Series>,
        xs: IndexMap<SeriesId, Vec<XValue>>,
    ) {
        for series in &mut targets {
            if let Some(name) = self.config().names.get(&series.id) {
                series.name = Some(name.clone());
            }
        }
        debug!(target_count = targets.len(), "load targets");
        self.store_mut().replace_targets(targets, xs);
        self.reset_shown();
        let target_count = self.store().targets().len();
        self.emit_plugin_event(PluginEvent::DataUpdated { target_count });
    }

    /// Removes the named series; unknown ids are reported and skipped.
    pub fn unload_targets(&mut self, ids: &[SeriesId]) {
        for id in ids {
            if !self.store().has_target(id) {
                warn!(id = id.as_str(), "unload requested for unknown series");
            }
        }
        self.store_mut().remove_targets(ids);
        let target_count = self.store().targets().len();
        self.emit_plugin_event(PluginEvent::DataUpdated { target_count });
    }

    /// Hides the named series from rendering and aggregation; optionally
    /// dims their legend entries as well.
    pub fn hide_targets(&mut self, ids: &[SeriesId], with_legend: bool) {
        self.store_mut().hide_targets(ids);
        if with_legend {
            self.store_mut().hide_legend(ids);
        }
        self.notify_visibility();
    }

    pub fn show_targets(&mut self, ids: &[SeriesId], with_legend: bool) {
        self.store_mut().show_targets(ids);
        if with_legend {
            self.store_mut().show_legend(ids);
        }
        self.notify_visibility();
    }

    /// Flips visibility per id.
    pub fn toggle_targets(&mut self, ids: &[SeriesId], with_legend: bool) {
        let (shown, hidden): (Vec<SeriesId>, Vec<SeriesId>) = ids
            .iter()
            .cloned()
            .partition(|id| self.store().is_visible(id));
        if !shown.is_empty() {
            self.hide_targets(&shown, with_legend);
        }
        if !hidden.is_empty() {
            self.show_targets(&hidden, with_legend);
        }
    }

    /// Replaces the x values of the named series, regenerating each point's
    /// x through the axis-mode rules.
    pub fn update_target_x(&mut self, ids: &[SeriesId], xs: &[XValue]) {
        let axis = self.config().x_axis;
        self.store_mut().update_target_x(axis, ids, xs);
    }

    /// Per-series variant of [`ChartCore::update_target_x`].
    pub fn update_target_xs(&mut self, xs: &IndexMap<SeriesId, Vec<XValue>>) {
        let axis = self.config().x_axis;
        self.store_mut().update_target_xs(axis, xs);
    }

    /// Re-aligns every point's index to the shared tick ordering.
    pub fn align_indices_to_ticks(&mut self, ticks: &[XValue]) {
        self.store_mut().align_indices_to_ticks(ticks);
    }

    fn notify_visibility(&mut self) {
        let hidden_count = self.store().hidden_target_ids().len();
        debug!(hidden_count, "visibility changed");
        self.emit_plugin_event(PluginEvent::VisibilityChanged { hidden_count });
    }
}
