use super::{RedrawStep, RenderSurface, TransitionGate, TransitionHandle, TransitionSpec};
use crate::core::SeriesId;

/// Surface that records the redraw traffic instead of drawing.
///
/// Timed draws register on the gate and park their handles in `pending`,
/// so tests can settle transitions deterministically with `complete_all`.
#[derive(Debug)]
pub struct RecordingSurface {
    pub visible: bool,
    pub steps: Vec<(RedrawStep, TransitionSpec)>,
    pub size_updates: Vec<bool>,
    pub legend_updates: Vec<Vec<SeriesId>>,
    pub dimension_updates: usize,
    pub subchart_redraws: usize,
    pub pending: Vec<TransitionHandle>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            visible: true,
            steps: Vec::new(),
            size_updates: Vec::new(),
            legend_updates: Vec::new(),
            dimension_updates: 0,
            subchart_redraws: 0,
            pending: Vec::new(),
        }
    }
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    /// Recorded steps without their timing.
    #[must_use]
    pub fn step_kinds(&self) -> Vec<RedrawStep> {
        self.steps.iter().map(|(step, _)| *step).collect()
    }

    /// Settles every in-flight transition.
    pub fn complete_all(&mut self) {
        for handle in self.pending.drain(..) {
            handle.complete();
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn update_sizes(&mut self, initializing: bool) {
        self.size_updates.push(initializing);
    }

    fn update_legend(&mut self, ids: &[SeriesId], _spec: TransitionSpec) {
        self.legend_updates.push(ids.to_vec());
    }

    fn update_dimension(&mut self) {
        self.dimension_updates += 1;
    }

    fn redraw_subchart(&mut self, _spec: TransitionSpec) {
        self.subchart_redraws += 1;
    }

    fn draw(&mut self, step: RedrawStep, spec: TransitionSpec, gate: &TransitionGate) {
        self.steps.push((step, spec));
        if !spec.is_instant() {
            self.pending.push(gate.register());
        }
    }
}
