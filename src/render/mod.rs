mod recording_surface;
mod transition;

pub use recording_surface::RecordingSurface;
pub use transition::{TransitionGate, TransitionHandle};

use serde::{Deserialize, Serialize};

use crate::core::SeriesId;

/// One visual subsystem in the back-to-front redraw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedrawStep {
    Grid,
    Region,
    Line,
    Area,
    Bar,
    GridFocus,
    Label,
    Point,
    /// Whole-shape redraw for pie/donut/gauge charts.
    Arc,
    /// Whole-shape redraw for radar charts.
    Radar,
}

/// Transition timing for one redraw invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration_ms: f64,
}

impl TransitionSpec {
    #[must_use]
    pub const fn instant() -> Self {
        Self { duration_ms: 0.0 }
    }

    #[must_use]
    pub const fn with_duration(duration_ms: f64) -> Self {
        Self { duration_ms }
    }

    #[must_use]
    pub fn is_instant(self) -> bool {
        self.duration_ms <= 0.0
    }
}

/// Contract implemented by the drawing layer.
///
/// The orchestrator hands over an ordered sequence of redraw steps; the
/// surface owns shapes, axes and DOM/canvas nodes. A surface that starts a
/// timed transition for a step must register a handle on the supplied gate
/// and complete it when the animation settles, so the post-redraw callback
/// can join on every transition of the invocation.
pub trait RenderSurface {
    /// Whether the surface is currently visible to the user; invisible
    /// surfaces skip animation cost and redraw instantaneously.
    fn is_visible(&self) -> bool {
        true
    }

    /// Recompute sizing ahead of a redraw pass.
    fn update_sizes(&mut self, _initializing: bool) {}

    /// Update the legend, which triggers downstream geometry updates.
    fn update_legend(&mut self, _ids: &[SeriesId], _spec: TransitionSpec) {}

    /// Dimension-only geometry refresh used when the legend is skipped but
    /// a dimension-affecting flag is set.
    fn update_dimension(&mut self) {}

    fn redraw_subchart(&mut self, _spec: TransitionSpec) {}

    /// Redraw one visual subsystem.
    fn draw(&mut self, step: RedrawStep, spec: TransitionSpec, gate: &TransitionGate);
}
