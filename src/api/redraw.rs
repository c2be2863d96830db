use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::config::ShapeFamily;
use crate::extensions::PluginEvent;
use crate::render::{RedrawStep, RenderSurface, TransitionGate, TransitionSpec};

use super::ChartCore;

/// Continuation of a flow (streaming append) animation. The completion
/// callback runs after the redraw it rides on has settled.
#[derive(Default)]
pub struct Flow {
    pub duration_ms: f64,
    pub on_flowed: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("duration_ms", &self.duration_ms)
            .field("on_flowed", &self.on_flowed.is_some())
            .finish()
    }
}

/// Per-invocation redraw flags. `None` means "use the default"; the
/// resolved form is what the orchestrator actually consumes.
#[derive(Debug, Default)]
pub struct RedrawOptions {
    /// First render of the chart; sizes are computed from scratch.
    pub initializing: bool,
    /// Animate this pass (default true).
    pub with_transition: Option<bool>,
    /// Animate exiting shapes (defaults to `with_transition`).
    pub with_transition_for_exit: Option<bool>,
    /// Animate axis movement (defaults to `with_transition`).
    pub with_transition_for_axis: Option<bool>,
    /// Rebuild the legend before drawing (default false).
    pub with_legend: Option<bool>,
    /// Refresh geometry dimensions when the legend is skipped (default true).
    pub with_dimension: Option<bool>,
    /// Propagate the pass to the subchart (default true).
    pub with_subchart: Option<bool>,
    pub flow: Option<Flow>,
}

impl RedrawOptions {
    #[must_use]
    pub fn initializing() -> Self {
        Self {
            initializing: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn without_transition() -> Self {
        Self {
            with_transition: Some(false),
            ..Self::default()
        }
    }

    /// Fills every unset flag from the defaults and the configured
    /// transition duration.
    #[must_use]
    pub fn resolve(&self, transition_duration: f64) -> ResolvedRedraw {
        let transition = self.with_transition.unwrap_or(true);
        let duration = if transition { transition_duration } else { 0.0 };
        let dependent = |flag: Option<bool>| {
            if flag.unwrap_or(transition) {
                duration
            } else {
                0.0
            }
        };
        ResolvedRedraw {
            duration,
            duration_for_exit: dependent(self.with_transition_for_exit),
            duration_for_axis: dependent(self.with_transition_for_axis),
            legend: self.with_legend.unwrap_or(false),
            dimension: self.with_dimension.unwrap_or(true),
            subchart: self.with_subchart.unwrap_or(true),
            initializing: self.initializing,
        }
    }
}

/// Fully-resolved redraw descriptor: every flag concrete, every duration
/// in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRedraw {
    pub duration: f64,
    pub duration_for_exit: f64,
    pub duration_for_axis: f64,
    pub legend: bool,
    pub dimension: bool,
    pub subchart: bool,
    pub initializing: bool,
}

/// Redraw orchestration: plan building and transition joining.
impl ChartCore {
    /// Ordered redraw steps for the current data and configuration.
    ///
    /// Axis charts layer grid, region, shapes, focus, labels and points in
    /// a fixed back-to-front order; arc and radar charts redraw their whole
    /// shape as a unit instead. A flow pass skips the grid-focus refresh,
    /// which would fight the sliding viewport.
    #[must_use]
    pub fn build_redraw_plan(&self, flowing: bool) -> SmallVec<[RedrawStep; 8]> {
        let mut plan = SmallVec::new();
        let families = self.families_in_use();
        let config = self.config();
        let has_axis = !self.has_axis_free_family();
        let has_radar = families.contains(&ShapeFamily::Radar);

        if has_axis {
            if config.grid_lines {
                plan.push(RedrawStep::Grid);
            }
            if config.regions {
                plan.push(RedrawStep::Region);
            }
            if families.iter().any(|family| family.is_line_like()) {
                plan.push(RedrawStep::Line);
            }
            if families.contains(&ShapeFamily::Area) {
                plan.push(RedrawStep::Area);
            }
            if families.contains(&ShapeFamily::Bar) {
                plan.push(RedrawStep::Bar);
            }
            if !flowing && config.grid_lines {
                plan.push(RedrawStep::GridFocus);
            }
        } else {
            if families.iter().any(|family| family.is_arc()) {
                plan.push(RedrawStep::Arc);
            }
            if has_radar {
                plan.push(RedrawStep::Radar);
            }
        }

        if (has_axis || has_radar) && config.show_labels {
            plan.push(RedrawStep::Label);
        }
        let wants_points = has_radar
            || (has_axis && families.iter().any(|family| family.has_points()));
        if wants_points && !config.point_focus_only {
            plan.push(RedrawStep::Point);
        }
        plan
    }

    /// Runs one redraw pass against the surface.
    ///
    /// The post-redraw callback (flow continuation, then the registered
    /// on-rendered hook) fires exactly once: after every transition of this
    /// pass settles when animating, synchronously otherwise.
    pub fn redraw<S: RenderSurface>(&mut self, mut options: RedrawOptions, surface: &mut S) {
        let resolved = options.resolve(self.config().transition_duration);
        let flow = options.flow.take();
        let flowing = flow.is_some();

        surface.update_sizes(resolved.initializing);

        if resolved.legend && self.config().show_legend {
            let ids = self.store().ids();
            surface.update_legend(&ids, TransitionSpec::with_duration(resolved.duration_for_axis));
        } else if resolved.dimension {
            surface.update_dimension();
        }

        let plan = self.build_redraw_plan(flowing);
        let is_transition = (resolved.duration > 0.0 || flowing) && surface.is_visible();
        let spec = if is_transition {
            TransitionSpec::with_duration(resolved.duration)
        } else {
            TransitionSpec::instant()
        };

        if !self.has_axis_free_family() && self.config().show_subchart && resolved.subchart {
            surface.redraw_subchart(spec);
        }

        let gate = TransitionGate::new();
        for step in &plan {
            surface.draw(*step, spec, &gate);
        }

        let flow_done = flow.and_then(|flow| flow.on_flowed);
        let on_rendered = self.on_rendered();
        if flow_done.is_some() || on_rendered.is_some() {
            let after = move || {
                if let Some(done) = flow_done {
                    done();
                }
                if let Some(rendered) = on_rendered {
                    (*rendered)();
                }
            };
            if is_transition && !plan.is_empty() {
                gate.on_settled(after);
            } else {
                after();
            }
        }

        self.mark_all_shown();
        debug!(
            step_count = plan.len(),
            duration_ms = spec.duration_ms,
            transition = is_transition,
            "redraw pass"
        );
        self.emit_plugin_event(PluginEvent::Redrawn {
            step_count: plan.len(),
            duration_ms: spec.duration_ms,
        });
    }

    /// Standard post-mutation redraw: animated entry, instant exit, so
    /// removed shapes never linger over incoming ones.
    pub fn update_and_redraw<S: RenderSurface>(&mut self, mut options: RedrawOptions, surface: &mut S) {
        options.with_transition = Some(options.with_transition.unwrap_or(true));
        options.with_transition_for_exit = Some(false);
        options.with_legend = Some(options.with_legend.unwrap_or(false));
        self.redraw(options, surface);
    }

    /// Lightweight redraw for changes that leave scales untouched; the
    /// subchart and axis animation are skipped.
    pub fn redraw_without_rescale<S: RenderSurface>(&mut self, surface: &mut S) {
        self.redraw(
            RedrawOptions {
                with_subchart: Some(false),
                with_transition_for_axis: Some(false),
                ..RedrawOptions::default()
            },
            surface,
        );
    }
}
