use serde::{Deserialize, Serialize};

/// Snapshot of the chart state handed to plugins on each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginContext {
    pub target_count: usize,
    pub visible_count: usize,
    pub generation: u64,
}

/// Lifecycle notifications emitted by the chart core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DataUpdated { target_count: usize },
    VisibilityChanged { hidden_count: usize },
    Redrawn { step_count: usize, duration_ms: f64 },
}

/// Hook point for chart extensions (export, annotations, custom legends).
pub trait ChartPlugin {
    /// Stable identifier, used in logs.
    fn id(&self) -> &str;

    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
