use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::SeriesId;

/// X-axis interpretation, decided once per chart.
///
/// The data layer consults this when regenerating x values and when
/// building the shared index space; the queries mirror the capability set
/// an axis implementation exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XAxisKind {
    /// Implicit ordinal positions.
    #[default]
    Indexed,
    /// Chronological x values.
    TimeSeries,
    /// Categorical ticks; x collapses to the ordinal index.
    Category,
    /// Caller-supplied numeric x values.
    Custom,
}

impl XAxisKind {
    #[must_use]
    pub const fn is_time_series(self) -> bool {
        matches!(self, Self::TimeSeries)
    }

    #[must_use]
    pub const fn is_categorized(self) -> bool {
        matches!(self, Self::Category)
    }

    #[must_use]
    pub const fn is_custom_x(self) -> bool {
        matches!(self, Self::Custom)
    }
}

/// Shape family a series renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShapeFamily {
    #[default]
    Line,
    Area,
    Bar,
    Scatter,
    Bubble,
    Pie,
    Gauge,
    Radar,
}

impl ShapeFamily {
    /// Whole-shape families redrawn as a unit instead of layered steps.
    #[must_use]
    pub const fn is_arc(self) -> bool {
        matches!(self, Self::Pie | Self::Gauge)
    }

    /// Families that render a connecting line (areas draw their boundary).
    #[must_use]
    pub const fn is_line_like(self) -> bool {
        matches!(self, Self::Line | Self::Area)
    }

    /// Families that render individual data-point marks.
    #[must_use]
    pub const fn has_points(self) -> bool {
        matches!(self, Self::Line | Self::Area | Self::Scatter | Self::Bubble)
    }
}

/// Series ordering applied before stacked/arc layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DataOrder {
    #[default]
    None,
    Asc,
    Desc,
}

/// Step interpolation variant for step-converted line values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StepKind {
    #[default]
    Step,
    StepBefore,
    StepAfter,
}

/// Chart-level configuration consumed by the data core.
///
/// All knobs are explicit; redraw descriptors merge against these values
/// instead of implicit globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub x_axis: XAxisKind,
    pub axis_rotated: bool,
    /// Shared x field name, when every series reads the same x column.
    pub data_x: Option<String>,
    /// Per-series x field names ("multiple x" mode). `data_x` wins if both set.
    pub data_xs: IndexMap<SeriesId, String>,
    /// Whether loaded x values are sorted ascending.
    pub x_sort: bool,
    /// Display names keyed by series id.
    pub names: IndexMap<SeriesId, String>,
    /// Stacking/grouping buckets of series ids.
    pub groups: Vec<Vec<SeriesId>>,
    /// Show per-index values as a ratio of that index's stacked total.
    pub stack_normalize: bool,
    pub order: DataOrder,
    /// Shape family per series id; `default_family` applies otherwise.
    pub families: IndexMap<SeriesId, ShapeFamily>,
    pub default_family: ShapeFamily,
    pub step: StepKind,
    /// Transition duration in milliseconds for duration-bearing redraws.
    pub transition_duration: f64,
    /// Maximum pixel distance for nearest-point resolution.
    pub point_sensitivity: f64,
    /// Draw data-point marks only on focus, skipping the point redraw step.
    pub point_focus_only: bool,
    /// Angular padding between arc segments; non-zero switches arc ratios
    /// to value / total instead of swept angle.
    pub arc_pad_angle: f64,
    pub gauge_full_circle: bool,
    pub radar_size_ratio: f64,
    pub show_legend: bool,
    pub show_subchart: bool,
    pub show_labels: bool,
    /// Any x/y grid lines configured.
    pub grid_lines: bool,
    /// Any highlight regions configured.
    pub regions: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_axis: XAxisKind::default(),
            axis_rotated: false,
            data_x: None,
            data_xs: IndexMap::new(),
            x_sort: true,
            names: IndexMap::new(),
            groups: Vec::new(),
            stack_normalize: false,
            order: DataOrder::None,
            families: IndexMap::new(),
            default_family: ShapeFamily::default(),
            step: StepKind::default(),
            transition_duration: 350.0,
            point_sensitivity: 10.0,
            point_focus_only: false,
            arc_pad_angle: 0.0,
            gauge_full_circle: false,
            radar_size_ratio: 0.87,
            show_legend: true,
            show_subchart: false,
            show_labels: false,
            grid_lines: false,
            regions: false,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_x_axis(mut self, kind: XAxisKind) -> Self {
        self.x_axis = kind;
        self
    }

    #[must_use]
    pub fn with_shared_x_key(mut self, key: impl Into<String>) -> Self {
        self.data_x = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_series_x_key(mut self, id: impl Into<SeriesId>, key: impl Into<String>) -> Self {
        self.data_xs.insert(id.into(), key.into());
        self
    }

    #[must_use]
    pub fn with_family(mut self, id: impl Into<SeriesId>, family: ShapeFamily) -> Self {
        self.families.insert(id.into(), family);
        self
    }

    #[must_use]
    pub fn with_default_family(mut self, family: ShapeFamily) -> Self {
        self.default_family = family;
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: Vec<SeriesId>) -> Self {
        self.groups.push(group);
        self
    }

    #[must_use]
    pub fn with_stack_normalize(mut self, enabled: bool) -> Self {
        self.stack_normalize = enabled;
        self
    }

    #[must_use]
    pub fn with_name(mut self, id: impl Into<SeriesId>, name: impl Into<String>) -> Self {
        self.names.insert(id.into(), name.into());
        self
    }

    #[must_use]
    pub fn with_transition_duration(mut self, milliseconds: f64) -> Self {
        self.transition_duration = milliseconds;
        self
    }

    /// Shape family for a series id.
    #[must_use]
    pub fn family_of(&self, id: &str) -> ShapeFamily {
        self.families.get(id).copied().unwrap_or(self.default_family)
    }

    /// Stack normalization is active only with at least one group configured.
    #[must_use]
    pub fn is_stack_normalized(&self) -> bool {
        self.stack_normalize && !self.groups.is_empty()
    }

    /// Whether `id` participates in any grouping bucket of size > 1.
    /// Without an id, reports whether any grouping is configured at all.
    #[must_use]
    pub fn is_grouped(&self, id: Option<&str>) -> bool {
        match id {
            Some(id) => self
                .groups
                .iter()
                .any(|group| group.len() > 1 && group.iter().any(|member| member == id)),
            None => !self.groups.is_empty(),
        }
    }
}
