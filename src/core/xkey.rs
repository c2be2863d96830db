use indexmap::IndexMap;

use crate::config::ChartConfig;
use crate::core::SeriesId;

/// How input fields map to the x domain, decided once per data load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum XKeyMode {
    /// One x field shared by every series.
    Shared(String),
    /// An x field per series id ("multiple x" mode).
    PerSeries(IndexMap<SeriesId, String>),
    /// No x field: the ordinal position is the x value.
    #[default]
    Implicit,
}

impl XKeyMode {
    /// A shared key takes precedence over per-series keys when both appear
    /// in the configuration.
    #[must_use]
    pub fn from_config(config: &ChartConfig) -> Self {
        if let Some(shared) = &config.data_x {
            Self::Shared(shared.clone())
        } else if !config.data_xs.is_empty() {
            Self::PerSeries(config.data_xs.clone())
        } else {
            Self::Implicit
        }
    }

    /// X field name for a series id, `None` in implicit mode or when the
    /// series has no per-series mapping.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<&str> {
        match self {
            Self::Shared(key) => Some(key),
            Self::PerSeries(keys) => keys.get(id).map(String::as_str),
            Self::Implicit => None,
        }
    }

    /// Whether a field name denotes an x column under this mode.
    #[must_use]
    pub fn is_x_key(&self, field: &str) -> bool {
        match self {
            Self::Shared(key) => key == field,
            Self::PerSeries(keys) => keys.values().any(|key| key == field),
            Self::Implicit => false,
        }
    }

    #[must_use]
    pub const fn is_per_series(&self) -> bool {
        matches!(self, Self::PerSeries(_))
    }
}
