use std::f64::consts::PI;

use crate::core::types::DataPoint;

/// Rendered angular extent of an arc segment, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcSweep {
    #[must_use]
    pub fn swept(self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Display-specific ratio request, carrying the inputs each kind needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioKind<'a> {
    /// Pie/donut/gauge segment share. With angular padding configured the
    /// share comes from values; otherwise from the rendered sweep over the
    /// half or full circle.
    Arc {
        sweep: ArcSweep,
        pad_angle: f64,
        total_excluding_hidden: f64,
        half_circle_gauge: bool,
    },
    /// Stack-normalized share of the per-index total, already net of hidden
    /// series contributions.
    Index { net_totals: &'a [f64] },
    /// Share of the radar's configured radius.
    Radar { data_max: f64, size_ratio: f64 },
    /// Share of the bar's y-domain span.
    Bar { domain: (f64, f64) },
}

/// Ratio of a data point under the requested display kind.
///
/// Degenerate denominators (zero/negative totals, empty domains) and
/// non-numeric values yield zero, never an error.
#[must_use]
pub fn ratio(kind: RatioKind<'_>, point: &DataPoint, as_percent: bool) -> f64 {
    let ratio = match kind {
        RatioKind::Arc {
            sweep,
            pad_angle,
            total_excluding_hidden,
            half_circle_gauge,
        } => {
            if pad_angle > 0.0 {
                match point.base_value() {
                    Some(value) if total_excluding_hidden > 0.0 => value / total_excluding_hidden,
                    _ => 0.0,
                }
            } else {
                sweep.swept() / (PI * if half_circle_gauge { 1.0 } else { 2.0 })
            }
        }
        RatioKind::Index { net_totals } => {
            match (point.base_value(), net_totals.get(point.index)) {
                (Some(value), Some(&total)) if total > 0.0 => value / total,
                _ => 0.0,
            }
        }
        RatioKind::Radar {
            data_max,
            size_ratio,
        } => {
            if data_max > 0.0 {
                point.base_value().map_or(0.0, |value| value.max(0.0)) / data_max * size_ratio
            } else {
                0.0
            }
        }
        RatioKind::Bar { domain } => {
            let span = domain.1 - domain.0;
            match point.base_value() {
                Some(value) if span.is_finite() && span != 0.0 => value.abs() / span,
                _ => 0.0,
            }
        }
    };

    if as_percent && ratio != 0.0 {
        ratio * 100.0
    } else {
        ratio
    }
}
