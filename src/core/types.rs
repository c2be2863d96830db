use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SeriesId = String;

/// X coordinate of a data point.
///
/// Numeric for plain/categorical axes, chronological for time-series axes.
/// Both variants share a total order through the numeric encoding
/// (`as_f64`, time as unix milliseconds), so mixed collections still sort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum XValue {
    Number(f64),
    Time(DateTime<Utc>),
}

impl XValue {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Time(time) => time.timestamp_millis() as f64,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::Number(value) => value.is_finite(),
            Self::Time(_) => true,
        }
    }

    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.as_f64().total_cmp(&other.as_f64())
    }
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for XValue {
    fn from(time: DateTime<Utc>) -> Self {
        Self::Time(time)
    }
}

/// Data-point value, tagged by series shape.
///
/// Replaces runtime shape sniffing with explicit variants; `Gap` is an
/// explicit data hole retained for positional continuity but excluded from
/// every aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum PointValue {
    #[default]
    Gap,
    Plain(f64),
    Range { low: f64, mid: f64, high: f64 },
    Bubble { y: f64, z: f64 },
}

impl PointValue {
    /// The scalar used for numeric comparison and aggregation: the plain
    /// value, the `mid` member of a range, or the `y` dimension of a bubble.
    /// Gaps and non-finite values yield `None`.
    #[must_use]
    pub fn base_value(self) -> Option<f64> {
        let value = match self {
            Self::Gap => return None,
            Self::Plain(value) => value,
            Self::Range { mid, .. } => mid,
            Self::Bubble { y, .. } => y,
        };
        value.is_finite().then_some(value)
    }

    #[must_use]
    pub const fn is_gap(self) -> bool {
        matches!(self, Self::Gap)
    }
}

impl From<f64> for PointValue {
    fn from(value: f64) -> Self {
        Self::Plain(value)
    }
}

impl From<Option<f64>> for PointValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Gap, Self::Plain)
    }
}

/// One normalized sample within a series.
///
/// `index` is monotonic within a series and aligned across series sharing
/// the same x domain; after tick alignment it is the position of `x` within
/// the shared tick ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: SeriesId,
    pub x: XValue,
    pub value: PointValue,
    pub index: usize,
}

impl DataPoint {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, x: impl Into<XValue>, value: impl Into<PointValue>, index: usize) -> Self {
        Self {
            id: id.into(),
            x: x.into(),
            value: value.into(),
            index,
        }
    }

    #[must_use]
    pub fn base_value(&self) -> Option<f64> {
        self.value.base_value()
    }
}

/// One named sequence of data points (a chart target).
///
/// `id` is the canonical, possibly-renamed identifier; `id_org` preserves
/// the identifier found in the input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub id_org: SeriesId,
    pub name: Option<String>,
    pub values: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, values: Vec<DataPoint>) -> Self {
        let id = id.into();
        Self {
            id_org: id.clone(),
            id,
            name: None,
            values,
        }
    }

    /// Configured display name falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataPoint, PointValue, XValue};
    use chrono::{TimeZone, Utc};

    #[test]
    fn base_value_extracts_per_variant() {
        assert_eq!(PointValue::Plain(3.5).base_value(), Some(3.5));
        assert_eq!(
            PointValue::Range {
                low: 1.0,
                mid: 2.0,
                high: 3.0
            }
            .base_value(),
            Some(2.0)
        );
        assert_eq!(PointValue::Bubble { y: 4.0, z: 9.0 }.base_value(), Some(4.0));
        assert_eq!(PointValue::Gap.base_value(), None);
        assert_eq!(PointValue::Plain(f64::NAN).base_value(), None);
    }

    #[test]
    fn x_values_order_across_variants() {
        let early = XValue::Time(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let late = XValue::Time(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
        assert!(early.total_cmp(&late).is_lt());
        assert!(XValue::Number(1.0).total_cmp(&XValue::Number(2.0)).is_lt());
    }

    #[test]
    fn time_x_points_serialize_to_json() {
        let point = DataPoint::new(
            "a",
            XValue::Time(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            1.0,
            0,
        );
        let json = serde_json::to_string(&point).expect("serializable point");
        assert!(json.contains("2024-01-01"));
    }

    #[test]
    fn gap_points_report_no_base_value() {
        let point = DataPoint::new("a", 0.0, PointValue::Gap, 0);
        assert_eq!(point.base_value(), None);
    }
}
