use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ChartConfig, XAxisKind};
use crate::core::XKeyMode;
use crate::core::store::generate_x;
use crate::core::types::{DataPoint, PointValue, Series, SeriesId, XValue};
use crate::error::{ChartError, ChartResult};

use super::ChartCore;

/// Document ingestion: columnar and row-oriented JSON input.
impl ChartCore {
    /// Loads column-oriented data: each column is `[id, value, value, ...]`.
    /// Columns named by the configured x keys feed the x domain instead of
    /// becoming series.
    pub fn load_columns(&mut self, columns: &[Vec<Value>]) -> ChartResult<()> {
        let (targets, xs) = normalize_columns(self.config(), self.x_key(), columns)?;
        self.load_targets(targets, xs);
        Ok(())
    }

    /// Loads row-oriented data: the first row names the columns, each
    /// following row holds one value per column. Short rows pad with gaps.
    pub fn load_rows(&mut self, rows: &[Vec<Value>]) -> ChartResult<()> {
        let columns = rows_to_columns(rows)?;
        self.load_columns(&columns)
    }
}

fn rows_to_columns(rows: &[Vec<Value>]) -> ChartResult<Vec<Vec<Value>>> {
    let Some((header, body)) = rows.split_first() else {
        return Err(ChartError::InvalidDocument("empty row document".into()));
    };

    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(header.len());
    for cell in header {
        let Some(name) = cell.as_str() else {
            return Err(ChartError::InvalidDocument(format!(
                "row header must be a string, got {cell}"
            )));
        };
        columns.push(vec![Value::from(name)]);
    }
    for row in body {
        for (slot, column) in columns.iter_mut().enumerate() {
            column.push(row.get(slot).cloned().unwrap_or(Value::Null));
        }
    }
    Ok(columns)
}

/// Converts raw columns into canonical series plus their raw x vectors.
pub fn normalize_columns(
    config: &ChartConfig,
    x_key: &XKeyMode,
    columns: &[Vec<Value>],
) -> ChartResult<(Vec<Series>, IndexMap<SeriesId, Vec<XValue>>)> {
    let mut x_fields: IndexMap<String, Vec<XValue>> = IndexMap::new();
    let mut data_columns: Vec<(SeriesId, &[Value])> = Vec::new();

    for column in columns {
        let Some((header, cells)) = column.split_first() else {
            return Err(ChartError::InvalidDocument("empty column".into()));
        };
        let Some(name) = header.as_str() else {
            return Err(ChartError::InvalidDocument(format!(
                "column header must be a string, got {header}"
            )));
        };
        if x_key.is_x_key(name) {
            // unparseable cells keep their slot as NaN so ordinals stay
            // aligned; downstream lookups fall back to the ordinal index
            let parsed = cells
                .iter()
                .map(|cell| {
                    parse_x_cell(config.x_axis, cell).unwrap_or(XValue::Number(f64::NAN))
                })
                .collect();
            x_fields.insert(name.to_owned(), parsed);
        } else {
            data_columns.push((name.to_owned(), cells));
        }
    }

    let mut targets = Vec::with_capacity(data_columns.len());
    let mut raw_xs = IndexMap::new();
    for (id, cells) in data_columns {
        let field_xs = x_key.resolve(&id).and_then(|field| x_fields.get(field));
        let mut values: Vec<DataPoint> = cells
            .iter()
            .enumerate()
            .map(|(ordinal, cell)| {
                let raw = field_xs.and_then(|xs| xs.get(ordinal)).copied();
                let x = generate_x(config.x_axis, raw, ordinal);
                DataPoint::new(id.clone(), x, parse_value_cell(&id, cell), ordinal)
            })
            .collect();

        if config.x_sort {
            values.sort_by(|a, b| a.x.total_cmp(&b.x));
            for (position, point) in values.iter_mut().enumerate() {
                point.index = position;
            }
        }

        if let Some(xs) = field_xs {
            raw_xs.insert(id.clone(), xs.clone());
        }
        targets.push(Series::new(id, values));
    }

    debug!(
        target_count = targets.len(),
        x_vectors = raw_xs.len(),
        "normalized column document"
    );
    Ok((targets, raw_xs))
}

fn parse_x_cell(axis: XAxisKind, cell: &Value) -> Option<XValue> {
    match cell {
        Value::Number(number) => number.as_f64().map(XValue::Number),
        Value::String(text) if axis.is_time_series() => parse_date(text).map(XValue::Time),
        Value::String(text) => match text.parse::<f64>() {
            Ok(value) => Some(XValue::Number(value)),
            Err(_) => {
                warn!(cell = text.as_str(), "non-numeric x value dropped");
                None
            }
        },
        _ => None,
    }
}

/// Accepted date formats, tried in order: RFC 3339, then the two common
/// space/day-only layouts, all interpreted as UTC.
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }
    warn!(cell = text, "unparseable date");
    None
}

fn parse_value_cell(id: &str, cell: &Value) -> PointValue {
    match cell {
        Value::Null => PointValue::Gap,
        Value::Number(number) => PointValue::from(number.as_f64()),
        Value::String(text) => match text.parse::<f64>() {
            Ok(value) => PointValue::Plain(value),
            Err(_) => {
                warn!(id, cell = text.as_str(), "non-numeric value treated as gap");
                PointValue::Gap
            }
        },
        Value::Array(items) => parse_composite_array(id, items),
        Value::Object(fields) => parse_composite_object(id, fields),
        Value::Bool(_) => {
            warn!(id, "boolean value treated as gap");
            PointValue::Gap
        }
    }
}

/// `[low, mid, high]` becomes a range, `[y, z]` a bubble.
fn parse_composite_array(id: &str, items: &[Value]) -> PointValue {
    let numbers: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
    match numbers[..] {
        [low, mid, high] => PointValue::Range { low, mid, high },
        [y, z] => PointValue::Bubble { y, z },
        _ => {
            warn!(id, len = items.len(), "unrecognized array value treated as gap");
            PointValue::Gap
        }
    }
}

fn parse_composite_object(id: &str, fields: &serde_json::Map<String, Value>) -> PointValue {
    let number = |key: &str| fields.get(key).and_then(Value::as_f64);
    if let (Some(low), Some(mid), Some(high)) = (number("low"), number("mid"), number("high")) {
        return PointValue::Range { low, mid, high };
    }
    if let (Some(y), Some(z)) = (number("y"), number("z")) {
        return PointValue::Bubble { y, z };
    }
    warn!(id, "unrecognized object value treated as gap");
    PointValue::Gap
}
