use smallvec::SmallVec;

use crate::core::scale::PixelScale;
use crate::core::types::{DataPoint, Series};

/// Pluggable geometry needed to resolve a pixel position to a data point.
///
/// The y resolver and the bar hit-region test come from the rendering
/// layer; the core only owns the search strategy.
pub struct HitContext<'a> {
    pub x_scale: &'a dyn PixelScale,
    /// Pixel y of a rendered point (the shape layer's `circleY`).
    pub point_y: &'a dyn Fn(&DataPoint) -> f64,
    /// Whether a series renders as bars.
    pub is_bar: &'a dyn Fn(&str) -> bool,
    /// Whether the rendered bar for this point contains the position.
    pub bar_contains: &'a dyn Fn(&DataPoint, (f64, f64)) -> bool,
    /// Axis rotation swaps which pixel axis maps to x vs y.
    pub rotated: bool,
    /// Maximum accepted distance for non-bar candidates.
    pub sensitivity: f64,
}

impl HitContext<'_> {
    fn distance(&self, point: &DataPoint, pos: (f64, f64)) -> f64 {
        let x = self.x_scale.pixel(point.x.as_f64());
        let y = (self.point_y)(point);
        let (px, py) = if self.rotated { (pos.1, pos.0) } else { pos };
        ((x - px).powi(2) + (y - py).powi(2)).sqrt()
    }
}

/// Nearest data point to a pixel position, two-phase.
///
/// Bars take priority: the first bar whose rendered hit region contains the
/// position wins outright, with no distance comparison. Among the remaining
/// points only a strictly smaller distance than both the running minimum
/// and the sensitivity threshold is accepted. `None` means "no selection".
#[must_use]
pub fn nearest_point<'a>(
    targets: &[&'a Series],
    pos: (f64, f64),
    ctx: &HitContext<'_>,
) -> Option<&'a DataPoint> {
    let candidates = || {
        targets
            .iter()
            .flat_map(|series| &series.values)
            .filter(|point| point.base_value().is_some())
    };

    for point in candidates().filter(|point| (ctx.is_bar)(&point.id)) {
        if (ctx.bar_contains)(point, pos) {
            return Some(point);
        }
    }

    let mut closest = None;
    let mut min_distance = ctx.sensitivity;
    for point in candidates().filter(|point| !(ctx.is_bar)(&point.id)) {
        let distance = ctx.distance(point, pos);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(point);
        }
    }
    closest
}

/// The maximal run of points around `index` sharing its exact x value,
/// walked backward then forward. Supports multi-point tooltips at one x
/// position; does not wrap.
#[must_use]
pub fn points_sharing_x(values: &[DataPoint], index: usize) -> SmallVec<[&DataPoint; 4]> {
    let mut shared = SmallVec::new();
    let Some(anchor) = values.get(index) else {
        return shared;
    };
    let target_x = anchor.x.as_f64();

    for point in values[..index].iter().rev() {
        if point.x.as_f64() != target_x {
            break;
        }
        shared.push(point);
    }
    for point in &values[index..] {
        if point.x.as_f64() != target_x {
            break;
        }
        shared.push(point);
    }
    shared
}

/// Data index whose per-index pixel coordinate lies closest to `pixel`.
///
/// `coords` is the ascending per-index coordinate table maintained by the
/// event layer; the lookup is a binary search plus a neighbor comparison.
#[must_use]
pub fn data_index_at_coord(coords: &[f64], pixel: f64) -> Option<usize> {
    if coords.is_empty() {
        return None;
    }
    let upper = coords.partition_point(|coord| *coord <= pixel);
    let index = match upper {
        0 => 0,
        _ if upper == coords.len() => coords.len() - 1,
        _ => {
            let below = upper - 1;
            if (pixel - coords[below]).abs() <= (coords[upper] - pixel).abs() {
                below
            } else {
                upper
            }
        }
    };
    Some(index)
}
