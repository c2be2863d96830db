use crate::core::aggregate::MinMaxPoints;

#[derive(Debug, Clone)]
struct Stamped<T> {
    generation: u64,
    value: T,
}

/// Derived-value cache with one slot per aggregate.
///
/// Each slot is stamped with the store generation it was computed at; a
/// reader whose generation differs recomputes. No manual clearing exists,
/// so entries are always pure functions of (series collection, visibility).
#[derive(Debug, Default)]
pub struct DerivedCache {
    min_max_points: Option<Stamped<MinMaxPoints>>,
    stack_totals: Option<Stamped<Vec<f64>>>,
    total_sum: Option<Stamped<f64>>,
}

fn fetch<T>(slot: &mut Option<Stamped<T>>, generation: u64, compute: impl FnOnce() -> T) -> &T {
    // check-then-write: a stale or empty slot is dropped before the insert
    if !matches!(slot, Some(stamped) if stamped.generation == generation) {
        *slot = None;
    }
    &slot
        .get_or_insert_with(|| Stamped {
            generation,
            value: compute(),
        })
        .value
}

impl DerivedCache {
    pub fn min_max_points(
        &mut self,
        generation: u64,
        compute: impl FnOnce() -> MinMaxPoints,
    ) -> &MinMaxPoints {
        fetch(&mut self.min_max_points, generation, compute)
    }

    pub fn stack_totals(&mut self, generation: u64, compute: impl FnOnce() -> Vec<f64>) -> &[f64] {
        fetch(&mut self.stack_totals, generation, compute).as_slice()
    }

    pub fn total_sum(&mut self, generation: u64, compute: impl FnOnce() -> f64) -> f64 {
        *fetch(&mut self.total_sum, generation, compute)
    }
}
