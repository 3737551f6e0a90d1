use knapbench_instance::Item;

/// LP-relaxation upper bound on the value reachable from a partial decision
/// state. `items` must be sorted by descending ratio; `level` is the number
/// of items already decided, `weight`/`value` the partial totals.
///
/// Undecided items are added greedily while they fit; the first one that
/// does not fully fit contributes fractionally at its ratio. The result is
/// admissible: never below the best true completion value. A state at or
/// over capacity bounds to 0 (nothing further can be added; the state's own
/// value was credited when it was created).
pub fn upper_bound(items: &[Item], capacity: u32, level: usize, weight: u32, value: f64) -> f64 {
    let capacity = capacity as u64;
    if weight as u64 >= capacity {
        return 0.0;
    }
    let mut bound = value;
    // Accumulated in u64 so weights near u32::MAX cannot overflow
    let mut total_weight = weight as u64;
    let mut j = level;
    while j < items.len() && total_weight + items[j].weight as u64 <= capacity {
        total_weight += items[j].weight as u64;
        bound += items[j].value;
        j += 1;
    }
    if j < items.len() {
        bound += (capacity - total_weight) as f64 * items[j].ratio;
    }
    bound
}
