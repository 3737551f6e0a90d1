use crate::{Skip, Solution};
use knapbench_instance::Instance;
use std::cmp::Ordering;

/// Ratio-descending greedy fill. Deterministic, never skips; the result is
/// feasible but not necessarily optimal.
pub fn solve(instance: &Instance) -> Result<Solution, Skip> {
    let num_items = instance.num_items();
    let mut order: Vec<usize> = (0..num_items).collect();
    order.sort_by(|&a, &b| {
        instance.items[b]
            .ratio
            .partial_cmp(&instance.items[a].ratio)
            .unwrap_or(Ordering::Equal)
    });

    let mut remaining = instance.capacity;
    let mut value = 0.0;
    let mut selection = vec![false; num_items];
    for &i in &order {
        let item = &instance.items[i];
        if item.weight <= remaining {
            remaining -= item.weight;
            value += item.value;
            selection[i] = true;
        }
    }

    Ok(Solution { value, selection })
}
