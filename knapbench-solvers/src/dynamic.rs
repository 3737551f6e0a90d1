use crate::{Skip, Solution};
use knapbench_instance::Instance;

/// Ceiling on DP scratch memory (value table plus decision bits).
pub const TABLE_BYTE_LIMIT: usize = 2 * 1024 * 1024 * 1024;

/// Values are carried as integer cents inside the table, rounded half-up at
/// two decimals, so repeated additions accumulate no floating error.
fn to_cents(value: f64) -> u64 {
    (value * 100.0).round() as u64
}

/// Bottom-up DP over residual capacity, O(C) space for the value table.
///
/// The exact selection is recovered by backtracking through a per-item
/// decision bit table (one bit per (item, residual capacity) cell). When the
/// decision bits would push scratch memory past the ceiling the solver
/// degrades to value-only mode and reports an empty selection; the value
/// stays correct.
pub fn solve(instance: &Instance) -> Result<Solution, Skip> {
    let num_items = instance.num_items();
    let capacity = instance.capacity as usize;

    let table_bytes = (capacity + 1) * std::mem::size_of::<u64>();
    if table_bytes > TABLE_BYTE_LIMIT {
        return Err(Skip::AllocationFailure {
            required_bytes: table_bytes,
            limit: TABLE_BYTE_LIMIT,
        });
    }
    let decision_bytes = num_items
        .checked_mul(capacity + 1)
        .map(|bits| bits / 8 + 1)
        .unwrap_or(usize::MAX);
    let reconstruct = table_bytes.saturating_add(decision_bytes) <= TABLE_BYTE_LIMIT;

    let cents: Vec<u64> = instance.items.iter().map(|item| to_cents(item.value)).collect();
    let mut table = vec![0u64; capacity + 1];
    let mut decisions = if reconstruct {
        vec![0u8; decision_bytes]
    } else {
        Vec::new()
    };

    for (i, item) in instance.items.iter().enumerate() {
        let weight = item.weight as usize;
        if weight > capacity {
            continue;
        }
        // High capacity down to the item's weight, so each item counts once
        for c in (weight..=capacity).rev() {
            let candidate = table[c - weight] + cents[i];
            if candidate > table[c] {
                table[c] = candidate;
                if reconstruct {
                    let bit = i * (capacity + 1) + c;
                    decisions[bit / 8] |= 1 << (bit % 8);
                }
            }
        }
    }

    let mut selection = vec![false; num_items];
    if reconstruct {
        let mut c = capacity;
        for i in (0..num_items).rev() {
            let bit = i * (capacity + 1) + c;
            if decisions[bit / 8] & (1 << (bit % 8)) != 0 {
                selection[i] = true;
                c -= instance.items[i].weight as usize;
            }
        }
    }

    Ok(Solution {
        value: table[capacity] as f64 / 100.0,
        selection,
    })
}
