use crate::bound::upper_bound;
use crate::queue::{NodeQueue, SearchNode};
use crate::{Skip, Solution};
use knapbench_instance::Instance;
use std::cmp::Ordering;

/// Worst-case queue growth past this size makes best-first search a memory
/// hazard; also keeps decisions within the node bitmask.
pub const MAX_ITEMS: usize = 100;

/// Best-first branch-and-bound. Items are re-ordered by descending ratio so
/// the LP bound is tight; the worklist is a max-heap on node bounds, and a
/// popped node whose bound cannot beat the incumbent ends the search (every
/// remaining node has a lower bound still).
pub fn solve(instance: &Instance) -> Result<Solution, Skip> {
    let num_items = instance.num_items();
    if num_items > MAX_ITEMS {
        return Err(Skip::InputTooLarge {
            num_items,
            limit: MAX_ITEMS,
        });
    }
    let capacity = instance.capacity;

    let mut order: Vec<usize> = (0..num_items).collect();
    order.sort_by(|&a, &b| {
        instance.items[b]
            .ratio
            .partial_cmp(&instance.items[a].ratio)
            .unwrap_or(Ordering::Equal)
    });
    let sorted: Vec<_> = order.iter().map(|&i| instance.items[i].clone()).collect();

    let mut best_value = 0.0;
    let mut best_taken = 0u128;
    let mut queue = NodeQueue::new();
    let root = SearchNode {
        level: 0,
        weight: 0,
        value: 0.0,
        bound: upper_bound(&sorted, capacity, 0, 0, 0.0),
        taken: 0,
    };
    if root.bound > best_value {
        queue.push(root);
    }

    while let Some(node) = queue.pop() {
        if node.bound <= best_value {
            // Highest bound in the queue; everything left is worse
            break;
        }
        let item = &sorted[node.level];
        let level = node.level + 1;

        // Include branch; summed in u64 so huge weights cannot overflow
        let weight = node.weight as u64 + item.weight as u64;
        if weight <= capacity as u64 {
            let weight = weight as u32;
            let value = node.value + item.value;
            let taken = node.taken | 1 << node.level;
            if value > best_value {
                best_value = value;
                best_taken = taken;
            }
            let bound = upper_bound(&sorted, capacity, level, weight, value);
            if bound > best_value && level < num_items {
                queue.push(SearchNode {
                    level,
                    weight,
                    value,
                    bound,
                    taken,
                });
            }
        }

        // Exclude branch
        let bound = upper_bound(&sorted, capacity, level, node.weight, node.value);
        if bound > best_value && level < num_items {
            queue.push(SearchNode {
                level,
                weight: node.weight,
                value: node.value,
                bound,
                taken: node.taken,
            });
        }
    }

    // Map the winning node's ratio-order decisions back to original identities
    let mut selection = vec![false; num_items];
    for (position, &original) in order.iter().enumerate() {
        if best_taken & 1 << position != 0 {
            selection[original] = true;
        }
    }

    Ok(Solution {
        value: best_value,
        selection,
    })
}
