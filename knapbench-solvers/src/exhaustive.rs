use crate::{Skip, Solution};
use knapbench_instance::Instance;

/// Enumerating 2^n subsets past this is not worth waiting for.
pub const MAX_ITEMS: usize = 30;

/// Exhaustive subset enumeration. Walks every bitmask over the items and
/// keeps the best feasible one; ties go to the first mask encountered.
pub fn solve(instance: &Instance) -> Result<Solution, Skip> {
    let num_items = instance.num_items();
    if num_items > MAX_ITEMS {
        return Err(Skip::InputTooLarge {
            num_items,
            limit: MAX_ITEMS,
        });
    }
    let capacity = instance.capacity as u64;

    let mut best_value = 0.0;
    let mut best_mask = 0u64;
    for mask in 0..1u64 << num_items {
        let mut total_weight = 0u64;
        let mut total_value = 0.0;
        for (i, item) in instance.items.iter().enumerate() {
            if mask & (1 << i) != 0 {
                total_weight += item.weight as u64;
                total_value += item.value;
            }
        }
        if total_weight <= capacity && total_value > best_value {
            best_value = total_value;
            best_mask = mask;
        }
    }

    let selection = (0..num_items).map(|i| best_mask & (1 << i) != 0).collect();
    Ok(Solution {
        value: best_value,
        selection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapbench_instance::Item;

    fn small_instance(capacity: u32) -> Instance {
        let items = vec![
            Item::new(1, 2, 3.0),
            Item::new(2, 3, 4.0),
            Item::new(3, 4, 5.0),
            Item::new(4, 5, 6.0),
        ];
        Instance::new(items, capacity)
    }

    #[test]
    fn test_known_optimum() {
        let solution = solve(&small_instance(5)).unwrap();
        assert_eq!(solution.value, 7.0);
        assert_eq!(solution.selection, vec![true, true, false, false]);
    }

    #[test]
    fn test_zero_capacity_is_not_a_skip() {
        let solution = solve(&small_instance(0)).unwrap();
        assert_eq!(solution.value, 0.0);
        assert_eq!(solution.selected_count(), 0);
    }

    #[test]
    fn test_skips_past_threshold() {
        let items = (0..35).map(|i| Item::new(i + 1, 10, 100.0)).collect();
        let instance = Instance::new(items, 100);
        assert_eq!(
            solve(&instance).unwrap_err(),
            Skip::InputTooLarge {
                num_items: 35,
                limit: MAX_ITEMS
            }
        );
    }

    #[test]
    fn test_empty_instance() {
        let solution = solve(&Instance::new(vec![], 100)).unwrap();
        assert_eq!(solution.value, 0.0);
        assert!(solution.selection.is_empty());
    }
}
