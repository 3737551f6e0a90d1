use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Item {
    pub id: usize,
    pub weight: u32,
    pub value: f64,
    pub ratio: f64,
}

impl Item {
    pub fn new(id: usize, weight: u32, value: f64) -> Item {
        Item {
            id,
            weight,
            value,
            ratio: value / weight as f64,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Instance {
    pub items: Vec<Item>,
    pub capacity: u32,
}

/// Derives a 32-byte rng seed from an experiment index.
pub fn make_seed(index: u64) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(&index.to_le_bytes());
    seed
}

/// Generates `num_items` items with weights uniform in [1, 100] and values
/// uniform in [100.00, 1000.00] at two-decimal precision. Ids are 1-based.
pub fn generate_items(seed: &[u8; 32], num_items: usize) -> Vec<Item> {
    let mut rng = SmallRng::from_seed(seed.clone());
    (0..num_items)
        .map(|i| {
            let weight = rng.gen_range(1..=100);
            // Values are drawn as integer cents so they carry exactly two decimals
            let value = rng.gen_range(10_000..=100_000) as f64 / 100.0;
            Item::new(i + 1, weight, value)
        })
        .collect()
}

impl Instance {
    pub fn new(items: Vec<Item>, capacity: u32) -> Instance {
        Instance { items, capacity }
    }

    pub fn generate(seed: &[u8; 32], num_items: usize, capacity: u32) -> Instance {
        Instance::new(generate_items(seed, num_items), capacity)
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn selection_weight(&self, selection: &[bool]) -> u32 {
        self.items
            .iter()
            .zip(selection)
            .filter(|(_, &sel)| sel)
            .map(|(item, _)| item.weight)
            .sum()
    }

    pub fn selection_value(&self, selection: &[bool]) -> f64 {
        self.items
            .iter()
            .zip(selection)
            .filter(|(_, &sel)| sel)
            .map(|(item, _)| item.value)
            .sum()
    }

    /// Checks a selection against this instance and returns its total value.
    pub fn verify_selection(&self, selection: &[bool]) -> Result<f64> {
        if selection.len() != self.items.len() {
            return Err(anyhow!(
                "Selection length ({}) does not match item count ({})",
                selection.len(),
                self.items.len()
            ));
        }
        let total_weight = self.selection_weight(selection);
        if total_weight > self.capacity {
            return Err(anyhow!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight,
                self.capacity
            ));
        }
        Ok(self.selection_value(selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_items_ranges() {
        let items = generate_items(&make_seed(0), 500);
        assert_eq!(items.len(), 500);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.id, i + 1);
            assert!(item.weight >= 1 && item.weight <= 100);
            assert!(item.value >= 100.0 && item.value <= 1000.0);
            // Two-decimal precision
            let cents = item.value * 100.0;
            assert!((cents - cents.round()).abs() < 1e-9);
            assert!((item.ratio - item.value / item.weight as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_items(&make_seed(7), 100);
        let b = generate_items(&make_seed(7), 100);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.weight, y.weight);
            assert_eq!(x.value, y.value);
        }
        let c = generate_items(&make_seed(8), 100);
        assert!(a
            .iter()
            .zip(&c)
            .any(|(x, y)| x.weight != y.weight || x.value != y.value));
    }

    #[test]
    fn test_make_seed_layout() {
        let seed = make_seed(0x0102030405060708);
        assert_eq!(seed[..8], [8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(seed[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_verify_selection() {
        let items = vec![
            Item::new(1, 2, 3.0),
            Item::new(2, 3, 4.0),
            Item::new(3, 4, 5.0),
        ];
        let instance = Instance::new(items, 5);

        let value = instance.verify_selection(&[true, true, false]).unwrap();
        assert_eq!(value, 7.0);
        assert_eq!(instance.selection_weight(&[true, true, false]), 5);

        let err = instance
            .verify_selection(&[true, true, true])
            .unwrap_err()
            .to_string();
        assert!(err.contains("exceeded capacity"));

        let err = instance.verify_selection(&[true]).unwrap_err().to_string();
        assert!(err.contains("does not match"));
    }
}
