use anyhow::anyhow;
use knapbench_instance::Instance;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod bound;
pub mod branch_and_bound;
pub mod dynamic;
pub mod exhaustive;
pub mod greedy;
pub mod queue;

/// A solver's successful result: achieved value plus the selection over the
/// caller's original item order.
#[derive(Serialize, Debug, Clone)]
pub struct Solution {
    pub value: f64,
    pub selection: Vec<bool>,
}

impl Solution {
    pub fn selected_count(&self) -> usize {
        self.selection.iter().filter(|&&s| s).count()
    }
}

/// A typed "no result" signal. Skips are ordinary return values; the caller
/// decides whether to log or move on. A value of 0 is never a skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    InputTooLarge { num_items: usize, limit: usize },
    AllocationFailure { required_bytes: usize, limit: usize },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::InputTooLarge { num_items, limit } => write!(
                f,
                "input too large ({} items, limit {})",
                num_items, limit
            ),
            Skip::AllocationFailure {
                required_bytes,
                limit,
            } => write!(
                f,
                "allocation failed ({} bytes required, ceiling {})",
                required_bytes, limit
            ),
        }
    }
}

impl std::error::Error for Skip {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Exhaustive,
    Dynamic,
    Greedy,
    BranchAndBound,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Exhaustive,
        Algorithm::Dynamic,
        Algorithm::Greedy,
        Algorithm::BranchAndBound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Exhaustive => "exhaustive",
            Algorithm::Dynamic => "dynamic",
            Algorithm::Greedy => "greedy",
            Algorithm::BranchAndBound => "branch_and_bound",
        }
    }

    pub fn solve(&self, instance: &Instance) -> Result<Solution, Skip> {
        match self {
            Algorithm::Exhaustive => exhaustive::solve(instance),
            Algorithm::Dynamic => dynamic::solve(instance),
            Algorithm::Greedy => greedy::solve(instance),
            Algorithm::BranchAndBound => branch_and_bound::solve(instance),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| anyhow!("Unknown algorithm: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
        }
        let err = "simplex".parse::<Algorithm>().unwrap_err().to_string();
        assert!(err.contains("Unknown algorithm"));
    }

    #[test]
    fn test_skip_messages() {
        let skip = Skip::InputTooLarge {
            num_items: 35,
            limit: 30,
        };
        assert_eq!(skip.to_string(), "input too large (35 items, limit 30)");
        let skip = Skip::AllocationFailure {
            required_bytes: 4_000_000_000,
            limit: 2_147_483_648,
        };
        assert!(skip.to_string().contains("allocation failed"));
    }

    #[test]
    fn test_selected_count() {
        let solution = Solution {
            value: 7.0,
            selection: vec![true, true, false, false],
        };
        assert_eq!(solution.selected_count(), 2);
    }
}
