//! The four-place reference scenario: Tree, Car, House and Pond.
//!
//! Ants start at the tree and must finish at the pond. Three ants (A1-A3)
//! run against the initial pheromone, then a fourth (A4) runs against the
//! updated matrix.

use super::config::AcoConfig;
use super::matrix::CostMatrix;
use super::types::PathProblem;

pub const PLACES: [&str; 4] = ["Tree", "Car", "House", "Pond"];

pub const START: usize = 0;
pub const END: usize = PLACES.len() - 1;

const COSTS: [[f64; 4]; 4] = [
    [0.0, 5.0, 15.0, 4.0],
    [5.0, 0.0, 4.0, 8.0],
    [15.0, 4.0, 0.0, 1.0],
    [4.0, 8.0, 1.0, 0.0],
];

/// Fixed, symmetric cost matrix of the scenario.
pub fn reference_costs() -> CostMatrix {
    CostMatrix::from_rows(&COSTS).expect("reference costs are square and non-negative")
}

/// Tree-to-Pond problem with place labels.
pub fn reference_problem() -> PathProblem {
    PathProblem::new(reference_costs(), START, END)
        .and_then(|p| p.with_labels(PLACES))
        .expect("reference problem is well formed")
}

/// `alpha = 1`, `beta = 2`, `Q = 1`, `rho = 0.1`, rounds `[3, 1]`.
pub fn reference_config() -> AcoConfig {
    AcoConfig::default()
}

/// Display label of the `ordinal`-th ant across all rounds: `A1`, `A2`, ...
pub fn ant_label(ordinal: usize) -> String {
    format!("A{}", ordinal + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_problem() {
        let problem = reference_problem();
        assert_eq!(problem.size(), 4);
        assert_eq!(problem.start(), 0);
        assert_eq!(problem.end(), 3);
        assert_eq!(problem.label(2), "House");
        assert!(problem.costs().as_matrix().is_symmetric(0.0));
    }

    #[test]
    fn test_reference_config_is_valid() {
        assert!(reference_config().validate().is_ok());
    }

    #[test]
    fn test_ant_labels() {
        assert_eq!(ant_label(0), "A1");
        assert_eq!(ant_label(3), "A4");
    }
}
