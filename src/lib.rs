//! Ant colony path construction over small fixed graphs.
//!
//! - **ACO**: ants build start-to-end paths biased by pheromone and
//!   cost-derived desirability; pheromone evaporates and is reinforced
//!   once per round of ants.
//! - **Input**: strict row-by-row entry of an initial pheromone matrix.
//! - **Scenario**: the four-place Tree/Car/House/Pond reference run.
//!
//! # Architecture
//!
//! All state is explicit. Cost and heuristic matrices are fixed per run;
//! the pheromone matrix is threaded from one round to the next and is the
//! only way earlier ants influence later ones.

pub mod aco;
pub mod error;
pub mod random;
