//! Ant Colony Optimization (ACO) over a small fixed graph.
//!
//! Ants build start-to-end paths that visit every node once, choosing each
//! step with probability proportional to `pheromone^alpha * heuristic^beta`.
//! After each round of ants the pheromone evaporates and every tour deposits
//! `Q / cost` on the edges it used.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), "Ant Colony Optimization"

mod config;
pub mod input;
mod matrix;
mod runner;
pub mod scenario;
mod transition;
mod types;

pub use config::AcoConfig;
pub use matrix::{CostMatrix, HeuristicMatrix, Matrix, PheromoneMatrix};
pub use runner::{construct_path, path_cost, update_pheromones, AcoResult, AcoRunner, Colony};
pub use transition::{choose_node, transition_probabilities};
pub use types::{AntTour, Path, PathProblem, RoundReport};
