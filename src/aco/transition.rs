//! Transition rule: how an ant picks its next node.
//!
//! The attractiveness of moving from `i` to a candidate `j` is
//! `tau(i, j)^alpha * eta(i, j)^beta`, normalized over all candidates.
//!
//! # Reference
//!
//! Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//! of Cooperating Agents"

use rand::Rng;
use tracing::trace;

use super::matrix::{HeuristicMatrix, PheromoneMatrix};

/// Probability of moving from `current` to each candidate.
///
/// Returns `(node, probability)` pairs in candidate order. When the total
/// attractiveness is exactly zero (for example an all-zero pheromone matrix
/// with `alpha > 0`), every candidate gets the same probability.
pub fn transition_probabilities(
    current: usize,
    candidates: &[usize],
    pheromone: &PheromoneMatrix,
    heuristic: &HeuristicMatrix,
    alpha: f64,
    beta: f64,
) -> Vec<(usize, f64)> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let weights: Vec<(usize, f64)> = candidates
        .iter()
        .map(|&next| {
            let tau = pheromone.get(current, next);
            let eta = heuristic.get(current, next);
            (next, tau.powf(alpha) * eta.powf(beta))
        })
        .collect();

    let total: f64 = weights.iter().map(|&(_, w)| w).sum();
    if total == 0.0 {
        trace!(
            current,
            candidates = candidates.len(),
            "zero attractiveness, using uniform choice"
        );
        let uniform = 1.0 / candidates.len() as f64;
        return candidates.iter().map(|&n| (n, uniform)).collect();
    }

    weights.into_iter().map(|(n, w)| (n, w / total)).collect()
}

/// Draws a node from a probability distribution by cumulative weight.
///
/// Returns `None` only for an empty distribution.
pub fn choose_node<R: Rng>(distribution: &[(usize, f64)], rng: &mut R) -> Option<usize> {
    let (&(last, _), _) = distribution.split_last()?;

    let total: f64 = distribution.iter().map(|&(_, p)| p).sum();
    if total.is_nan() || total <= 0.0 {
        return Some(distribution[rng.random_range(0..distribution.len())].0);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for &(node, p) in distribution {
        cumulative += p;
        if cumulative > threshold {
            return Some(node);
        }
    }

    Some(last) // floating-point fallback
}
