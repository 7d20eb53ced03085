//! ACO execution: path construction, pheromone update and round scheduling.
//!
//! # Algorithm
//!
//! 1. Derive the heuristic matrix from the costs (once, in [`PathProblem`])
//! 2. For each round:
//!    a. Every ant builds a start-to-end path against the same pheromone snapshot
//!    b. Path costs are summed from the cost matrix
//!    c. Pheromone evaporates once, then every tour deposits `Q / cost`
//! 3. The next round sees only the updated pheromone matrix

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use super::config::AcoConfig;
use super::matrix::{CostMatrix, HeuristicMatrix, PheromoneMatrix};
use super::transition::{choose_node, transition_probabilities};
use super::types::{AntTour, Path, PathProblem, RoundReport};
use crate::random::rng_from_option;

/// Builds one ant's path from `start` to `end`.
///
/// Nodes are drawn one at a time while more than one node is unvisited;
/// `end` is held back from the draws and appended last. The result visits
/// every node exactly once.
pub fn construct_path<R: Rng>(
    start: usize,
    end: usize,
    pheromone: &PheromoneMatrix,
    heuristic: &HeuristicMatrix,
    alpha: f64,
    beta: f64,
    rng: &mut R,
) -> Path {
    let n = pheromone.size();
    let mut path = Vec::with_capacity(n);
    path.push(start);

    let mut unvisited: Vec<usize> = (0..n).filter(|&node| node != start).collect();
    let mut current = start;

    while unvisited.len() > 1 {
        let candidates: Vec<usize> = unvisited.iter().copied().filter(|&c| c != end).collect();
        let probs =
            transition_probabilities(current, &candidates, pheromone, heuristic, alpha, beta);
        let Some(next) = choose_node(&probs, rng) else {
            break;
        };

        path.push(next);
        unvisited.retain(|&node| node != next);
        current = next;
    }

    if !path.contains(&end) {
        path.push(end);
    }

    path
}

/// Sum of edge costs along `path`.
pub fn path_cost(path: &[usize], costs: &CostMatrix) -> f64 {
    path.windows(2).map(|w| costs.get(w[0], w[1])).sum()
}

/// Evaporates all pheromone by `evaporation`, then deposits `deposit / cost`
/// on both directions of every edge of every tour.
///
/// Zero-cost tours deposit nothing.
pub fn update_pheromones(
    mut pheromone: PheromoneMatrix,
    tours: &[AntTour],
    evaporation: f64,
    deposit: f64,
) -> PheromoneMatrix {
    pheromone.evaporate(evaporation);

    for tour in tours {
        let delta = if tour.cost > 0.0 {
            deposit / tour.cost
        } else {
            0.0
        };
        for edge in tour.path.windows(2) {
            pheromone.deposit(edge[0], edge[1], delta);
        }
    }

    pheromone
}

/// A colony advancing round by round over one problem.
///
/// The pheromone matrix is the only state carried from one round to the
/// next.
pub struct Colony<'a> {
    problem: &'a PathProblem,
    config: &'a AcoConfig,
    pheromone: PheromoneMatrix,
    rng: StdRng,
    rounds_run: usize,
}

impl<'a> Colony<'a> {
    /// Creates a colony with the given starting pheromone.
    ///
    /// # Panics
    /// Panics if `pheromone` does not match the problem size.
    pub fn new(
        problem: &'a PathProblem,
        config: &'a AcoConfig,
        pheromone: PheromoneMatrix,
    ) -> Self {
        assert_eq!(
            pheromone.size(),
            problem.size(),
            "pheromone matrix must match the cost matrix size"
        );
        Self {
            problem,
            config,
            pheromone,
            rng: rng_from_option(config.seed),
            rounds_run: 0,
        }
    }

    /// Current pheromone matrix.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    /// Builds a single tour against the current pheromone.
    pub fn build_tour(&mut self) -> AntTour {
        let path = construct_path(
            self.problem.start(),
            self.problem.end(),
            &self.pheromone,
            self.problem.heuristic(),
            self.config.alpha,
            self.config.beta,
            &mut self.rng,
        );
        let cost = path_cost(&path, self.problem.costs());
        AntTour { path, cost }
    }

    /// Runs `ants` ants against the current snapshot, then applies one
    /// pheromone update for the whole batch.
    pub fn run_round(&mut self, ants: usize) -> RoundReport {
        let tours: Vec<AntTour> = (0..ants)
            .map(|ant| {
                let tour = self.build_tour();
                trace!(
                    round = self.rounds_run,
                    ant,
                    cost = tour.cost,
                    path = ?tour.path,
                    "tour built"
                );
                tour
            })
            .collect();

        let pheromone = std::mem::replace(&mut self.pheromone, PheromoneMatrix::zeros(0));
        self.pheromone = update_pheromones(
            pheromone,
            &tours,
            self.config.evaporation,
            self.config.deposit,
        );

        let report = RoundReport {
            round: self.rounds_run,
            tours,
            pheromone: self.pheromone.clone(),
        };
        debug!(
            round = report.round,
            ants,
            best_cost = report.best_tour().map(|t| t.cost),
            "round complete"
        );
        self.rounds_run += 1;
        report
    }
}

/// Result of a full ACO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// One report per round, in order.
    pub rounds: Vec<RoundReport>,

    /// Lowest-cost tour seen in any round.
    pub best: Option<AntTour>,

    /// Best cost seen so far, recorded after each round.
    pub cost_history: Vec<f64>,

    /// Pheromone after the last round.
    pub final_pheromone: PheromoneMatrix,

    /// Total number of ants run.
    pub total_ants: usize,
}

/// Executes the configured round schedule.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs every round in `config.rounds`, starting from `initial`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_antcolony::aco::{AcoConfig, AcoRunner, PheromoneMatrix};
    /// use u_antcolony::aco::scenario::reference_problem;
    ///
    /// let problem = reference_problem();
    /// let config = AcoConfig::default().with_seed(7);
    /// let result = AcoRunner::run(&problem, &config, PheromoneMatrix::zeros(4)).unwrap();
    /// assert_eq!(result.rounds.len(), 2);
    /// assert_eq!(result.total_ants, 4);
    /// ```
    pub fn run(
        problem: &PathProblem,
        config: &AcoConfig,
        initial: PheromoneMatrix,
    ) -> Result<AcoResult, String> {
        config.validate()?;
        if initial.size() != problem.size() {
            return Err(format!(
                "pheromone matrix is {0}x{0}, cost matrix is {1}x{1}",
                initial.size(),
                problem.size()
            ));
        }

        let mut colony = Colony::new(problem, config, initial);
        let mut rounds = Vec::with_capacity(config.rounds.len());
        let mut best: Option<AntTour> = None;
        let mut cost_history = Vec::with_capacity(config.rounds.len());

        for &ants in &config.rounds {
            let report = colony.run_round(ants);
            if let Some(round_best) = report.best_tour() {
                if best.as_ref().is_none_or(|b| round_best.cost < b.cost) {
                    best = Some(round_best.clone());
                }
            }
            if let Some(b) = &best {
                cost_history.push(b.cost);
            }
            rounds.push(report);
        }

        debug!(
            rounds = rounds.len(),
            best_cost = best.as_ref().map(|b| b.cost),
            "aco run finished"
        );

        Ok(AcoResult {
            rounds,
            best,
            cost_history,
            final_pheromone: colony.pheromone().clone(),
            total_ants: config.rounds.iter().sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::scenario::{reference_costs, reference_problem};
    use crate::random::create_rng;

    fn is_valid_path(path: &[usize], n: usize, start: usize, end: usize) -> bool {
        let mut sorted = path.to_vec();
        sorted.sort_unstable();
        path.len() == n
            && path.first() == Some(&start)
            && path.last() == Some(&end)
            && sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn test_construct_path_zero_pheromone() {
        let problem = reference_problem();
        let pheromone = PheromoneMatrix::zeros(4);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let path = construct_path(0, 3, &pheromone, problem.heuristic(), 1.0, 2.0, &mut rng);
            assert!(is_valid_path(&path, 4, 0, 3), "invalid path {path:?}");
        }
    }

    #[test]
    fn test_construct_path_zero_pheromone_explores_both_orders() {
        let problem = reference_problem();
        let pheromone = PheromoneMatrix::zeros(4);
        let mut rng = create_rng(3);
        let paths: std::collections::HashSet<Path> = (0..100)
            .map(|_| construct_path(0, 3, &pheromone, problem.heuristic(), 1.0, 2.0, &mut rng))
            .collect();
        assert!(paths.contains(&vec![0, 1, 2, 3]));
        assert!(paths.contains(&vec![0, 2, 1, 3]));
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_construct_path_end_in_the_middle() {
        let costs = reference_costs();
        let heuristic = HeuristicMatrix::from_costs(&costs);
        let pheromone = PheromoneMatrix::uniform(4, 1.0);
        let mut rng = create_rng(11);
        for _ in 0..50 {
            let path = construct_path(3, 1, &pheromone, &heuristic, 1.0, 2.0, &mut rng);
            assert!(is_valid_path(&path, 4, 3, 1), "invalid path {path:?}");
        }
    }

    #[test]
    fn test_construct_path_single_node() {
        let costs = CostMatrix::from_rows(&[[0.0]]).unwrap();
        let heuristic = HeuristicMatrix::from_costs(&costs);
        let mut rng = create_rng(1);
        let path = construct_path(
            0,
            0,
            &PheromoneMatrix::zeros(1),
            &heuristic,
            1.0,
            2.0,
            &mut rng,
        );
        assert_eq!(path, vec![0]);
    }

    #[test]
    fn test_path_cost() {
        let costs = reference_costs();
        assert!((path_cost(&[0, 1, 2, 3], &costs) - 10.0).abs() < 1e-12);
        assert!((path_cost(&[0, 2, 1, 3], &costs) - 27.0).abs() < 1e-12);
        assert_eq!(path_cost(&[2], &costs), 0.0);
    }

    #[test]
    fn test_update_evaporates_then_deposits() {
        let costs = reference_costs();
        let tours: Vec<AntTour> = [vec![0, 1, 2, 3], vec![0, 1, 2, 3], vec![0, 1, 2, 3]]
            .into_iter()
            .map(|path| {
                let cost = path_cost(&path, &costs);
                AntTour { path, cost }
            })
            .collect();

        let updated = update_pheromones(PheromoneMatrix::zeros(4), &tours, 0.1, 1.0);

        let expected = 0.0 * 0.9 + 3.0 * (1.0 / 10.0);
        assert!((updated.get(0, 1) - expected).abs() < 1e-12);
        assert!((updated.get(1, 0) - expected).abs() < 1e-12);
        assert_eq!(updated.get(0, 2), 0.0);
        assert_eq!(updated.get(0, 0), 0.0);
    }

    #[test]
    fn test_update_batch_sees_single_evaporation() {
        let tours = vec![
            AntTour {
                path: vec![0, 1],
                cost: 2.0,
            },
            AntTour {
                path: vec![0, 1],
                cost: 4.0,
            },
        ];
        let initial = PheromoneMatrix::uniform(2, 1.0);
        let updated = update_pheromones(initial, &tours, 0.5, 1.0);
        // 1.0 * 0.5 + 1/2 + 1/4
        assert!((updated.get(0, 1) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_update_zero_cost_deposits_nothing() {
        let tours = vec![AntTour {
            path: vec![0, 1],
            cost: 0.0,
        }];
        let updated = update_pheromones(PheromoneMatrix::uniform(2, 1.0), &tours, 0.0, 1.0);
        assert_eq!(updated.get(0, 1), 1.0);
    }

    #[test]
    fn test_update_no_evaporation_is_identity_without_tours() {
        let initial = PheromoneMatrix::from_rows(&[
            [0.0, 0.2, 0.1, 0.3],
            [0.2, 0.0, 0.4, 0.1],
            [0.1, 0.4, 0.0, 0.9],
            [0.3, 0.1, 0.9, 0.0],
        ])
        .unwrap();
        let updated = update_pheromones(initial.clone(), &[], 0.0, 1.0);
        assert_eq!(updated, initial);
    }

    #[test]
    fn test_round_uses_one_snapshot() {
        let problem = reference_problem();
        let config = AcoConfig::default().with_seed(5);
        let mut colony = Colony::new(&problem, &config, PheromoneMatrix::zeros(4));

        let report = colony.run_round(3);
        assert_eq!(report.tours.len(), 3);
        assert_eq!(colony.rounds_run(), 1);

        let expected = update_pheromones(PheromoneMatrix::zeros(4), &report.tours, 0.1, 1.0);
        assert_eq!(report.pheromone, expected);
        assert_eq!(colony.pheromone(), &expected);
    }

    #[test]
    fn test_run_reference_schedule() {
        let problem = reference_problem();
        let config = AcoConfig::default().with_seed(42);
        let result = AcoRunner::run(&problem, &config, PheromoneMatrix::zeros(4)).unwrap();

        assert_eq!(result.rounds.len(), 2);
        assert_eq!(result.rounds[0].tours.len(), 3);
        assert_eq!(result.rounds[1].tours.len(), 1);
        assert_eq!(result.total_ants, 4);
        assert_eq!(result.final_pheromone, result.rounds[1].pheromone);
        assert!(result.final_pheromone.is_symmetric(1e-12));

        // Only two tours exist: 0-1-2-3 (cost 10) and 0-2-1-3 (cost 27).
        let best = result.best.unwrap();
        assert!(best.cost == 10.0 || best.cost == 27.0);
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_run_is_deterministic_with_seed() {
        let problem = reference_problem();
        let config = AcoConfig::default().with_rounds(vec![5, 5, 5]).with_seed(9);
        let a = AcoRunner::run(&problem, &config, PheromoneMatrix::zeros(4)).unwrap();
        let b = AcoRunner::run(&problem, &config, PheromoneMatrix::zeros(4)).unwrap();
        for (ra, rb) in a.rounds.iter().zip(&b.rounds) {
            assert_eq!(ra.tours, rb.tours);
        }
        assert_eq!(a.final_pheromone, b.final_pheromone);
    }

    #[test]
    fn test_run_converges_to_cheaper_tour() {
        let problem = reference_problem();
        let config = AcoConfig::default()
            .with_rounds(vec![10; 20])
            .with_seed(2024);
        let result = AcoRunner::run(&problem, &config, PheromoneMatrix::uniform(4, 1.0)).unwrap();

        let last = result.rounds.last().unwrap();
        let cheap = last.tours.iter().filter(|t| t.cost == 10.0).count();
        assert!(cheap >= 8, "expected most ants on the cheap tour, got {cheap}/10");
        assert!(result.final_pheromone.get(2, 3) > result.final_pheromone.get(1, 3));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let problem = reference_problem();
        let config = AcoConfig::default().with_evaporation(1.5);
        assert!(AcoRunner::run(&problem, &config, PheromoneMatrix::zeros(4)).is_err());
    }

    #[test]
    fn test_run_rejects_size_mismatch() {
        let problem = reference_problem();
        let config = AcoConfig::default();
        let err = AcoRunner::run(&problem, &config, PheromoneMatrix::zeros(3)).unwrap_err();
        assert!(err.contains("3x3"));
    }
}
