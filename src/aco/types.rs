//! Problem definition and per-round outputs.

use super::matrix::{CostMatrix, HeuristicMatrix, PheromoneMatrix};
use crate::error::ProblemError;

/// Ordered node sequence from start to end.
pub type Path = Vec<usize>;

/// A start-to-end path problem over a fixed cost matrix.
///
/// The heuristic matrix is derived once here and never changes.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::{CostMatrix, PathProblem};
///
/// let costs = CostMatrix::from_rows(&[
///     [0.0, 2.0, 9.0],
///     [2.0, 0.0, 3.0],
///     [9.0, 3.0, 0.0],
/// ]).unwrap();
/// let problem = PathProblem::new(costs, 0, 2)
///     .unwrap()
///     .with_labels(["A", "B", "C"])
///     .unwrap();
/// assert_eq!(problem.format_path(&vec![0, 1, 2]), "A -> B -> C");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathProblem {
    costs: CostMatrix,
    heuristic: HeuristicMatrix,
    start: usize,
    end: usize,
    labels: Vec<String>,
}

impl PathProblem {
    /// Creates a problem. `start` and `end` must be distinct unless the
    /// graph has a single node.
    pub fn new(costs: CostMatrix, start: usize, end: usize) -> Result<Self, ProblemError> {
        let size = costs.size();
        for node in [start, end] {
            if node >= size {
                return Err(ProblemError::NodeOutOfRange { node, size });
            }
        }
        if start == end && size > 1 {
            return Err(ProblemError::StartIsEnd { node: start });
        }

        let heuristic = HeuristicMatrix::from_costs(&costs);
        Ok(Self {
            costs,
            heuristic,
            start,
            end,
            labels: Vec::new(),
        })
    }

    /// Attaches one display label per node.
    pub fn with_labels<I, S>(mut self, labels: I) -> Result<Self, ProblemError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.size() {
            return Err(ProblemError::LabelCount {
                expected: self.size(),
                found: labels.len(),
            });
        }
        self.labels = labels;
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.costs.size()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    pub fn heuristic(&self) -> &HeuristicMatrix {
        &self.heuristic
    }

    /// Label of `node`, or its index when no labels were given.
    pub fn label(&self, node: usize) -> String {
        self.labels
            .get(node)
            .cloned()
            .unwrap_or_else(|| node.to_string())
    }

    /// Renders a path as `A -> B -> C`.
    pub fn format_path(&self, path: &Path) -> String {
        path.iter()
            .map(|&n| self.label(n))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// One ant's path and its total cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntTour {
    pub path: Path,
    pub cost: f64,
}

/// Outcome of one round: every tour built against the same pheromone
/// snapshot, and the matrix after the round's single update.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    /// Zero-based round index.
    pub round: usize,
    pub tours: Vec<AntTour>,
    pub pheromone: PheromoneMatrix,
}

impl RoundReport {
    /// Lowest-cost tour in this round.
    pub fn best_tour(&self) -> Option<&AntTour> {
        self.tours
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
    }
}
