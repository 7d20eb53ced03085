//! Square matrices for costs, heuristic desirability and pheromone trails.

use std::fmt;

use crate::error::MatrixError;

/// Dense `n x n` matrix of `f64`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates an `n x n` matrix filled with `value`.
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            data: vec![value; size * size],
        }
    }

    /// Creates an `n x n` zero matrix.
    pub fn zeros(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    /// Builds a matrix from rows, rejecting empty and non-square input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::Empty);
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self { size, data })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] = value;
    }

    /// Iterates over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.size.max(1))
    }

    pub fn fill_diagonal(&mut self, value: f64) {
        for i in 0..self.size {
            self.set(i, i, value);
        }
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Whether `m[i][j]` and `m[j][i]` agree within `tolerance` everywhere.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }

    /// Returns the first entry that is negative or not finite.
    fn find_invalid_entry(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|v| !v.is_finite() || *v < 0.0)
            .map(|idx| (idx / self.size, idx % self.size, self.data[idx]))
    }

    fn ensure_non_negative(&self) -> Result<(), MatrixError> {
        match self.find_invalid_entry() {
            Some((row, col, value)) => Err(MatrixError::InvalidEntry { row, col, value }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Matrix {
    /// Prints one row per line with four decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>9.4}")).collect();
            writeln!(f, "[{} ]", cells.join(""))?;
        }
        Ok(())
    }
}

/// Traversal cost between nodes. Fixed for a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMatrix(Matrix);

impl CostMatrix {
    /// Wraps a matrix of finite, non-negative costs.
    pub fn new(matrix: Matrix) -> Result<Self, MatrixError> {
        matrix.ensure_non_negative()?;
        Ok(Self(matrix))
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        Self::new(Matrix::from_rows(rows)?)
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.0.get(from, to)
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }
}

/// Static edge desirability, `1 / (cost + eps)` off the diagonal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicMatrix(Matrix);

impl HeuristicMatrix {
    /// Derives the heuristic from a cost matrix. The diagonal is zero.
    pub fn from_costs(costs: &CostMatrix) -> Self {
        let n = costs.size();
        let mut matrix = Matrix::zeros(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix.set(i, j, 1.0 / (costs.get(i, j) + f64::EPSILON));
                }
            }
        }
        Self(matrix)
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.0.get(from, to)
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }
}

/// Pheromone levels on edges. Non-negative with a zero diagonal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix(Matrix);

impl PheromoneMatrix {
    /// Wraps a non-negative matrix and zeroes its diagonal.
    pub fn new(mut matrix: Matrix) -> Result<Self, MatrixError> {
        matrix.ensure_non_negative()?;
        matrix.fill_diagonal(0.0);
        Ok(Self(matrix))
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        Self::new(Matrix::from_rows(rows)?)
    }

    /// All-zero trail: the first round falls back to uniform choices.
    pub fn zeros(size: usize) -> Self {
        Self(Matrix::zeros(size))
    }

    /// Every off-diagonal edge starts at `initial`.
    ///
    /// # Panics
    /// Panics if `initial` is negative or not finite.
    pub fn uniform(size: usize, initial: f64) -> Self {
        assert!(
            initial.is_finite() && initial >= 0.0,
            "initial pheromone must be finite and non-negative, got {initial}"
        );
        let mut matrix = Matrix::filled(size, initial);
        matrix.fill_diagonal(0.0);
        Self(matrix)
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.0.get(from, to)
    }

    /// Uniform multiplicative decay of every entry.
    pub fn evaporate(&mut self, rate: f64) {
        self.0.scale(1.0 - rate);
    }

    /// Adds `amount` to both directions of the edge `(u, v)`.
    pub fn deposit(&mut self, u: usize, v: usize, amount: f64) {
        let forward = self.0.get(u, v) + amount;
        self.0.set(u, v, forward);
        let backward = self.0.get(v, u) + amount;
        self.0.set(v, u, backward);
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.0.is_symmetric(tolerance)
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }
}

impl fmt::Display for PheromoneMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
