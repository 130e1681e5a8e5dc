//! Core types for the ranking pipeline.
//!
//! Provides the input [`Graph`], the row-major [`DenseMatrix`] every stage
//! produces, the [`Distribution`] both solvers return, and result types for
//! convergence tracking.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::traits::TransitionMatrix;

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A directed graph as supplied by a loader.
///
/// Node `i` is labelled `labels[i]`; the node count is the number of labels.
/// Edges are `(source, destination)` pairs and are not validated here;
/// [`AdjacencyModel`](crate::adjacency::AdjacencyModel) rejects out-of-range
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<String>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Create a graph from node labels and directed edges.
    pub fn new(labels: Vec<String>, edges: Vec<(usize, usize)>) -> Self {
        Self { labels, edges }
    }

    /// Create a graph with `n` nodes labelled `"0"` through `"n-1"`.
    pub fn unlabeled(n: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            labels: (0..n).map(|i| i.to_string()).collect(),
            edges,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn n(&self) -> usize {
        self.labels.len()
    }

    /// Directed edges in input order.
    #[inline]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Node labels in index order.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of node `index`, if it exists.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// DenseMatrix
// ---------------------------------------------------------------------------

/// Dense row-major matrix of `f64`.
///
/// Entry `(r, c)` lives at `data[r * cols + c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// A `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// A `rows x cols` matrix with every entry set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DimensionMismatch`] if `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ShapeError> {
        if data.len() != rows * cols {
            return Err(ShapeError::DimensionMismatch(format!(
                "buffer of length {} cannot hold a {}x{} matrix",
                data.len(),
                rows,
                cols,
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DimensionMismatch`] if the rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ShapeError::DimensionMismatch(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    cols,
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_row_major(rows.len(), cols, data)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `true` if `rows == cols`.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) out of bounds");
        self.data[row * self.cols + col]
    }

    /// Overwrite the entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Slice of row `row`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Mutable slice of row `row`.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Sum of every row.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows).map(|r| self.row(r).iter().sum()).collect()
    }

    /// Apply `f` to every entry, producing a new matrix.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> DenseMatrix {
        DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Flat row-major view of the entries.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl TransitionMatrix for DenseMatrix {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn entry(&self, row: usize, col: usize) -> f64 {
        self.get(row, col)
    }

    fn row_sum(&self, row: usize) -> f64 {
        self.row(row).iter().sum()
    }

    fn left_multiply(&self, x: &[f64], y: &mut [f64]) {
        debug_assert!(x.len() >= self.rows, "left_multiply: x.len()={} < rows={}", x.len(), self.rows);
        debug_assert!(y.len() >= self.cols, "left_multiply: y.len()={} < cols={}", y.len(), self.cols);

        y[..self.cols].fill(0.0);
        for (i, &xi) in x.iter().take(self.rows).enumerate() {
            if xi == 0.0 {
                continue;
            }
            for (yj, &m) in y.iter_mut().zip(self.row(i)) {
                *yj += xi * m;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// A probability distribution over the nodes of a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(Vec<f64>);

impl Distribution {
    /// Uniform `1/n` over `n` nodes.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// Wrap raw probabilities. No normalisation is applied.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if the distribution covers no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Probability of node `index` (0.0 if out of range).
    pub fn get(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    /// Total mass.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// The `k` most probable nodes as `(index, probability)`, descending.
    ///
    /// Ties are broken by ascending node index.
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        let mut indexed: Vec<(usize, f64)> = self.0.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed.truncate(k);
        indexed
    }

    /// Borrow the probabilities.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Unwrap into the raw probabilities.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for Distribution {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Solver result types
// ---------------------------------------------------------------------------

/// Method that produced a stationary distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Repeated left-multiplication from the uniform distribution.
    PowerIteration,
    /// Null vector of `G^T - I` from a dense eigendecomposition.
    Eigendecomposition,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::PowerIteration => write!(f, "power-iteration"),
            Method::Eigendecomposition => write!(f, "eigendecomposition"),
        }
    }
}

/// Per-iteration convergence snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceInfo {
    /// Iteration index (0-based).
    pub iteration: usize,
    /// `||d_{k+1} - d_k|| / ||d_k||` at this iteration.
    pub relative_change: f64,
}

/// Result returned by a successful stationary-distribution solve.
#[derive(Debug, Clone)]
pub struct StationaryResult {
    /// The stationary distribution.
    pub distribution: Distribution,
    /// Iterations performed (0 for direct methods).
    pub iterations: usize,
    /// Final relative change (power iteration) or `|lambda - 1|` (eigen).
    pub residual: f64,
    /// Wall-clock time taken.
    pub wall_time: Duration,
    /// Per-iteration convergence history (empty for direct methods).
    pub convergence_history: Vec<ConvergenceInfo>,
    /// Method used.
    pub method: Method,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged() {
        let err = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, ShapeError::DimensionMismatch(_)));
    }

    #[test]
    fn from_row_major_checks_length() {
        assert!(DenseMatrix::from_row_major(2, 2, vec![0.0; 3]).is_err());
        let m = DenseMatrix::from_row_major(2, 3, (0..6).map(f64::from).collect()).unwrap();
        assert_eq!(m.get(1, 2), 5.0);
        assert!(!m.is_square());
    }

    #[test]
    fn left_multiply_matches_row_combination() {
        // [0.5 0.3] * [[0, 1], [0.5, 0.5]] = [0.15, 0.65]
        let m = DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![0.5, 0.5]]).unwrap();
        let mut y = vec![9.0; 2];
        m.left_multiply(&[0.5, 0.3], &mut y);
        assert!((y[0] - 0.15).abs() < 1e-12);
        assert!((y[1] - 0.65).abs() < 1e-12);
    }

    #[test]
    fn row_sums() {
        let m = DenseMatrix::from_rows(&[vec![0.25, 0.75], vec![1.0, 2.0]]).unwrap();
        assert_eq!(m.row_sums(), vec![1.0, 3.0]);
        assert_eq!(TransitionMatrix::row_sum(&m, 1), 3.0);
    }

    #[test]
    fn top_k_orders_descending_with_index_ties() {
        let d = Distribution::from_vec(vec![0.2, 0.4, 0.2, 0.2]);
        assert_eq!(d.top_k(3), vec![(1, 0.4), (0, 0.2), (2, 0.2)]);
        assert_eq!(d.top_k(10).len(), 4);
    }

    #[test]
    fn uniform_sums_to_one() {
        let d = Distribution::uniform(7);
        assert!((d.sum() - 1.0).abs() < 1e-12);
        assert_eq!(d.get(100), 0.0);
    }

    #[test]
    fn unlabeled_graph_labels_are_indices() {
        let g = Graph::unlabeled(3, vec![(0, 1)]);
        assert_eq!(g.n(), 3);
        assert_eq!(g.label(2), Some("2"));
        assert_eq!(g.label(3), None);
    }
}
