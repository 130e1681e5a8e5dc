//! Matrix and solver traits.
//!
//! Solvers never touch a concrete storage format: they see a
//! [`TransitionMatrix`] and return a [`StationaryResult`] through
//! [`StationarySolver`]. [`DenseMatrix`](crate::types::DenseMatrix) is the
//! only backing store shipped.

use crate::error::RankError;
use crate::types::{Method, StationaryResult};

/// A row-stochastic transition model.
///
/// Rows index the current state and columns the next state, so a
/// distribution `d` evolves as `d^T M`.
pub trait TransitionMatrix {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Entry at `(row, col)`.
    fn entry(&self, row: usize, col: usize) -> f64;

    /// Sum of the entries in `row`.
    fn row_sum(&self, row: usize) -> f64;

    /// Left multiplication `y = x^T M`, i.e. `y[j] = sum_i x[i] * M[i][j]`.
    ///
    /// `x` must have at least `rows()` entries and `y` at least `cols()`.
    fn left_multiply(&self, x: &[f64], y: &mut [f64]);
}

/// Core trait implemented by every stationary-distribution method.
pub trait StationarySolver {
    /// Compute the stationary distribution of `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`RankError`] on invalid input, non-convergence, or backend
    /// failure.
    fn solve(&self, matrix: &dyn TransitionMatrix) -> Result<StationaryResult, RankError>;

    /// Identifier of this method.
    fn method(&self) -> Method;
}
