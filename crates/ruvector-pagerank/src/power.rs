//! Power-iteration solver for the stationary distribution.
//!
//! Starting from the uniform distribution the solver repeatedly applies the
//! transition matrix from the left:
//!
//! ```text
//! d_0     = [1/n, ..., 1/n]
//! d_{k+1} = d_k^T M
//! stop when ||d_{k+1} - d_k||_2 / ||d_k||_2 < tolerance
//! ```
//!
//! # Termination
//!
//! The loop is bounded by an [`IterationBudget`]; running out of iterations
//! is a [`RankError::NonConvergence`] rather than a hang. A non-finite iterate
//! aborts with [`RankError::NumericalInstability`].
//!
//! # Stationarity check
//!
//! The stopping rule only measures progress between iterates, so once it
//! fires the solver applies `M` once more and requires `d^T M` to be close to
//! `d` under [`Closeness`]. Failing that check yields
//! [`RankError::NotStationary`].

use tracing::{debug, info, instrument, warn};

use crate::budget::{IterationBudget, DEFAULT_MAX_ITERATIONS};
use crate::compare::{max_deviation, relative_change, Closeness};
use crate::error::{RankError, Result};
use crate::traits::{StationarySolver, TransitionMatrix};
use crate::types::{ConvergenceInfo, Distribution, Method, StationaryResult};
use crate::validation::{validate_params, validate_square};

/// Default relative-change tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

// ---------------------------------------------------------------------------
// PowerIterationSolver
// ---------------------------------------------------------------------------

/// Power-iteration solver over any [`TransitionMatrix`].
///
/// # Example
///
/// ```rust
/// use ruvector_pagerank::power::PowerIterationSolver;
/// use ruvector_pagerank::types::DenseMatrix;
///
/// let m = DenseMatrix::from_rows(&[vec![0.1, 0.9], vec![0.6, 0.4]]).unwrap();
/// let result = PowerIterationSolver::default().run(&m).unwrap();
/// assert!((result.distribution.sum() - 1.0).abs() < 1e-9);
/// assert!((result.distribution.get(0) - 0.4).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PowerIterationSolver {
    /// Stop when the relative L2 change drops below this value.
    pub tolerance: f64,
    /// Upper bound on iterations.
    pub max_iterations: usize,
    /// Tolerances for the stationarity check.
    pub closeness: Closeness,
}

impl Default for PowerIterationSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

impl PowerIterationSolver {
    /// Create a solver.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Stop when `||d_{k+1} - d_k|| / ||d_k|| < tolerance`.
    /// * `max_iterations` - Upper bound on iterations.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            closeness: Closeness::default(),
        }
    }

    /// Override the stationarity-check tolerances.
    pub fn with_closeness(mut self, closeness: Closeness) -> Self {
        self.closeness = closeness;
        self
    }

    /// Run power iteration on `matrix`.
    ///
    /// # Errors
    ///
    /// - Shape error if `matrix` is not square or is empty.
    /// - Config error if the tolerance or iteration cap is invalid.
    /// - [`RankError::NonConvergence`] if the cap is exhausted.
    /// - [`RankError::NumericalInstability`] if an iterate is not finite.
    /// - [`RankError::NotStationary`] if the final iterate is not a fixed
    ///   point within the closeness tolerances.
    #[instrument(skip(self, matrix), fields(n = matrix.rows(), tolerance = self.tolerance))]
    pub fn run(&self, matrix: &dyn TransitionMatrix) -> Result<StationaryResult> {
        validate_square(matrix)?;
        validate_params(self.tolerance, self.max_iterations)?;

        let n = matrix.rows();
        let mut budget = IterationBudget::new(self.max_iterations, self.tolerance);

        let mut dist = Distribution::uniform(n).into_vec();
        let mut next = vec![0.0; n];
        let mut convergence_history = Vec::with_capacity(self.max_iterations.min(256));
        let mut change = f64::INFINITY;

        loop {
            budget.check_iteration(change)?;
            let k = budget.iterations_used() - 1;

            matrix.left_multiply(&dist, &mut next);
            if let Some(bad) = next.iter().position(|v| !v.is_finite()) {
                return Err(RankError::NumericalInstability {
                    iteration: k,
                    detail: format!("entry {bad} became {}", next[bad]),
                });
            }

            change = relative_change(&next, &dist);
            convergence_history.push(ConvergenceInfo {
                iteration: k,
                relative_change: change,
            });
            debug!(iteration = k, relative_change = change, "power iteration");

            std::mem::swap(&mut dist, &mut next);
            if change < self.tolerance {
                break;
            }
        }

        let iterations = budget.iterations_used();
        self.check_stationary(matrix, &dist, iterations)?;

        info!(iterations, relative_change = change, "converged");
        Ok(StationaryResult {
            distribution: Distribution::from_vec(dist),
            iterations,
            residual: change,
            wall_time: budget.elapsed(),
            convergence_history,
            method: Method::PowerIteration,
        })
    }

    /// Require `dist^T M` to be close to `dist`.
    fn check_stationary(
        &self,
        matrix: &dyn TransitionMatrix,
        dist: &[f64],
        iterations: usize,
    ) -> Result<()> {
        let mut image = vec![0.0; dist.len()];
        matrix.left_multiply(dist, &mut image);
        if self.closeness.all_close(&image, dist) {
            return Ok(());
        }

        let (node, deviation) = max_deviation(&image, dist);
        let node = node.unwrap_or(0);
        warn!(iterations, node, deviation, "stopping rule fired off a fixed point");
        Err(RankError::NotStationary {
            iterations,
            node,
            deviation,
        })
    }
}

impl StationarySolver for PowerIterationSolver {
    fn solve(&self, matrix: &dyn TransitionMatrix) -> Result<StationaryResult> {
        self.run(matrix)
    }

    fn method(&self) -> Method {
        Method::PowerIteration
    }
}

/// Stationary distribution of `matrix` by power iteration with the default
/// iteration cap.
///
/// # Errors
///
/// See [`PowerIterationSolver::run`].
pub fn compute_pagerank(matrix: &dyn TransitionMatrix, tolerance: f64) -> Result<Distribution> {
    PowerIterationSolver::new(tolerance, DEFAULT_MAX_ITERATIONS)
        .run(matrix)
        .map(|r| r.distribution)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
