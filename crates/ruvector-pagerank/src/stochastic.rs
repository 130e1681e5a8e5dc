//! Stochastic transition model and the Google matrix.
//!
//! Construction runs in three stages, each producing a new matrix:
//!
//! ```text
//! normalized[i][j] = A[i][j] / out_degree[i]        (out_degree[i] > 0)
//!                  = 0                              (dangling rows)
//! stochastic[i][j] = normalized[i][j] + 1/n         (dangling rows only)
//! google[i][j]     = alpha * stochastic[i][j] + (1 - alpha) / n
//! ```
//!
//! Dangling rows bypass normalization entirely; they are never divided by a
//! substituted degree. Both the stochastic and the Google matrix are checked
//! to be row-stochastic before they are returned, and a failure there is a
//! [`RankError::Invariant`](crate::error::RankError::Invariant).

use tracing::{debug, instrument};

use crate::adjacency::AdjacencyModel;
use crate::error::Result;
use crate::types::DenseMatrix;
use crate::validation::{check_stochastic, validate_damping, validate_tolerance, ROW_SUM_TOLERANCE};

/// Default damping factor (probability of following a link).
pub const DEFAULT_DAMPING: f64 = 0.85;

// ---------------------------------------------------------------------------
// StochasticModel
// ---------------------------------------------------------------------------

/// The row-stochastic transition matrix and the Google matrix built from it.
#[derive(Debug, Clone)]
pub struct StochasticModel {
    transition: DenseMatrix,
    google: DenseMatrix,
    alpha: f64,
}

impl StochasticModel {
    /// Transition matrix after dangling-mass redistribution (no teleportation).
    #[inline]
    pub fn transition(&self) -> &DenseMatrix {
        &self.transition
    }

    /// The Google matrix.
    #[inline]
    pub fn google(&self) -> &DenseMatrix {
        &self.google
    }

    /// Damping factor used for the blend.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Take ownership of the Google matrix.
    pub fn into_google(self) -> DenseMatrix {
        self.google
    }
}

// ---------------------------------------------------------------------------
// GoogleMatrixBuilder
// ---------------------------------------------------------------------------

/// Builds a [`StochasticModel`] from an [`AdjacencyModel`].
///
/// # Example
///
/// ```rust
/// use ruvector_pagerank::adjacency::AdjacencyModel;
/// use ruvector_pagerank::stochastic::GoogleMatrixBuilder;
///
/// let adjacency = AdjacencyModel::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
/// let model = GoogleMatrixBuilder::new(0.85).build(&adjacency).unwrap();
/// for sum in model.google().row_sums() {
///     assert!((sum - 1.0).abs() < 1e-9);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GoogleMatrixBuilder {
    /// Damping factor in `(0, 1)`.
    pub alpha: f64,
    /// Absolute tolerance for the row-sum postcondition.
    pub row_sum_tolerance: f64,
}

impl Default for GoogleMatrixBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DAMPING)
    }
}

impl GoogleMatrixBuilder {
    /// Create a builder with damping factor `alpha`.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            row_sum_tolerance: ROW_SUM_TOLERANCE,
        }
    }

    /// Run all three construction stages and check the postconditions.
    ///
    /// # Errors
    ///
    /// - Config error if `alpha` is outside `(0, 1)` or the row-sum tolerance
    ///   is not positive.
    /// - Invariant error if either resulting matrix is not row-stochastic.
    #[instrument(skip(self, adjacency), fields(n = adjacency.n(), alpha = self.alpha))]
    pub fn build(&self, adjacency: &AdjacencyModel) -> Result<StochasticModel> {
        validate_damping(self.alpha)?;
        validate_tolerance("row_sum_tolerance", self.row_sum_tolerance)?;

        let normalized = row_normalize(adjacency);
        let transition = redistribute_dangling(&normalized, adjacency.dangling());
        check_stochastic(&transition, "stochastic", self.row_sum_tolerance)?;

        let google = blend_teleport(&transition, self.alpha);
        check_stochastic(&google, "google", self.row_sum_tolerance)?;

        debug!(dangling = adjacency.dangling().len(), "built google matrix");

        Ok(StochasticModel {
            transition,
            google,
            alpha: self.alpha,
        })
    }
}

// ---------------------------------------------------------------------------
// Construction stages
// ---------------------------------------------------------------------------

/// Divide each non-dangling row of the adjacency matrix by its out-degree.
///
/// Dangling rows are copied through as all zeros.
pub fn row_normalize(adjacency: &AdjacencyModel) -> DenseMatrix {
    let mut out = adjacency.matrix().clone();
    for (i, &deg) in adjacency.out_degree().iter().enumerate() {
        if deg == 0 {
            continue;
        }
        let inv = 1.0 / deg as f64;
        for v in out.row_mut(i) {
            *v *= inv;
        }
    }
    out
}

/// Add `1/n` to every entry of each dangling row.
pub fn redistribute_dangling(normalized: &DenseMatrix, dangling: &[usize]) -> DenseMatrix {
    let mut out = normalized.clone();
    let uniform = 1.0 / out.cols() as f64;
    for &i in dangling {
        for v in out.row_mut(i) {
            *v += uniform;
        }
    }
    out
}

/// Blend with uniform teleportation: `alpha * S + (1 - alpha) / n` entry-wise.
pub fn blend_teleport(stochastic: &DenseMatrix, alpha: f64) -> DenseMatrix {
    let teleport = (1.0 - alpha) / stochastic.cols() as f64;
    stochastic.map(|v| alpha * v + teleport)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
