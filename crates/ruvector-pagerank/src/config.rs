//! Ranking configuration.

use serde::{Deserialize, Serialize};

use crate::budget::DEFAULT_MAX_ITERATIONS;
use crate::eigen::{EigenCrossValidator, DEFAULT_EIGEN_TOLERANCE};
use crate::error::Result;
use crate::power::{PowerIterationSolver, DEFAULT_TOLERANCE};
use crate::stochastic::{GoogleMatrixBuilder, DEFAULT_DAMPING};
use crate::validation::{validate_damping, validate_params, validate_tolerance};

/// Parameters of a full ranking run.
///
/// Missing fields take their defaults when deserialized, so a partial TOML
/// table is accepted.
///
/// # Example
///
/// ```rust
/// use ruvector_pagerank::config::RankConfig;
///
/// let config = RankConfig {
///     alpha: 0.9,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor in `(0, 1)`.
    ///
    /// Default: `0.85`.
    pub alpha: f64,

    /// Relative L2 change below which power iteration stops.
    ///
    /// Default: `1e-8`.
    pub tolerance: f64,

    /// Maximum `|lambda - 1|` for an eigenvalue to count as stationary.
    ///
    /// Default: `1e-8`.
    pub eigen_tolerance: f64,

    /// Power-iteration cap.
    ///
    /// Default: `10_000`.
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_DAMPING,
            tolerance: DEFAULT_TOLERANCE,
            eigen_tolerance: DEFAULT_EIGEN_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RankConfig {
    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Config`](crate::error::RankError::Config) naming
    /// the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.alpha)?;
        validate_params(self.tolerance, self.max_iterations)?;
        validate_tolerance("eigen_tolerance", self.eigen_tolerance)?;
        Ok(())
    }

    /// Google-matrix builder for this configuration.
    pub fn google_builder(&self) -> GoogleMatrixBuilder {
        GoogleMatrixBuilder::new(self.alpha)
    }

    /// Power-iteration solver for this configuration.
    pub fn power_solver(&self) -> PowerIterationSolver {
        PowerIterationSolver::new(self.tolerance, self.max_iterations)
    }

    /// Eigen cross-validator for this configuration.
    pub fn eigen_validator(&self) -> EigenCrossValidator {
        EigenCrossValidator::new(self.eigen_tolerance)
    }
}
