//! Eigendecomposition cross-check of the stationary distribution.
//!
//! The stationary distribution is the eigenvector of `G^T` for eigenvalue 1.
//! This module recovers it independently of power iteration:
//!
//! 1. All eigenvalues of `G^T` come from a real Schur decomposition
//!    (`nalgebra::linalg::Schur`). `G^T` is not symmetric, so they are complex
//!    in general.
//! 2. Eigenvalues with `|lambda - 1| <= eigenvalue_tolerance` are candidates.
//!    With none, the solve fails with [`RankError::NoStationaryEigenvalue`].
//!    With several, the first is used and a warning is logged.
//! 3. The eigenvector is the right singular vector of `G^T - lambda I` for its
//!    smallest singular value, renormalized to sum to 1.
//!
//! [`EigenCrossValidator::cross_validate`] then compares the result against
//! a power-iteration distribution with [`Closeness`].

use std::time::Instant;

use nalgebra::linalg::{Schur, SVD};
use nalgebra::{Complex, DMatrix};
use tracing::{debug, info, instrument, warn};

use crate::compare::{Agreement, Closeness};
use crate::error::{RankError, Result, ShapeError};
use crate::traits::{StationarySolver, TransitionMatrix};
use crate::types::{Distribution, Method, StationaryResult};
use crate::validation::{validate_square, validate_tolerance};

/// Default `|lambda - 1|` tolerance for a stationary eigenvalue.
pub const DEFAULT_EIGEN_TOLERANCE: f64 = 1e-8;

/// Iteration cap handed to the Schur and SVD routines (0 means unbounded).
const DECOMPOSITION_MAX_ITERATIONS: usize = 0;

/// Eigenvector sums below this are treated as zero.
const MIN_EIGENVECTOR_SUM: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Spectrum of `G^T` and the stationary eigenvector extracted from it.
#[derive(Debug, Clone)]
pub struct EigenAnalysis {
    /// Every eigenvalue of `G^T`, in backend order.
    pub eigenvalues: Vec<Complex<f64>>,
    /// Indices into `eigenvalues` within tolerance of 1.
    pub candidates: Vec<usize>,
    /// Index of the candidate that was used.
    pub selected: usize,
    /// The eigenvalue that was used.
    pub eigenvalue: Complex<f64>,
    /// Eigenvector renormalized to sum to 1.
    pub distribution: Distribution,
    /// Smallest singular value of `G^T - lambda I`.
    pub null_residual: f64,
}

impl EigenAnalysis {
    /// Number of eigenvalues within tolerance of 1.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// `|lambda - 1|` for the selected eigenvalue.
    pub fn eigenvalue_distance(&self) -> f64 {
        (self.eigenvalue - Complex::new(1.0, 0.0)).norm()
    }
}

/// Eigen analysis together with its comparison against power iteration.
#[derive(Debug, Clone)]
pub struct CrossValidation {
    /// The eigen side of the comparison.
    pub analysis: EigenAnalysis,
    /// Element-wise comparison, eigen result against the power result.
    pub agreement: Agreement,
}

// ---------------------------------------------------------------------------
// EigenCrossValidator
// ---------------------------------------------------------------------------

/// Computes the stationary distribution from a dense eigendecomposition.
#[derive(Debug, Clone, Copy)]
pub struct EigenCrossValidator {
    /// Maximum `|lambda - 1|` for a stationary eigenvalue.
    pub eigenvalue_tolerance: f64,
    /// Tolerances for comparing against power iteration.
    pub closeness: Closeness,
}

impl Default for EigenCrossValidator {
    fn default() -> Self {
        Self::new(DEFAULT_EIGEN_TOLERANCE)
    }
}

impl EigenCrossValidator {
    /// Create a validator with the given eigenvalue tolerance.
    pub fn new(eigenvalue_tolerance: f64) -> Self {
        Self {
            eigenvalue_tolerance,
            closeness: Closeness::default(),
        }
    }

    /// Override the comparison tolerances.
    pub fn with_closeness(mut self, closeness: Closeness) -> Self {
        self.closeness = closeness;
        self
    }

    /// Decompose `matrix^T` and extract its stationary eigenvector.
    ///
    /// # Errors
    ///
    /// - Shape error if `matrix` is not square or is empty.
    /// - Config error if the eigenvalue tolerance is invalid.
    /// - [`RankError::NoStationaryEigenvalue`] if no eigenvalue is close to 1.
    /// - [`RankError::Backend`] if a decomposition fails or the eigenvector
    ///   sums to zero.
    #[instrument(skip(self, matrix), fields(n = matrix.rows()))]
    pub fn analyze(&self, matrix: &dyn TransitionMatrix) -> Result<EigenAnalysis> {
        validate_square(matrix)?;
        validate_tolerance("eigen_tolerance", self.eigenvalue_tolerance)?;

        let n = matrix.rows();
        let gt = DMatrix::from_fn(n, n, |r, c| matrix.entry(c, r));

        let schur = Schur::try_new(gt.clone(), f64::EPSILON, DECOMPOSITION_MAX_ITERATIONS)
            .ok_or_else(|| RankError::Backend("Schur decomposition did not converge".into()))?;
        let eigenvalues: Vec<Complex<f64>> = schur.complex_eigenvalues().iter().copied().collect();

        let one = Complex::new(1.0, 0.0);
        let distances: Vec<f64> = eigenvalues.iter().map(|&l| (l - one).norm()).collect();
        let candidates: Vec<usize> = distances
            .iter()
            .enumerate()
            .filter(|(_, &d)| d <= self.eigenvalue_tolerance)
            .map(|(i, _)| i)
            .collect();

        let Some(&selected) = candidates.first() else {
            let closest_distance = distances
                .iter()
                .copied()
                .min_by(f64::total_cmp)
                .unwrap_or(f64::INFINITY);
            warn!(closest_distance, "no eigenvalue near 1");
            return Err(RankError::NoStationaryEigenvalue {
                tolerance: self.eigenvalue_tolerance,
                closest_distance,
            });
        };
        if candidates.len() > 1 {
            warn!(
                candidates = candidates.len(),
                selected,
                "multiple eigenvalues near 1; using the first"
            );
        }

        let eigenvalue = eigenvalues[selected];
        let (distribution, null_residual) = null_vector(gt, eigenvalue.re)?;

        debug!(
            eigenvalue_re = eigenvalue.re,
            eigenvalue_im = eigenvalue.im,
            null_residual,
            "extracted stationary eigenvector"
        );

        Ok(EigenAnalysis {
            eigenvalues,
            candidates,
            selected,
            eigenvalue,
            distribution,
            null_residual,
        })
    }

    /// Run [`analyze`](Self::analyze) and compare the result against
    /// `reference`, typically the power-iteration distribution.
    ///
    /// # Errors
    ///
    /// Everything [`analyze`](Self::analyze) returns, plus a shape error if
    /// `reference` has the wrong length.
    pub fn cross_validate(
        &self,
        matrix: &dyn TransitionMatrix,
        reference: &Distribution,
    ) -> Result<CrossValidation> {
        if reference.len() != matrix.rows() {
            return Err(ShapeError::DimensionMismatch(format!(
                "reference distribution has {} entries, matrix has {} rows",
                reference.len(),
                matrix.rows()
            ))
            .into());
        }

        let analysis = self.analyze(matrix)?;
        let agreement = self
            .closeness
            .compare(analysis.distribution.as_slice(), reference.as_slice());

        if agreement.agree {
            info!(max_abs_diff = agreement.max_abs_diff, "power and eigen results agree");
        } else {
            warn!(
                max_abs_diff = agreement.max_abs_diff,
                worst_index = ?agreement.worst_index,
                "power and eigen results disagree"
            );
        }

        Ok(CrossValidation {
            analysis,
            agreement,
        })
    }
}

impl StationarySolver for EigenCrossValidator {
    fn solve(&self, matrix: &dyn TransitionMatrix) -> Result<StationaryResult> {
        let start = Instant::now();
        let analysis = self.analyze(matrix)?;
        let residual = analysis.eigenvalue_distance();
        Ok(StationaryResult {
            distribution: analysis.distribution,
            iterations: 0,
            residual,
            wall_time: start.elapsed(),
            convergence_history: Vec::new(),
            method: Method::Eigendecomposition,
        })
    }

    fn method(&self) -> Method {
        Method::Eigendecomposition
    }
}

/// Right singular vector of `gt - shift * I` for its smallest singular value,
/// scaled to sum to 1, and that singular value.
fn null_vector(mut gt: DMatrix<f64>, shift: f64) -> Result<(Distribution, f64)> {
    for i in 0..gt.nrows() {
        gt[(i, i)] -= shift;
    }

    let svd = SVD::try_new(gt, false, true, f64::EPSILON, DECOMPOSITION_MAX_ITERATIONS)
        .ok_or_else(|| RankError::Backend("SVD did not converge".into()))?;
    let v_t = svd
        .v_t
        .as_ref()
        .ok_or_else(|| RankError::Backend("SVD returned no right singular vectors".into()))?;

    let (row, &sigma) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .ok_or_else(|| RankError::Backend("SVD returned no singular values".into()))?;

    let vector: Vec<f64> = v_t.row(row).iter().copied().collect();
    let sum: f64 = vector.iter().sum();
    if !sum.is_finite() || sum.abs() < MIN_EIGENVECTOR_SUM {
        return Err(RankError::Backend(format!(
            "stationary eigenvector sums to {sum:.3e} and cannot be normalized"
        )));
    }

    Ok((
        Distribution::from_vec(vector.into_iter().map(|v| v / sum).collect()),
        sigma,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::DenseMatrix;

    fn two_state() -> DenseMatrix {
        // Stationary distribution [0.4, 0.6].
        DenseMatrix::from_rows(&[vec![0.1, 0.9], vec![0.6, 0.4]]).unwrap()
    }

    #[test]
    fn recovers_two_state_distribution() {
        let analysis = EigenCrossValidator::default().analyze(&two_state()).unwrap();
        let d = analysis.distribution.as_slice();
        assert!((d[0] - 0.4).abs() < 1e-10, "got {d:?}");
        assert!((d[1] - 0.6).abs() < 1e-10, "got {d:?}");
        assert_eq!(analysis.eigenvalues.len(), 2);
        assert_eq!(analysis.candidate_count(), 1);
        assert!(analysis.eigenvalue_distance() < 1e-8);
        assert!(analysis.null_residual < 1e-10);
    }

    #[test]
    fn identity_has_degenerate_unit_eigenvalue() {
        // Every eigenvalue is 1; the first match is used.
        let mut m = DenseMatrix::zeros(3, 3);
        for i in 0..3 {
            m.set(i, i, 1.0);
        }
        let analysis = EigenCrossValidator::default().analyze(&m).unwrap();
        assert_eq!(analysis.candidate_count(), 3);
        assert_eq!(analysis.selected, analysis.candidates[0]);
        assert!((analysis.distribution.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_unit_eigenvalue() {
        // Substochastic: eigenvalues 0.5 and 0.25.
        let m = DenseMatrix::from_rows(&[vec![0.5, 0.0], vec![0.0, 0.25]]).unwrap();
        match EigenCrossValidator::default().analyze(&m).unwrap_err() {
            RankError::NoStationaryEigenvalue {
                tolerance,
                closest_distance,
            } => {
                assert_eq!(tolerance, 1e-8);
                assert!((closest_distance - 0.5).abs() < 1e-12);
            }
            other => panic!("expected NoStationaryEigenvalue, got {other:?}"),
        }
    }

    #[test]
    fn non_square_rejected() {
        let err = EigenCrossValidator::default()
            .analyze(&DenseMatrix::zeros(3, 2))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn cross_validation_agrees_with_exact_answer() {
        let reference = Distribution::from_vec(vec![0.4, 0.6]);
        let cv = EigenCrossValidator::default()
            .cross_validate(&two_state(), &reference)
            .unwrap();
        assert!(cv.agreement.agree);
        assert!(cv.agreement.max_abs_diff < 1e-10);
    }

    #[test]
    fn cross_validation_flags_wrong_reference() {
        let reference = Distribution::from_vec(vec![0.5, 0.5]);
        let cv = EigenCrossValidator::default()
            .cross_validate(&two_state(), &reference)
            .unwrap();
        assert!(!cv.agreement.agree);
        assert!((cv.agreement.max_abs_diff - 0.1).abs() < 1e-9);
    }

    #[test]
    fn cross_validation_checks_reference_length() {
        let reference = Distribution::uniform(3);
        let err = EigenCrossValidator::default()
            .cross_validate(&two_state(), &reference)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn solver_trait_reports_direct_method() {
        let result = EigenCrossValidator::default().solve(&two_state()).unwrap();
        assert_eq!(result.method, Method::Eigendecomposition);
        assert_eq!(result.iterations, 0);
        assert!(result.convergence_history.is_empty());
    }
}
