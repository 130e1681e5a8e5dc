//! Input validation and construction postconditions.
//!
//! Input checks run eagerly before any numerical work so callers get a
//! [`ShapeError`] or [`RankError::Config`] instead of a confusing numerical
//! failure. [`check_stochastic`] is the postcondition run after each matrix
//! construction stage; a violation there is a [`RankError::Invariant`].
//!
//! # Limits
//!
//! | Parameter        | Valid range           |
//! |------------------|-----------------------|
//! | damping `alpha`  | `(0, 1)`              |
//! | tolerances       | finite, `> 0`         |
//! | `max_iterations` | `[1, MAX_ITERATIONS]` |

use crate::error::{RankError, Result, ShapeError};
use crate::traits::TransitionMatrix;

/// Absolute tolerance for the row-sum postcondition.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Upper bound on the power-iteration cap.
pub const MAX_ITERATIONS: usize = 10_000_000;

// ---------------------------------------------------------------------------
// Graph validation
// ---------------------------------------------------------------------------

/// Validate that `n` is non-zero and every edge endpoint is in `[0, n)`.
///
/// # Errors
///
/// Returns [`ShapeError::EmptyGraph`] or the first
/// [`ShapeError::IndexOutOfBounds`] found.
pub fn validate_edges(n: usize, edges: &[(usize, usize)]) -> std::result::Result<(), ShapeError> {
    if n == 0 {
        return Err(ShapeError::EmptyGraph);
    }
    for (edge, &(src, dst)) in edges.iter().enumerate() {
        for index in [src, dst] {
            if index >= n {
                return Err(ShapeError::IndexOutOfBounds { edge, index, n });
            }
        }
    }
    Ok(())
}

/// Validate that `matrix` is square and non-empty.
///
/// # Errors
///
/// Returns [`ShapeError::NotSquare`] or [`ShapeError::EmptyGraph`].
pub fn validate_square(matrix: &dyn TransitionMatrix) -> std::result::Result<(), ShapeError> {
    if matrix.rows() != matrix.cols() {
        return Err(ShapeError::NotSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    if matrix.rows() == 0 {
        return Err(ShapeError::EmptyGraph);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parameter validation
// ---------------------------------------------------------------------------

/// Validate the damping factor: finite and strictly inside `(0, 1)`.
///
/// # Errors
///
/// Returns [`RankError::Config`] naming `alpha`.
pub fn validate_damping(alpha: f64) -> Result<()> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(RankError::config("alpha", alpha, "(0, 1)"));
    }
    Ok(())
}

/// Validate a closeness or convergence tolerance: finite and positive.
///
/// # Errors
///
/// Returns [`RankError::Config`] naming `name`.
pub fn validate_tolerance(name: &str, tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(RankError::config(
            name,
            format!("{tolerance:.2e}"),
            "finite positive value",
        ));
    }
    Ok(())
}

/// Validate power-iteration parameters.
///
/// # Errors
///
/// Returns [`RankError::Config`] if `tolerance` is not finite and positive or
/// `max_iterations` is outside `[1, MAX_ITERATIONS]`.
pub fn validate_params(tolerance: f64, max_iterations: usize) -> Result<()> {
    validate_tolerance("tolerance", tolerance)?;
    if max_iterations == 0 || max_iterations > MAX_ITERATIONS {
        return Err(RankError::config(
            "max_iterations",
            max_iterations,
            format!("[1, {MAX_ITERATIONS}]"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Construction postconditions
// ---------------------------------------------------------------------------

/// Check that `matrix` is row-stochastic: every entry is finite and in
/// `[0, 1]` (with `tolerance` slack) and every row sums to 1 within
/// `tolerance`.
///
/// # Errors
///
/// Returns [`RankError::Invariant`] tagged with `stage` describing the first
/// violation found.
pub fn check_stochastic(
    matrix: &dyn TransitionMatrix,
    stage: &'static str,
    tolerance: f64,
) -> Result<()> {
    for row in 0..matrix.rows() {
        for col in 0..matrix.cols() {
            let v = matrix.entry(row, col);
            if !v.is_finite() || v < -tolerance || v > 1.0 + tolerance {
                return Err(RankError::Invariant {
                    stage,
                    detail: format!("entry ({row}, {col}) = {v} is not a probability"),
                });
            }
        }

        let sum = matrix.row_sum(row);
        if (sum - 1.0).abs() > tolerance {
            return Err(RankError::Invariant {
                stage,
                detail: format!(
                    "row {row} sums to {sum:.12} (tolerance {tolerance:.1e})"
                ),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
