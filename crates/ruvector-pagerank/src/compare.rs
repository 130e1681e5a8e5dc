//! Element-wise closeness checks between vectors.
//!
//! [`Closeness`] implements the usual mixed absolute/relative test
//! `|a - b| <= atol + rtol * |b|`. It is used both for the stationarity
//! self-check of power iteration and for comparing the two solvers' results.

use serde::{Deserialize, Serialize};

/// Default relative tolerance.
pub const DEFAULT_RTOL: f64 = 1e-5;

/// Default absolute tolerance.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Mixed absolute/relative closeness test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Closeness {
    /// Relative tolerance, scaled by `|b|`.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Default for Closeness {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }
}

impl Closeness {
    /// `true` if `|a - b| <= atol + rtol * |b|`.
    ///
    /// Not symmetric: `b` is the reference value.
    #[inline]
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }

    /// `true` if the slices have equal length and every pair is close.
    pub fn all_close(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.is_close(x, y))
    }

    /// Compare `candidate` against `reference` and summarise the result.
    pub fn compare(&self, candidate: &[f64], reference: &[f64]) -> Agreement {
        let (worst_index, max_abs_diff) = max_deviation(candidate, reference);
        Agreement {
            agree: self.all_close(candidate, reference),
            max_abs_diff,
            worst_index,
        }
    }
}

/// Outcome of comparing two distributions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    /// Every entry passed the closeness test.
    pub agree: bool,
    /// Largest absolute difference across entries.
    pub max_abs_diff: f64,
    /// Index where `max_abs_diff` occurs (`None` for empty inputs).
    pub worst_index: Option<usize>,
}

impl std::fmt::Display for Agreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.agree {
            write!(f, "agree")
        } else {
            write!(f, "do not agree")
        }
    }
}

/// Largest absolute element-wise difference and where it occurs.
///
/// Lengths are compared up to the shorter slice; a length mismatch yields an
/// infinite deviation.
pub fn max_deviation(a: &[f64], b: &[f64]) -> (Option<usize>, f64) {
    if a.len() != b.len() {
        return (None, f64::INFINITY);
    }
    let mut worst: (Option<usize>, f64) = (None, 0.0);
    for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
        let d = (x - y).abs();
        // NaN compares false; force it to the top.
        if d.is_nan() {
            return (Some(i), f64::NAN);
        }
        if worst.0.is_none() || d > worst.1 {
            worst = (Some(i), d);
        }
    }
    worst
}

/// Euclidean norm.
#[inline]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// `||next - prev|| / ||prev||` in the L2 norm.
#[inline]
pub fn relative_change(next: &[f64], prev: &[f64]) -> f64 {
    let diff: f64 = next
        .iter()
        .zip(prev)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt();
    diff / l2_norm(prev)
}
