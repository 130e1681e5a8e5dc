//! Iteration budget for power iteration.
//!
//! [`IterationBudget`] turns a non-terminating power iteration into a
//! reported [`RankError::NonConvergence`]. The solver calls
//! [`check_iteration`](IterationBudget::check_iteration) at the top of each
//! loop body with the relative change observed so far.

use std::time::{Duration, Instant};

use crate::error::RankError;

/// Default cap on power-iteration steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Tracks iterations consumed against a cap.
///
/// Create one per solve. The wall-clock timer starts on construction and is
/// reported in results, never enforced.
#[derive(Debug)]
pub struct IterationBudget {
    start_time: Instant,
    max_iterations: usize,
    tolerance: f64,
    iterations_used: usize,
}

impl IterationBudget {
    /// Create a budget allowing `max_iterations` steps toward `tolerance`.
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            start_time: Instant::now(),
            max_iterations,
            tolerance,
            iterations_used: 0,
        }
    }

    /// Consume one iteration.
    ///
    /// `relative_change` is the change measured by the previous iteration and
    /// is only used to describe the failure.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::NonConvergence`] once the cap is exceeded.
    pub fn check_iteration(&mut self, relative_change: f64) -> Result<(), RankError> {
        if self.iterations_used >= self.max_iterations {
            return Err(RankError::NonConvergence {
                iterations: self.iterations_used,
                relative_change,
                tolerance: self.tolerance,
            });
        }
        self.iterations_used += 1;
        Ok(())
    }

    /// Iterations consumed so far.
    #[inline]
    pub fn iterations_used(&self) -> usize {
        self.iterations_used
    }

    /// Wall-clock time since the budget was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterations_within_budget() {
        let mut budget = IterationBudget::new(5, 1e-8);
        for _ in 0..5 {
            budget.check_iteration(1.0).unwrap();
        }
        assert_eq!(budget.iterations_used(), 5);
    }

    #[test]
    fn iteration_cap_exceeded() {
        let mut budget = IterationBudget::new(3, 1e-8);
        for _ in 0..3 {
            budget.check_iteration(0.5).unwrap();
        }
        match budget.check_iteration(0.25).unwrap_err() {
            RankError::NonConvergence {
                iterations,
                relative_change,
                tolerance,
            } => {
                assert_eq!(iterations, 3);
                assert_eq!(relative_change, 0.25);
                assert_eq!(tolerance, 1e-8);
            }
            other => panic!("expected NonConvergence, got {other:?}"),
        }
        // A failed check does not consume an iteration.
        assert_eq!(budget.iterations_used(), 3);
    }

    #[test]
    fn accessors() {
        let budget = IterationBudget::new(DEFAULT_MAX_ITERATIONS, 1e-6);
        assert_eq!(budget.iterations_used(), 0);
        let _ = budget.elapsed();
    }
}
