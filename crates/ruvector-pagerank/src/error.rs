//! Error types for the PageRank crate.
//!
//! Every stage of the pipeline fails fast with a [`RankError`]. Structural
//! problems with the input (empty graph, out-of-range edge endpoints,
//! non-square matrices) are grouped under [`ShapeError`] and convert into
//! [`RankError::Shape`] via `From`. All errors implement `std::error::Error`
//! via `thiserror`.

/// Primary error type for ranking operations.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// The graph or matrix has the wrong shape, or an index is out of range.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// A configuration parameter is outside its valid range.
    #[error("invalid configuration: {name} = {value} (expected {expected})")]
    Config {
        /// Name of the parameter.
        name: String,
        /// The rejected value, formatted for display.
        value: String,
        /// Human-readable description of the valid range.
        expected: String,
    },

    /// A postcondition of matrix construction does not hold.
    ///
    /// Always indicates a logic defect rather than bad input.
    #[error("invariant violated in {stage} matrix: {detail}")]
    Invariant {
        /// Which construction stage produced the bad matrix.
        stage: &'static str,
        /// Human-readable explanation.
        detail: String,
    },

    /// Power iteration exhausted its iteration cap.
    #[error(
        "power iteration did not converge after {iterations} iterations (relative change={relative_change:.2e}, tol={tolerance:.2e})"
    )]
    NonConvergence {
        /// Number of iterations completed before the cap was hit.
        iterations: usize,
        /// Relative change of the last iterate.
        relative_change: f64,
        /// Target tolerance that was not reached.
        tolerance: f64,
    },

    /// The stopping criterion fired but the iterate is not a fixed point.
    #[error(
        "power iteration stopped after {iterations} iterations without reaching a stationary distribution (max deviation {deviation:.2e} at node {node})"
    )]
    NotStationary {
        /// Iterations performed.
        iterations: usize,
        /// Node with the largest deviation between `M^T d` and `d`.
        node: usize,
        /// Absolute deviation at that node.
        deviation: f64,
    },

    /// The iterate became NaN or infinite.
    #[error("numerical instability at iteration {iteration}: {detail}")]
    NumericalInstability {
        /// Iteration at which the instability was detected.
        iteration: usize,
        /// Human-readable explanation.
        detail: String,
    },

    /// The eigendecomposition produced no eigenvalue numerically equal to 1.
    #[error("no eigenvalue within {tolerance:.1e} of 1 (closest is {closest_distance:.3e} away)")]
    NoStationaryEigenvalue {
        /// Closeness tolerance that was applied.
        tolerance: f64,
        /// Distance from 1 of the closest eigenvalue found.
        closest_distance: f64,
    },

    /// The linear-algebra backend failed or returned an unusable result.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Structural errors detected before any numerical work begins.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// The graph has no nodes.
    #[error("graph must contain at least one node")]
    EmptyGraph,

    /// The matrix is not square.
    #[error("matrix must be square: got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// An edge endpoint lies outside `[0, n)`.
    #[error("edge #{edge} endpoint {index} out of bounds for {n} nodes")]
    IndexOutOfBounds {
        /// Position of the offending edge in the edge list.
        edge: usize,
        /// The offending node index.
        index: usize,
        /// Number of nodes in the graph.
        n: usize,
    },

    /// Lengths that must agree do not.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Coarse classification of a [`RankError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed dimensions or out-of-range indices.
    Shape,
    /// Invalid damping factor, tolerance, or iteration cap.
    Config,
    /// Row-sum postcondition violated after construction.
    Invariant,
    /// Power iteration failed to reach a fixed point.
    Convergence,
    /// No eigenvalue near 1.
    NoStationaryEigenvalue,
    /// Linear-algebra backend failure.
    Backend,
}

impl RankError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RankError::Shape(_) => ErrorKind::Shape,
            RankError::Config { .. } => ErrorKind::Config,
            RankError::Invariant { .. } => ErrorKind::Invariant,
            RankError::NonConvergence { .. }
            | RankError::NotStationary { .. }
            | RankError::NumericalInstability { .. } => ErrorKind::Convergence,
            RankError::NoStationaryEigenvalue { .. } => ErrorKind::NoStationaryEigenvalue,
            RankError::Backend(_) => ErrorKind::Backend,
        }
    }

    /// Shorthand for building a [`RankError::Config`].
    pub(crate) fn config(
        name: impl Into<String>,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        RankError::Config {
            name: name.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

/// Result type for ranking operations.
pub type Result<T> = std::result::Result<T, RankError>;
