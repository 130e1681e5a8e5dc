//! Dense PageRank with an eigendecomposition cross-check.
//!
//! This crate ranks the nodes of a small directed graph by the stationary
//! distribution of its Google matrix, computed twice: once by power iteration
//! and once from the eigenvector of `G^T` for eigenvalue 1. The two results
//! are compared element-wise.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Adjacency | [`adjacency`] | 0/1 matrix, out-degrees, dangling set |
//! | Stochastic | [`stochastic`] | transition and Google matrices |
//! | Power iteration | [`power`] | stationary distribution |
//! | Cross-check | [`eigen`] | eigenvector distribution and agreement |
//!
//! [`pipeline::rank_graph`] runs every stage with one [`RankConfig`].
//!
//! # Example
//!
//! ```rust
//! use ruvector_pagerank::{rank_graph, Graph, RankConfig};
//!
//! let graph = Graph::new(
//!     vec!["home".into(), "about".into(), "blog".into()],
//!     vec![(0, 1), (0, 2), (1, 2), (2, 0)],
//! );
//! let report = rank_graph(&graph, &RankConfig::default()).unwrap();
//!
//! assert!(report.agreement.agree);
//! assert!((report.power.distribution.sum() - 1.0).abs() < 1e-9);
//! ```

pub mod adjacency;
pub mod budget;
pub mod compare;
pub mod config;
pub mod eigen;
pub mod error;
pub mod pipeline;
pub mod power;
pub mod stochastic;
pub mod traits;
pub mod types;
pub mod validation;

pub use adjacency::AdjacencyModel;
pub use compare::{Agreement, Closeness};
pub use config::RankConfig;
pub use eigen::{CrossValidation, EigenAnalysis, EigenCrossValidator};
pub use error::{ErrorKind, RankError, ShapeError};
pub use pipeline::{rank_graph, summarize, GraphSummary, RankReport, RankedNode};
pub use power::{compute_pagerank, PowerIterationSolver};
pub use stochastic::{GoogleMatrixBuilder, StochasticModel};
pub use traits::{StationarySolver, TransitionMatrix};
pub use types::{ConvergenceInfo, DenseMatrix, Distribution, Graph, Method, StationaryResult};
