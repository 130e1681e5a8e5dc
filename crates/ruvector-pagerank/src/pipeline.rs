//! End-to-end ranking pipeline.
//!
//! [`rank_graph`] chains every stage on a single graph:
//!
//! **adjacency -> stochastic -> power iteration -> eigen cross-check**
//!
//! Any stage failure aborts the run; no partial report is produced.

use serde::Serialize;
use tracing::{info, instrument};

use crate::adjacency::AdjacencyModel;
use crate::compare::Agreement;
use crate::config::RankConfig;
use crate::eigen::EigenAnalysis;
use crate::error::Result;
use crate::types::{Graph, StationaryResult};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Node index.
    pub index: usize,
    /// Node label.
    pub label: String,
    /// Stationary probability from power iteration.
    pub score: f64,
}

/// Everything produced by one [`rank_graph`] run.
#[derive(Debug, Clone)]
pub struct RankReport {
    /// Node labels in index order.
    pub labels: Vec<String>,
    /// Power-iteration result.
    pub power: StationaryResult,
    /// Eigendecomposition result.
    pub eigen: EigenAnalysis,
    /// Eigen distribution compared against the power distribution.
    pub agreement: Agreement,
    /// Indices of dangling nodes.
    pub dangling: Vec<usize>,
    /// Number of distinct links.
    pub link_count: usize,
    /// Configuration the run used.
    pub config: RankConfig,
}

impl RankReport {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// The `k` highest-ranked nodes by power-iteration probability.
    ///
    /// Ties are broken by ascending node index. `k` larger than the node
    /// count returns every node.
    pub fn top_k(&self, k: usize) -> Vec<RankedNode> {
        self.power
            .distribution
            .top_k(k)
            .into_iter()
            .enumerate()
            .map(|(pos, (index, score))| RankedNode {
                rank: pos + 1,
                index,
                label: self.labels[index].clone(),
                score,
            })
            .collect()
    }
}

/// Structural counts for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Number of nodes.
    pub nodes: usize,
    /// Edges as listed, duplicates included.
    pub edges: usize,
    /// Distinct links after duplicate collapse.
    pub links: usize,
    /// Nodes with no outgoing link.
    pub dangling: usize,
    /// Nodes linking to themselves.
    pub self_loops: usize,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Rank the nodes of `graph` and cross-check the result.
///
/// # Example
///
/// ```rust
/// use ruvector_pagerank::config::RankConfig;
/// use ruvector_pagerank::pipeline::rank_graph;
/// use ruvector_pagerank::types::Graph;
///
/// let graph = Graph::unlabeled(3, vec![(0, 1), (1, 2), (2, 0)]);
/// let report = rank_graph(&graph, &RankConfig::default()).unwrap();
/// assert!(report.agreement.agree);
/// assert_eq!(report.top_k(1).len(), 1);
/// ```
///
/// # Errors
///
/// Returns the first [`RankError`](crate::error::RankError) raised by
/// configuration validation or any stage.
#[instrument(skip(graph, config), fields(n = graph.n(), edges = graph.edges().len()))]
pub fn rank_graph(graph: &Graph, config: &RankConfig) -> Result<RankReport> {
    config.validate()?;

    let adjacency = AdjacencyModel::from_graph(graph)?;
    let model = config.google_builder().build(&adjacency)?;
    let google = model.google();

    let power = config.power_solver().run(google)?;
    let cross = config
        .eigen_validator()
        .cross_validate(google, &power.distribution)?;

    info!(
        iterations = power.iterations,
        candidates = cross.analysis.candidate_count(),
        agree = cross.agreement.agree,
        "ranking complete"
    );

    Ok(RankReport {
        labels: graph.labels().to_vec(),
        power,
        eigen: cross.analysis,
        agreement: cross.agreement,
        dangling: adjacency.dangling().to_vec(),
        link_count: adjacency.link_count(),
        config: *config,
    })
}

/// Count nodes, edges, links, dangling nodes and self-loops of `graph`.
///
/// # Errors
///
/// Shape error if the graph is empty or an edge is out of range.
pub fn summarize(graph: &Graph) -> Result<GraphSummary> {
    let adjacency = AdjacencyModel::from_graph(graph)?;
    let self_loops = (0..adjacency.n())
        .filter(|&i| adjacency.matrix().get(i, i) != 0.0)
        .count();
    Ok(GraphSummary {
        nodes: adjacency.n(),
        edges: graph.edges().len(),
        links: adjacency.link_count(),
        dangling: adjacency.dangling().len(),
        self_loops,
    })
}
