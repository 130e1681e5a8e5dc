//! Dense adjacency model.
//!
//! Turns a [`Graph`] into an `n x n` 0/1 adjacency matrix together with the
//! out-degree of every node and the set of dangling nodes (nodes without
//! outgoing edges). Duplicate edges collapse to a single 1 and self-loops are
//! kept.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::types::{DenseMatrix, Graph};
use crate::validation::validate_edges;

/// Adjacency matrix, out-degrees, and dangling set of a graph.
#[derive(Debug, Clone)]
pub struct AdjacencyModel {
    matrix: DenseMatrix,
    out_degree: Vec<usize>,
    dangling: Vec<usize>,
}

impl AdjacencyModel {
    /// Build the adjacency model of `graph`.
    ///
    /// # Errors
    ///
    /// Returns a shape error if the graph is empty or any edge endpoint is
    /// outside `[0, n)`.
    pub fn from_graph(graph: &Graph) -> Result<Self> {
        Self::from_edges(graph.n(), graph.edges())
    }

    /// Build the adjacency model of `n` nodes connected by `edges`.
    ///
    /// # Errors
    ///
    /// See [`from_graph`](Self::from_graph).
    #[instrument(skip(edges), fields(edge_count = edges.len()))]
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        validate_edges(n, edges)?;

        let mut matrix = DenseMatrix::zeros(n, n);
        for &(src, dst) in edges {
            matrix.set(src, dst, 1.0);
        }

        let out_degree: Vec<usize> = (0..n)
            .map(|i| matrix.row(i).iter().filter(|&&v| v != 0.0).count())
            .collect();
        let dangling: Vec<usize> = out_degree
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(i, _)| i)
            .collect();

        debug!(
            n,
            links = out_degree.iter().sum::<usize>(),
            dangling = dangling.len(),
            "built adjacency matrix"
        );

        Ok(Self {
            matrix,
            out_degree,
            dangling,
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn n(&self) -> usize {
        self.out_degree.len()
    }

    /// The 0/1 adjacency matrix.
    #[inline]
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    /// Out-degree of every node.
    #[inline]
    pub fn out_degree(&self) -> &[usize] {
        &self.out_degree
    }

    /// Indices of nodes with no outgoing edges, ascending.
    #[inline]
    pub fn dangling(&self) -> &[usize] {
        &self.dangling
    }

    /// `true` if `node` has no outgoing edges.
    pub fn is_dangling(&self, node: usize) -> bool {
        self.out_degree.get(node) == Some(&0)
    }

    /// Number of distinct links after duplicate collapse.
    pub fn link_count(&self) -> usize {
        self.out_degree.iter().sum()
    }
}
