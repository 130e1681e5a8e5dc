//! Shared test helpers for the ruvector-pagerank integration test suite.
//!
//! Provides deterministic random graph generators and the small graphs whose
//! PageRank vectors are known in closed form.

#![allow(dead_code)]

use ruvector_pagerank::types::Graph;

// ---------------------------------------------------------------------------
// Random number generator (simple LCG for deterministic reproducibility)
// ---------------------------------------------------------------------------

/// A minimal linear congruential generator for deterministic test data.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Create a new LCG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next u64 value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Generate a uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

// ---------------------------------------------------------------------------
// Graph generators
// ---------------------------------------------------------------------------

/// Random directed graph on `n` nodes where each ordered pair is linked with
/// probability `density`. Self-loops are allowed; some nodes may dangle.
pub fn random_graph(n: usize, density: f64, seed: u64) -> Graph {
    let mut rng = Lcg::new(seed);
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if rng.next_f64() < density {
                edges.push((i, j));
            }
        }
    }
    Graph::unlabeled(n, edges)
}

/// Four strongly connected nodes: 0 -> {1, 2}, 1 -> 2, 2 -> {0, 3}, 3 -> 2.
pub fn kite() -> Graph {
    Graph::new(
        vec!["home".into(), "about".into(), "blog".into(), "contact".into()],
        vec![(0, 1), (0, 2), (1, 2), (2, 0), (2, 3), (3, 2)],
    )
}

/// PageRank of [`kite`] at `alpha = 0.85`: `[1429, 851, 2789, 1429] / 6498`.
pub const KITE_PAGERANK: [f64; 4] = [
    1429.0 / 6498.0,
    851.0 / 6498.0,
    2789.0 / 6498.0,
    1429.0 / 6498.0,
];

/// Cycle 0 -> 1 -> 2 -> 0 with an extra 2 -> 3 and node 3 dangling.
pub fn dangling_graph() -> Graph {
    Graph::unlabeled(4, vec![(0, 1), (1, 2), (2, 0), (2, 3)])
}

/// PageRank of [`dangling_graph`] at `alpha = 0.85`.
pub const DANGLING_PAGERANK: [f64; 4] = [
    1429.0 / 6685.0,
    1769.0 / 6685.0,
    294.0 / 955.0,
    1429.0 / 6685.0,
];

/// 0 -> 1, 1 -> {0, 1}. PageRank at `alpha = 0.85` is `[20, 37] / 57`.
pub fn two_node() -> Graph {
    Graph::unlabeled(2, vec![(0, 1), (1, 0), (1, 1)])
}

pub const TWO_NODE_PAGERANK: [f64; 2] = [20.0 / 57.0, 37.0 / 57.0];

// ---------------------------------------------------------------------------
// Vector utilities
// ---------------------------------------------------------------------------

/// Maximum absolute element-wise difference.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
