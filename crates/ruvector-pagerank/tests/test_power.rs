//! Integration tests for power iteration over Google matrices.

mod helpers;

use approx::assert_relative_eq;
use ruvector_pagerank::adjacency::AdjacencyModel;
use ruvector_pagerank::error::{ErrorKind, RankError};
use ruvector_pagerank::power::{compute_pagerank, PowerIterationSolver};
use ruvector_pagerank::stochastic::GoogleMatrixBuilder;
use ruvector_pagerank::traits::TransitionMatrix;
use ruvector_pagerank::types::{DenseMatrix, Graph};

use helpers::{
    dangling_graph, kite, max_abs_diff, random_graph, two_node, DANGLING_PAGERANK, KITE_PAGERANK,
    TWO_NODE_PAGERANK,
};

fn google(graph: &Graph) -> DenseMatrix {
    let adjacency = AdjacencyModel::from_graph(graph).unwrap();
    GoogleMatrixBuilder::new(0.85)
        .build(&adjacency)
        .unwrap()
        .into_google()
}

// ---------------------------------------------------------------------------
// Closed-form graphs
// ---------------------------------------------------------------------------

#[test]
fn test_power_kite_closed_form() {
    let d = compute_pagerank(&google(&kite()), 1e-8).unwrap();
    for (got, want) in d.as_slice().iter().zip(KITE_PAGERANK) {
        assert_relative_eq!(*got, want, epsilon = 1e-7);
    }
}

#[test]
fn test_power_dangling_closed_form() {
    let d = compute_pagerank(&google(&dangling_graph()), 1e-8).unwrap();
    let err = max_abs_diff(d.as_slice(), &DANGLING_PAGERANK);
    assert!(err < 1e-7, "max deviation from closed form: {err}");
}

#[test]
fn test_power_two_node_closed_form() {
    let d = compute_pagerank(&google(&two_node()), 1e-10).unwrap();
    assert_relative_eq!(d.get(0), TWO_NODE_PAGERANK[0], epsilon = 1e-9);
    assert_relative_eq!(d.get(1), TWO_NODE_PAGERANK[1], epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Degenerate sizes
// ---------------------------------------------------------------------------

#[test]
fn test_power_single_node_self_loop() {
    let result = PowerIterationSolver::default()
        .run(&google(&Graph::unlabeled(1, vec![(0, 0)])))
        .unwrap();
    assert_eq!(result.iterations, 1);
    assert_relative_eq!(result.distribution.get(0), 1.0, epsilon = 1e-15);
}

#[test]
fn test_power_single_node_isolated() {
    let result = PowerIterationSolver::default()
        .run(&google(&Graph::unlabeled(1, vec![])))
        .unwrap();
    assert_eq!(result.iterations, 1);
    assert_relative_eq!(result.distribution.get(0), 1.0, epsilon = 1e-15);
}

#[test]
fn test_power_all_dangling_is_uniform() {
    let result = PowerIterationSolver::default()
        .run(&google(&Graph::unlabeled(5, vec![])))
        .unwrap();
    for &p in result.distribution.as_slice() {
        assert_relative_eq!(p, 0.2, epsilon = 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Random graphs
// ---------------------------------------------------------------------------

#[test]
fn test_power_random_graphs_are_stationary() {
    for seed in 0..8u64 {
        let g = google(&random_graph(12, 0.2, seed));
        let result = PowerIterationSolver::default().run(&g).unwrap();
        let d = result.distribution.as_slice();

        assert!(d.iter().all(|&p| p >= 0.0), "seed {seed}: negative entry");
        assert_relative_eq!(result.distribution.sum(), 1.0, epsilon = 1e-9);

        let mut image = vec![0.0; d.len()];
        g.left_multiply(d, &mut image);
        let err = max_abs_diff(&image, d);
        assert!(err < 1e-8, "seed {seed}: not stationary, deviation {err}");
    }
}

#[test]
fn test_power_history_is_recorded() {
    let result = PowerIterationSolver::default().run(&google(&kite())).unwrap();
    assert_eq!(result.convergence_history.len(), result.iterations);
    let last = result.convergence_history.last().unwrap();
    assert!(last.relative_change < 1e-8);
    assert_eq!(last.relative_change, result.residual);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_power_cap_reports_non_convergence() {
    let err = PowerIterationSolver::new(1e-12, 2)
        .run(&google(&kite()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Convergence);
    assert!(matches!(err, RankError::NonConvergence { iterations: 2, .. }));
}

#[test]
fn test_power_non_square() {
    let m = DenseMatrix::zeros(3, 4);
    let err = compute_pagerank(&m, 1e-8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
}
