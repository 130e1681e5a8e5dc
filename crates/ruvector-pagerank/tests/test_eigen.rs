//! Integration tests for the eigendecomposition cross-check.

mod helpers;

use approx::assert_relative_eq;
use ruvector_pagerank::adjacency::AdjacencyModel;
use ruvector_pagerank::compare::Closeness;
use ruvector_pagerank::eigen::EigenCrossValidator;
use ruvector_pagerank::error::{ErrorKind, RankError};
use ruvector_pagerank::power::PowerIterationSolver;
use ruvector_pagerank::stochastic::GoogleMatrixBuilder;
use ruvector_pagerank::types::{DenseMatrix, Distribution, Graph};

use helpers::{dangling_graph, kite, max_abs_diff, random_graph, DANGLING_PAGERANK, KITE_PAGERANK};

fn google(graph: &Graph) -> DenseMatrix {
    let adjacency = AdjacencyModel::from_graph(graph).unwrap();
    GoogleMatrixBuilder::default()
        .build(&adjacency)
        .unwrap()
        .into_google()
}

#[test]
fn test_eigen_kite_closed_form() {
    let analysis = EigenCrossValidator::default().analyze(&google(&kite())).unwrap();
    assert_eq!(analysis.eigenvalues.len(), 4);
    assert_eq!(analysis.candidate_count(), 1);
    let err = max_abs_diff(analysis.distribution.as_slice(), &KITE_PAGERANK);
    assert!(err < 1e-10, "max deviation from closed form: {err}");
}

#[test]
fn test_eigen_dangling_closed_form() {
    let analysis = EigenCrossValidator::default()
        .analyze(&google(&dangling_graph()))
        .unwrap();
    let err = max_abs_diff(analysis.distribution.as_slice(), &DANGLING_PAGERANK);
    assert!(err < 1e-10, "max deviation from closed form: {err}");
}

#[test]
fn test_eigen_agrees_with_power_on_random_graphs() {
    for seed in 100..106u64 {
        let g = google(&random_graph(10, 0.3, seed));
        let power = PowerIterationSolver::default().run(&g).unwrap();
        let cv = EigenCrossValidator::default()
            .cross_validate(&g, &power.distribution)
            .unwrap();
        assert!(
            cv.agreement.agree,
            "seed {seed}: max deviation {}",
            cv.agreement.max_abs_diff
        );
        assert_relative_eq!(cv.analysis.distribution.sum(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_eigen_google_spectrum_inside_damped_disc() {
    // Every eigenvalue of G other than 1 has modulus at most alpha.
    let analysis = EigenCrossValidator::default().analyze(&google(&kite())).unwrap();
    for (i, lambda) in analysis.eigenvalues.iter().enumerate() {
        if i != analysis.selected {
            assert!(lambda.norm() <= 0.85 + 1e-9, "eigenvalue {lambda} too large");
        }
    }
}

#[test]
fn test_eigen_tight_closeness_can_disagree() {
    // Closed form rounded to six decimals.
    let rounded = Distribution::from_vec(
        KITE_PAGERANK
            .iter()
            .map(|p| (p * 1e6).round() / 1e6)
            .collect(),
    );
    let strict = Closeness {
        rtol: 0.0,
        atol: 1e-12,
    };
    let g = google(&kite());
    let cv = EigenCrossValidator::default()
        .with_closeness(strict)
        .cross_validate(&g, &rounded)
        .unwrap();
    assert!(!cv.agreement.agree);
    assert!(cv.agreement.worst_index.is_some());

    let cv = EigenCrossValidator::default().cross_validate(&g, &rounded).unwrap();
    assert!(cv.agreement.agree, "default tolerances absorb rounding");
}

#[test]
fn test_eigen_rotation_has_no_unit_eigenvalue() {
    // Scaled quarter rotation: eigenvalues +-0.5i.
    let m = DenseMatrix::from_rows(&[vec![0.0, -0.5], vec![0.5, 0.0]]).unwrap();
    let err = EigenCrossValidator::default().analyze(&m).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoStationaryEigenvalue);
    match err {
        RankError::NoStationaryEigenvalue {
            closest_distance, ..
        } => assert_relative_eq!(closest_distance, 1.25f64.sqrt(), epsilon = 1e-9),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_eigen_rejects_bad_tolerance() {
    let err = EigenCrossValidator::new(0.0)
        .cross_validate(&google(&kite()), &Distribution::uniform(4))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
