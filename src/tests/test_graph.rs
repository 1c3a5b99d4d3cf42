use approx::assert_abs_diff_eq;
use smartcore::linalg::basic::arrays::Array;

use crate::core::PointSet;
use crate::error::SpectralError;
use crate::graph::GraphFactory;
use crate::tests::{init_logs, triangle_points};

#[test]
fn test_triangle_weights_follow_kernel() {
    init_logs();
    let points = triangle_points();
    let adjacency = GraphFactory::weighted_adjacency(&points);

    // distances 4, 3, 5 give weights e^-2, e^-1.5, e^-2.5
    assert_abs_diff_eq!(*adjacency.get((0, 1)), (-2.0f64).exp(), epsilon = 1e-12);
    assert_abs_diff_eq!(*adjacency.get((0, 2)), (-1.5f64).exp(), epsilon = 1e-12);
    assert_abs_diff_eq!(*adjacency.get((1, 2)), (-2.5f64).exp(), epsilon = 1e-12);
}

#[test]
fn test_adjacency_symmetric_zero_diagonal_bounded() {
    let points = PointSet::new(vec![
        vec![0.3, 1.2, -0.5],
        vec![1.1, 0.0, 0.7],
        vec![-2.0, 0.4, 0.0],
        vec![0.9, 0.9, 0.9],
    ])
    .unwrap();
    let adjacency = GraphFactory::weighted_adjacency(&points);

    let n = points.len();
    for i in 0..n {
        assert_eq!(*adjacency.get((i, i)), 0.0);
        for j in 0..n {
            assert_abs_diff_eq!(
                *adjacency.get((i, j)),
                *adjacency.get((j, i)),
                epsilon = 1e-15
            );
            if i != j {
                let w = *adjacency.get((i, j));
                assert!(w > 0.0 && w <= 1.0, "W[{},{}] = {} out of (0,1]", i, j, w);
            }
        }
    }
}

#[test]
fn test_duplicate_points_weight_one() {
    let points =
        PointSet::new(vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![100.0, 100.0]]).unwrap();
    let adjacency = GraphFactory::weighted_adjacency(&points);

    // Zero distance gives the kernel maximum off-diagonal, diagonal stays forced.
    assert_abs_diff_eq!(*adjacency.get((0, 1)), 1.0, epsilon = 1e-15);
    assert_eq!(*adjacency.get((0, 0)), 0.0);

    let degree = GraphFactory::degree_from_adjacency(&adjacency);
    let d0 = *degree.get((0, 0));
    assert!(d0 >= 1.0, "duplicate-pair degree {} should be dominated by weight 1", d0);
    assert!(d0 < 1.0 + 1e-12, "far point contributes almost nothing, got {}", d0);
}

#[test]
fn test_degree_matrix_is_diagonal_row_sums() {
    let points = triangle_points();
    let adjacency = GraphFactory::weighted_adjacency(&points);
    let degree = GraphFactory::degree_matrix(&points);

    let n = points.len();
    for i in 0..n {
        let row_sum: f64 = (0..n).map(|j| *adjacency.get((i, j))).sum();
        assert_abs_diff_eq!(*degree.get((i, i)), row_sum, epsilon = 1e-12);
        for j in 0..n {
            if i != j {
                assert_eq!(*degree.get((i, j)), 0.0);
            }
        }
    }
}

#[test]
fn test_laplacian_structure() {
    let points = triangle_points();
    let adjacency = GraphFactory::weighted_adjacency(&points);
    let degree = GraphFactory::degree_matrix(&points);
    let laplacian = GraphFactory::normalized_laplacian(&points);

    let n = points.len();
    for i in 0..n {
        assert_abs_diff_eq!(*laplacian.get((i, i)), 1.0, epsilon = 1e-12);
        for j in 0..n {
            assert_abs_diff_eq!(
                *laplacian.get((i, j)),
                *laplacian.get((j, i)),
                epsilon = 1e-12
            );
            if i != j {
                let expected = -*adjacency.get((i, j))
                    / (*degree.get((i, i)) * *degree.get((j, j))).sqrt();
                assert_abs_diff_eq!(*laplacian.get((i, j)), expected, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_laplacian_from_matches_direct_build() {
    let points = triangle_points();
    let adjacency = GraphFactory::weighted_adjacency(&points);
    let degree = GraphFactory::degree_from_adjacency(&adjacency);

    let staged = GraphFactory::laplacian_from(&adjacency, &degree).unwrap();
    let direct = GraphFactory::normalized_laplacian(&points);

    for i in 0..points.len() {
        for j in 0..points.len() {
            assert_abs_diff_eq!(*staged.get((i, j)), *direct.get((i, j)), epsilon = 1e-15);
        }
    }
}

#[test]
fn test_laplacian_from_rejects_mismatched_shapes() {
    let points = triangle_points();
    let adjacency = GraphFactory::weighted_adjacency(&points);

    let two_points = PointSet::new(vec![vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap();
    let small_degree = GraphFactory::degree_matrix(&two_points);

    let result = GraphFactory::laplacian_from(&adjacency, &small_degree);
    assert!(matches!(result, Err(SpectralError::DimensionMismatch { .. })));
}

#[test]
fn test_single_point_zero_degree_is_decoupled() {
    // An isolated point has degree zero; the Laplacian keeps a clean
    // diagonal instead of dividing by zero.
    let points = PointSet::new(vec![vec![7.0, 7.0]]).unwrap();
    let degree = GraphFactory::degree_matrix(&points);
    assert_eq!(*degree.get((0, 0)), 0.0);

    let laplacian = GraphFactory::normalized_laplacian(&points);
    assert_eq!(*laplacian.get((0, 0)), 1.0);
    assert!(laplacian.get((0, 0)).is_finite());
}

#[test]
fn test_point_set_rejects_empty_input() {
    let result = PointSet::new(vec![]);
    assert!(matches!(result, Err(SpectralError::InvalidParameter(_))));
}

#[test]
fn test_point_set_rejects_ragged_rows() {
    let result = PointSet::new(vec![vec![1.0, 2.0], vec![3.0]]);
    assert!(matches!(
        result,
        Err(SpectralError::DimensionMismatch { expected: 2, found: 1, .. })
    ));
}

#[test]
fn test_point_set_rejects_zero_width_rows() {
    let result = PointSet::new(vec![vec![], vec![]]);
    assert!(matches!(result, Err(SpectralError::DimensionMismatch { .. })));
}
