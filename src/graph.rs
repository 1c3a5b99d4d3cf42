//! Similarity graph construction: weighted adjacency, degree and normalized
//! Laplacian matrices.
//!
//! ## Algorithm overview
//!
//! 1. **Adjacency**: pairwise Gaussian-style weights
//!    `W[i][j] = exp(-‖x_i − x_j‖ / 2)` over Euclidean distance, with a
//!    forced zero diagonal. Symmetric, entries in (0, 1].
//! 2. **Degree**: diagonal matrix of row sums, `D[i][i] = Σ_j W[i][j]`.
//! 3. **Normalized Laplacian**: `L = I − D^(−1/2) W D^(−1/2)`, element-wise
//!    `L[i][i] = 1` and `L[i][j] = −W[i][j] / sqrt(D[i][i]·D[j][j])`.
//!
//! A zero-degree node (isolated point) would divide by zero in step 3; the
//! factory substitutes `D[i][i]^(−1/2) = 0` so the row and column carry no
//! coupling. The condition is logged, never raised.
//!
//! Per-row work is independent and parallelized with rayon; row order is
//! preserved by the parallel collect, so results are reproducible.

use log::{debug, info, trace, warn};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::core::{euclidean_dist, PointSet};
use crate::error::SpectralError;

/// Graph factory: all similarity-graph matrices are derived from a `PointSet`
/// through these constructors. Each call returns a fresh dense matrix owned
/// by the caller.
pub struct GraphFactory;

impl GraphFactory {
    /// Build the weighted adjacency matrix W over a point set.
    ///
    /// For i ≠ j the weight is `exp(-dist(x_i, x_j) / 2)`; the diagonal is
    /// forced to zero regardless of the kernel's value at distance zero.
    ///
    /// # Complexity
    ///
    /// O(n²·d), rows computed in parallel.
    pub fn weighted_adjacency(points: &PointSet) -> DenseMatrix<f64> {
        let n = points.len();
        info!(
            "Building weighted adjacency for {} points with {} dimensions",
            n,
            points.dim()
        );

        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![0.0; n];
                for j in 0..n {
                    if i != j {
                        let dist = euclidean_dist(points.point(i), points.point(j));
                        row[j] = (-dist / 2.0).exp();
                    }
                }
                row
            })
            .collect();

        let adjacency =
            DenseMatrix::from_2d_vec(&rows).expect("adjacency rows are rectangular");
        debug!("Adjacency matrix built: {:?}", adjacency.shape());
        adjacency
    }

    /// Build the diagonal degree matrix D from a point set.
    ///
    /// `D[i][i]` is the row sum of the weighted adjacency matrix; all
    /// off-diagonal entries are zero.
    pub fn degree_matrix(points: &PointSet) -> DenseMatrix<f64> {
        let adjacency = Self::weighted_adjacency(points);
        Self::degree_from_adjacency(&adjacency)
    }

    /// Degree matrix from an already-built adjacency matrix.
    pub fn degree_from_adjacency(adjacency: &DenseMatrix<f64>) -> DenseMatrix<f64> {
        let (n, _) = adjacency.shape();
        trace!("Computing degrees for {} nodes", n);

        let degrees = Self::degrees(adjacency);
        let mut rows = vec![vec![0.0; n]; n];
        for (i, &d) in degrees.iter().enumerate() {
            rows[i][i] = d;
        }

        DenseMatrix::from_2d_vec(&rows).expect("degree rows are rectangular")
    }

    /// Build the normalized graph Laplacian `L = I − D^(−1/2) W D^(−1/2)`
    /// directly from a point set.
    pub fn normalized_laplacian(points: &PointSet) -> DenseMatrix<f64> {
        info!("Building normalized Laplacian for {} points", points.len());
        let adjacency = Self::weighted_adjacency(points);
        let degrees = Self::degrees(&adjacency);
        Self::laplacian_cells(&adjacency, &degrees)
    }

    /// Normalized Laplacian from already-built adjacency and degree matrices.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when the two matrices disagree in shape or are not
    /// square.
    pub fn laplacian_from(
        adjacency: &DenseMatrix<f64>,
        degree: &DenseMatrix<f64>,
    ) -> Result<DenseMatrix<f64>, SpectralError> {
        let (n, m) = adjacency.shape();
        if n != m {
            return Err(SpectralError::DimensionMismatch {
                context: "adjacency matrix",
                expected: n,
                found: m,
            });
        }
        let (dn, dm) = degree.shape();
        if dn != n || dm != n {
            return Err(SpectralError::DimensionMismatch {
                context: "degree matrix",
                expected: n,
                found: dn.max(dm),
            });
        }

        let degrees: Vec<f64> = (0..n).map(|i| *degree.get((i, i))).collect();
        Ok(Self::laplacian_cells(adjacency, &degrees))
    }

    /// Row sums of the adjacency matrix, in parallel.
    fn degrees(adjacency: &DenseMatrix<f64>) -> Vec<f64> {
        let (n, _) = adjacency.shape();
        (0..n)
            .into_par_iter()
            .map(|i| (0..n).map(|j| *adjacency.get((i, j))).sum())
            .collect()
    }

    fn laplacian_cells(adjacency: &DenseMatrix<f64>, degrees: &[f64]) -> DenseMatrix<f64> {
        let n = degrees.len();

        let inv_sqrt: Vec<f64> = degrees
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                if d > 0.0 {
                    1.0 / d.sqrt()
                } else {
                    warn!("Node {} has zero degree, decoupling its Laplacian row", i);
                    0.0
                }
            })
            .collect();

        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![0.0; n];
                for j in 0..n {
                    row[j] = if i == j {
                        1.0
                    } else {
                        -*adjacency.get((i, j)) * inv_sqrt[i] * inv_sqrt[j]
                    };
                }
                row
            })
            .collect();

        let laplacian =
            DenseMatrix::from_2d_vec(&rows).expect("laplacian rows are rectangular");
        debug!("Normalized Laplacian built: {:?}", laplacian.shape());
        laplacian
    }
}
