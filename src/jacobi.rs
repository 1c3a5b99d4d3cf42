//! Jacobi eigendecomposition of real symmetric matrices.
//!
//! Classic cyclic Jacobi: repeatedly pick the off-diagonal element of largest
//! magnitude, rotate it to zero, and accumulate the rotation into the
//! eigenvector matrix. The rotation angle follows the standard convention
//! θ = 0.5·atan2(2·A[p][q], A[q][q] − A[p][p]), realized through the
//! numerically stable t/c/s form:
//!
//! ```text
//! θ' = (A[q][q] − A[p][p]) / (2·A[p][q])
//! t  = sign(θ') / (|θ'| + sqrt(θ'² + 1))
//! c  = 1 / sqrt(t² + 1),  s = t·c
//! ```
//!
//! The solver owns one mutable working copy of the input and one accumulating
//! eigenvector matrix for its lifetime, exposing only the final immutable
//! decomposition.
//!
//! Termination is guaranteed: the loop stops once the off-diagonal
//! sum-of-squares falls below [`OFF_DIAGONAL_TOL`] or after [`MAX_SWEEPS`]
//! rotations. Hitting the cap is a non-fatal approximation: the best current
//! estimate is returned with `converged = false` and a warning is logged.

use log::{debug, info, trace, warn};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::SpectralError;

/// Sweep cap bounding worst-case latency.
pub const MAX_SWEEPS: usize = 100;

/// Convergence threshold on the off-diagonal sum of squares.
pub const OFF_DIAGONAL_TOL: f64 = 1e-15;

/// One eigenvalue with its unit-norm eigenvector.
#[derive(Clone, Debug)]
pub struct EigenPair {
    pub value: f64,
    pub vector: Vec<f64>,
}

/// Full eigendecomposition A = VΛVᵀ of a symmetric n×n matrix.
///
/// `values[i]` belongs to column i of `vectors`; together the columns form an
/// orthonormal basis. With repeated eigenvalues the basis is orthonormal but
/// not uniquely determined, so consumers should check the reconstruction
/// invariant rather than exact vector equality.
#[derive(Clone, Debug)]
pub struct EigenDecomposition {
    /// Eigenvalues in working order (unsorted).
    pub values: Vec<f64>,
    /// Eigenvectors as columns, aligned with `values`.
    pub vectors: DenseMatrix<f64>,
    /// False when the sweep cap was reached before the tolerance.
    pub converged: bool,
    /// Rotations applied before termination.
    pub sweeps: usize,
}

impl EigenDecomposition {
    /// Eigenpairs sorted by descending eigenvalue, ties keeping working order.
    pub fn sorted_pairs(&self) -> Vec<EigenPair> {
        let n = self.values.len();
        let mut pairs: Vec<EigenPair> = (0..n)
            .map(|i| EigenPair {
                value: self.values[i],
                vector: (0..n).map(|l| *self.vectors.get((l, i))).collect(),
            })
            .collect();
        pairs.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs
    }

    /// Eigenvalues sorted descending.
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut values = self.values.clone();
        values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        values
    }
}

/// Decompose a real symmetric matrix.
///
/// # Errors
///
/// `DimensionMismatch` for a non-square input, `InvalidParameter` for a
/// non-symmetric one. Both are checked before any rotation runs.
pub fn decompose(matrix: &DenseMatrix<f64>) -> Result<EigenDecomposition, SpectralError> {
    let (n, m) = matrix.shape();
    if n != m {
        return Err(SpectralError::DimensionMismatch {
            context: "jacobi input",
            expected: n,
            found: m,
        });
    }
    if n == 0 {
        return Err(SpectralError::InvalidParameter(
            "jacobi input must be at least 1x1".to_string(),
        ));
    }

    let mut a: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| *matrix.get((i, j))).collect())
        .collect();

    for i in 0..n {
        for j in (i + 1)..n {
            if !approx::relative_eq!(a[i][j], a[j][i], epsilon = 1e-9) {
                return Err(SpectralError::InvalidParameter(format!(
                    "jacobi input is not symmetric at ({}, {}): {} vs {}",
                    i, j, a[i][j], a[j][i]
                )));
            }
        }
    }

    info!("Jacobi decomposition of a {}x{} symmetric matrix", n, n);

    // V starts as the identity and accumulates every rotation.
    let mut v: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    let mut off = off_diagonal_square_sum(&a);
    let mut sweeps = 0;

    while off > OFF_DIAGONAL_TOL && sweeps < MAX_SWEEPS {
        let (p, q) = max_off_diagonal(&a);
        let apq = a[p][q];
        if apq == 0.0 {
            break;
        }

        let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
        let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
        let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
        let c = 1.0 / (t * t + 1.0).sqrt();
        let s = t * c;

        rotate(&mut a, p, q, c, s);

        for row in v.iter_mut() {
            let vip = row[p] * c - row[q] * s;
            let viq = row[p] * s + row[q] * c;
            row[p] = vip;
            row[q] = viq;
        }

        off = off_diagonal_square_sum(&a);
        sweeps += 1;
        trace!("rotation {}: pivot ({}, {}), off-diagonal {:.3e}", sweeps, p, q, off);
    }

    let converged = off <= OFF_DIAGONAL_TOL;
    if converged {
        debug!("Jacobi converged after {} rotations, off-diagonal {:.3e}", sweeps, off);
    } else {
        warn!(
            "Jacobi sweep cap ({}) reached with off-diagonal {:.3e}, returning best estimate",
            MAX_SWEEPS, off
        );
    }

    let values: Vec<f64> = (0..n).map(|i| a[i][i]).collect();
    let vectors = DenseMatrix::from_2d_vec(&v).expect("eigenvector rows are rectangular");

    Ok(EigenDecomposition { values, vectors, converged, sweeps })
}

/// Largest |off-diagonal| element, scanning the upper triangle so ties pick
/// the smallest index pair.
fn max_off_diagonal(a: &[Vec<f64>]) -> (usize, usize) {
    let n = a.len();
    let mut max = f64::NEG_INFINITY;
    let mut pivot = (0, 1);
    for i in 0..n {
        for j in (i + 1)..n {
            if a[i][j].abs() > max {
                max = a[i][j].abs();
                pivot = (i, j);
            }
        }
    }
    pivot
}

fn off_diagonal_square_sum(a: &[Vec<f64>]) -> f64 {
    let n = a.len();
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            sum += 2.0 * a[i][j] * a[i][j];
        }
    }
    sum
}

/// Apply the similarity rotation in place, zeroing `a[p][q]`.
fn rotate(a: &mut [Vec<f64>], p: usize, q: usize, c: f64, s: f64) {
    let n = a.len();
    let app = a[p][p];
    let aqq = a[q][q];
    let apq = a[p][q];

    for r in 0..n {
        if r != p && r != q {
            let arp = c * a[r][p] - s * a[r][q];
            let arq = c * a[r][q] + s * a[r][p];
            a[r][p] = arp;
            a[p][r] = arp;
            a[r][q] = arq;
            a[q][r] = arq;
        }
    }

    a[p][p] = c * c * app + s * s * aqq - 2.0 * s * c * apq;
    a[q][q] = s * s * app + c * c * aqq + 2.0 * s * c * apq;
    a[p][q] = 0.0;
    a[q][p] = 0.0;
}
