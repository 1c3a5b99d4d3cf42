//! Eigengap cluster-count selection and row-normalized spectral embedding.
//!
//! The embedding takes the k eigenvectors of largest eigenvalue as the
//! columns of U (n×k) and normalizes each row to unit length. A row whose
//! norm is zero is left all-zero rather than divided by zero.
//!
//! When the caller requests k = 0, the eigengap heuristic picks k from the
//! descending spectrum: gaps g_i = |λ_i − λ_{i+1}| are scanned over the first
//! ⌊n/2⌋ adjacent positions and k is the 1-based position of the largest gap,
//! smallest position winning ties. The scan is deterministic, so a fixed
//! spectrum always selects the same k.

use log::{debug, info, trace, warn};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::core::PointSet;
use crate::error::SpectralError;
use crate::graph::GraphFactory;
use crate::jacobi::{self, EigenPair};

/// Resolve the cluster count from a descending eigenvalue spectrum.
///
/// A positive `requested` passes through after a bounds check; zero triggers
/// the eigengap scan.
///
/// # Errors
///
/// `InvalidParameter` when `requested > n`.
pub fn select_k(sorted_values: &[f64], requested: usize) -> Result<usize, SpectralError> {
    let n = sorted_values.len();

    if requested > 0 {
        if requested > n {
            return Err(SpectralError::InvalidParameter(format!(
                "requested {} clusters for {} points",
                requested, n
            )));
        }
        return Ok(requested);
    }

    // Largest gap over the first ⌊n/2⌋ adjacent pairs; strict comparison
    // keeps the smallest position on ties. A single point has no gaps and
    // falls through to k = 1.
    let mut max_gap = f64::NEG_INFINITY;
    let mut position = 0;
    for i in 0..n / 2 {
        let gap = (sorted_values[i] - sorted_values[i + 1]).abs();
        trace!("eigengap position {}: {:.6}", i, gap);
        if gap > max_gap {
            max_gap = gap;
            position = i;
        }
    }

    let k = position + 1;
    debug!("Eigengap heuristic selected k = {} (gap {:.6})", k, max_gap);
    Ok(k)
}

/// Stack the k leading eigenvectors as columns and row-normalize.
///
/// `pairs` must be sorted by descending eigenvalue; only the first k entries
/// are consumed.
pub fn embed(pairs: &[EigenPair], k: usize) -> DenseMatrix<f64> {
    let n = pairs.first().map(|p| p.vector.len()).unwrap_or(0);

    let mut rows = vec![vec![0.0; k]; n];
    for (j, pair) in pairs.iter().take(k).enumerate() {
        for (i, &component) in pair.vector.iter().enumerate() {
            rows[i][j] = component;
        }
    }

    for (i, row) in rows.iter_mut().enumerate() {
        let norm = row.iter().map(|&x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in row.iter_mut() {
                *x /= norm;
            }
        } else {
            warn!("Embedding row {} has zero norm, leaving it all-zero", i);
        }
    }

    DenseMatrix::from_2d_vec(&rows).expect("embedding rows are rectangular")
}

/// Full embedding stage: Laplacian → Jacobi → eigengap → row-normalized T.
///
/// Returns the n×k embedding together with the selected k (useful when the
/// caller passed k = 0).
///
/// # Errors
///
/// `InvalidParameter` when k is out of range for the point set.
pub fn spectral_embedding(
    points: &PointSet,
    k: usize,
) -> Result<(DenseMatrix<f64>, usize), SpectralError> {
    info!(
        "Spectral embedding of {} points, requested k = {}",
        points.len(),
        k
    );

    let laplacian = GraphFactory::normalized_laplacian(points);
    let decomposition = jacobi::decompose(&laplacian)?;
    let pairs = decomposition.sorted_pairs();
    let values: Vec<f64> = pairs.iter().map(|p| p.value).collect();

    let selected = select_k(&values, k)?;
    let embedding = embed(&pairs, selected);

    debug!(
        "Embedding built: {} rows, width {}, jacobi converged = {}",
        points.len(),
        selected,
        decomposition.converged
    );
    Ok((embedding, selected))
}
