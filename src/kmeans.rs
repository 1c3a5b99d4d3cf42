//! Seeded k-means++ initialization and Lloyd's refinement.
//!
//! Randomness is an explicit `StdRng` passed by the caller, never ambient
//! state: two runs with the same seed and the same rows select the same
//! centroid sequence and converge to the same fit, independent of thread
//! count. The per-row assignment step is parallelized with rayon; centroid
//! accumulation stays sequential so the reduction is deterministic.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

use crate::core::{euclidean_dist, squared_dist};
use crate::error::SpectralError;

/// Result of a Lloyd's run: final centroids plus the assignment produced by
/// the last assign step.
#[derive(Clone, Debug)]
pub struct KMeansFit {
    /// Final centroids, k rows.
    pub centroids: Vec<Vec<f64>>,
    /// Centroid index per input row, total over all rows.
    pub assignments: Vec<usize>,
    /// Iterations actually executed (≤ max_iter).
    pub iterations: usize,
    /// True when the displacement criterion stopped the loop.
    pub converged: bool,
}

/// Index and squared distance of the closest centroid; the strict comparison
/// keeps the lowest centroid index on ties.
pub fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |nearest, (idx, centroid)| {
            let d2 = squared_dist(row, centroid);
            if d2 < nearest.1 {
                (idx, d2)
            } else {
                nearest
            }
        })
}

/// k-means++ seeding: pick k initial centroid row indices.
///
/// The first index is uniform over the rows; each subsequent draw weights
/// every row by its squared distance to the nearest already-chosen centroid,
/// normalized into a probability distribution. When every row coincides with
/// a chosen centroid the distribution degenerates to all-zero mass and the
/// draw falls back to uniform.
///
/// # Errors
///
/// `InvalidParameter` when `k` is zero or exceeds the row count;
/// `DimensionMismatch` when rows disagree in length.
pub fn kmeans_plus_plus(
    rows: &[Vec<f64>],
    k: usize,
    rng: &mut StdRng,
) -> Result<Vec<usize>, SpectralError> {
    let n = rows.len();
    if k == 0 || k > n {
        return Err(SpectralError::InvalidParameter(format!(
            "cannot seed {} centroids from {} rows",
            k, n
        )));
    }
    let dim = rows[0].len();
    for row in rows {
        if row.len() != dim {
            return Err(SpectralError::DimensionMismatch {
                context: "kmeans++ rows",
                expected: dim,
                found: row.len(),
            });
        }
    }

    info!("Seeding {} centroids from {} rows with k-means++", k, n);

    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    chosen.push(rng.random_range(0..n));
    trace!("first centroid: row {}", chosen[0]);

    while chosen.len() < k {
        let centroids: Vec<Vec<f64>> = chosen.iter().map(|&i| rows[i].clone()).collect();
        let dist2: Vec<f64> = rows
            .par_iter()
            .map(|row| nearest_centroid(row, &centroids).1)
            .collect();
        let total: f64 = dist2.iter().sum();

        let next = if total > 0.0 {
            let threshold = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            let mut picked = n - 1;
            for (i, &d) in dist2.iter().enumerate() {
                cumulative += d;
                if cumulative >= threshold {
                    picked = i;
                    break;
                }
            }
            picked
        } else {
            // All rows sit on chosen centroids already.
            rng.random_range(0..n)
        };

        trace!("centroid {}: row {}", chosen.len(), next);
        chosen.push(next);
    }

    Ok(chosen)
}

/// Lloyd's algorithm over pre-seeded centroids.
///
/// Each iteration assigns every row to its nearest centroid (lowest index on
/// ties), recomputes each centroid as the mean of its rows (an empty cluster
/// keeps its previous centroid), and stops once the maximum centroid
/// displacement is ≤ `epsilon` or `max_iter` is exhausted. Within-cluster
/// squared distance is non-increasing across iterations either way.
///
/// # Errors
///
/// `InvalidParameter` for empty inputs, `max_iter` of zero, or a negative or
/// non-finite `epsilon`; `DimensionMismatch` when centroid and row widths
/// disagree.
pub fn fit(
    initial_centroids: &[Vec<f64>],
    rows: &[Vec<f64>],
    max_iter: usize,
    epsilon: f64,
) -> Result<KMeansFit, SpectralError> {
    let k = initial_centroids.len();
    let n = rows.len();
    if k == 0 || n == 0 {
        return Err(SpectralError::InvalidParameter(
            "kmeans needs at least one centroid and one row".to_string(),
        ));
    }
    if max_iter == 0 {
        return Err(SpectralError::InvalidParameter(
            "max_iter must be at least 1".to_string(),
        ));
    }
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(SpectralError::InvalidParameter(format!(
            "epsilon must be finite and non-negative, got {}",
            epsilon
        )));
    }

    let dim = rows[0].len();
    for row in rows {
        if row.len() != dim {
            return Err(SpectralError::DimensionMismatch {
                context: "kmeans rows",
                expected: dim,
                found: row.len(),
            });
        }
    }
    for centroid in initial_centroids {
        if centroid.len() != dim {
            return Err(SpectralError::DimensionMismatch {
                context: "kmeans centroids",
                expected: dim,
                found: centroid.len(),
            });
        }
    }

    info!(
        "Lloyd's algorithm: {} rows, {} centroids, max_iter {}, epsilon {}",
        n, k, max_iter, epsilon
    );

    let mut centroids: Vec<Vec<f64>> = initial_centroids.to_vec();
    let mut assignments: Vec<usize> = vec![0; n];
    let mut iterations = 0;
    let mut converged = false;

    for iter in 0..max_iter {
        assignments = rows
            .par_iter()
            .map(|row| nearest_centroid(row, &centroids).0)
            .collect();

        // Sequential accumulation keeps the reduction deterministic.
        let mut sums = vec![vec![0.0; dim]; k];
        let mut counts = vec![0usize; k];
        for (row, &cluster) in rows.iter().zip(assignments.iter()) {
            counts[cluster] += 1;
            for (j, &x) in row.iter().enumerate() {
                sums[cluster][j] += x;
            }
        }

        let mut max_delta = 0.0f64;
        for c in 0..k {
            if counts[c] == 0 {
                trace!("cluster {} is empty at iteration {}, keeping centroid", c, iter);
                continue;
            }
            let mean: Vec<f64> =
                sums[c].iter().map(|s| s / counts[c] as f64).collect();
            let moved = euclidean_dist(&centroids[c], &mean);
            if moved > max_delta {
                max_delta = moved;
            }
            centroids[c] = mean;
        }

        iterations = iter + 1;
        trace!("iteration {}: max centroid displacement {:.6e}", iterations, max_delta);

        if max_delta <= epsilon {
            converged = true;
            break;
        }
    }

    debug!(
        "Lloyd's finished after {} iterations, converged = {}",
        iterations, converged
    );

    Ok(KMeansFit { centroids, assignments, iterations, converged })
}
