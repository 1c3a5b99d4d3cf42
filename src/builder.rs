//! Pipeline builder: configure once, run the whole spectral clustering pass.
//!
//! The builder mirrors the staged pipeline (similarity graph, Laplacian,
//! Jacobi, eigengap, embedding, k-means++ seeding, Lloyd's refinement) and
//! exposes one `build` call that threads a single seeded random source
//! through the stochastic stages. Identical input and identical seed produce
//! identical assignments.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::core::PointSet;
use crate::embedding;
use crate::error::SpectralError;
use crate::graph::GraphFactory;
use crate::jacobi;
use crate::kmeans;

/// Pipeline parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpectralParams {
    /// Requested cluster count; 0 delegates to the eigengap heuristic.
    pub k: usize,
    /// Lloyd's iteration bound.
    pub max_iter: usize,
    /// Centroid displacement threshold for early stop. The source pipeline
    /// threads an exact 0.0 here, so Lloyd's only stops early on exact
    /// convergence; callers wanting a looser stop set it explicitly.
    pub epsilon: f64,
    /// Seed for the k-means++ random source.
    pub seed: u64,
}

// Approximate equality on the float field, exact on the integers.
impl PartialEq for SpectralParams {
    fn eq(&self, other: &Self) -> bool {
        self.k == other.k
            && self.max_iter == other.max_iter
            && self.seed == other.seed
            && approx::relative_eq!(self.epsilon, other.epsilon)
    }
}

impl Eq for SpectralParams {}

impl Default for SpectralParams {
    fn default() -> Self {
        Self { k: 0, max_iter: 300, epsilon: 0.0, seed: 0 }
    }
}

/// Output of a full pipeline run.
#[derive(Clone, Debug)]
pub struct SpectralModel {
    /// Centroid index per point, total over the point set.
    pub assignments: Vec<usize>,
    /// Final centroids in embedding space, k rows of width k.
    pub centroids: Vec<Vec<f64>>,
    /// Cluster count actually used (selected by the eigengap when k = 0).
    pub k: usize,
    /// Row-normalized spectral embedding, n×k.
    pub embedding: DenseMatrix<f64>,
    /// Laplacian eigenvalues sorted descending.
    pub eigenvalues: Vec<f64>,
    /// False when the Jacobi sweep cap was hit before the tolerance.
    pub jacobi_converged: bool,
    /// Lloyd's iterations executed.
    pub iterations: usize,
}

/// Builder for the full spectral clustering pipeline.
pub struct SpectralClusteringBuilder {
    params: SpectralParams,
}

impl Default for SpectralClusteringBuilder {
    fn default() -> Self {
        debug!("Creating SpectralClusteringBuilder with default parameters");
        Self { params: SpectralParams::default() }
    }
}

impl SpectralClusteringBuilder {
    pub fn new() -> Self {
        info!("Initializing new SpectralClusteringBuilder");
        Self::default()
    }

    /// Requested cluster count; 0 selects k with the eigengap heuristic.
    pub fn with_clusters(mut self, k: usize) -> Self {
        self.params.k = k;
        self
    }

    /// Lloyd's iteration bound.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.params.max_iter = max_iter;
        self
    }

    /// Centroid displacement threshold for Lloyd's early stop.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.params.epsilon = epsilon;
        self
    }

    /// Seed for the k-means++ random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    pub fn params(&self) -> &SpectralParams {
        &self.params
    }

    /// Run the full pipeline over a point set.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for out-of-range k, a zero `max_iter` or a
    /// malformed `epsilon`; these abort before any computation. Numerical
    /// edge cases inside the stages are absorbed with their documented
    /// fallbacks and reported through the model flags.
    pub fn build(&self, points: &PointSet) -> Result<SpectralModel, SpectralError> {
        let n = points.len();
        info!(
            "Spectral clustering over {} points: k={}, max_iter={}, epsilon={}, seed={}",
            n, self.params.k, self.params.max_iter, self.params.epsilon, self.params.seed
        );

        if self.params.max_iter == 0 {
            return Err(SpectralError::InvalidParameter(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if !self.params.epsilon.is_finite() || self.params.epsilon < 0.0 {
            return Err(SpectralError::InvalidParameter(format!(
                "epsilon must be finite and non-negative, got {}",
                self.params.epsilon
            )));
        }

        let laplacian = GraphFactory::normalized_laplacian(points);
        let decomposition = jacobi::decompose(&laplacian)?;
        let pairs = decomposition.sorted_pairs();
        let eigenvalues: Vec<f64> = pairs.iter().map(|p| p.value).collect();

        let k = embedding::select_k(&eigenvalues, self.params.k)?;
        let embedding = embedding::embed(&pairs, k);
        debug!("Embedding ready: {} rows, width {}", n, k);

        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| embedding.get_row(i).iterator(0).copied().collect())
            .collect();

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let seeds = kmeans::kmeans_plus_plus(&rows, k, &mut rng)?;
        let initial: Vec<Vec<f64>> = seeds.iter().map(|&i| rows[i].clone()).collect();
        debug!("k-means++ seeded centroids at rows {:?}", seeds);

        let fit = kmeans::fit(&initial, &rows, self.params.max_iter, self.params.epsilon)?;

        info!(
            "Pipeline complete: k={}, {} Lloyd iterations, kmeans converged = {}",
            k, fit.iterations, fit.converged
        );

        Ok(SpectralModel {
            assignments: fit.assignments,
            centroids: fit.centroids,
            k,
            embedding,
            eigenvalues,
            jacobi_converged: decomposition.converged,
            iterations: fit.iterations,
        })
    }
}
