//! # spectralspace
//!
//! Normalized spectral clustering over an in-memory point set: build a
//! Gaussian-kernel similarity graph, derive its normalized Laplacian, extract
//! the eigenstructure with a Jacobi solver, embed points into the leading
//! eigenvector space, and cluster the embedded rows with seeded k-means++
//! and Lloyd's refinement.
//!
//! # Pipeline stages
//!
//! 1. **Graph**: weighted adjacency `W[i][j] = exp(-‖x_i − x_j‖ / 2)`,
//!    diagonal degree matrix, normalized Laplacian
//!    `L = I − D^(−1/2) W D^(−1/2)`.
//! 2. **Eigenmaps**: full Jacobi eigendecomposition of L with a bounded
//!    sweep count and an off-diagonal tolerance.
//! 3. **Eigengap**: automatic cluster-count selection from the descending
//!    spectrum when the caller passes k = 0.
//! 4. **Embedding**: row-normalized n×k matrix of the leading eigenvectors.
//! 5. **Clustering**: k-means++ seeding from an explicit seeded random
//!    source, then Lloyd's algorithm to convergence or iteration bound.
//!
//! Every stage is also exposed on its own, so a caller may request only the
//! adjacency matrix, the degree matrix, the Laplacian or the raw Jacobi
//! decomposition without running the rest of the pipeline.
//!
//! # Example
//!
//! ```
//! use spectralspace::builder::SpectralClusteringBuilder;
//! use spectralspace::core::PointSet;
//!
//! let points = PointSet::new(vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.0],
//!     vec![5.0, 5.0],
//!     vec![5.1, 5.0],
//! ]).unwrap();
//!
//! let model = SpectralClusteringBuilder::new()
//!     .with_clusters(2)
//!     .with_seed(128)
//!     .build(&points)
//!     .unwrap();
//!
//! assert_eq!(model.assignments.len(), 4);
//! assert_eq!(model.centroids.len(), 2);
//! ```
//!
//! The core performs no I/O and never terminates the process; fatal
//! structural errors surface as [`error::SpectralError`] for the calling
//! layer to render. All stages emit structured logs (info/debug/trace) via
//! the `log` facade, compatible with env_logger or tracing backends.

pub mod builder;
pub mod core;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod jacobi;
pub mod kmeans;

#[cfg(test)]
mod tests;
