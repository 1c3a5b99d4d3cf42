//! PointSet: the validated, immutable input to every pipeline stage.
//!
//! A `PointSet` is an ordered collection of n points of identical dimension d.
//! Both n and d are fixed at construction and the rows are never mutated
//! afterwards; every derived matrix (adjacency, degree, Laplacian, embedding)
//! is a fresh value owned by its caller, never aliased back into the set.
//!
//! The Euclidean distance primitives shared by the graph and clustering
//! stages also live here, so each stage depends only on this leaf module.
//!
//! # Examples
//!
//! ```
//! use spectralspace::core::PointSet;
//!
//! let points = PointSet::new(vec![
//!     vec![0.0, 0.0],
//!     vec![4.0, 0.0],
//!     vec![0.0, 3.0],
//! ]).unwrap();
//!
//! assert_eq!(points.len(), 3);
//! assert_eq!(points.dim(), 2);
//! ```
//!
//! # Errors
//!
//! Construction fails with `InvalidParameter` on an empty set and with
//! `DimensionMismatch` when rows disagree in length or have zero width.

use log::debug;

use crate::error::SpectralError;

/// Immutable ordered collection of n points of dimension d.
#[derive(Clone, Debug)]
pub struct PointSet {
    points: Vec<Vec<f64>>,
    dim: usize,
}

impl PointSet {
    /// Validates and wraps a row-major point collection.
    ///
    /// Every row must have the same nonzero length; the set must be nonempty.
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self, SpectralError> {
        if points.is_empty() {
            return Err(SpectralError::InvalidParameter(
                "point set must contain at least one point".to_string(),
            ));
        }

        let dim = points[0].len();
        if dim == 0 {
            return Err(SpectralError::DimensionMismatch {
                context: "point set",
                expected: 1,
                found: 0,
            });
        }
        for row in &points {
            if row.len() != dim {
                return Err(SpectralError::DimensionMismatch {
                    context: "point set",
                    expected: dim,
                    found: row.len(),
                });
            }
        }

        debug!("PointSet created: {} points, {} dimensions", points.len(), dim);
        Ok(Self { points, dim })
    }

    /// Number of points n.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A nonempty set is guaranteed by construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point dimension d.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Borrow a single point.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-bounds index.
    #[inline]
    pub fn point(&self, i: usize) -> &[f64] {
        &self.points[i]
    }

    /// Borrow all points, row-major.
    #[inline]
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }
}

/// Squared Euclidean distance between two equally-long slices.
///
/// Kept separate from [`euclidean_dist`] because the clustering stages
/// compare squared distances and never need the root.
#[inline]
pub fn squared_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| {
        let delta = x - y;
        acc + delta * delta
    })
}

/// Euclidean distance between two equally-long slices.
#[inline]
pub fn euclidean_dist(a: &[f64], b: &[f64]) -> f64 {
    squared_dist(a, b).sqrt()
}
