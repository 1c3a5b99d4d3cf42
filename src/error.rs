//! Error types for the spectral clustering pipeline.
//!
//! Only structural and parameter violations are surfaced as errors, and they
//! are raised before any numerical work starts. Numerical edge cases have a
//! fixed fallback instead: a zero-degree node contributes no coupling to the
//! Laplacian, a zero-norm embedding row stays all-zero, and a Jacobi sweep-cap
//! exhaustion returns the best current estimate with `converged = false`.

use thiserror::Error;

/// Fatal pipeline errors.
///
/// Implements `std::error::Error` and `Display` via `thiserror`.
#[derive(Debug, Error)]
pub enum SpectralError {
    /// Rows of unequal length, or matrix shapes that disagree between stages.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Stage or structure where the mismatch was detected
        context: &'static str,
        /// Dimension required by the first row or the upstream stage
        expected: usize,
        /// Dimension actually found
        found: usize,
    },

    /// Out-of-range cluster count, empty input, or malformed iteration bounds.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
