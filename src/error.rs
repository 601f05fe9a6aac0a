//! Error types for eigr

use thiserror::Error;

/// Result type alias using eigr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in eigr solvers
#[derive(Error, Debug)]
pub enum Error {
    /// No initial vectors were supplied to a driver
    #[error("no initial vectors supplied")]
    EmptyInitialGuess,

    /// An initial vector cannot be normalized
    #[error("initial vector {index} has zero norm")]
    ZeroNormGuess {
        /// Position of the offending vector in the guess list
        index: usize,
    },

    /// A vector does not conform to the operator's linear dimension
    #[error("vector dimension {got} does not match operator size {expected}")]
    DimensionMismatch {
        /// Linear dimension reported by the operator
        expected: usize,
        /// Dimension of the offending vector
        got: usize,
    },

    /// A basis vector failed the post-orthogonalization normalization check
    #[error("basis vector not normalized after Gram-Schmidt: norm = {norm}")]
    NotNormalized {
        /// The offending norm
        norm: f64,
    },

    /// A projected overlap matrix lost positive definiteness
    #[error("projected overlap matrix is not positive definite")]
    NotPositiveDefinite,

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Create a zero-norm guess error
    pub fn zero_norm_guess(index: usize) -> Self {
        Self::ZeroNormGuess { index }
    }
}
