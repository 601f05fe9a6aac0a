//! Dense eigensolvers for the small projected matrices produced by the
//! subspace drivers
//!
//! These operate on CPU-side `Vec<Vec<f64>>` matrices (typically 2-50
//! dimension). They are deliberately self-contained: the projected problem
//! is always tiny compared to the operator, so simple robust algorithms
//! (Jacobi rotations, shifted QR, inverse iteration) beat any dependency
//! on an external LAPACK binding here.
//!
//! Ordering guarantee: the symmetric, Hermitian, and generalized routines
//! return eigenvalues sorted ascending. The general routines return the
//! spectrum unordered; callers impose their own selection.

mod general;
mod generalized;
mod hermitian;
mod symmetric;

pub use general::{complex_general_eig, general_eig};
pub use generalized::sym_gen_eig;
pub use hermitian::herm_eig;
pub use symmetric::sym_eig;

/// Convergence tolerance factor for Jacobi/QR iterations, relative to the
/// magnitude scale of the input matrix.
pub(crate) const DENSE_EIG_TOL: f64 = 1e-14;

/// Indices that sort `vals` ascending.
pub(crate) fn argsort_ascending(vals: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..vals.len()).collect();
    indices.sort_by(|&a, &b| {
        vals[a]
            .partial_cmp(&vals[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}
