//! Linear operator capability trait
//!
//! The solvers treat the matrix as a black box: the only way to observe it
//! is to apply it to a vector, ask for its linear dimension, and optionally
//! read its diagonal. This is what makes the drivers usable on operators
//! far too large to materialize.

use crate::tensor::Tensor;

/// An implicitly-defined linear operator on a tensor space.
///
/// # Implementation Requirements
///
/// - `product` must be linear in its argument.
/// - When a driver is invoked with the Hermitian flag, `product` is
///   assumed Hermitian with respect to the tensor inner product; no check
///   is performed.
/// - `product` dominates the cost of every solve; any internal parallelism
///   the operator provides is exploited for free.
pub trait LinearOperator<T: Tensor> {
    /// Linear dimension of the operator.
    fn size(&self) -> usize;

    /// Apply the operator: returns `A·x`.
    fn product(&self, x: &T) -> T;

    /// Diagonal of the operator, if one is cheaply available.
    ///
    /// Returning `None` disables diagonal preconditioning; the solvers
    /// still converge, just more slowly.
    fn diag(&self) -> Option<T> {
        None
    }
}
