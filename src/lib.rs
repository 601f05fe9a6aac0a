//! # eigr
//!
//! **Iterative eigensolvers for implicitly-defined linear operators.**
//!
//! eigr computes the few algebraically smallest eigenpairs of an operator
//! that is far too large to materialize: all it needs is a matrix-vector
//! product and, optionally, the operator diagonal. The drivers are
//! generic over two small capability traits, so they run unchanged on
//! dense vectors, tensor networks, or any other inner-product space.
//!
//! ## Solvers
//!
//! - **Davidson** ([`davidson`], [`block_davidson`], [`complex_davidson`]):
//!   subspace iteration with Rayleigh-Ritz projection, diagonal
//!   preconditioning, and Gram-Schmidt re-orthogonalization with
//!   randomized restart. A Hermitian fast path halves the projection
//!   cost; the general path tracks complex Ritz values.
//! - **Generalized Davidson** ([`non_orth_davidson`]): A φ = λ B φ with
//!   positive definite B, projecting both operators onto the same basis.
//! - **Power method** ([`power_method`]): dominant eigenvalues by
//!   deflated power iteration, requiring nothing but the product.
//!
//! ## Quick Start
//!
//! ```rust
//! # fn main() -> eigr::Result<()> {
//! use eigr::reference::{DenseOperator, DenseVector};
//! use eigr::{davidson, DavidsonOptions};
//!
//! let a = DenseOperator::diagonal(&[1.0, 2.0, 3.0, 4.0]);
//! let mut phi = DenseVector::from_real(&[0.5, 0.5, 0.5, 0.5]);
//! let opts = DavidsonOptions {
//!     max_iter: 10,
//!     err_goal: 1e-8,
//!     ..Default::default()
//! };
//! let lambda = davidson(&a, &mut phi, &opts)?;
//! assert!((lambda - 1.0).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dense;
pub mod error;
pub mod operator;
pub mod reference;
pub mod solver;
pub mod tensor;

pub use error::{Error, Result};
pub use operator::LinearOperator;
pub use solver::{
    block_davidson, complex_davidson, davidson, non_orth_davidson, power_method, DavidsonOptions,
    GenDavidsonOptions, PowerMethodOptions,
};
pub use tensor::Tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::operator::LinearOperator;
    pub use crate::solver::{
        block_davidson, complex_davidson, davidson, non_orth_davidson, power_method,
        DavidsonOptions, GenDavidsonOptions, PowerMethodOptions,
    };
    pub use crate::tensor::Tensor;
}
