//! Tensor capability trait
//!
//! Defines the vector-space contract consumed by the solvers. The solvers
//! never touch tensor storage directly; everything they need is expressed
//! through this trait, so the same drivers run on dense vectors, blocked
//! tensor networks, or any other inner-product space the caller provides.

use num_complex::Complex64;

/// Element of an inner-product vector space over the complex numbers.
///
/// # Implementation Requirements
///
/// Implementations may differ in:
/// - Storage layout and sparsity
/// - Internal parallelization of the element-wise loops
///
/// Implementations MUST match in:
/// - `inner` is sesquilinear: linear in `other`, conjugate-linear in `self`
/// - `norm` is the ℓ₂ norm and satisfies `norm()² == inner(self, self).re`
///   to within roundoff
/// - `mul_elem` and `map_real` act element-wise on conforming shapes
pub trait Tensor: Clone {
    /// Ambient space dimension.
    fn dim(&self) -> usize;

    /// ℓ₂ norm.
    fn norm(&self) -> f64;

    /// Inner product ⟨self|other⟩, conjugate-linear in `self`.
    fn inner(&self, other: &Self) -> Complex64;

    /// In-place scaling by a real scalar: `self *= alpha`.
    fn scale(&mut self, alpha: f64);

    /// In-place scaling by a complex scalar: `self *= alpha`.
    fn scale_complex(&mut self, alpha: Complex64);

    /// Accumulate a real multiple of another tensor: `self += alpha * x`.
    fn axpy(&mut self, alpha: f64, x: &Self);

    /// Accumulate a complex multiple of another tensor: `self += alpha * x`.
    fn axpy_complex(&mut self, alpha: Complex64, x: &Self);

    /// Element-wise product with a conforming tensor: `self[i] *= factor[i]`.
    ///
    /// Only used to apply diagonal preconditioners to residuals.
    fn mul_elem(&mut self, factor: &Self);

    /// Element-wise map of a real-valued tensor: each element `x` is
    /// replaced by `f(Re x)`.
    ///
    /// Only meaningful for tensors that carry real data, such as operator
    /// diagonals.
    fn map_real<F: Fn(f64) -> f64>(&mut self, f: F);

    /// Overwrite the elements with random values.
    ///
    /// Used to recover from Gram-Schmidt breakdown; the result does not
    /// need to be normalized.
    fn randomize(&mut self);
}
