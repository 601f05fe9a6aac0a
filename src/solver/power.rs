//! Deflated power method
//!
//! Finds dominant eigenvalues one target at a time, deflating converged
//! eigenpairs by projection. Needs neither the operator diagonal nor a
//! dense eigensolver, and assumes the dominant eigenvalues are real.

use tracing::debug;

use crate::error::{Error, Result};
use crate::operator::LinearOperator;
use crate::tensor::Tensor;

use super::types::PowerMethodOptions;

/// Find the `vecs.len()` dominant eigenvalues of `a` by deflated power
/// iteration.
///
/// Each vector in `vecs` supplies the initial guess for one target and is
/// replaced by the corresponding normalized eigenvector. Targets are
/// processed in order; converged eigenpairs are projected out of later
/// iterations.
pub fn power_method<T, A>(a: &A, vecs: &mut [T], opts: &PowerMethodOptions) -> Result<Vec<f64>>
where
    T: Tensor,
    A: LinearOperator<T>,
{
    let nget = vecs.len();
    if nget == 0 {
        return Err(Error::EmptyInitialGuess);
    }
    let n = a.size();
    for (j, vj) in vecs.iter().enumerate() {
        if vj.dim() != n {
            return Err(Error::dimension_mismatch(n, vj.dim()));
        }
        if vj.norm() == 0.0 {
            return Err(Error::zero_norm_guess(j));
        }
    }

    let mut eigs = vec![1000.0f64; nget];
    for t in 0..nget {
        let (done, rest) = vecs.split_at_mut(t);
        let v = &mut rest[0];
        let nrm = v.norm();
        v.scale(1.0 / nrm);

        let mut lambda = 1000.0f64;
        for ii in 1..=opts.max_iter {
            // Hotelling deflation: one application of A - Σⱼ λⱼ·vⱼvⱼᴴ,
            // so the overlaps are taken against the pre-product iterate
            let overlaps: Vec<_> = done.iter().map(|prev| prev.inner(v)).collect();
            *v = a.product(v);
            for (j, prev) in done.iter().enumerate() {
                v.axpy_complex(overlaps[j] * (-eigs[j]), prev);
            }
            let last_lambda = lambda;
            lambda = v.norm();
            if lambda == 0.0 {
                return Err(Error::Internal(format!(
                    "power iterate for target {t} vanished"
                )));
            }
            v.scale(1.0 / lambda);
            if opts.debug_level >= 1 {
                debug!(target = t, iteration = ii, lambda, "power iteration");
            }
            if (lambda - last_lambda).abs() < opts.err_goal {
                break;
            }
        }
        eigs[t] = lambda;
    }
    Ok(eigs)
}
