//! Davidson driver
//!
//! Finds the few algebraically smallest eigenpairs of an implicitly
//! defined operator by projecting it into a growing orthonormal subspace,
//! diagonalizing the small projection, and expanding along the
//! preconditioned residual. Multiple eigenpairs come from targeting
//! successive Ritz indices in the same growing subspace rather than from
//! explicit deflation.

use num_complex::Complex64;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::operator::LinearOperator;
use crate::tensor::Tensor;

use super::precond::DavidsonPrecond;
use super::select::find_eig;
use super::subspace::{Orthogonalized, Subspace};
use super::types::DavidsonOptions;
use super::APPROX_ZERO;

/// Find the minimal eigenpair of `a`.
///
/// `phi` supplies the initial guess and receives the eigenvector; the
/// eigenvalue is returned. The imaginary part of the Ritz value is
/// dropped as in [`block_davidson`].
pub fn davidson<T, A>(a: &A, phi: &mut T, opts: &DavidsonOptions) -> Result<f64>
where
    T: Tensor,
    A: LinearOperator<T>,
{
    let mut block = vec![phi.clone()];
    let eigs = block_davidson(a, &mut block, opts)?;
    *phi = block
        .into_iter()
        .next()
        .ok_or_else(|| Error::Internal("davidson produced no eigenvector".to_string()))?;
    Ok(eigs[0])
}

/// Find the `phi.len()` smallest eigenpairs of `a`.
///
/// Runs [`complex_davidson`] and drops imaginary parts; a dropped part
/// above 1e-12 is reported through `tracing::warn!` when
/// `opts.debug_level > 2`.
pub fn block_davidson<T, A>(a: &A, phi: &mut [T], opts: &DavidsonOptions) -> Result<Vec<f64>>
where
    T: Tensor,
    A: LinearOperator<T>,
{
    let ceigs = complex_davidson(a, phi, opts)?;
    let mut eigs = Vec::with_capacity(ceigs.len());
    for (j, z) in ceigs.iter().enumerate() {
        if opts.debug_level > 2 && z.im.abs() > APPROX_ZERO {
            warn!(
                index = j,
                re = z.re,
                im = z.im,
                "dropping imaginary part of eigenvalue"
            );
        }
        eigs.push(z.re);
    }
    Ok(eigs)
}

/// Find the `phi.len()` smallest eigenpairs of `a`, keeping complex Ritz
/// values.
///
/// Each guess in `phi` is normalized in place and replaced by the
/// corresponding Ritz vector as targets converge. Targets the outer loop
/// never reached are synthesized from the last projection on a
/// best-effort basis; if even that is impossible their eigenvalue stays
/// NaN.
pub fn complex_davidson<T, A>(
    a: &A,
    phi: &mut [T],
    opts: &DavidsonOptions,
) -> Result<Vec<Complex64>>
where
    T: Tensor,
    A: LinearOperator<T>,
{
    let nget = phi.len();
    if nget == 0 {
        return Err(Error::EmptyInitialGuess);
    }
    let maxsize = a.size();
    for (j, p) in phi.iter_mut().enumerate() {
        if p.dim() != maxsize {
            return Err(Error::dimension_mismatch(maxsize, p.dim()));
        }
        let nrm = p.norm();
        if nrm == 0.0 {
            return Err(Error::zero_norm_guess(j));
        }
        p.scale(1.0 / nrm);
    }

    let actual_maxiter = opts.max_iter.min(maxsize.saturating_sub(1));
    if opts.debug_level >= 2 {
        debug!(
            maxsize,
            max_iter = opts.max_iter,
            actual_maxiter,
            "davidson subspace bounds"
        );
    }

    let adiag = a.diag();
    let mut subspace: Subspace<T> = Subspace::with_capacity(actual_maxiter + 2);

    let v0 = phi[0].clone();
    let av0 = a.product(&v0);
    let init_en = v0.inner(&av0).re;
    if opts.debug_level > 2 {
        debug!(energy = init_en, "initial Rayleigh quotient");
    }
    subspace.seed(v0, av0, init_en);

    let nan = Complex64::new(f64::NAN, f64::NAN);
    let mut eigs = vec![nan; nget];
    let mut last_lambda = Complex64::new(1000.0, 0.0);
    let mut complex_diag = false;
    let mut t = 0usize;
    let mut iter = 0usize;
    let mut qnorm = f64::NAN;

    for ii in 0..=actual_maxiter {
        let (mut q, lambda) = if ii == 0 {
            let lambda = Complex64::new(init_en, 0.0);
            let mut q = subspace.av[0].clone();
            q.axpy(-lambda.re, &subspace.v[0]);
            (q, lambda)
        } else {
            subspace.project(opts.hermitian, complex_diag);
            let w = if opts.hermitian {
                t
            } else {
                find_eig(t, &subspace.d, &subspace.di)
            };
            let (phi_t, q, lambda) = subspace.ritz_pair(w);
            phi[t] = phi_t;
            if opts.debug_level >= 3 {
                debug!(
                    complex_diag,
                    target = t,
                    pick = w,
                    lambda_re = lambda.re,
                    lambda_im = lambda.im,
                    spectrum = ?subspace.d,
                    "projected spectrum"
                );
            }
            (q, lambda)
        };
        eigs[t] = lambda;

        qnorm = q.norm();
        let small_residual = qnorm < APPROX_ZERO.max(opts.err_goal * 1e-3);
        let converged = (qnorm < opts.err_goal
            && (lambda - last_lambda).norm() < opts.err_goal)
            || small_residual;
        last_lambda = lambda;

        if qnorm < 1e-20 || (converged && ii >= opts.min_iter) || ii == actual_maxiter {
            if t < nget - 1 && ii < actual_maxiter {
                t += 1;
                last_lambda = Complex64::new(1000.0, 0.0);
            } else {
                if opts.debug_level >= 3 {
                    if qnorm < 1e-20 || small_residual {
                        debug!(qnorm, "stopping: residual negligible");
                    } else if converged {
                        debug!(err_goal = opts.err_goal, "stopping: convergence goal reached");
                    } else {
                        debug!(iterations = ii, "stopping: iteration limit reached");
                    }
                }
                break;
            }
        }

        if opts.debug_level >= 2 || (ii == 0 && opts.debug_level >= 1) {
            debug!(
                iter,
                qnorm,
                basis = subspace.len(),
                eigs = ?committed(&eigs),
                "davidson iteration"
            );
        }

        // apply the diagonal preconditioner (θI - diag(A))⁻¹ to the residual
        if let Some(adiag) = &adiag {
            let dp = DavidsonPrecond::new(lambda.re);
            let mut cond = adiag.clone();
            cond.map_real(|x| dp.apply(x));
            q.mul_elem(&cond);
        }

        match subspace.orthogonalize(&mut q, maxsize, opts.debug_level)? {
            Orthogonalized::Saturated => break,
            Orthogonalized::Accepted => {}
        }

        let new_col_imag = subspace.expand(a, q, opts.hermitian);
        if !complex_diag && new_col_imag > opts.err_goal {
            // once the projection has complex entries it never goes back
            complex_diag = true;
        }
        iter += 1;
    }

    // Harvest targets the loop never committed from the last projection.
    let start = if eigs[t].re.is_nan() { t } else { t + 1 };
    for j in start..nget {
        if j < subspace.nritz() {
            eigs[j] = subspace.ritz_value(j);
            phi[j] = subspace.synthesize(j);
        }
    }

    if opts.debug_level >= 3 {
        debug!(
            max_deviation = subspace.orthonormality_deviation(),
            basis = subspace.len(),
            "final basis orthonormality"
        );
    }
    if opts.debug_level > 0 {
        debug!(iter, qnorm, eigs = ?committed(&eigs), "davidson finished");
    }

    Ok(eigs)
}

/// Eigenvalue estimates committed so far (stops at the first NaN).
fn committed(eigs: &[Complex64]) -> Vec<Complex64> {
    eigs.iter()
        .take_while(|z| !z.re.is_nan())
        .cloned()
        .collect()
}
