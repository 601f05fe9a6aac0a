//! Generalized Davidson driver for A φ = λ B φ with positive definite B
//!
//! Maintains the basis V together with both image sequences A·V and B·V
//! and projects the pencil (M, N) = (Vᴴ A V, Vᴴ B V). New directions are
//! not B-orthogonalized: the overlap N absorbs their non-orthogonality on
//! the next projection, which saves operator applications.

use tracing::debug;

use crate::dense::sym_gen_eig;
use crate::error::{Error, Result};
use crate::operator::LinearOperator;
use crate::tensor::Tensor;

use super::types::GenDavidsonOptions;

/// Find the minimal eigenpair of the generalized problem A φ = λ B φ.
///
/// `phi` supplies the initial guess and receives the eigenvector,
/// B-normalized on entry so that ⟨φ|B φ⟩ = 1. B must be positive
/// definite; a non-positive B-norm or a projected overlap without a
/// Cholesky factor fails with [`Error::NotPositiveDefinite`].
pub fn non_orth_davidson<T, A, B>(
    a: &A,
    b: &B,
    phi: &mut T,
    opts: &GenDavidsonOptions,
) -> Result<f64>
where
    T: Tensor,
    A: LinearOperator<T>,
    B: LinearOperator<T>,
{
    let maxsize = a.size();
    if b.size() != maxsize {
        return Err(Error::dimension_mismatch(maxsize, b.size()));
    }
    if phi.dim() != maxsize {
        return Err(Error::dimension_mismatch(maxsize, phi.dim()));
    }

    // B-normalize the guess
    let bphi = b.product(phi);
    let phib = phi.inner(&bphi).re;
    if phib <= 0.0 || phib.is_nan() {
        return Err(Error::NotPositiveDefinite);
    }
    phi.scale(1.0 / phib.sqrt());

    // the seeding step always runs, even when max_iter is zero
    let actual_maxiter = opts.max_iter.min(maxsize).max(1);
    let cap = actual_maxiter + 2;
    let mut v: Vec<T> = Vec::with_capacity(cap);
    let mut av: Vec<T> = Vec::with_capacity(cap);
    let mut bv: Vec<T> = Vec::with_capacity(cap);
    let mut m_mat: Vec<Vec<f64>> = Vec::new();
    let mut n_mat: Vec<Vec<f64>> = Vec::new();
    let mut u: Vec<Vec<f64>> = Vec::new();

    let mut lambda = 1e30f64;
    let mut last_lambda = 1e30f64;
    let mut qnorm = 1e30f64;
    let mut iter = 0usize;

    for ii in 1..=actual_maxiter {
        iter = ii;
        let q = if ii == 1 {
            v.push(phi.clone());
            av.push(a.product(phi));
            bv.push(b.product(phi));
            let m00 = v[0].inner(&av[0]).re;
            let n00 = v[0].inner(&bv[0]).re;
            m_mat = vec![vec![m00]];
            n_mat = vec![vec![n00]];
            lambda = m00 / (n00 + 1e-33);
            let mut q = av[0].clone();
            q.axpy(-lambda, &bv[0]);
            q
        } else {
            let (d, uu) = sym_gen_eig(&m_mat, &n_mat)?;
            lambda = d[0];
            // accumulated residual q = Σₖ u[k]·(AV[k] - λ·BV[k])
            let mut q = av[0].clone();
            q.axpy(-lambda, &bv[0]);
            q.scale(uu[0][0]);
            for k in 1..uu[0].len() {
                let mut term = av[k].clone();
                term.axpy(-lambda, &bv[k]);
                q.axpy(uu[0][k], &term);
            }
            u = uu;
            q
        };

        qnorm = q.norm();
        if (qnorm < opts.err_goal && (lambda - last_lambda).abs() < opts.err_goal)
            || qnorm < 1e-12
        {
            break;
        }

        if opts.debug_level > 1 || (ii == 1 && opts.debug_level > 0) {
            debug!(iter = ii, qnorm, lambda, basis = v.len(), "generalized davidson iteration");
        }

        // next direction, optionally orthogonalized against the basis
        let mut d_new = q.clone();
        if opts.gram_schmidt {
            let coeffs: Vec<_> = v.iter().map(|vk| vk.inner(&q)).collect();
            for (k, c) in coeffs.iter().enumerate() {
                if c.im == 0.0 {
                    d_new.axpy(-c.re, &v[k]);
                } else {
                    d_new.axpy_complex(-*c, &v[k]);
                }
            }
        }
        d_new.scale(1.0 / (d_new.norm() + 1e-33));
        last_lambda = lambda;

        if ii < actual_maxiter {
            let mut bv_new = b.product(&d_new);
            // keep the leading overlap non-negative so the projected
            // metric stays sign-consistent across iterations
            if v[0].inner(&bv_new).re < 0.0 {
                d_new.scale(-1.0);
                bv_new.scale(-1.0);
            }
            let av_new = a.product(&d_new);
            v.push(d_new);
            av.push(av_new);
            bv.push(bv_new);

            let m = v.len();
            let last = m - 1;
            let mut ncol = vec![0.0f64; m];
            for (k, vk) in v.iter().enumerate() {
                ncol[k] = vk.inner(&bv[last]).re;
            }
            for k in 0..last {
                n_mat[k].push(ncol[k]);
            }
            n_mat.push(ncol);

            let mut mcol = vec![0.0f64; m];
            for (k, vk) in v.iter().enumerate() {
                mcol[k] = vk.inner(&av[last]).re;
            }
            for k in 0..last {
                m_mat[k].push(mcol[k]);
            }
            m_mat.push(mcol);
        }
    }

    if opts.debug_level > 0 {
        debug!(iter, qnorm, lambda, "generalized davidson finished");
    }

    // synthesize the eigenvector from the last projection
    if !u.is_empty() {
        let coeffs = &u[0];
        let mut out = v[0].clone();
        out.scale(coeffs[0]);
        for (k, &c) in coeffs.iter().enumerate().skip(1) {
            out.axpy(c, &v[k]);
        }
        *phi = out;
    } else if let Some(v0) = v.into_iter().next() {
        // converged before any projection: the seed is the eigenvector
        *phi = v0;
    }

    Ok(lambda)
}
