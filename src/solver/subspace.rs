//! Subspace engine for the Davidson drivers
//!
//! Maintains the orthonormal basis V, the image vectors A·V, and the
//! projected matrix M = Vᴴ(A·V) stored as separate real and imaginary
//! parts. Projection dispatches to the dense facade; Ritz vectors are
//! synthesized by accumulating basis combinations so the residual comes
//! out of the same pass that builds the eigenvector.

use num_complex::Complex64;

use crate::dense::{complex_general_eig, general_eig, herm_eig, sym_eig};
use crate::error::{Error, Result};
use crate::operator::LinearOperator;
use crate::tensor::Tensor;

use super::APPROX_ZERO;

/// Residual directions below this norm after projection count as a
/// Gram-Schmidt breakdown.
pub(crate) const BREAKDOWN_TOL: f64 = 1e-10;

/// Orthogonalization passes; one suffices for a small well-conditioned
/// basis, breakdown recovery handles the rest.
const NPASS: usize = 1;

/// Outcome of orthogonalizing a candidate direction.
pub(crate) enum Orthogonalized {
    /// The direction was orthonormalized and can extend the basis.
    Accepted,
    /// No further independent direction exists; the driver must finalize.
    Saturated,
}

pub(crate) struct Subspace<T: Tensor> {
    /// Orthonormal basis vectors.
    pub(crate) v: Vec<T>,
    /// Image vectors, `av[k] = A·v[k]`.
    pub(crate) av: Vec<T>,
    /// Projected matrix, real part; `mr[j][k] + i·mi[j][k] = ⟨v[j]|av[k]⟩`.
    mr: Vec<Vec<f64>>,
    mi: Vec<Vec<f64>>,
    /// Spectrum of the last projection (real and imaginary parts).
    pub(crate) d: Vec<f64>,
    pub(crate) di: Vec<f64>,
    /// Coefficient vectors of the last projection; `u[w][k]` multiplies
    /// basis vector k in the w-th Ritz vector.
    u: Vec<Vec<Complex64>>,
}

impl<T: Tensor> Subspace<T> {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            v: Vec::with_capacity(cap),
            av: Vec::with_capacity(cap),
            mr: Vec::new(),
            mi: Vec::new(),
            d: Vec::new(),
            di: Vec::new(),
            u: Vec::new(),
        }
    }

    /// Install the normalized first basis vector, its image, and the 1x1
    /// projection seeded with the initial Rayleigh quotient.
    pub fn seed(&mut self, v0: T, av0: T, lambda: f64) {
        self.v.push(v0);
        self.av.push(av0);
        self.mr = vec![vec![lambda]];
        self.mi = vec![vec![0.0]];
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    /// Number of Ritz pairs produced by the last projection.
    pub fn nritz(&self) -> usize {
        self.d.len()
    }

    /// Diagonalize the current projection through the dense facade.
    ///
    /// The Hermitian flag selects the symmetric/Hermitian fast path with
    /// an ascending spectrum; `complex_diag` routes through the complex
    /// storage once the projected matrix has acquired imaginary entries.
    pub fn project(&mut self, hermitian: bool, complex_diag: bool) {
        if hermitian {
            if complex_diag {
                let (d, u) = herm_eig(&self.mr, &self.mi);
                self.di = vec![0.0; d.len()];
                self.d = d;
                self.u = u;
            } else {
                let (d, u) = sym_eig(&self.mr);
                self.di = vec![0.0; d.len()];
                self.d = d;
                self.u = u
                    .into_iter()
                    .map(|row| row.into_iter().map(|x| Complex64::new(x, 0.0)).collect())
                    .collect();
            }
        } else if complex_diag {
            let (d, di, u) = complex_general_eig(&self.mr, &self.mi);
            self.d = d;
            self.di = di;
            self.u = u;
        } else {
            let (d, di, u) = general_eig(&self.mr);
            self.d = d;
            self.di = di;
            self.u = u;
        }
    }

    /// Ritz value at index `w` of the last projection.
    pub fn ritz_value(&self, w: usize) -> Complex64 {
        Complex64::new(self.d[w], self.di[w])
    }

    /// Synthesize the Ritz vector for coefficient column `w` of the last
    /// projection: φ = Σₖ u[w][k]·V[k].
    pub fn synthesize(&self, w: usize) -> T {
        let coeffs = &self.u[w];
        let mut phi = self.v[0].clone();
        phi.scale_complex(coeffs[0]);
        for (k, &c) in coeffs.iter().enumerate().skip(1) {
            phi.axpy_complex(c, &self.v[k]);
        }
        phi
    }

    /// Ritz vector, residual, and value for target column `w`.
    ///
    /// The image combination ψ = Σₖ u[w][k]·AV[k] is accumulated alongside
    /// φ, and the residual is q = ψ - λ·φ, using the real part of λ alone
    /// when its imaginary part is negligible. If the leading coefficient
    /// is negative both φ and q are flipped, keeping successive iterates
    /// phase-comparable.
    pub fn ritz_pair(&self, w: usize) -> (T, T, Complex64) {
        let lambda = self.ritz_value(w);
        let coeffs = &self.u[w];
        let mut phi = self.v[0].clone();
        phi.scale_complex(coeffs[0]);
        let mut q = self.av[0].clone();
        q.scale_complex(coeffs[0]);
        for (k, &c) in coeffs.iter().enumerate().skip(1) {
            phi.axpy_complex(c, &self.v[k]);
            q.axpy_complex(c, &self.av[k]);
        }
        if lambda.im.abs() <= APPROX_ZERO {
            q.axpy(-lambda.re, &phi);
        } else {
            q.axpy_complex(-lambda, &phi);
        }
        if coeffs[0].re < 0.0 {
            phi.scale(-1.0);
            q.scale(-1.0);
        }
        (phi, q, lambda)
    }

    /// Modified Gram-Schmidt of `q` against the basis, with randomized
    /// restart on breakdown.
    ///
    /// On success `q` is unit-norm and orthogonal to every basis vector.
    /// Returns [`Orthogonalized::Saturated`] when the basis already spans
    /// the whole space (`maxsize` vectors) or repeated randomization
    /// fails to produce an independent direction.
    pub fn orthogonalize(
        &mut self,
        q: &mut T,
        maxsize: usize,
        debug_level: i32,
    ) -> Result<Orthogonalized> {
        let ni = self.v.len();
        // the breakdown threshold applies to a unit-norm candidate;
        // preconditioned residuals enter with arbitrary norm
        let qn0 = q.norm();
        if qn0 > 0.0 {
            q.scale(1.0 / qn0);
        }
        let mut count = 0usize;
        let mut pass = 0usize;
        while pass < NPASS {
            count += 1;
            for vk in &self.v {
                let c = vk.inner(q);
                if c.im == 0.0 {
                    q.axpy(-c.re, vk);
                } else {
                    q.axpy_complex(-c, vk);
                }
            }
            let mut qn = q.norm();

            if qn < BREAKDOWN_TOL {
                if debug_level >= 2 {
                    tracing::debug!("trial vector not independent, randomizing");
                }
                *q = self.v[ni - 1].clone();
                q.randomize();

                if ni >= maxsize {
                    if debug_level >= 3 {
                        tracing::debug!("stopping: basis spans the full space");
                    }
                    return Ok(Orthogonalized::Saturated);
                }
                if count > NPASS * 3 {
                    if debug_level >= 3 {
                        tracing::debug!("stopping: repeated orthogonalization failures");
                    }
                    return Ok(Orthogonalized::Saturated);
                }

                qn = q.norm();
                if qn == 0.0 {
                    return Err(Error::Internal(
                        "randomization produced a zero vector".to_string(),
                    ));
                }
                // redo the pass with the randomized direction
                q.scale(1.0 / qn);
                continue;
            }

            q.scale(1.0 / qn);
            pass += 1;
        }

        if debug_level >= 3 {
            let qn = q.norm();
            if (qn - 1.0).abs() > BREAKDOWN_TOL {
                return Err(Error::NotNormalized { norm: qn });
            }
        }
        Ok(Orthogonalized::Accepted)
    }

    /// Append an orthonormalized direction, compute its image, and extend
    /// the projected matrix by one row and column.
    ///
    /// In the Hermitian path the new row is the conjugate of the new
    /// column, saving half the inner products; otherwise the row takes
    /// its own set of products ⟨V[new]|AV[k]⟩. Returns the norm of the
    /// imaginary part of the new column, which the driver watches to
    /// decide when the projection must go through complex storage.
    pub fn expand<A: LinearOperator<T>>(&mut self, a: &A, q: T, hermitian: bool) -> f64 {
        let av_new = a.product(&q);
        self.v.push(q);
        self.av.push(av_new);
        let m = self.v.len();
        let last = m - 1;

        let mut col_r = vec![0.0f64; m];
        let mut col_i = vec![0.0f64; m];
        for k in 0..m {
            let z = self.v[k].inner(&self.av[last]);
            col_r[k] = z.re;
            col_i[k] = z.im;
        }
        for k in 0..last {
            self.mr[k].push(col_r[k]);
            self.mi[k].push(col_i[k]);
        }

        let mut row_r = vec![0.0f64; m];
        let mut row_i = vec![0.0f64; m];
        if hermitian {
            for k in 0..m {
                row_r[k] = col_r[k];
                row_i[k] = -col_i[k];
            }
        } else {
            for k in 0..last {
                let z = self.v[last].inner(&self.av[k]);
                row_r[k] = z.re;
                row_i[k] = z.im;
            }
            row_r[last] = col_r[last];
            row_i[last] = col_i[last];
        }
        self.mr.push(row_r);
        self.mi.push(row_i);

        col_i.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Largest deviation of ⟨V[j]|V[k]⟩ from δⱼₖ over all basis pairs.
    pub fn orthonormality_deviation(&self) -> f64 {
        let m = self.v.len();
        let mut dev = 0.0f64;
        for j in 0..m {
            for k in j..m {
                let z = self.v[j].inner(&self.v[k]);
                let target = if j == k { 1.0 } else { 0.0 };
                dev = dev.max((z - target).norm());
            }
        }
        dev
    }
}
