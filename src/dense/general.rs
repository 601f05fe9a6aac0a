//! General (non-normal) dense eigensolver
//!
//! Eigenvalues come from shifted QR iteration on the Hessenberg form with
//! Wilkinson shifts; eigenvectors from inverse iteration against the
//! original matrix. Everything runs in complex arithmetic so real and
//! complex inputs share one code path and conjugate eigenvalue pairs need
//! no special 2x2 block handling.

use num_complex::Complex64;

use super::DENSE_EIG_TOL;

/// Solve the general real eigenvalue problem.
///
/// Returns `(real_parts, imag_parts, eigenvectors)` with
/// `eigenvectors[i][j]` the j-th component of the i-th unit-norm
/// eigenvector. The spectrum is NOT ordered; callers select.
pub fn general_eig(a: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>, Vec<Vec<Complex64>>) {
    let m: Vec<Vec<Complex64>> = a
        .iter()
        .map(|row| row.iter().map(|&x| Complex64::new(x, 0.0)).collect())
        .collect();
    split_spectrum(eig_complex(m))
}

/// Solve the general complex eigenvalue problem, with the matrix supplied
/// as separate real and imaginary parts.
///
/// Same return convention as [`general_eig`].
pub fn complex_general_eig(
    ar: &[Vec<f64>],
    ai: &[Vec<f64>],
) -> (Vec<f64>, Vec<f64>, Vec<Vec<Complex64>>) {
    let m: Vec<Vec<Complex64>> = ar
        .iter()
        .zip(ai.iter())
        .map(|(rr, ri)| {
            rr.iter()
                .zip(ri.iter())
                .map(|(&re, &im)| Complex64::new(re, im))
                .collect()
        })
        .collect();
    split_spectrum(eig_complex(m))
}

fn split_spectrum(
    (vals, vecs): (Vec<Complex64>, Vec<Vec<Complex64>>),
) -> (Vec<f64>, Vec<f64>, Vec<Vec<Complex64>>) {
    let dr = vals.iter().map(|z| z.re).collect();
    let di = vals.iter().map(|z| z.im).collect();
    (dr, di, vecs)
}

fn eig_complex(a: Vec<Vec<Complex64>>) -> (Vec<Complex64>, Vec<Vec<Complex64>>) {
    let n = a.len();
    if n == 0 {
        return (vec![], vec![]);
    }
    if n == 1 {
        return (vec![a[0][0]], vec![vec![Complex64::new(1.0, 0.0)]]);
    }

    let mut h = a.clone();
    hessenberg(&mut h);
    let vals = hessenberg_values(h);
    let vecs = vals.iter().map(|&l| inverse_iteration(&a, l)).collect();
    (vals, vecs)
}

/// Reduce to upper Hessenberg form with complex Householder reflectors.
fn hessenberg(h: &mut [Vec<Complex64>]) {
    let n = h.len();
    if n < 3 {
        return;
    }
    for k in 0..n - 2 {
        let col_norm = (k + 1..n)
            .map(|i| h[i][k].norm_sqr())
            .sum::<f64>()
            .sqrt();
        if col_norm < 1e-300 {
            continue;
        }
        let x0 = h[k + 1][k];
        let phase = if x0.norm() > 0.0 {
            x0 / x0.norm()
        } else {
            Complex64::new(1.0, 0.0)
        };
        // alpha phased against x0 so the reflector never cancels
        let alpha = -phase * col_norm;
        let mut v: Vec<Complex64> = (k + 1..n).map(|i| h[i][k]).collect();
        v[0] -= alpha;
        let vnorm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        if vnorm < 1e-300 {
            continue;
        }
        for z in &mut v {
            *z /= vnorm;
        }

        // H <- (I - 2vv^H) H
        for j in k..n {
            let mut s = Complex64::new(0.0, 0.0);
            for i in k + 1..n {
                s += v[i - k - 1].conj() * h[i][j];
            }
            for i in k + 1..n {
                h[i][j] -= 2.0 * v[i - k - 1] * s;
            }
        }
        // H <- H (I - 2vv^H)
        for i in 0..n {
            let mut s = Complex64::new(0.0, 0.0);
            for j in k + 1..n {
                s += h[i][j] * v[j - k - 1];
            }
            for j in k + 1..n {
                h[i][j] -= 2.0 * s * v[j - k - 1].conj();
            }
        }

        h[k + 1][k] = alpha;
        for i in k + 2..n {
            h[i][k] = Complex64::new(0.0, 0.0);
        }
    }
}

/// Eigenvalues of an upper Hessenberg matrix by shifted QR iteration.
fn hessenberg_values(mut h: Vec<Vec<Complex64>>) -> Vec<Complex64> {
    let n = h.len();
    let zero = Complex64::new(0.0, 0.0);
    let mut eig = vec![zero; n];
    let mut p = n;
    let max_iters = 200 * n;
    let mut it = 0usize;

    while p > 0 {
        // deflation scan
        for i in (1..p).rev() {
            let threshold = DENSE_EIG_TOL * (h[i - 1][i - 1].norm() + h[i][i].norm()).max(1e-20);
            if h[i][i - 1].norm() < threshold {
                h[i][i - 1] = zero;
            }
        }
        if p == 1 {
            eig[0] = h[0][0];
            p = 0;
            continue;
        }
        if h[p - 1][p - 2].norm() == 0.0 {
            eig[p - 1] = h[p - 1][p - 1];
            p -= 1;
            continue;
        }

        it += 1;
        if it > max_iters {
            // give up on the unreduced block; report its diagonal
            for (i, e) in eig.iter_mut().enumerate().take(p) {
                *e = h[i][i];
            }
            break;
        }

        let shift = wilkinson_shift(&h, p);
        for i in 0..p {
            h[i][i] -= shift;
        }

        // QR: zero the subdiagonal with row rotations
        let mut rots: Vec<(f64, Complex64)> = Vec::with_capacity(p - 1);
        for i in 0..p - 1 {
            let (c, s) = givens(h[i][i], h[i + 1][i]);
            for j in i..n {
                let t1 = h[i][j];
                let t2 = h[i + 1][j];
                h[i][j] = c * t1 + s * t2;
                h[i + 1][j] = -s.conj() * t1 + c * t2;
            }
            rots.push((c, s));
        }
        // RQ: apply the conjugated rotations on the right
        for (i, (c, s)) in rots.iter().enumerate() {
            let rows = p.min(i + 3);
            for r in 0..rows {
                let t1 = h[r][i];
                let t2 = h[r][i + 1];
                h[r][i] = *c * t1 + s.conj() * t2;
                h[r][i + 1] = -*s * t1 + *c * t2;
            }
        }

        for i in 0..p {
            h[i][i] += shift;
        }
    }

    eig
}

/// Givens rotation (c real, s complex) with G = [[c, s], [-s̄, c]] such
/// that G·(a, b)ᵀ has a zero second component.
fn givens(a: Complex64, b: Complex64) -> (f64, Complex64) {
    let bn = b.norm();
    if bn < 1e-300 {
        return (1.0, Complex64::new(0.0, 0.0));
    }
    let an = a.norm();
    if an < 1e-300 {
        return (0.0, Complex64::new(1.0, 0.0));
    }
    let r = (an * an + bn * bn).sqrt();
    let c = an / r;
    let s = (a / an) * b.conj() / r;
    (c, s)
}

/// Eigenvalue of the trailing 2x2 block closest to the corner entry.
fn wilkinson_shift(h: &[Vec<Complex64>], p: usize) -> Complex64 {
    let a = h[p - 2][p - 2];
    let b = h[p - 2][p - 1];
    let c = h[p - 1][p - 2];
    let d = h[p - 1][p - 1];
    let tr = a + d;
    let det = a * d - b * c;
    let disc = (tr * tr - 4.0 * det).sqrt();
    let l1 = (tr + disc) / 2.0;
    let l2 = (tr - disc) / 2.0;
    if (l1 - d).norm() < (l2 - d).norm() {
        l1
    } else {
        l2
    }
}

/// Eigenvector for a computed eigenvalue by inverse iteration with a
/// slightly perturbed shift.
fn inverse_iteration(a: &[Vec<Complex64>], lambda: Complex64) -> Vec<Complex64> {
    let n = a.len();
    let scale = a
        .iter()
        .flatten()
        .fold(0.0f64, |acc, z| acc.max(z.norm()))
        .max(1e-300);
    let shift = lambda + Complex64::new(scale * f64::EPSILON * 16.0, 0.0);

    let mut b: Vec<Vec<Complex64>> = a.to_vec();
    for i in 0..n {
        b[i][i] -= shift;
    }
    let piv = lu_factor(&mut b, scale);

    // deterministic start with varied phases, unlikely to be deficient
    let mut x: Vec<Complex64> = (0..n)
        .map(|i| Complex64::new(1.0, 0.1 * (i as f64 + 1.0)))
        .collect();
    for _ in 0..3 {
        lu_solve(&b, &piv, &mut x);
        let nrm = x.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        if nrm < 1e-300 {
            break;
        }
        for z in &mut x {
            *z /= nrm;
        }
    }
    x
}

/// In-place LU with partial pivoting; near-zero pivots are clamped so a
/// singular shift still yields a usable triangular factor.
fn lu_factor(b: &mut [Vec<Complex64>], scale: f64) -> Vec<usize> {
    let n = b.len();
    let tiny = (scale * f64::EPSILON).max(1e-300);
    let mut piv = Vec::with_capacity(n);
    for k in 0..n {
        let mut p = k;
        let mut best = b[k][k].norm();
        for r in k + 1..n {
            let v = b[r][k].norm();
            if v > best {
                best = v;
                p = r;
            }
        }
        if p != k {
            b.swap(k, p);
        }
        piv.push(p);
        if b[k][k].norm() < tiny {
            b[k][k] = Complex64::new(tiny, 0.0);
        }
        let row_k = b[k].clone();
        for r in k + 1..n {
            let f = b[r][k] / row_k[k];
            b[r][k] = f;
            for j in k + 1..n {
                b[r][j] -= f * row_k[j];
            }
        }
    }
    piv
}

fn lu_solve(b: &[Vec<Complex64>], piv: &[usize], x: &mut [Complex64]) {
    let n = b.len();
    for (k, &p) in piv.iter().enumerate() {
        x.swap(k, p);
    }
    for k in 0..n {
        for j in 0..k {
            let t = x[j];
            x[k] -= b[k][j] * t;
        }
    }
    for k in (0..n).rev() {
        for j in k + 1..n {
            let t = x[j];
            x[k] -= b[k][j] * t;
        }
        x[k] /= b[k][k];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(a: &[Vec<f64>], lambda: Complex64, x: &[Complex64]) -> f64 {
        let n = a.len();
        (0..n)
            .map(|i| {
                let ax: Complex64 = (0..n).map(|j| a[i][j] * x[j]).sum();
                (ax - lambda * x[i]).norm_sqr()
            })
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn upper_triangular_real() {
        let a = vec![vec![2.0, 1.0], vec![0.0, 3.0]];
        let (dr, di, u) = general_eig(&a);
        let mut vals: Vec<f64> = dr.clone();
        vals.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!((vals[0] - 2.0).abs() < 1e-10);
        assert!((vals[1] - 3.0).abs() < 1e-10);
        for (k, &d) in dr.iter().enumerate() {
            assert!(di[k].abs() < 1e-10);
            let r = residual(&a, Complex64::new(d, di[k]), &u[k]);
            assert!(r < 1e-8, "eigenpair {k} residual {r}");
        }
    }

    #[test]
    fn skew_symmetric_spectrum() {
        // eigenvalues 0 and ±i·sqrt(2)
        let a = vec![
            vec![0.0, 1.0, 0.0],
            vec![-1.0, 0.0, 1.0],
            vec![0.0, -1.0, 0.0],
        ];
        let (dr, di, u) = general_eig(&a);
        let mut moduli: Vec<f64> = dr
            .iter()
            .zip(di.iter())
            .map(|(r, i)| (r * r + i * i).sqrt())
            .collect();
        moduli.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!(moduli[0] < 1e-10, "smallest modulus {}", moduli[0]);
        assert!((moduli[1] - 2.0f64.sqrt()).abs() < 1e-10);
        assert!((moduli[2] - 2.0f64.sqrt()).abs() < 1e-10);
        for k in 0..3 {
            let r = residual(&a, Complex64::new(dr[k], di[k]), &u[k]);
            assert!(r < 1e-8, "eigenpair {k} residual {r}");
        }
    }

    #[test]
    fn complex_upper_triangular() {
        // eigenvalues i and 2i read off the diagonal
        let ar = vec![vec![0.0, 1.0], vec![0.0, 0.0]];
        let ai = vec![vec![1.0, 0.0], vec![0.0, 2.0]];
        let (dr, di, _) = complex_general_eig(&ar, &ai);
        let mut ims: Vec<f64> = di.clone();
        ims.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!((ims[0] - 1.0).abs() < 1e-10);
        assert!((ims[1] - 2.0).abs() < 1e-10);
        assert!(dr.iter().all(|r| r.abs() < 1e-10));
    }

    #[test]
    fn larger_nonsymmetric_residuals() {
        // convection-diffusion style: asymmetric tridiagonal
        let n = 8;
        let mut a = vec![vec![0.0; n]; n];
        for i in 0..n {
            a[i][i] = 3.0 + 0.1 * i as f64;
            if i > 0 {
                a[i][i - 1] = -1.0;
            }
            if i + 1 < n {
                a[i][i + 1] = -1.5;
            }
        }
        let (dr, di, u) = general_eig(&a);
        assert_eq!(dr.len(), n);
        for k in 0..n {
            let r = residual(&a, Complex64::new(dr[k], di[k]), &u[k]);
            assert!(r < 1e-7, "eigenpair {k} residual {r}");
        }
    }
}
