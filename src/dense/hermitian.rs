//! Complex Hermitian eigensolver using phase-carrying Jacobi rotations

use num_complex::Complex64;

use super::argsort_ascending;

/// Solve the complex Hermitian eigenvalue problem.
///
/// The matrix is supplied as separate real and imaginary parts; only the
/// lower triangle is read and the matrix is Hermitized from it (diagonal
/// imaginary parts are discarded). Returns `(eigenvalues, eigenvectors)`
/// with real eigenvalues sorted ascending and `eigenvectors[i][j]` the
/// j-th component of the i-th unit-norm eigenvector.
pub fn herm_eig(ar: &[Vec<f64>], ai: &[Vec<f64>]) -> (Vec<f64>, Vec<Vec<Complex64>>) {
    let n = ar.len();
    if n == 0 {
        return (vec![], vec![]);
    }
    if n == 1 {
        return (vec![ar[0][0]], vec![vec![Complex64::new(1.0, 0.0)]]);
    }

    let zero = Complex64::new(0.0, 0.0);
    let mut m = vec![vec![zero; n]; n];
    for i in 0..n {
        m[i][i] = Complex64::new(ar[i][i], 0.0);
        for j in 0..i {
            let z = Complex64::new(ar[i][j], ai[i][j]);
            m[i][j] = z;
            m[j][i] = z.conj();
        }
    }

    let mut v = vec![vec![zero; n]; n];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = Complex64::new(1.0, 0.0);
    }

    let scale = m
        .iter()
        .flatten()
        .fold(0.0f64, |acc, z| acc.max(z.norm()))
        .max(1e-300);
    let tol = (n as f64) * f64::EPSILON * scale;
    let max_sweeps = 30;

    for _sweep in 0..max_sweeps {
        let mut max_off = 0.0f64;
        for i in 0..n {
            for j in (i + 1)..n {
                max_off = max_off.max(m[i][j].norm());
            }
        }
        if max_off < tol {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let g = m[p][q];
                let gn = g.norm();
                if gn < tol * 0.01 {
                    continue;
                }
                // Unitary rotation U with U[p][p] = U[q][q] = c,
                // U[p][q] = -s·e^{iφ}, U[q][p] = s·e^{-iφ} where
                // g = |g|·e^{iφ}; the angle zeroes m[p][q] in Uᴴ M U.
                let alpha = m[p][p].re;
                let beta = m[q][q].re;
                let tau = (alpha - beta) / (2.0 * gn);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    1.0 / (tau - (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;
                let w = g / gn;
                let sw = s * w;
                let swc = s * w.conj();

                for i in 0..n {
                    if i == p || i == q {
                        continue;
                    }
                    let aip = m[i][p];
                    let aiq = m[i][q];
                    let new_ip = c * aip + swc * aiq;
                    let new_iq = -sw * aip + c * aiq;
                    m[i][p] = new_ip;
                    m[p][i] = new_ip.conj();
                    m[i][q] = new_iq;
                    m[q][i] = new_iq.conj();
                }
                m[p][p] = Complex64::new(alpha + t * gn, 0.0);
                m[q][q] = Complex64::new(beta - t * gn, 0.0);
                m[p][q] = zero;
                m[q][p] = zero;

                for row in v.iter_mut() {
                    let vip = row[p];
                    let viq = row[q];
                    row[p] = c * vip + swc * viq;
                    row[q] = -sw * vip + c * viq;
                }
            }
        }
    }

    let diag: Vec<f64> = (0..n).map(|i| m[i][i].re).collect();
    let order = argsort_ascending(&diag);
    let eigenvalues: Vec<f64> = order.iter().map(|&k| diag[k]).collect();
    let eigenvectors: Vec<Vec<Complex64>> = order
        .iter()
        .map(|&k| (0..n).map(|i| v[i][k]).collect())
        .collect();

    (eigenvalues, eigenvectors)
}
