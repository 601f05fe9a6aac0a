//! Real symmetric eigensolver using cyclic Jacobi sweeps

use super::argsort_ascending;

/// Solve the real symmetric eigenvalue problem.
///
/// Only the lower triangle of `a` is read; the matrix is symmetrized from
/// it. Returns `(eigenvalues, eigenvectors)` with eigenvalues sorted
/// ascending and `eigenvectors[i][j]` the j-th component of the i-th
/// (unit-norm) eigenvector.
pub fn sym_eig(a: &[Vec<f64>]) -> (Vec<f64>, Vec<Vec<f64>>) {
    let n = a.len();
    if n == 0 {
        return (vec![], vec![]);
    }
    if n == 1 {
        return (vec![a[0][0]], vec![vec![1.0]]);
    }

    // Working copy, symmetrized from the lower triangle
    let mut w = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let val = a[i][j];
            w[i][j] = val;
            w[j][i] = val;
        }
    }

    let mut v = vec![vec![0.0f64; n]; n];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    let scale = w
        .iter()
        .flatten()
        .fold(0.0f64, |acc, x| acc.max(x.abs()))
        .max(1e-300);
    let tol = (n as f64) * f64::EPSILON * scale;
    let max_sweeps = 30;

    for _sweep in 0..max_sweeps {
        let mut max_off = 0.0f64;
        for i in 0..n {
            for j in (i + 1)..n {
                max_off = max_off.max(w[i][j].abs());
            }
        }
        if max_off < tol {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let g = w[p][q];
                let gn = g.abs();
                if gn < tol * 0.01 {
                    continue;
                }
                let sign = if g >= 0.0 { 1.0 } else { -1.0 };
                let alpha = w[p][p];
                let beta = w[q][q];
                let tau = (alpha - beta) / (2.0 * gn);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    1.0 / (tau - (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c * sign;

                for i in 0..n {
                    if i == p || i == q {
                        continue;
                    }
                    let wip = w[i][p];
                    let wiq = w[i][q];
                    let new_ip = c * wip + s * wiq;
                    let new_iq = -s * wip + c * wiq;
                    w[i][p] = new_ip;
                    w[p][i] = new_ip;
                    w[i][q] = new_iq;
                    w[q][i] = new_iq;
                }
                w[p][p] = alpha + t * gn;
                w[q][q] = beta - t * gn;
                w[p][q] = 0.0;
                w[q][p] = 0.0;

                for row in v.iter_mut() {
                    let vip = row[p];
                    let viq = row[q];
                    row[p] = c * vip + s * viq;
                    row[q] = -s * vip + c * viq;
                }
            }
        }
    }

    let diag: Vec<f64> = (0..n).map(|i| w[i][i]).collect();
    let order = argsort_ascending(&diag);
    let eigenvalues: Vec<f64> = order.iter().map(|&k| diag[k]).collect();
    let eigenvectors: Vec<Vec<f64>> = order
        .iter()
        .map(|&k| (0..n).map(|i| v[i][k]).collect())
        .collect();

    (eigenvalues, eigenvectors)
}
