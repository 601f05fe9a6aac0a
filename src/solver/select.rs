//! Ritz value selection from an unsorted general spectrum
//!
//! The general dense eigensolvers return their spectrum unordered, so the
//! driver needs a deterministic rule to target "the t-th eigenpair". The
//! rule used here orders by modulus, largest first, and walks downward by
//! successive displacement.

/// Index of the eigenvalue with the `num`-th largest modulus (zero-based)
/// in the spectrum given by real parts `dr` and imaginary parts `di`.
///
/// Comparisons are strict, so exact ties collapse: equal-modulus entries
/// count as one rank and the earlier index wins. When `num` exceeds the
/// number of distinct moduli the last reachable pick is returned.
pub fn find_eig(num: usize, dr: &[f64], di: &[f64]) -> usize {
    let l = dr.len();
    debug_assert_eq!(di.len(), l, "spectrum parts must have equal length");
    let mut a2 = vec![0.0f64; l];
    let mut maxj = -1.0f64;
    let mut w = 0usize;
    for i in 0..l {
        a2[i] = dr[i] * dr[i] + di[i] * di[i];
        if a2[i] > maxj {
            maxj = a2[i];
            w = i;
        }
    }
    for _ in 0..num {
        let mut nmax = -1.0f64;
        for i in 0..l {
            if a2[i] > nmax && a2[i] < maxj {
                nmax = a2[i];
                w = i;
            }
        }
        maxj = nmax;
    }
    w
}
