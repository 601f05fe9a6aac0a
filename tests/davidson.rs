//! Integration tests for the Davidson drivers

use eigr::reference::{DenseOperator, DenseVector};
use eigr::{block_davidson, complex_davidson, davidson, DavidsonOptions, Error, Tensor};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_guess(n: usize, rng: &mut ChaCha8Rng) -> DenseVector {
    let values: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    DenseVector::from_real(&values)
}

/// Residual norm ||A·phi - lambda·phi||
fn residual_norm(a: &DenseOperator, phi: &DenseVector, lambda: f64) -> f64 {
    use eigr::LinearOperator;
    let mut r = a.product(phi);
    r.axpy(-lambda, phi);
    r.norm()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn two_by_two_diagonal() {
    let a = DenseOperator::diagonal(&[1.0, 2.0]);
    let s = 1.0 / 2.0f64.sqrt();
    let mut phi = DenseVector::from_real(&[s, s]);
    let opts = DavidsonOptions {
        err_goal: 1e-6,
        ..Default::default()
    };
    let lambda = davidson(&a, &mut phi, &opts).expect("davidson");
    assert!((lambda - 1.0).abs() < 1e-6, "lambda = {lambda}");
    // eigenvector is ±e1
    assert!(phi.as_slice()[0].norm() > 1.0 - 1e-6);
    assert!(phi.as_slice()[1].norm() < 1e-5);
}

#[test]
fn harmonic_oscillator_tridiagonal() {
    let n = 50;
    let diag: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();
    let a = DenseOperator::tridiagonal(&diag, -0.1);
    // localized guess with noise: the operating mode of this solver
    // inside sweeps is a decent approximation, not a uniform random
    // vector (from which the minimal Ritz value has to walk down the
    // whole spectrum one level per iteration)
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut values = vec![1.0f64];
    values.extend((1..n).map(|_| 0.05 * rng.random_range(-1.0..1.0)));
    let mut phi = DenseVector::from_real(&values);
    let opts = DavidsonOptions {
        max_iter: 20,
        err_goal: 1e-6,
        ..Default::default()
    };
    let lambda = davidson(&a, &mut phi, &opts).expect("davidson");

    // direct dense reference on the same matrix
    let mut rows = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        rows[i][i] = diag[i];
        if i + 1 < n {
            rows[i][i + 1] = -0.1;
            rows[i + 1][i] = -0.1;
        }
    }
    let (dense, _) = eigr::dense::sym_eig(&rows);
    assert!(
        (lambda - dense[0]).abs() < 1e-5,
        "lambda = {lambda}, dense = {}",
        dense[0]
    );
    // ground state sits just below the lowest diagonal entry,
    // 0.5 - 0.1^2/1 + O(1e-4) by perturbation theory
    assert!((lambda - 0.49005).abs() < 1e-3);
    assert!(residual_norm(&a, &phi, lambda) <= 1e-5);
}

#[test]
fn block_three_targets_on_diagonal() {
    let n = 10;
    let a = DenseOperator::diagonal(&(1..=n).map(|i| i as f64).collect::<Vec<_>>());
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut phi: Vec<DenseVector> = (0..3).map(|_| random_guess(n, &mut rng)).collect();
    let opts = DavidsonOptions {
        max_iter: 20,
        err_goal: 1e-6,
        ..Default::default()
    };
    let eigs = block_davidson(&a, &mut phi, &opts).expect("block davidson");
    for (j, eig) in eigs.iter().enumerate() {
        let want = (j + 1) as f64;
        assert!(
            (eig - want).abs() < 1e-4,
            "eigenvalue {j}: got {eig}, want {want}"
        );
        // aligned with the j-th coordinate axis up to sign
        let nrm = phi[j].norm();
        assert!(
            phi[j].as_slice()[j].norm() / nrm > 0.99,
            "eigenvector {j} not aligned with axis {j}"
        );
    }
}

#[test]
fn non_hermitian_skew_targets_largest_modulus() {
    // eigenvalues 0 and ±i·sqrt(2); zero diagonal, so preconditioning off
    let a = DenseOperator::from_real_rows(&[
        vec![0.0, 1.0, 0.0],
        vec![-1.0, 0.0, 1.0],
        vec![0.0, -1.0, 0.0],
    ])
    .without_diag();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut phi = vec![random_guess(3, &mut rng)];
    let opts = DavidsonOptions {
        max_iter: 10,
        err_goal: 1e-6,
        hermitian: false,
        ..Default::default()
    };
    let eigs = complex_davidson(&a, &mut phi, &opts).expect("complex davidson");
    let lambda = eigs[0];
    assert!(
        (lambda.norm() - 2.0f64.sqrt()).abs() < 1e-8,
        "targeted Ritz value {lambda} should have the largest modulus"
    );
    assert!(lambda.re.abs() < 1e-8, "spectrum is purely imaginary");
}

// ============================================================================
// Boundary cases
// ============================================================================

#[test]
fn one_dimensional_operator() {
    let a = DenseOperator::diagonal(&[7.5]);
    let mut phi = DenseVector::from_real(&[2.0]);
    let lambda = davidson(&a, &mut phi, &DavidsonOptions::default()).expect("davidson");
    assert!((lambda - 7.5).abs() < 1e-12);
}

#[test]
fn zero_iterations_returns_rayleigh_quotient() {
    let a = DenseOperator::diagonal(&[2.0, 3.0, 4.0]);
    let mut phi = DenseVector::from_real(&[1.0, 1.0, 1.0]);
    let opts = DavidsonOptions {
        max_iter: 0,
        ..Default::default()
    };
    let lambda = davidson(&a, &mut phi, &opts).expect("davidson");
    assert!((lambda - 3.0).abs() < 1e-12, "lambda = {lambda}");
}

#[test]
fn null_diag_still_converges() {
    let diag: Vec<f64> = (1..=5).map(|i| i as f64).collect();
    let a = DenseOperator::tridiagonal(&diag, 0.05).without_diag();
    let mut rng = ChaCha8Rng::seed_from_u64(19);
    let mut phi = random_guess(5, &mut rng);
    let opts = DavidsonOptions {
        max_iter: 10,
        err_goal: 1e-6,
        ..Default::default()
    };
    let lambda = davidson(&a, &mut phi, &opts).expect("davidson");

    let mut rows = vec![vec![0.0f64; 5]; 5];
    for i in 0..5 {
        rows[i][i] = diag[i];
        if i + 1 < 5 {
            rows[i][i + 1] = 0.05;
            rows[i + 1][i] = 0.05;
        }
    }
    let (dense, _) = eigr::dense::sym_eig(&rows);
    assert!((lambda - dense[0]).abs() < 1e-6);
    assert!(residual_norm(&a, &phi, lambda) < 1e-4);
}

#[test]
fn more_targets_than_dimensions_terminates() {
    let a = DenseOperator::diagonal(&[1.0, 2.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let mut phi: Vec<DenseVector> = (0..3).map(|_| random_guess(2, &mut rng)).collect();
    let opts = DavidsonOptions {
        err_goal: 1e-6,
        ..Default::default()
    };
    let eigs = block_davidson(&a, &mut phi, &opts).expect("block davidson");
    assert!((eigs[0] - 1.0).abs() < 1e-6);
    assert!((eigs[1] - 2.0).abs() < 1e-6);
    // nothing left to estimate the third pair from
    assert!(eigs[2].is_nan());
}

#[test]
fn idempotent_on_converged_pair() {
    let a = DenseOperator::diagonal(&[1.0, 2.0]);
    let s = 1.0 / 2.0f64.sqrt();
    let mut phi = DenseVector::from_real(&[s, s]);
    let opts = DavidsonOptions {
        err_goal: 1e-8,
        ..Default::default()
    };
    let lambda1 = davidson(&a, &mut phi, &opts).expect("first solve");
    let rerun_opts = DavidsonOptions {
        err_goal: 1e-8,
        min_iter: 0,
        ..Default::default()
    };
    let lambda2 = davidson(&a, &mut phi, &rerun_opts).expect("second solve");
    assert!(
        (lambda1 - lambda2).abs() < 1e-12,
        "lambda drifted: {lambda1} vs {lambda2}"
    );
}

#[test]
fn hermitian_complex_operator_real_spectrum() {
    use num_complex::Complex64;
    let i = Complex64::new(0.0, 1.0);
    let z = |x: f64| Complex64::new(x, 0.0);
    let a = DenseOperator::from_rows(vec![
        vec![z(1.0), i, z(0.0)],
        vec![-i, z(2.0), i],
        vec![z(0.0), -i, z(3.0)],
    ]);
    let mut phi = DenseVector::from_real(&[1.0, 0.5, 0.25]);
    let opts = DavidsonOptions {
        max_iter: 10,
        err_goal: 1e-8,
        ..Default::default()
    };
    let eigs = complex_davidson(&a, std::slice::from_mut(&mut phi), &opts).expect("davidson");
    // Hermitian path commits an exactly real Ritz value
    assert_eq!(eigs[0].im, 0.0);

    let ar = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 2.0, 0.0],
        vec![0.0, 0.0, 3.0],
    ];
    let ai = vec![
        vec![0.0, 0.0, 0.0],
        vec![-1.0, 0.0, 0.0],
        vec![0.0, -1.0, 0.0],
    ];
    let (dense, _) = eigr::dense::herm_eig(&ar, &ai);
    assert!(
        (eigs[0].re - dense[0]).abs() < 1e-8,
        "lambda = {}, dense = {}",
        eigs[0].re,
        dense[0]
    );

    use eigr::LinearOperator;
    let mut r = a.product(&phi);
    r.axpy(-eigs[0].re, &phi);
    assert!(r.norm() < 1e-7, "residual {}", r.norm());
}

#[test]
fn default_iteration_limit_is_best_effort() {
    // with the default two outer iterations the pair is not converged,
    // but the best current estimate still comes back
    let n = 50;
    let diag: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();
    let a = DenseOperator::tridiagonal(&diag, -0.1);
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let mut phi = random_guess(n, &mut rng);
    let mut seed = phi.clone();
    seed.scale(1.0 / seed.norm());
    let ray0 = {
        use eigr::LinearOperator;
        seed.inner(&a.product(&seed)).re
    };
    let lambda = davidson(&a, &mut phi, &DavidsonOptions::default()).expect("davidson");
    assert!(lambda.is_finite());
    assert!(
        lambda <= ray0 + 1e-10,
        "estimate {lambda} should not exceed the seed Rayleigh quotient {ray0}"
    );
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn rejects_empty_guess_list() {
    let a = DenseOperator::diagonal(&[1.0, 2.0]);
    let mut phi: Vec<DenseVector> = vec![];
    let err = block_davidson(&a, &mut phi, &DavidsonOptions::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyInitialGuess));
}

#[test]
fn rejects_zero_norm_guess() {
    let a = DenseOperator::diagonal(&[1.0, 2.0]);
    let mut phi = DenseVector::zeros(2);
    let err = davidson(&a, &mut phi, &DavidsonOptions::default()).unwrap_err();
    assert!(matches!(err, Error::ZeroNormGuess { index: 0 }));
}

#[test]
fn rejects_dimension_mismatch() {
    let a = DenseOperator::diagonal(&[1.0, 2.0, 3.0]);
    let mut phi = DenseVector::from_real(&[1.0, 1.0]);
    let err = davidson(&a, &mut phi, &DavidsonOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 3,
            got: 2
        }
    ));
}
