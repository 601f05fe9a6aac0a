//! Reference dense implementations of the capability traits
//!
//! [`DenseVector`] and [`DenseOperator`] are the in-memory backing used by
//! the crate's tests, benches, and examples. They are intentionally plain:
//! a `Vec<Complex64>` and a row-major dense matrix. Production callers are
//! expected to bring their own tensor type and implicit operator; these
//! exist so the generic drivers have a concrete, inspectable instance.

use num_complex::Complex64;
use rand_distr::{Distribution, StandardNormal};

use crate::operator::LinearOperator;
use crate::tensor::Tensor;

/// Dense complex vector backing for [`Tensor`].
#[derive(Clone, Debug, PartialEq)]
pub struct DenseVector {
    data: Vec<Complex64>,
}

impl DenseVector {
    /// Vector with the given real entries.
    pub fn from_real(values: &[f64]) -> Self {
        Self {
            data: values.iter().map(|&x| Complex64::new(x, 0.0)).collect(),
        }
    }

    /// Vector taking ownership of complex entries.
    pub fn from_complex(values: Vec<Complex64>) -> Self {
        Self { data: values }
    }

    /// Zero vector of dimension `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![Complex64::new(0.0, 0.0); n],
        }
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }
}

impl Tensor for DenseVector {
    fn dim(&self) -> usize {
        self.data.len()
    }

    fn norm(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
    }

    fn inner(&self, other: &Self) -> Complex64 {
        debug_assert_eq!(self.data.len(), other.data.len());
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(x, y)| x.conj() * y)
            .sum()
    }

    fn scale(&mut self, alpha: f64) {
        for z in &mut self.data {
            *z *= alpha;
        }
    }

    fn scale_complex(&mut self, alpha: Complex64) {
        for z in &mut self.data {
            *z *= alpha;
        }
    }

    fn axpy(&mut self, alpha: f64, x: &Self) {
        debug_assert_eq!(self.data.len(), x.data.len());
        for (z, w) in self.data.iter_mut().zip(x.data.iter()) {
            *z += alpha * *w;
        }
    }

    fn axpy_complex(&mut self, alpha: Complex64, x: &Self) {
        debug_assert_eq!(self.data.len(), x.data.len());
        for (z, w) in self.data.iter_mut().zip(x.data.iter()) {
            *z += alpha * *w;
        }
    }

    fn mul_elem(&mut self, factor: &Self) {
        debug_assert_eq!(self.data.len(), factor.data.len());
        for (z, f) in self.data.iter_mut().zip(factor.data.iter()) {
            *z *= *f;
        }
    }

    fn map_real<F: Fn(f64) -> f64>(&mut self, f: F) {
        for z in &mut self.data {
            *z = Complex64::new(f(z.re), 0.0);
        }
    }

    fn randomize(&mut self) {
        // real-valued fill keeps real problems in the real field
        let mut rng = rand::rng();
        for z in &mut self.data {
            let x: f64 = StandardNormal.sample(&mut rng);
            *z = Complex64::new(x, 0.0);
        }
    }
}

/// Row-major dense matrix backing for [`LinearOperator`].
#[derive(Clone, Debug)]
pub struct DenseOperator {
    n: usize,
    data: Vec<Complex64>,
    expose_diag: bool,
}

impl DenseOperator {
    /// Operator from complex rows; panics unless the matrix is square.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Self {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in &rows {
            assert_eq!(row.len(), n, "operator matrix must be square");
            data.extend_from_slice(row);
        }
        Self {
            n,
            data,
            expose_diag: true,
        }
    }

    /// Operator from real rows.
    pub fn from_real_rows(rows: &[Vec<f64>]) -> Self {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&x| Complex64::new(x, 0.0)).collect())
                .collect(),
        )
    }

    /// Diagonal operator with the given entries.
    pub fn diagonal(values: &[f64]) -> Self {
        let n = values.len();
        let mut rows = vec![vec![Complex64::new(0.0, 0.0); n]; n];
        for (i, &val) in values.iter().enumerate() {
            rows[i][i] = Complex64::new(val, 0.0);
        }
        Self::from_rows(rows)
    }

    /// Symmetric tridiagonal operator with the given diagonal and a
    /// constant off-diagonal coupling.
    pub fn tridiagonal(diag: &[f64], off: f64) -> Self {
        let n = diag.len();
        let mut rows = vec![vec![Complex64::new(0.0, 0.0); n]; n];
        for i in 0..n {
            rows[i][i] = Complex64::new(diag[i], 0.0);
            if i + 1 < n {
                rows[i][i + 1] = Complex64::new(off, 0.0);
                rows[i + 1][i] = Complex64::new(off, 0.0);
            }
        }
        Self::from_rows(rows)
    }

    /// Hide the diagonal: `diag()` returns `None` and the drivers skip
    /// preconditioning.
    pub fn without_diag(mut self) -> Self {
        self.expose_diag = false;
        self
    }

    /// Matrix entry (i, j).
    pub fn entry(&self, i: usize, j: usize) -> Complex64 {
        self.data[i * self.n + j]
    }
}

impl LinearOperator<DenseVector> for DenseOperator {
    fn size(&self) -> usize {
        self.n
    }

    fn product(&self, x: &DenseVector) -> DenseVector {
        let xs = x.as_slice();
        debug_assert_eq!(xs.len(), self.n);
        let mut out = Vec::with_capacity(self.n);
        for i in 0..self.n {
            let row = &self.data[i * self.n..(i + 1) * self.n];
            out.push(row.iter().zip(xs.iter()).map(|(a, b)| a * b).sum());
        }
        DenseVector::from_complex(out)
    }

    fn diag(&self) -> Option<DenseVector> {
        if !self.expose_diag {
            return None;
        }
        Some(DenseVector::from_complex(
            (0..self.n).map(|i| self.entry(i, i)).collect(),
        ))
    }
}
