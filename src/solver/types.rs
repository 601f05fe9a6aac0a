//! Options for the eigensolver drivers

// ============================================================================
// Davidson Options
// ============================================================================

/// Configuration options for the Davidson drivers.
#[derive(Debug, Clone)]
pub struct DavidsonOptions {
    /// Outer iterations per target eigenpair (default: 2)
    ///
    /// The effective limit is `min(max_iter, A.size() - 1)`: the basis can
    /// never hold more linearly independent vectors than the space has.
    pub max_iter: usize,

    /// Floor on iterations before convergence is accepted (default: 1)
    pub min_iter: usize,

    /// Convergence threshold on both the residual norm and the change of
    /// the Ritz value between iterations (default: 1e-4)
    pub err_goal: f64,

    /// Verbosity (default: -1)
    ///
    /// Values >= 1, 2, 3 progressively emit per-iteration energies,
    /// subspace sizes, and final orthogonality checks through `tracing`.
    pub debug_level: i32,

    /// Assume the operator is Hermitian (default: true)
    ///
    /// Enables the Hermitian fast path: an ascending real spectrum from
    /// the projection, half the inner products per basis expansion, and
    /// direct targeting by index.
    pub hermitian: bool,
}

impl Default for DavidsonOptions {
    fn default() -> Self {
        Self {
            max_iter: 2,
            min_iter: 1,
            err_goal: 1e-4,
            debug_level: -1,
            hermitian: true,
        }
    }
}

// ============================================================================
// Generalized Davidson Options
// ============================================================================

/// Configuration options for the generalized driver solving A φ = λ B φ.
#[derive(Debug, Clone)]
pub struct GenDavidsonOptions {
    /// Outer iterations (default: 2); effectively capped at `A.size()`
    pub max_iter: usize,

    /// Convergence threshold on residual norm and Ritz-value change
    /// (default: 1e-4)
    pub err_goal: f64,

    /// Verbosity (default: -1); same scale as [`DavidsonOptions`]
    pub debug_level: i32,

    /// Plain Gram-Schmidt of new directions against the basis
    /// (default: false)
    ///
    /// The projected overlap N absorbs any residual non-orthogonality on
    /// the next projection, so this is optional; it helps when B is close
    /// to the identity and costs no operator applications.
    pub gram_schmidt: bool,
}

impl Default for GenDavidsonOptions {
    fn default() -> Self {
        Self {
            max_iter: 2,
            err_goal: 1e-4,
            debug_level: -1,
            gram_schmidt: false,
        }
    }
}

// ============================================================================
// Power Method Options
// ============================================================================

/// Configuration options for the deflated power method.
#[derive(Debug, Clone)]
pub struct PowerMethodOptions {
    /// Inner iterations per eigenvector (default: 1000)
    pub max_iter: usize,

    /// Convergence threshold on the change of the eigenvalue estimate
    /// (default: 1e-4)
    pub err_goal: f64,

    /// Verbosity (default: 0); >= 1 traces every iteration
    pub debug_level: i32,
}

impl Default for PowerMethodOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            err_goal: 1e-4,
            debug_level: 0,
        }
    }
}
