//! Diagonal preconditioner functors
//!
//! Applied element-wise to a copy of the operator diagonal; the resulting
//! tensor multiplies the residual element-wise to produce the next search
//! direction.

/// The mapping `x ↦ 1/(θ - x)` with a guard at the pole.
///
/// Mapping the operator diagonal through this functor yields the diagonal
/// approximation to `(θI - A)⁻¹` used on Davidson residuals; at a pole the
/// guard zeroes the corresponding residual component instead of letting
/// it blow up.
#[derive(Debug, Clone, Copy)]
pub struct DavidsonPrecond {
    theta: f64,
}

impl DavidsonPrecond {
    /// Preconditioner centered at the current Ritz value `theta`.
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Apply the mapping to one diagonal entry; returns 0 when `theta`
    /// equals the entry exactly.
    pub fn apply(&self, val: f64) -> f64 {
        if self.theta == val {
            0.0
        } else {
            1.0 / (self.theta - val)
        }
    }
}

/// The constant mapping `x ↦ 1/(θ - 1 + 1e-33)`.
///
/// A Lanczos-style uniform rescaling of the residual; kept for callers
/// that want a diagonal-free preconditioner, not used by the drivers.
#[derive(Debug, Clone, Copy)]
pub struct LanczosPrecond {
    theta: f64,
}

impl LanczosPrecond {
    /// Preconditioner centered at `theta`.
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Apply the mapping; the input entry is ignored.
    pub fn apply(&self, _val: f64) -> f64 {
        1.0 / (self.theta - 1.0 + 1e-33)
    }
}
