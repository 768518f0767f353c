//! Floating-point machine constants.

/// Machine parameters of a binary floating-point format.
///
/// Only the IEEE-754 double record [`F64`] is provided; the approximations in
/// this crate are tuned for 53-bit significands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Machine {
    /// Distance from 1.0 to the next larger representable number.
    pub epsilon: f64,
    /// Smallest positive normal number.
    pub min_positive: f64,
    /// Largest finite number.
    pub max_value: f64,
    /// One more than the smallest normal binary exponent.
    pub min_exp: i32,
    /// One more than the largest binary exponent.
    pub max_exp: i32,
}

/// IEEE-754 binary64.
pub const F64: Machine = Machine {
    epsilon: f64::EPSILON,
    min_positive: f64::MIN_POSITIVE,
    max_value: f64::MAX,
    min_exp: f64::MIN_EXP,
    max_exp: f64::MAX_EXP,
};

impl Machine {
    /// Largest `w` for which `exp(w)` is finite (with a 1e-5 relative margin).
    #[inline]
    pub fn exp_arg_max(&self) -> f64 {
        f64::from(self.max_exp) * core::f64::consts::LN_2 * 0.99999
    }

    /// Most negative `w` for which `exp(w)` is a normal number (same margin).
    #[inline]
    pub fn exp_arg_min(&self) -> f64 {
        f64::from(self.min_exp - 1) * core::f64::consts::LN_2 * 0.99999
    }

    /// Threshold below which a linear-scale probability has lost precision
    /// to gradual underflow: `min_positive / epsilon`.
    #[inline]
    pub fn underflow_guard(&self) -> f64 {
        self.min_positive / self.epsilon
    }
}
