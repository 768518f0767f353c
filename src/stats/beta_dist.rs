use crate::special::{log_beta, pbeta};
use crate::FloatScalar;

use super::{positive, quantile_newton, ContinuousDistribution, StatsError};

/// Beta distribution with shape parameters α and β on [0, 1].
///
/// f(x) = x^{α−1} (1−x)^{β−1} / B(α, β) for 0 ≤ x ≤ 1.
///
/// # Example
///
/// ```
/// use nmath_core::stats::{Beta, ContinuousDistribution};
///
/// let b = Beta::new(2.0_f64, 5.0).unwrap();
/// assert!((b.mean() - 2.0/7.0).abs() < 1e-14);
/// assert!((b.cdf(0.5) - 0.890625).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Beta<T> {
    alpha: T,
    beta: T,
}

impl<T: FloatScalar> Beta<T> {
    /// Create a Beta distribution with shape parameters `alpha` and `beta`.
    /// Requires both finite and > 0.
    pub fn new(alpha: T, beta: T) -> Result<Self, StatsError> {
        positive(alpha)?;
        positive(beta)?;
        Ok(Self { alpha, beta })
    }

    fn ln_density(&self, x: f64) -> f64 {
        if !(0.0..=1.0).contains(&x) {
            return f64::NEG_INFINITY;
        }
        let (a, b) = (self.alpha.widen(), self.beta.widen());
        // (s − 1)·ln t with the 0·ln 0 = 0 convention at s = 1
        let term = |s: f64, t: f64| if s == 1.0 { 0.0 } else { (s - 1.0) * t.ln() };
        term(a, x) + term(b, 1.0 - x) - log_beta(a, b)
    }

    fn cdf64(&self, x: f64) -> f64 {
        pbeta(x, self.alpha.widen(), self.beta.widen(), true, false)
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Beta<T> {
    fn pdf(&self, x: T) -> T {
        T::narrow(self.ln_density(x.widen()).exp())
    }

    fn ln_pdf(&self, x: T) -> T {
        T::narrow(self.ln_density(x.widen()))
    }

    fn cdf(&self, x: T) -> T {
        T::narrow(self.cdf64(x.widen()))
    }

    fn sf(&self, x: T) -> T {
        T::narrow(pbeta(x.widen(), self.alpha.widen(), self.beta.widen(), false, false))
    }

    fn quantile(&self, p: T) -> T {
        let x0 = self.mean().widen();
        T::narrow(quantile_newton(
            |x| self.cdf64(x),
            |x| self.ln_density(x).exp(),
            p.widen(),
            x0,
            0.0,
            1.0,
        ))
    }

    fn mean(&self) -> T {
        self.alpha / (self.alpha + self.beta)
    }

    fn variance(&self) -> T {
        let ab = self.alpha + self.beta;
        self.alpha * self.beta / (ab * ab * (ab + T::one()))
    }
}
