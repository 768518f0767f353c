use crate::special::{dgamma, pgamma, qgamma};
use crate::FloatScalar;

use super::{positive, ContinuousDistribution, StatsError};

/// Exponential distribution with rate λ.
///
/// f(x) = λ exp(−λx) for x ≥ 0, i.e. Gamma(1, λ).
///
/// # Example
///
/// ```
/// use nmath_core::stats::{Exponential, ContinuousDistribution};
///
/// let e = Exponential::new(2.0_f64).unwrap();
/// assert!((e.mean() - 0.5).abs() < 1e-14);
/// assert!((e.cdf(0.0)).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Exponential<T> {
    lambda: T,
}

impl<T: FloatScalar> Exponential<T> {
    /// Create an exponential distribution with rate `lambda`. Requires a finite `lambda > 0`.
    pub fn new(lambda: T) -> Result<Self, StatsError> {
        positive(lambda)?;
        Ok(Self { lambda })
    }

    fn scale(&self) -> f64 {
        1.0 / self.lambda.widen()
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Exponential<T> {
    fn pdf(&self, x: T) -> T {
        T::narrow(dgamma(x.widen(), 1.0, self.scale(), false))
    }

    fn ln_pdf(&self, x: T) -> T {
        T::narrow(dgamma(x.widen(), 1.0, self.scale(), true))
    }

    fn cdf(&self, x: T) -> T {
        T::narrow(pgamma(x.widen(), 1.0, self.scale(), true, false))
    }

    fn sf(&self, x: T) -> T {
        T::narrow(pgamma(x.widen(), 1.0, self.scale(), false, false))
    }

    fn quantile(&self, p: T) -> T {
        T::narrow(qgamma(p.widen(), 1.0, self.scale(), true, false))
    }

    fn mean(&self) -> T {
        T::one() / self.lambda
    }

    fn variance(&self) -> T {
        T::one() / (self.lambda * self.lambda)
    }
}
