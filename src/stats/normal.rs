use crate::special::{dnorm, pnorm, qnorm};
use crate::FloatScalar;

use super::{ContinuousDistribution, StatsError};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Example
///
/// ```
/// use nmath_core::stats::{Normal, ContinuousDistribution};
///
/// let n = Normal::new(0.0_f64, 1.0).unwrap();
/// assert!((n.cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((n.quantile(0.975) - 1.959963984540054).abs() < 1e-13);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Normal<T> {
    mu: T,
    sigma: T,
}

impl<T: FloatScalar> Normal<T> {
    /// Create a normal distribution with mean `mu` and standard deviation `sigma`.
    ///
    /// Requires a finite `mu` and a finite `sigma > 0`.
    pub fn new(mu: T, sigma: T) -> Result<Self, StatsError> {
        if !mu.is_finite() || !(sigma > T::zero()) || !sigma.is_finite() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { mu, sigma })
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Normal<T> {
    fn pdf(&self, x: T) -> T {
        T::narrow(dnorm(x.widen(), self.mu.widen(), self.sigma.widen(), false))
    }

    fn ln_pdf(&self, x: T) -> T {
        T::narrow(dnorm(x.widen(), self.mu.widen(), self.sigma.widen(), true))
    }

    fn cdf(&self, x: T) -> T {
        T::narrow(pnorm(x.widen(), self.mu.widen(), self.sigma.widen(), true, false))
    }

    fn sf(&self, x: T) -> T {
        T::narrow(pnorm(x.widen(), self.mu.widen(), self.sigma.widen(), false, false))
    }

    fn quantile(&self, p: T) -> T {
        T::narrow(qnorm(p.widen(), self.mu.widen(), self.sigma.widen(), true, false))
    }

    fn mean(&self) -> T {
        self.mu
    }

    fn variance(&self) -> T {
        self.sigma * self.sigma
    }
}
