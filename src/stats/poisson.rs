use crate::special::{dpois, pgamma};
use crate::FloatScalar;

use super::{positive, DiscreteDistribution, StatsError};

/// Poisson distribution with rate λ.
///
/// P(X = k) = λ^k e^{−λ} / k! for k = 0, 1, 2, …
///
/// # Example
///
/// ```
/// use nmath_core::stats::{Poisson, DiscreteDistribution};
///
/// let p = Poisson::new(3.0_f64).unwrap();
/// assert!((p.mean() - 3.0).abs() < 1e-14);
/// assert!((p.pmf(0) - (-3.0_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Poisson<T> {
    lambda: T,
}

impl<T: FloatScalar> Poisson<T> {
    /// Create a Poisson distribution with rate `lambda`. Requires a finite `lambda > 0`.
    pub fn new(lambda: T) -> Result<Self, StatsError> {
        positive(lambda)?;
        Ok(Self { lambda })
    }
}

impl<T: FloatScalar> DiscreteDistribution<T> for Poisson<T> {
    fn pmf(&self, k: u64) -> T {
        T::narrow(dpois(k as f64, self.lambda.widen(), false))
    }

    fn ln_pmf(&self, k: u64) -> T {
        T::narrow(dpois(k as f64, self.lambda.widen(), true))
    }

    fn cdf(&self, k: u64) -> T {
        // P(X ≤ k) = Q(k+1, λ)
        T::narrow(pgamma(self.lambda.widen(), k as f64 + 1.0, 1.0, false, false))
    }

    fn sf(&self, k: u64) -> T {
        T::narrow(pgamma(self.lambda.widen(), k as f64 + 1.0, 1.0, true, false))
    }

    fn mean(&self) -> T {
        self.lambda
    }

    fn variance(&self) -> T {
        self.lambda
    }
}
