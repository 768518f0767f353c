use crate::special::{dgamma, pgamma, qgamma};
use crate::FloatScalar;

use super::{positive, ContinuousDistribution, StatsError};

/// Gamma distribution with shape α and rate β.
///
/// f(x) = β^α x^{α−1} e^{−βx} / Γ(α) for x > 0.
///
/// The scale parameter is θ = 1/β; the kernels are called with θ.
///
/// # Example
///
/// ```
/// use nmath_core::stats::{Gamma, ContinuousDistribution};
///
/// let g = Gamma::new(2.0_f64, 1.0).unwrap();
/// assert!((g.mean() - 2.0).abs() < 1e-14);
/// assert!((g.variance() - 2.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Gamma<T> {
    shape: T, // α > 0
    rate: T,  // β > 0
}

impl<T: FloatScalar> Gamma<T> {
    /// Create a Gamma distribution with `shape` α and `rate` β.
    /// Requires both finite and > 0. Scale = 1/rate.
    pub fn new(shape: T, rate: T) -> Result<Self, StatsError> {
        positive(shape)?;
        positive(rate)?;
        Ok(Self { shape, rate })
    }

    fn scale(&self) -> f64 {
        1.0 / self.rate.widen()
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Gamma<T> {
    fn pdf(&self, x: T) -> T {
        T::narrow(dgamma(x.widen(), self.shape.widen(), self.scale(), false))
    }

    fn ln_pdf(&self, x: T) -> T {
        T::narrow(dgamma(x.widen(), self.shape.widen(), self.scale(), true))
    }

    fn cdf(&self, x: T) -> T {
        T::narrow(pgamma(x.widen(), self.shape.widen(), self.scale(), true, false))
    }

    fn sf(&self, x: T) -> T {
        T::narrow(pgamma(x.widen(), self.shape.widen(), self.scale(), false, false))
    }

    fn quantile(&self, p: T) -> T {
        T::narrow(qgamma(p.widen(), self.shape.widen(), self.scale(), true, false))
    }

    fn mean(&self) -> T {
        self.shape / self.rate
    }

    fn variance(&self) -> T {
        self.shape / (self.rate * self.rate)
    }
}
