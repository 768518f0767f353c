use crate::special::{dgamma, pchisq, qchisq};
use crate::FloatScalar;

use super::{positive, ContinuousDistribution, StatsError};

/// Chi-squared distribution with k degrees of freedom.
///
/// Special case of Gamma(k/2, 1/2).
///
/// # Example
///
/// ```
/// use nmath_core::stats::{ChiSquared, ContinuousDistribution};
///
/// let chi2 = ChiSquared::new(3.0_f64).unwrap();
/// assert!((chi2.mean() - 3.0).abs() < 1e-14);
/// assert!((chi2.variance() - 6.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChiSquared<T> {
    k: T, // degrees of freedom
}

impl<T: FloatScalar> ChiSquared<T> {
    /// Create a chi-squared distribution with `k` degrees of freedom. Requires a finite `k > 0`.
    pub fn new(k: T) -> Result<Self, StatsError> {
        positive(k)?;
        Ok(Self { k })
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for ChiSquared<T> {
    fn pdf(&self, x: T) -> T {
        T::narrow(dgamma(x.widen(), 0.5 * self.k.widen(), 2.0, false))
    }

    fn ln_pdf(&self, x: T) -> T {
        T::narrow(dgamma(x.widen(), 0.5 * self.k.widen(), 2.0, true))
    }

    fn cdf(&self, x: T) -> T {
        T::narrow(pchisq(x.widen(), self.k.widen(), true, false))
    }

    fn sf(&self, x: T) -> T {
        T::narrow(pchisq(x.widen(), self.k.widen(), false, false))
    }

    fn quantile(&self, p: T) -> T {
        T::narrow(qchisq(p.widen(), self.k.widen(), true, false))
    }

    fn mean(&self) -> T {
        self.k
    }

    fn variance(&self) -> T {
        self.k + self.k
    }
}
