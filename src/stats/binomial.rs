use crate::special::{lgamma, pbeta};
use crate::FloatScalar;

use super::{DiscreteDistribution, StatsError};

/// Binomial distribution B(n, p).
///
/// P(X = k) = C(n,k) p^k (1−p)^{n−k} for k = 0, …, n.
///
/// # Example
///
/// ```
/// use nmath_core::stats::{Binomial, DiscreteDistribution};
///
/// let b = Binomial::new(10, 0.5_f64).unwrap();
/// assert!((b.mean() - 5.0).abs() < 1e-14);
/// assert!((b.variance() - 2.5).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Binomial<T> {
    n: u64,
    p: T,
}

impl<T: FloatScalar> Binomial<T> {
    /// Create a binomial distribution with `n` trials and success probability `p`.
    /// Requires `0 ≤ p ≤ 1`.
    pub fn new(n: u64, p: T) -> Result<Self, StatsError> {
        let w = p.widen();
        if !(0.0..=1.0).contains(&w) {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { n, p })
    }

    /// P(X ≤ k) via P(X ≤ k) = 1 − I_p(k+1, n−k).
    fn tail(&self, k: u64, lower: bool) -> f64 {
        if k >= self.n {
            return if lower { 1.0 } else { 0.0 };
        }
        let a = (k + 1) as f64;
        let b = (self.n - k) as f64;
        pbeta(self.p.widen(), a, b, !lower, false)
    }
}

impl<T: FloatScalar> DiscreteDistribution<T> for Binomial<T> {
    fn pmf(&self, k: u64) -> T {
        self.ln_pmf(k).exp()
    }

    fn ln_pmf(&self, k: u64) -> T {
        if k > self.n {
            return T::neg_infinity();
        }
        let p = self.p.widen();
        let nf = self.n as f64;
        let kf = k as f64;
        let lp = if k == 0 { 0.0 } else { kf * p.ln() };
        let lq = if k == self.n { 0.0 } else { (nf - kf) * (-p).ln_1p() };
        T::narrow(lgamma(nf + 1.0) - lgamma(kf + 1.0) - lgamma(nf - kf + 1.0) + lp + lq)
    }

    fn cdf(&self, k: u64) -> T {
        T::narrow(self.tail(k, true))
    }

    fn sf(&self, k: u64) -> T {
        T::narrow(self.tail(k, false))
    }

    fn mean(&self) -> T {
        T::narrow(self.n as f64) * self.p
    }

    fn variance(&self) -> T {
        T::narrow(self.n as f64) * self.p * (T::one() - self.p)
    }
}
