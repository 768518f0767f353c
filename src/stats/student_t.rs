use crate::special::{log_beta, pbeta, qnorm};
use crate::FloatScalar;

use super::{positive, quantile_newton, ContinuousDistribution, StatsError};

/// Student's t-distribution with ν degrees of freedom.
///
/// Both tails come from the incomplete beta ratio,
/// P(|T| > t) = I_{ν/(ν+t²)}(ν/2, 1/2).
///
/// # Example
///
/// ```
/// use nmath_core::stats::{StudentT, ContinuousDistribution};
///
/// let t = StudentT::new(10.0_f64).unwrap();
/// assert!((t.mean()).abs() < 1e-14);
/// assert!((t.variance() - 10.0/8.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StudentT<T> {
    df: T, // ν > 0
}

impl<T: FloatScalar> StudentT<T> {
    /// Create a Student's t-distribution with `df` degrees of freedom.
    /// Requires a finite `df > 0`.
    pub fn new(df: T) -> Result<Self, StatsError> {
        positive(df)?;
        Ok(Self { df })
    }

    /// P(T > |x|).
    fn half_tail(&self, x: f64) -> f64 {
        let n = self.df.widen();
        if x.is_infinite() {
            return 0.0;
        }
        let x2 = x * x;
        let both = if n > x2 {
            pbeta(x2 / (n + x2), 0.5, 0.5 * n, false, false)
        } else {
            pbeta(n / (n + x2), 0.5 * n, 0.5, true, false)
        };
        0.5 * both
    }

    fn cdf64(&self, x: f64) -> f64 {
        if x.is_nan() {
            return x;
        }
        let t = self.half_tail(x);
        if x > 0.0 {
            1.0 - t
        } else {
            t
        }
    }

    fn ln_density(&self, x: f64) -> f64 {
        let n = self.df.widen();
        -0.5 * n.ln() - log_beta(0.5 * n, 0.5) - 0.5 * (n + 1.0) * (x * x / n).ln_1p()
    }

    /// Upper quantile for p > 1/2, bracketed by doubling.
    fn upper_quantile(&self, p: f64) -> f64 {
        let mut hi = 1.0;
        while self.half_tail(hi) > 1.0 - p && hi < f64::MAX / 2.0 {
            hi *= 2.0;
        }
        let x0 = qnorm(p, 0.0, 1.0, true, false).min(hi);
        quantile_newton(
            |x| self.cdf64(x),
            |x| self.ln_density(x).exp(),
            p,
            x0,
            0.0,
            hi,
        )
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for StudentT<T> {
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
        T::narrow(self.cdf64(-x.widen()))
    }

    fn quantile(&self, p: T) -> T {
        let p = p.widen();
        let q = if p.is_nan() || !(0.0..=1.0).contains(&p) {
            f64::NAN
        } else if p == 0.0 {
            f64::NEG_INFINITY
        } else if p == 1.0 {
            f64::INFINITY
        } else if p == 0.5 {
            0.0
        } else if p > 0.5 {
            self.upper_quantile(p)
        } else {
            -self.upper_quantile(1.0 - p)
        };
        T::narrow(q)
    }

    fn mean(&self) -> T {
        if self.df > T::one() {
            T::zero()
        } else {
            T::nan()
        }
    }

    fn variance(&self) -> T {
        let one = T::one();
        let two = one + one;
        if self.df > two {
            self.df / (self.df - two)
        } else if self.df > one {
            T::infinity()
        } else {
            T::nan()
        }
    }
}
