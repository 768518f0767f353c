//! Probability distributions backed by the [`special`](crate::special) kernels.
//!
//! Each distribution implements [`ContinuousDistribution`] or
//! [`DiscreteDistribution`]. Parameters and arguments are generic over
//! [`FloatScalar`]; every evaluation is widened to `f64`, handed to the
//! matching kernel, and narrowed back.
//!
//! # Continuous distributions
//!
//! | Distribution | Parameters | Support | Kernels |
//! |---|---|---|---|
//! | [`Normal`] | mean μ, std dev σ | (−∞, ∞) | `pnorm`, `qnorm`, `dnorm` |
//! | [`Exponential`] | rate λ | [0, ∞) | `pgamma`, `qgamma`, `dgamma` |
//! | [`Gamma`] | shape α, rate β | (0, ∞) | `pgamma`, `qgamma`, `dgamma` |
//! | [`ChiSquared`] | degrees of freedom k | [0, ∞) | `pchisq`, `qchisq`, `dgamma` |
//! | [`Beta`] | shape α, shape β | [0, 1] | `pbeta` |
//! | [`StudentT`] | degrees of freedom ν | (−∞, ∞) | `pbeta` |
//!
//! # Discrete distributions
//!
//! | Distribution | Parameters | Support | Kernels |
//! |---|---|---|---|
//! | [`Binomial`] | trials n, probability p | {0, …, n} | `pbeta`, `lgamma` |
//! | [`Poisson`] | rate λ | {0, 1, 2, …} | `dpois`, `pgamma` |
//!
//! # Example
//!
//! ```
//! use nmath_core::stats::{Gamma, ContinuousDistribution};
//!
//! let g = Gamma::new(3.0_f64, 2.0).unwrap();
//! let q = g.quantile(0.9);
//! assert!((g.cdf(q) - 0.9).abs() < 1e-12);
//! assert!((g.sf(q) - 0.1).abs() < 1e-12);
//! ```

use core::fmt;

mod beta_dist;
mod binomial;
mod chi_squared;
mod exponential;
mod gamma_dist;
mod normal;
mod poisson;
mod student_t;

#[cfg(test)]
mod tests;

pub use beta_dist::Beta;
pub use binomial::Binomial;
pub use chi_squared::ChiSquared;
pub use exponential::Exponential;
pub use gamma_dist::Gamma;
pub use normal::Normal;
pub use poisson::Poisson;
pub use student_t::StudentT;

use crate::traits::FloatScalar;

/// Errors from distribution construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// A parameter is out of its valid range.
    InvalidParameter,
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::InvalidParameter => {
                write!(f, "distribution parameter out of valid range")
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Trait for continuous probability distributions.
pub trait ContinuousDistribution<T> {
    /// Probability density function.
    fn pdf(&self, x: T) -> T;
    /// Natural log of the probability density function.
    fn ln_pdf(&self, x: T) -> T;
    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: T) -> T;
    /// Survival function P(X > x), computed without cancellation.
    fn sf(&self, x: T) -> T;
    /// Quantile function (inverse CDF). Returns x such that P(X ≤ x) = p.
    fn quantile(&self, p: T) -> T;
    /// Expected value E\[X\].
    fn mean(&self) -> T;
    /// Variance Var(X).
    fn variance(&self) -> T;
}

/// Trait for discrete probability distributions.
pub trait DiscreteDistribution<T> {
    /// Probability mass function P(X = k).
    fn pmf(&self, k: u64) -> T;
    /// Natural log of the probability mass function.
    fn ln_pmf(&self, k: u64) -> T;
    /// Cumulative distribution function P(X ≤ k).
    fn cdf(&self, k: u64) -> T;
    /// Survival function P(X > k).
    fn sf(&self, k: u64) -> T;
    /// Expected value E\[X\].
    fn mean(&self) -> T;
    /// Variance Var(X).
    fn variance(&self) -> T;
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Newton-Raphson with bisection fallback, in `f64`, for distributions with
/// no closed-form or kernel quantile.
pub(crate) fn quantile_newton(
    cdf_fn: impl Fn(f64) -> f64,
    pdf_fn: impl Fn(f64) -> f64,
    p: f64,
    x0: f64,
    mut lo: f64,
    mut hi: f64,
) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return lo;
    }
    if p == 1.0 {
        return hi;
    }

    let tol = f64::EPSILON * 64.0;
    let mut x = x0.max(lo).min(hi);

    for _ in 0..200 {
        let f = cdf_fn(x) - p;
        if f.abs() < tol {
            return x;
        }
        if f < 0.0 {
            lo = x;
        } else {
            hi = x;
        }
        let fprime = pdf_fn(x);
        let x_new = x - f / fprime;
        x = if fprime > f64::EPSILON && x_new > lo && x_new < hi {
            x_new
        } else {
            0.5 * (lo + hi)
        };
        if hi - lo <= f64::EPSILON * x.abs() {
            return x;
        }
    }
    log::warn!("quantile_newton: no convergence for p = {p}, returning {x}");
    x
}

/// Validate a positive finite parameter.
pub(crate) fn positive<T: FloatScalar>(v: T) -> Result<f64, StatsError> {
    let w = v.widen();
    if w > 0.0 && w.is_finite() {
        Ok(w)
    } else {
        Err(StatsError::InvalidParameter)
    }
}
