//! Poisson point probabilities in Loader's saddle-point form, shared by the
//! gamma density and the incomplete gamma ratio.

use core::f64::consts::{LN_2, TAU};

use log::debug;

use super::elementary::{d_exp, d_fexp, d_one, d_zero};
use super::gamma_fn::{lgamma, stirlerr};
use super::machine::F64;

/// Deviance term x·ln(x/np) + np − x, accurate when x ≈ np.
pub(crate) fn bd0(x: f64, np: f64) -> f64 {
    if !x.is_finite() || !np.is_finite() || np == 0.0 {
        debug!("bd0: invalid arguments x = {x}, np = {np}");
        return f64::NAN;
    }

    if (x - np).abs() < 0.1 * (x + np) {
        let mut v = (x - np) / (x + np);
        let mut s = (x - np) * v;
        if s.abs() < F64.min_positive {
            return s;
        }
        let mut ej = 2.0 * x * v;
        v *= v;
        for j in 1..1000 {
            ej *= v;
            let s1 = s + ej / f64::from(2 * j + 1);
            if s1 == s {
                return s1;
            }
            s = s1;
        }
    }
    x * (x / np).ln() + np - x
}

/// Poisson probability λ^x e^{−λ} / Γ(x + 1) for real x ≥ 0, with no
/// integer check.
///
/// # Example
///
/// ```
/// use nmath_core::special::dpois_raw;
///
/// // P(X = 3) for λ = 2
/// let expected = 8.0 / 6.0 * (-2.0_f64).exp();
/// assert!((dpois_raw(3.0, 2.0, false) - expected).abs() < 1e-15);
/// assert_eq!(dpois_raw(0.0, 0.0, false), 1.0);
/// ```
pub fn dpois_raw(x: f64, lambda: f64, give_log: bool) -> f64 {
    if lambda == 0.0 {
        return if x == 0.0 { d_one(give_log) } else { d_zero(give_log) };
    }
    if !lambda.is_finite() || x < 0.0 {
        return d_zero(give_log);
    }
    if x <= lambda * F64.min_positive {
        return d_exp(-lambda, give_log);
    }
    if lambda < x * F64.min_positive {
        if !x.is_finite() {
            return d_zero(give_log);
        }
        return d_exp(-lambda + x * lambda.ln() - lgamma(x + 1.0), give_log);
    }
    d_fexp(TAU * x, -stirlerr(x) - bd0(x, lambda), give_log)
}

/// `dpois_raw(x_plus_1 − 1, λ)` that stays accurate when `x_plus_1` is
/// small.
pub(crate) fn dpois_wrap(x_plus_1: f64, lambda: f64, give_log: bool) -> f64 {
    // ln 2 · max_exp / ε
    let cutoff = LN_2 * f64::from(F64.max_exp) / F64.epsilon;

    if !lambda.is_finite() {
        return d_zero(give_log);
    }
    if x_plus_1 > 1.0 {
        return dpois_raw(x_plus_1 - 1.0, lambda, give_log);
    }
    if lambda > (x_plus_1 - 1.0).abs() * cutoff {
        return d_exp(-lambda - lgamma(x_plus_1), give_log);
    }
    let d = dpois_raw(x_plus_1, lambda, give_log);
    if give_log {
        d + (x_plus_1 / lambda).ln()
    } else {
        d * (x_plus_1 / lambda)
    }
}

/// Poisson probability mass function P(X = x) for X ~ Poisson(λ).
///
/// Non-integer x (beyond a relative 1e-7) gives probability zero.
pub fn dpois(x: f64, lambda: f64, give_log: bool) -> f64 {
    if x.is_nan() || lambda.is_nan() {
        return x + lambda;
    }
    if lambda < 0.0 {
        debug!("dpois: negative lambda {lambda}");
        return f64::NAN;
    }
    if (x - x.round()).abs() > 1e-7 * x.abs().max(1.0) {
        debug!("dpois: non-integer x = {x}");
        return d_zero(give_log);
    }
    if x < 0.0 || !x.is_finite() {
        return d_zero(give_log);
    }
    dpois_raw(x.round(), lambda, give_log)
}
