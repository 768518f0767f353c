//! Beta function, log-beta and the correction terms behind them.

use super::elementary::alnrel;
use super::gamma_fn::{log_gamma, log_gamma1p, stirling_series, STIRLING};

/// Beta function B(a, b) = Γ(a)·Γ(b) / Γ(a+b).
///
/// Computed as `exp(log_beta(a, b))`.
///
/// # Example
///
/// ```
/// use nmath_core::special::beta;
///
/// assert!((beta(1.0, 1.0) - 1.0).abs() < 1e-14);
/// assert!((beta(2.0, 3.0) - 1.0 / 12.0).abs() < 1e-14);
/// ```
pub fn beta(a: f64, b: f64) -> f64 {
    log_beta(a, b).exp()
}

/// ln B(a, b) for a, b > 0.
///
/// Avoids the cancellation of `lgamma(a) + lgamma(b) − lgamma(a+b)` by
/// reducing the smaller argument toward [1, 2] with exact products and
/// switching to Stirling corrections ([`bcorr`], [`algdiv`]) when either
/// argument reaches 8.
///
/// # Example
///
/// ```
/// use nmath_core::special::log_beta;
///
/// // B(2, 3) = 1/12
/// assert!((log_beta(2.0, 3.0) + 12.0_f64.ln()).abs() < 1e-14);
/// // symmetric
/// assert_eq!(log_beta(0.3, 70.0), log_beta(70.0, 0.3));
/// ```
pub fn log_beta(a0: f64, b0: f64) -> f64 {
    // ln √(2π)
    const E: f64 = 0.918938533204673;

    if a0.is_nan() || b0.is_nan() {
        return a0 + b0;
    }
    let mut a = a0.min(b0);
    let mut b = a0.max(b0);
    if a < 0.0 {
        return f64::NAN;
    }
    if a == 0.0 {
        return f64::INFINITY;
    }

    if a >= 8.0 {
        let w = bcorr(a, b);
        let h = a / b;
        let u = -(a - 0.5) * (h / (h + 1.0)).ln();
        let v = b * alnrel(h);
        return if u > v {
            b.ln() * -0.5 + E + w - v - u
        } else {
            b.ln() * -0.5 + E + w - u - v
        };
    }

    if a < 1.0 {
        if b < 8.0 {
            return log_gamma(a) + (log_gamma(b) - log_gamma(a + b));
        }
        return log_gamma(a) + algdiv(a, b);
    }

    // 1 ≤ a < 8. Reduce a into [1, 2) when it is at least 2.
    let w = if a < 2.0 {
        if b <= 2.0 {
            return log_gamma(a) + log_gamma(b) - gsumln(a, b);
        }
        if b >= 8.0 {
            return log_gamma(a) + algdiv(a, b);
        }
        0.0
    } else if b <= 1e3 {
        let n = (a - 1.0) as i32;
        let mut w = 1.0;
        for _ in 0..n {
            a -= 1.0;
            let h = a / b;
            w *= h / (h + 1.0);
        }
        let w = w.ln();
        if b >= 8.0 {
            return w + log_gamma(a) + algdiv(a, b);
        }
        w
    } else {
        let n = (a - 1.0) as i32;
        let mut w = 1.0;
        for _ in 0..n {
            a -= 1.0;
            w *= a / (a / b + 1.0);
        }
        return w.ln() - f64::from(n) * b.ln() + (log_gamma(a) + algdiv(a, b));
    };

    // 1 ≤ a < 2 and 2 < b < 8: reduce b the same way.
    let n = (b - 1.0) as i32;
    let mut z = 1.0;
    for _ in 0..n {
        b -= 1.0;
        z *= b / (a + b);
    }
    w + z.ln() + (log_gamma(a) + (log_gamma(b) - gsumln(a, b)))
}

/// ln Γ(a + b) for 1 ≤ a, b ≤ 2.
pub(crate) fn gsumln(a: f64, b: f64) -> f64 {
    let x = a + b - 2.0;
    if x <= 0.25 {
        return log_gamma1p(x + 1.0);
    }
    if x <= 1.25 {
        return log_gamma1p(x) + alnrel(x);
    }
    log_gamma1p(x - 1.0) + (x * (x + 1.0)).ln()
}

/// Partial Stirling sums s₃ … s₁₁ in x, s_{2k+1} = 1 + x + … + x^{2k}.
#[inline]
fn odd_sums(x: f64) -> [f64; 5] {
    let x2 = x * x;
    let s3 = x + x2 + 1.0;
    let s5 = x + x2 * s3 + 1.0;
    let s7 = x + x2 * s5 + 1.0;
    let s9 = x + x2 * s7 + 1.0;
    let s11 = x + x2 * s9 + 1.0;
    [s3, s5, s7, s9, s11]
}

/// Stirling correction of ln Γ(b) − ln Γ(a + b) scaled by `c/b`.
#[inline]
fn delta_correction(b: f64, c: f64, x: f64) -> f64 {
    let [s3, s5, s7, s9, s11] = odd_sums(x);
    let [c0, c1, c2, c3, c4, c5] = STIRLING;
    let t = 1.0 / (b * b);
    let w = ((((c5 * s11 * t + c4 * s9) * t + c3 * s7) * t + c2 * s5) * t + c1 * s3) * t + c0;
    w * (c / b)
}

/// del(a) + del(b) − del(a + b) for a, b ≥ 8, where ln Γ(z) = (z − ½) ln z −
/// z + ln √(2π) + del(z).
pub fn bcorr(a0: f64, b0: f64) -> f64 {
    let a = a0.min(b0);
    let b = a0.max(b0);

    let h = a / b;
    let c = h / (h + 1.0);
    let x = 1.0 / (h + 1.0);
    let w = delta_correction(b, c, x);

    let t = 1.0 / (a * a);
    stirling_series(t) / a + w
}

/// ln Γ(b) − ln Γ(a + b) for b ≥ 8, computed without forming either term.
pub fn algdiv(a: f64, b: f64) -> f64 {
    let (c, x, d) = if a > b {
        let h = b / a;
        (1.0 / (h + 1.0), h / (h + 1.0), a + (b - 0.5))
    } else {
        let h = a / b;
        (h / (h + 1.0), 1.0 / (h + 1.0), b + (a - 0.5))
    };

    let w = delta_correction(b, c, x);
    let u = d * alnrel(a / b);
    let v = a * (b.ln() - 1.0);
    if u > v { w - v - u } else { w - u - v }
}
