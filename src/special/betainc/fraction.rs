//! The continued fraction `bfrac` and the prefactors `brcomp`/`brcmp1`,
//! x^a·y^b / B(a, b) evaluated without overflow.

use log::warn;

use super::super::beta_fn::{algdiv, bcorr, log_beta};
use super::super::elementary::{alnrel, d_zero, esum, rlog1};
use super::super::gamma_fn::{gam1, log_gamma1p, LN_SQRT_2PI};
use super::{recip_gamma1p, reduce_b};

/// 1/√(2π)
const RSQRT_2PI: f64 = 0.398942280401433;

/// (ln x, ln y), each taken from whichever of x, y = 1 − x is better
/// conditioned.
#[inline]
fn log_xy(x: f64, y: f64) -> (f64, f64) {
    if x <= 0.375 {
        (x.ln(), alnrel(-x))
    } else if y > 0.375 {
        (x.ln(), y.ln())
    } else {
        (alnrel(-y), y.ln())
    }
}

/// Continued fraction expansion for I_x(a, b) when a, b > 1, on the output
/// scale. `lambda` is `(a + b)·y − b`.
pub(crate) fn bfrac(a: f64, b: f64, x: f64, y: f64, lambda: f64, eps: f64, log_p: bool) -> f64 {
    const MAX_TERMS: u32 = 10_000;

    if !lambda.is_finite() {
        return f64::NAN;
    }
    let brc = brcomp(a, b, x, y, log_p);
    if brc.is_nan() {
        warn!("bfrac: prefactor is NaN (a = {a}, b = {b}, x = {x})");
        return f64::NAN;
    }
    if !log_p && brc == 0.0 {
        return 0.0;
    }

    let c = lambda + 1.0;
    let c0 = b / a;
    let c1 = 1.0 / a + 1.0;
    let yp1 = y + 1.0;

    let mut n = 0u32;
    let mut p = 1.0;
    let mut s = a + 1.0;
    let mut an = 0.0;
    let mut bn = 1.0;
    let mut anp1 = 1.0;
    let mut bnp1 = c / c1;
    let mut r = c1 / c;
    let mut r0;

    loop {
        n += 1;
        let nf = f64::from(n);
        let t = nf / a;
        let w = nf * (b - nf) * x;
        let e = a / s;
        let alpha = p * (p + c0) * e * e * (w * x);
        let e = (t + 1.0) / (c1 + t + t);
        let beta = nf + w / s + e * (c + nf * yp1);
        p = t + 1.0;
        s += 2.0;

        // Three-term recurrence for the next convergent.
        let t = alpha * an + beta * anp1;
        an = anp1;
        anp1 = t;
        let t = alpha * bn + beta * bnp1;
        bn = bnp1;
        bnp1 = t;

        r0 = r;
        r = anp1 / bnp1;
        if (r - r0).abs() <= eps * r {
            break;
        }

        an /= bnp1;
        bn /= bnp1;
        anp1 = r;
        bnp1 = 1.0;

        if n >= MAX_TERMS {
            break;
        }
    }
    if n >= MAX_TERMS && (r - r0).abs() > eps * r {
        warn!("bfrac: continued fraction did not converge (a = {a}, b = {b}, x = {x})");
    }

    if log_p { brc + r.ln() } else { brc * r }
}

/// x^a·y^b / B(a, b), on the output scale.
pub(crate) fn brcomp(a: f64, b: f64, x: f64, y: f64, log_p: bool) -> f64 {
    brcmp1(0, a, b, x, y, log_p)
}

/// exp(mu)·x^a·y^b / B(a, b), on linear or log scale.
pub(crate) fn brcmp1(mu: i32, a: f64, b: f64, x: f64, y: f64, give_log: bool) -> f64 {
    if x == 0.0 || y == 0.0 {
        return d_zero(give_log);
    }

    let a0 = a.min(b);
    if a0 >= 8.0 {
        return brcmp1_large(mu, a, b, x, y, give_log);
    }

    let (lnx, lny) = log_xy(x, y);
    let z = a * lnx + b * lny;
    if a0 >= 1.0 {
        return esum(mu, z - log_beta(a, b), give_log);
    }

    let b0 = a.max(b);
    if b0 >= 8.0 {
        let u = log_gamma1p(a0) + algdiv(a0, b0);
        return if give_log {
            a0.ln() + esum(mu, z - u, true)
        } else {
            a0 * esum(mu, z - u, false)
        };
    }

    if b0 <= 1.0 {
        let ans = esum(mu, z, give_log);
        if ans == d_zero(give_log) {
            return ans;
        }
        let t = recip_gamma1p(a + b);
        return if give_log {
            let c = gam1(a).ln_1p() + gam1(b).ln_1p() - t.ln();
            ans + a0.ln() + c - (a0 / b0).ln_1p()
        } else {
            let c = (gam1(a) + 1.0) * (gam1(b) + 1.0) / t;
            ans * (a0 * c) / (a0 / b0 + 1.0)
        };
    }

    // a0 < 1 < b0 < 8
    let (b0, log_prod) = reduce_b(a0, b0);
    let z = z - (log_gamma1p(a0) + log_prod);
    let t = recip_gamma1p(a0 + b0);
    if give_log {
        a0.ln() + esum(mu, z, true) + gam1(b0).ln_1p() - t.ln()
    } else {
        a0 * esum(mu, z, false) * (gam1(b0) + 1.0) / t
    }
}

/// Temme's form for min(a, b) ≥ 8, expanding around x₀ = a/(a + b).
fn brcmp1_large(mu: i32, a: f64, b: f64, x: f64, y: f64, give_log: bool) -> f64 {
    let apb = a + b;
    let lambda = if apb.is_finite() {
        if a <= b { a - apb * x } else { apb * y - b }
    } else {
        a * y - b * x
    };
    let (x0, y0) = if a <= b {
        let h = a / b;
        (h / (h + 1.0), 1.0 / (h + 1.0))
    } else {
        let h = b / a;
        (1.0 / (h + 1.0), h / (h + 1.0))
    };

    let e = -lambda / a;
    let u = if e.abs() > 0.6 { e - (x / x0).ln() } else { rlog1(e) };
    let e = lambda / b;
    let v = if e.abs() > 0.6 { e - (y / y0).ln() } else { rlog1(e) };

    let z = esum(mu, -(a * u + b * v), give_log);
    if give_log {
        // ln x₀ = −ln(1 + b/a) for either orientation
        let lx0 = -(b / a).ln_1p();
        -LN_SQRT_2PI + 0.5 * (b.ln() + lx0) + z - bcorr(a, b)
    } else {
        RSQRT_2PI * (b * x0).sqrt() * z * (-bcorr(a, b)).exp()
    }
}
