//! Power-series evaluators: `fpser`, `apser`, `bpser` and the recurrence
//! `bup`.

use log::warn;

use super::super::beta_fn::{algdiv, log_beta};
use super::super::digamma_fn::psi;
use super::super::elementary::d_zero;
use super::super::gamma_fn::{gam1, log_gamma1p};
use super::super::machine::F64;
use super::fraction::brcmp1;
use super::{recip_gamma1p, reduce_b};

/// I_x(a, b) for b < min(ε, ε·a) and x ≤ 1/2, on the output scale.
pub(crate) fn fpser(a: f64, b: f64, x: f64, eps: f64, log_p: bool) -> f64 {
    let mut ans = if log_p {
        a * x.ln()
    } else if a > eps * 0.001 {
        let t = a * x.ln();
        if t < F64.exp_arg_min() {
            return 0.0;
        }
        t.exp()
    } else {
        1.0
    };

    // 1/B(a, b) ≈ b
    if log_p {
        ans += b.ln() - a.ln();
    } else {
        ans *= b / a;
    }

    let tol = eps / a;
    let mut an = a + 1.0;
    let mut t = x;
    let mut s = t / an;
    loop {
        an += 1.0;
        t *= x;
        let c = t / an;
        s += c;
        if c.abs() <= tol {
            break;
        }
    }

    if log_p {
        ans + (a * s).ln_1p()
    } else {
        ans * (a * s + 1.0)
    }
}

/// 1 − I_x(a, b) for a ≤ min(ε, ε·b), b·x ≤ 1 and x ≤ 1/2. Linear scale.
pub(crate) fn apser(a: f64, b: f64, x: f64, eps: f64) -> f64 {
    // Euler's constant to 15 digits, as in TOMS 708
    const G: f64 = 0.577_215_664_901_533;

    let bx = b * x;
    let mut t = x - bx;
    let c = if b * eps <= 0.02 {
        x.ln() + psi(b) + G + t
    } else {
        bx.ln() + G + t
    };

    let tol = eps * 5.0 * c.abs();
    let mut j = 1.0;
    let mut s = 0.0;
    loop {
        j += 1.0;
        t *= x - bx / j;
        let aj = t / j;
        s += aj;
        if aj.abs() <= tol {
            break;
        }
    }

    -a * (c + s)
}

/// Power series for I_x(a, b) when b ≤ 1 or b·x ≤ 0.7, on the output scale.
pub(crate) fn bpser(a: f64, b: f64, x: f64, eps: f64, log_p: bool) -> f64 {
    // Iteration cap of the series; reached only for pathological inputs.
    const MAX_TERMS: f64 = 1e7;

    if x == 0.0 {
        return d_zero(log_p);
    }

    // Leading factor x^a / (a·B(a, b)).
    let a0 = a.min(b);
    let mut ans = if a0 >= 1.0 {
        let z = a * x.ln() - log_beta(a, b);
        if log_p { z - a.ln() } else { z.exp() / a }
    } else {
        let b0 = a.max(b);
        if b0 < 8.0 {
            if b0 <= 1.0 {
                // a0 < 1 and b0 ≤ 1
                let lead = if log_p {
                    a * x.ln()
                } else {
                    let v = x.powf(a);
                    if v == 0.0 {
                        return v;
                    }
                    v
                };
                let apb = a + b;
                let z = recip_gamma1p(apb);
                let c = (gam1(a) + 1.0) * (gam1(b) + 1.0) / z;
                if log_p {
                    lead + (c * (b / apb)).ln()
                } else {
                    lead * c * (b / apb)
                }
            } else {
                // a0 < 1 < b0 < 8
                let (b0, log_prod) = reduce_b(a0, b0);
                let u = log_gamma1p(a0) + log_prod;
                let z = a * x.ln() - u;
                let t = recip_gamma1p(a0 + b0);
                if log_p {
                    z + (a0 / a).ln() + gam1(b0).ln_1p() - t.ln()
                } else {
                    z.exp() * (a0 / a) * (gam1(b0) + 1.0) / t
                }
            }
        } else {
            // a0 < 1 and b0 ≥ 8
            let u = log_gamma1p(a0) + algdiv(a0, b0);
            let z = a * x.ln() - u;
            if log_p { z + (a0 / a).ln() } else { (a0 / a) * z.exp() }
        }
    };

    if ans == d_zero(log_p) || (!log_p && a <= eps * 0.1) {
        return ans;
    }

    // Σ (1−b)_n xⁿ / (n! (a+n))
    let tol = eps / a;
    let mut n = 0.0;
    let mut sum = 0.0;
    let mut c = 1.0;
    let mut w;
    loop {
        n += 1.0;
        c *= (0.5 - b / n + 0.5) * x;
        w = c / (a + n);
        sum += w;
        if n >= MAX_TERMS || w.abs() <= tol {
            break;
        }
    }
    if w.abs() > tol {
        let negligible = if log_p {
            a * sum > -1.0 && (a * sum).ln_1p().abs() < eps * ans.abs()
        } else {
            (a * sum + 1.0).abs() == 1.0
        };
        if !negligible {
            warn!("bpser: series did not converge (a = {a}, b = {b}, x = {x})");
        }
    }

    if a * sum > -1.0 {
        if log_p {
            ans += (a * sum).ln_1p();
        } else {
            ans *= a * sum + 1.0;
        }
    } else {
        if log_p && ans > f64::NEG_INFINITY {
            warn!("bpser: result underflows to -Inf (a = {a}, b = {b}, x = {x})");
        }
        ans = d_zero(log_p);
    }
    ans
}

/// I_x(a, b) − I_x(a + n, b) for a positive integer `n`, linear or log scale.
///
/// The sum Σ d_i of the recurrence terms is taken with the leading
/// increasing terms first (index k chosen from where the ratio of
/// consecutive terms drops below one), then the decreasing tail until it no
/// longer contributes.
pub(crate) fn bup(a: f64, b: f64, x: f64, y: f64, n: i32, eps: f64, give_log: bool) -> f64 {
    let apb = a + b;
    let ap1 = a + 1.0;

    // Scale by e^{-mu} when the terms are expected to grow.
    let (mu, mut d) = if n > 1 && a >= 1.0 && apb >= ap1 * 1.1 {
        let mu = (F64.exp_arg_min().abs() as i32).min(F64.exp_arg_max() as i32);
        (mu, (-f64::from(mu)).exp())
    } else {
        (0, 1.0)
    };

    let lead = if give_log {
        brcmp1(mu, a, b, x, y, true) - a.ln()
    } else {
        brcmp1(mu, a, b, x, y, false) / a
    };
    if n == 1 || (give_log && lead == f64::NEG_INFINITY) || (!give_log && lead == 0.0) {
        return lead;
    }

    let nm1 = n - 1;
    let mut w = d;

    // Terms increase up to index k when b > 1.
    let mut k = 0;
    if b > 1.0 {
        if y > 1e-4 {
            let r = (b - 1.0) * x / y - a;
            if r >= 1.0 {
                k = if r < f64::from(nm1) { r as i32 } else { nm1 };
            }
        } else {
            k = nm1;
        }
        for i in 0..k {
            let l = f64::from(i);
            d *= (apb + l) / (ap1 + l) * x;
            w += d;
        }
    }

    for i in k..nm1 {
        let l = f64::from(i);
        d *= (apb + l) / (ap1 + l) * x;
        w += d;
        if d <= eps * w {
            break;
        }
    }

    if give_log { lead + w.ln() } else { lead * w }
}
