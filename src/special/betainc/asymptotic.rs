//! Asymptotic expansions: `bgrat` (large a, small b), its helper `grat_r`,
//! and `basym` (large a and b).

use core::fmt;

use super::super::beta_fn::{algdiv, bcorr};
use super::super::elementary::{alnrel, logspace_add, rexpm1, rlog1};
use super::super::erf_fn::{erf, erfc1};
use super::super::gamma_fn::gam1;

/// √π
const SQRT_PI: f64 = 1.772453850905516;

/// Why a `bgrat` evaluation could not deliver full accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BgratFault {
    /// b·z underflowed to zero; the accumulator was left unchanged.
    Underflow,
    /// The scale factor u is exp(−∞).
    ZeroScale,
    /// A partial sum went non-positive.
    NonPositiveSum,
    /// The series was still moving after all terms.
    NoConvergence,
}

impl fmt::Display for BgratFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow => write!(f, "underflow of b*z"),
            Self::ZeroScale => write!(f, "scale factor underflows to zero"),
            Self::NonPositiveSum => write!(f, "non-positive partial sum"),
            Self::NoConvergence => write!(f, "series did not converge"),
        }
    }
}

/// Asymptotic expansion of I_x(a, b) for large a and b ≤ 1, added to the
/// accumulator `w` (linear, or log if `log_w`). Returns the updated
/// accumulator; on a fault the accumulator may be unchanged.
pub(crate) fn bgrat(
    a: f64,
    b: f64,
    x: f64,
    y: f64,
    w: f64,
    eps: f64,
    log_w: bool,
) -> (f64, Option<BgratFault>) {
    const N_TERMS: usize = 30;
    let mut c = [0.0_f64; N_TERMS];
    let mut d = [0.0_f64; N_TERMS];

    let bm1 = b - 0.5 - 0.5;
    let nu = a + bm1 * 0.5;
    let lnx = if y > 0.375 { x.ln() } else { alnrel(-y) };
    let z = -nu * lnx;

    if b * z == 0.0 {
        return (w, Some(BgratFault::Underflow));
    }

    // r = z^b·x^nu / Γ(b), u = r·Γ(a + b) / (Γ(a)·nu^b)
    let log_r = b.ln() + gam1(b).ln_1p() + b * z.ln() + nu * lnx;
    let log_u = log_r - (algdiv(b, a) + b * nu.ln());
    let u = log_u.exp();
    if log_u == f64::NEG_INFINITY {
        return (w, Some(BgratFault::ZeroScale));
    }
    let u_underflows = u == 0.0;

    let l = if log_w {
        if w == f64::NEG_INFINITY { 0.0 } else { (w - log_u).exp() }
    } else if w == 0.0 {
        0.0
    } else {
        (w.ln() - log_u).exp()
    };

    let q_r = grat_r(b, z, log_r, eps);
    let v = 0.25 / (nu * nu);
    let t2 = lnx * 0.25 * lnx;
    let mut j = q_r;
    let mut sum = j;
    let mut t = 1.0;
    let mut cn = 1.0;
    let mut n2 = 0.0;
    let mut fault = None;

    for n in 1..=N_TERMS {
        let bp2n = b + n2;
        j = (bp2n * (bp2n + 1.0) * j + (z + bp2n + 1.0) * t) * v;
        n2 += 2.0;
        t *= t2;
        cn /= n2 * (n2 + 1.0);
        let nm1 = n - 1;
        c[nm1] = cn;
        let mut s = 0.0;
        let mut coef = b - n as f64;
        for i in 1..n {
            s += coef * c[i - 1] * d[nm1 - i];
            coef += b;
        }
        d[nm1] = bm1 * cn + s / n as f64;
        let dj = d[nm1] * j;
        sum += dj;
        if sum <= 0.0 {
            return (w, Some(BgratFault::NonPositiveSum));
        }
        if dj.abs() <= eps * (sum + l) {
            break;
        }
        if n == N_TERMS {
            fault = Some(BgratFault::NoConvergence);
        }
    }

    let w = if log_w {
        logspace_add(w, log_u + sum.ln())
    } else if u_underflows {
        w + (log_u + sum.ln()).exp()
    } else {
        w + u * sum
    };
    (w, fault)
}

/// Scaled complement of the incomplete gamma ratio, Q(a, x)/r(a, x) with
/// r = exp(log_r), for 0 ≤ a ≤ 1.
pub(crate) fn grat_r(a: f64, x: f64, log_r: f64, eps: f64) -> f64 {
    if a * x == 0.0 {
        return if x <= a { (-log_r).exp() } else { 0.0 };
    }

    if a == 0.5 {
        if x < 0.25 {
            let p = erf(x.sqrt());
            return (0.5 - p + 0.5) * (-log_r).exp();
        }
        let sx = x.sqrt();
        return erfc1(true, sx) / sx * SQRT_PI;
    }

    if x < 1.1 {
        // Taylor series for P(a, x)/x^a
        let mut an = 3.0;
        let mut c = x;
        let mut sum = x / (a + 3.0);
        let tol = eps * 0.1 / (a + 1.0);
        loop {
            an += 1.0;
            c *= -(x / an);
            let t = c / (a + an);
            sum += t;
            if t.abs() <= tol {
                break;
            }
        }

        let j = a * x * ((sum / 6.0 - 0.5 / (a + 2.0)) * x + 1.0 / (a + 1.0));
        let z = a * x.ln();
        let h = gam1(a);
        let g = h + 1.0;

        if (x >= 0.25 && a < x / 2.59) || z > -0.13394 {
            let l = rexpm1(z);
            let q = ((l + 0.5 + 0.5) * j - l) * g - h;
            if q <= 0.0 {
                return 0.0;
            }
            return q * (-log_r).exp();
        }
        let p = z.exp() * g * (0.5 - j + 0.5);
        return (0.5 - p + 0.5) * (-log_r).exp();
    }

    // Legendre continued fraction
    let mut a2n_1 = 1.0;
    let mut a2n = 1.0;
    let mut b2n_1 = x;
    let mut b2n = x + (1.0 - a);
    let mut c = 1.0;
    loop {
        a2n_1 = x * a2n + c * a2n_1;
        b2n_1 = x * b2n + c * b2n_1;
        let am0 = a2n_1 / b2n_1;
        c += 1.0;
        let c_a = c - a;
        a2n = a2n_1 + c_a * a2n;
        b2n = b2n_1 + c_a * b2n;
        let an0 = a2n / b2n;
        if (an0 - am0).abs() < eps * an0 {
            return an0;
        }
    }
}

/// Asymptotic expansion of I_x(a, b) for large a and b, on the output
/// scale. `lambda = (a + b)·y − b ≥ 0` and `eps` is the tolerance used.
pub(crate) fn basym(a: f64, b: f64, lambda: f64, eps: f64, log_p: bool) -> f64 {
    const NUM_IT: usize = 20;
    /// 2/√π
    const E0: f64 = 1.12837916709551;
    /// 2^(−3/2)
    const E1: f64 = 0.353553390593274;
    /// ln E0
    const LN_E0: f64 = 0.120782237635245;

    let mut a0 = [0.0_f64; NUM_IT + 1];
    let mut b0 = [0.0_f64; NUM_IT + 1];
    let mut c = [0.0_f64; NUM_IT + 1];
    let mut d = [0.0_f64; NUM_IT + 1];

    let f = a * rlog1(-lambda / a) + b * rlog1(lambda / b);
    let t = if log_p {
        -f
    } else {
        let t = (-f).exp();
        if t == 0.0 {
            return 0.0;
        }
        t
    };

    let z0 = f.sqrt();
    let z = z0 / E1 * 0.5;
    let z2 = f + f;

    let (h, r0, r1, w0) = if a < b {
        let h = a / b;
        (h, 1.0 / (h + 1.0), (b - a) / b, 1.0 / (a * (h + 1.0)).sqrt())
    } else {
        let h = b / a;
        (h, 1.0 / (h + 1.0), (b - a) / a, 1.0 / (b * (h + 1.0)).sqrt())
    };

    a0[0] = r1 * (2.0 / 3.0);
    c[0] = a0[0] * -0.5;
    d[0] = -c[0];
    let mut j0 = 0.5 / E0 * erfc1(true, z0);
    let mut j1 = E1;
    let mut sum = j0 + d[0] * w0 * j1;

    let mut s = 1.0;
    let h2 = h * h;
    let mut hn = 1.0;
    let mut w = w0;
    let mut znm1 = z;
    let mut zn = z2;

    for n in (2..=NUM_IT).step_by(2) {
        let nf = n as f64;
        hn *= h2;
        a0[n - 1] = r0 * 2.0 * (h * hn + 1.0) / (nf + 2.0);
        let np1 = n + 1;
        s += hn;
        a0[np1 - 1] = r1 * 2.0 * s / (nf + 3.0);

        for i in n..=np1 {
            let r = (i as f64 + 1.0) * -0.5;
            b0[0] = r * a0[0];
            for m in 2..=i {
                let mut bsum = 0.0;
                for jj in 1..m {
                    let mmj = m - jj;
                    bsum += (jj as f64 * r - mmj as f64) * a0[jj - 1] * b0[mmj - 1];
                }
                b0[m - 1] = r * a0[m - 1] + bsum / m as f64;
            }
            c[i - 1] = b0[i - 1] / (i as f64 + 1.0);

            let mut dsum = 0.0;
            for jj in 1..i {
                dsum += d[i - jj - 1] * c[jj - 1];
            }
            d[i - 1] = -(dsum + c[i - 1]);
        }

        j0 = E1 * znm1 + (nf - 1.0) * j0;
        j1 = E1 * zn + nf * j1;
        znm1 *= z2;
        zn *= z2;
        w *= w0;
        let t0 = d[n - 1] * w * j0;
        w *= w0;
        let t1 = d[np1 - 1] * w * j1;
        sum += t0 + t1;
        if t0.abs() + t1.abs() <= eps * sum {
            break;
        }
    }

    if log_p {
        LN_E0 + t - bcorr(a, b) + sum.ln()
    } else {
        E0 * t * (-bcorr(a, b)).exp() * sum
    }
}
