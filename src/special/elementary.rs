//! Elementary building blocks: accurate `ln(1+a)`, `eˣ−1`, `x − ln(1+x)`,
//! scaled exponentials, log-space arithmetic and Chebyshev series.

use core::f64::consts::{LN_2, PI};

use super::machine::F64;

/// ln(1 + a), accurate for small |a|.
///
/// Rational minimax approximation in `t = a/(a+2)` for |a| ≤ 0.375.
///
/// # Example
///
/// ```
/// use nmath_core::special::alnrel;
///
/// assert!((alnrel(1e-10) - 1e-10).abs() < 1e-24);
/// assert!((alnrel(1.0) - core::f64::consts::LN_2).abs() < 1e-15);
/// ```
pub fn alnrel(a: f64) -> f64 {
    if a.abs() > 0.375 {
        return (1.0 + a).ln();
    }
    const P1: f64 = -1.29418923021993;
    const P2: f64 = 0.405303492862024;
    const P3: f64 = -0.0178874546012214;
    const Q1: f64 = -1.62752256355323;
    const Q2: f64 = 0.747811014037616;
    const Q3: f64 = -0.0845104217945565;

    let t = a / (a + 2.0);
    let t2 = t * t;
    let w = (((P3 * t2 + P2) * t2 + P1) * t2 + 1.0) / (((Q3 * t2 + Q2) * t2 + Q1) * t2 + 1.0);
    t * 2.0 * w
}

/// eˣ − 1, accurate for small |x|.
///
/// # Example
///
/// ```
/// use nmath_core::special::rexpm1;
///
/// assert!((rexpm1(1e-12) - 1e-12).abs() < 1e-26);
/// ```
pub fn rexpm1(x: f64) -> f64 {
    const P1: f64 = 9.14041914819518e-10;
    const P2: f64 = 0.0238082361044469;
    const Q1: f64 = -0.499999999085958;
    const Q2: f64 = 0.107141568980644;
    const Q3: f64 = -0.0119041179760821;
    const Q4: f64 = 5.95130811860248e-4;

    if x.abs() <= 0.15 {
        return x * (((P2 * x + P1) * x + 1.0) / ((((Q4 * x + Q3) * x + Q2) * x + Q1) * x + 1.0));
    }
    let w = x.exp();
    if x > 0.0 {
        w * (0.5 - 1.0 / w + 0.5)
    } else {
        w - 0.5 - 0.5
    }
}

/// x − ln(1 + x), accurate near zero where both terms nearly cancel.
pub fn rlog1(x: f64) -> f64 {
    const A: f64 = 0.0566749439387324;
    const B: f64 = 0.0456512608815524;
    const P0: f64 = 0.333333333333333;
    const P1: f64 = -0.224696413112536;
    const P2: f64 = 0.00620886815375787;
    const Q1: f64 = -1.27408923933623;
    const Q2: f64 = 0.354508718369557;

    if !(-0.39..=0.57).contains(&x) {
        let w = x + 0.5 + 0.5;
        return x - w.ln();
    }

    // Shift the argument toward zero; w1 carries the exact offset.
    let (h, w1) = if x < -0.18 {
        let h = (x + 0.3) / 0.7;
        (h, A - h * 0.3)
    } else if x > 0.18 {
        let h = x * 0.75 - 0.25;
        (h, B + h / 3.0)
    } else {
        (x, 0.0)
    };

    let r = h / (h + 2.0);
    let t = r * r;
    let w = ((P2 * t + P1) * t + P0) / ((Q2 * t + Q1) * t + 1.0);
    t * 2.0 * (1.0 / (1.0 - r) - r * w) + w1
}

/// exp(mu + x), formed so that the intermediate never overflows or
/// underflows when the product is representable. With `give_log` returns
/// `mu + x` directly.
pub fn esum(mu: i32, x: f64, give_log: bool) -> f64 {
    if give_log {
        return x + f64::from(mu);
    }
    let m = f64::from(mu);
    let w = if x > 0.0 {
        if mu > 0 {
            return m.exp() * x.exp();
        }
        m + x
    } else {
        if mu < 0 {
            return m.exp() * x.exp();
        }
        m + x
    };
    if (x > 0.0 && w < 0.0) || (x <= 0.0 && w > 0.0) {
        return m.exp() * x.exp();
    }
    w.exp()
}

/// Continued fraction for Σᵢ xⁱ/(i·k + d) used by [`log1pmx`] and
/// `lgamma1p`, evaluated with rescaling against overflow.
pub(crate) fn logcf(x: f64, i: f64, d: f64, eps: f64) -> f64 {
    // 2^256
    const SCALE: f64 = 1.157_920_892_373_162e77;

    let mut c1 = 2.0 * d;
    let mut c2 = i + d;
    let mut c4 = c2 + d;
    let mut a1 = c2;
    let mut b1 = i * (c2 - i * x);
    let mut b2 = d * d * x;
    let mut a2 = c4 * c2 - b2;
    b2 = c4 * b1 - i * b2;

    while (a2 * b1 - a1 * b2).abs() > (eps * b1 * b2).abs() {
        let mut c3 = c2 * c2 * x;
        c2 += d;
        c4 += d;
        a1 = c4 * a2 - c3 * a1;
        b1 = c4 * b2 - c3 * b1;

        c3 = c1 * c1 * x;
        c1 += d;
        c4 += d;
        a2 = c4 * a1 - c3 * a2;
        b2 = c4 * b1 - c3 * b2;

        if b2.abs() > SCALE {
            a1 /= SCALE;
            b1 /= SCALE;
            a2 /= SCALE;
            b2 /= SCALE;
        } else if b2.abs() < 1.0 / SCALE {
            a1 *= SCALE;
            b1 *= SCALE;
            a2 *= SCALE;
            b2 *= SCALE;
        }
    }

    a2 / b2
}

/// ln(1 + x) − x, accurate also for small |x|.
///
/// # Example
///
/// ```
/// use nmath_core::special::log1pmx;
///
/// // ≈ −x²/2 near zero
/// assert!((log1pmx(1e-5) + 0.5e-10).abs() < 1e-20);
/// ```
pub fn log1pmx(x: f64) -> f64 {
    const MIN_LOG1_VALUE: f64 = -0.79149064;
    const TOL_LOGCF: f64 = 1e-14;

    if !(MIN_LOG1_VALUE..=1.0).contains(&x) {
        return x.ln_1p() - x;
    }
    let r = x / (2.0 + x);
    let y = r * r;
    if x.abs() < 1e-2 {
        const TWO_THIRDS: f64 = 2.0 / 3.0;
        const TWO_FIFTHS: f64 = 2.0 / 5.0;
        const TWO_SEVENTHS: f64 = 2.0 / 7.0;
        const TWO_NINTHS: f64 = 2.0 / 9.0;
        r * ((((TWO_NINTHS * y + TWO_SEVENTHS) * y + TWO_FIFTHS) * y + TWO_THIRDS) * y - x)
    } else {
        r * (2.0 * y * logcf(y, 3.0, 2.0, TOL_LOGCF) - x)
    }
}

/// ln(1 − eˣ) for x ≤ 0, switching formulas at −ln 2.
pub fn log1_exp(x: f64) -> f64 {
    if x > -LN_2 {
        (-x.exp_m1()).ln()
    } else {
        (-x.exp()).ln_1p()
    }
}

/// ln(eˣ + eʸ) without leaving log space.
pub fn logspace_add(logx: f64, logy: f64) -> f64 {
    if logx == f64::NEG_INFINITY {
        return logy;
    }
    if logy == f64::NEG_INFINITY {
        return logx;
    }
    logx.max(logy) + (-(logx - logy).abs()).exp().ln_1p()
}

/// Evaluate the first `a.len()` terms of a Chebyshev series at `x ∈ [−1, 1]`
/// (Clenshaw recurrence, `a[0]` halved). NaN outside a 10% tolerance band.
pub(crate) fn chebyshev_eval(x: f64, a: &[f64]) -> f64 {
    if !(-1.1..=1.1).contains(&x) {
        return f64::NAN;
    }
    let twox = x * 2.0;
    let (mut b0, mut b1, mut b2) = (0.0, 0.0, 0.0);
    for &c in a.iter().rev() {
        b2 = b1;
        b1 = b0;
        b0 = twox * b1 - b2 + c;
    }
    (b0 - b2) * 0.5
}

/// sin(πx), exact at integers and half-integers.
pub(crate) fn sinpi(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if !x.is_finite() {
        return f64::NAN;
    }
    let mut y = x % 2.0;
    if y <= -1.0 {
        y += 2.0;
    } else if y > 1.0 {
        y -= 2.0;
    }
    if y == 0.0 || y == 1.0 {
        0.0
    } else if y == 0.5 {
        1.0
    } else if y == -0.5 {
        -1.0
    } else {
        (PI * y).sin()
    }
}

// ---------------------------------------------------------------------------
// Probability-scale helpers.
//
// A result is on the "output scale" when it is a probability if `log_p` is
// false and its natural log otherwise. `lower` selects P(X ≤ x) over
// P(X > x).
// ---------------------------------------------------------------------------

/// 0 on the output scale.
#[inline]
pub(crate) fn d_zero(log_p: bool) -> f64 {
    if log_p { f64::NEG_INFINITY } else { 0.0 }
}

/// 1 on the output scale.
#[inline]
pub(crate) fn d_one(log_p: bool) -> f64 {
    if log_p { 0.0 } else { 1.0 }
}

/// The probability of an empty lower tail.
#[inline]
pub(crate) fn dt_zero(lower: bool, log_p: bool) -> f64 {
    if lower { d_zero(log_p) } else { d_one(log_p) }
}

/// The probability of a full lower tail.
#[inline]
pub(crate) fn dt_one(lower: bool, log_p: bool) -> f64 {
    if lower { d_one(log_p) } else { d_zero(log_p) }
}

/// `exp(x)` on the output scale, given `x` in log space.
#[inline]
pub(crate) fn d_exp(x: f64, log_p: bool) -> f64 {
    if log_p { x } else { x.exp() }
}

/// `exp(x)/sqrt(f)` on the output scale.
#[inline]
pub(crate) fn d_fexp(f: f64, x: f64, log_p: bool) -> f64 {
    if log_p { -0.5 * f.ln() + x } else { x.exp() / f.sqrt() }
}

/// Linear-scale lower-tail probability for an argument on the output scale.
#[inline]
pub(crate) fn dt_lower_linear(p: f64, lower: bool, log_p: bool) -> f64 {
    match (log_p, lower) {
        (true, true) => p.exp(),
        (true, false) => -p.exp_m1(),
        (false, true) => p,
        (false, false) => 0.5 - p + 0.5,
    }
}

/// Linear-scale upper-tail probability for an argument on the output scale.
#[inline]
pub(crate) fn dt_upper_linear(p: f64, lower: bool, log_p: bool) -> f64 {
    dt_lower_linear(p, !lower, log_p)
}

/// ln of the lower-tail probability for an argument on the output scale.
#[inline]
pub(crate) fn dt_log_lower(p: f64, lower: bool, log_p: bool) -> f64 {
    match (log_p, lower) {
        (true, true) => p,
        (true, false) => log1_exp(p),
        (false, true) => p.ln(),
        (false, false) => (-p).ln_1p(),
    }
}

/// ln of the upper-tail probability for an argument on the output scale.
#[inline]
pub(crate) fn dt_log_upper(p: f64, lower: bool, log_p: bool) -> f64 {
    dt_log_lower(p, !lower, log_p)
}

/// Complement on the output scale: `1 − w` or `ln(1 − exp(w))`.
#[inline]
pub(crate) fn d_complement(w: f64, log_p: bool) -> f64 {
    if log_p { log1_exp(w) } else { 0.5 - w + 0.5 }
}

/// `true` when `x` is zero or subnormal.
#[inline]
pub(crate) fn underflowed(x: f64) -> bool {
    x == 0.0 || (x > 0.0 && x < F64.min_positive)
}

/// Quantile boundaries: NaN for a probability outside its range, `left` or
/// `right` at the two extremes, `None` for an interior probability.
pub(crate) fn quantile_boundary(p: f64, left: f64, right: f64, lower: bool, log_p: bool) -> Option<f64> {
    if log_p {
        if p > 0.0 {
            return Some(f64::NAN);
        }
        if p == 0.0 {
            return Some(if lower { right } else { left });
        }
        if p == f64::NEG_INFINITY {
            return Some(if lower { left } else { right });
        }
    } else {
        if !(0.0..=1.0).contains(&p) {
            return Some(f64::NAN);
        }
        if p == 0.0 {
            return Some(if lower { left } else { right });
        }
        if p == 1.0 {
            return Some(if lower { right } else { left });
        }
    }
    None
}
