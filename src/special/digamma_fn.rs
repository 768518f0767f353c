//! Digamma ψ(x) and trigamma ψ′(x).

use core::f64::consts::PI;

use super::machine::F64;

/// π/4
const PIOV4: f64 = 0.785398163397448;
/// Positive zero of ψ.
const DX0: f64 = 1.461632144968362341262659542325721325;

/// Rational approximation of ψ(x)/(x − x₀) on [0.5, 3].
const P1: [f64; 7] = [
    0.0089538502298197,
    4.77762828042627,
    142.441585084029,
    1186.45200713425,
    3633.51846806499,
    4138.10161269013,
    1305.60269827897,
];
const Q1: [f64; 6] = [
    44.8452573429826,
    520.752771467162,
    2210.0079924783,
    3641.27349079381,
    1908.310765963,
    6.91091682714533e-6,
];

/// Asymptotic correction ψ(x) − ln x + 1/(2x) in 1/x² for x > 3.
const P2: [f64; 4] = [
    -2.12940445131011,
    -7.01677227766759,
    -4.48616543918019,
    -0.648157123766197,
];
const Q2: [f64; 4] = [32.2703493791143, 89.2920700481861, 54.6117738103215, 7.77788548522962];

/// Digamma function ψ(x) = d/dx ln Γ(x).
///
/// Reflection `ψ(1−x) − π·cot(πx)` below ½, a rational approximation on
/// [½, 3] and an asymptotic expansion above. Returns NaN at the poles
/// 0, −1, −2, … and for NaN input.
///
/// # Example
///
/// ```
/// use nmath_core::special::digamma;
///
/// // ψ(1) = −γ
/// assert!((digamma(1.0) + 0.5772156649015329).abs() < 1e-13);
/// assert!(digamma(-2.0).is_nan());
/// ```
pub fn digamma(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x <= 0.0 && x == x.floor() {
        return f64::NAN;
    }
    psi(x)
}

/// TOMS 708 `psi`: ψ(x) for any x that is not a pole. Returns 0 where the
/// reflection term cannot be evaluated to any accuracy.
pub(crate) fn psi(x0: f64) -> f64 {
    const XSMALL: f64 = 1e-9;
    let xmax1 = f64::from(i32::MAX).min(0.5 / (0.5 * F64.epsilon));

    let mut x = x0;
    let mut aug = 0.0;

    if x < 0.5 {
        if x.abs() <= XSMALL {
            if x == 0.0 {
                return 0.0;
            }
            // cot(πx) ≈ 1/(πx)
            aug = -1.0 / x;
        } else {
            // Reduce π·cot(πx) to a tangent/cotangent of an angle in [0, π/4].
            let mut w = -x;
            let mut sgn = PIOV4;
            if w <= 0.0 {
                w = -w;
                sgn = -sgn;
            }
            if w >= xmax1 {
                return 0.0;
            }
            w -= w.trunc();
            let nq = (w * 4.0) as i32;
            w = (w - f64::from(nq) * 0.25) * 4.0;
            let n = nq / 2;
            if n + n != nq {
                w = 1.0 - w;
            }
            let z = PIOV4 * w;
            let m = n / 2;
            if m + m != n {
                sgn = -sgn;
            }
            let n = (nq + 1) / 2;
            let m = n / 2;
            if m + m == n {
                if z == 0.0 {
                    return 0.0;
                }
                aug = sgn * (z.cos() / z.sin() * 4.0);
            } else {
                aug = sgn * (z.sin() / z.cos() * 4.0);
            }
        }
        x = 1.0 - x;
    }

    if x <= 3.0 {
        let mut den = x;
        let mut upper = P1[0] * x;
        for i in 1..=5 {
            den = (den + Q1[i - 1]) * x;
            upper = (upper + P1[i]) * x;
        }
        den = (upper + P1[6]) / (den + Q1[5]);
        return den * (x - DX0) + aug;
    }

    if x < xmax1 {
        let w = 1.0 / (x * x);
        let mut den = w;
        let mut upper = P2[0] * w;
        for i in 1..=3 {
            den = (den + Q2[i - 1]) * w;
            upper = (upper + P2[i]) * w;
        }
        aug += upper / (den + Q2[3]) - 0.5 / x;
    }
    aug + x.ln()
}

/// Trigamma function ψ′(x) = d²/dx² ln Γ(x).
///
/// Recurrence ψ′(x) = ψ′(x+1) + 1/x² up to x ≥ 20, then the Bernoulli
/// asymptotic series; reflection ψ′(x) = π²/sin²(πx) − ψ′(1−x) below zero.
///
/// # Example
///
/// ```
/// use nmath_core::special::trigamma;
///
/// // ψ′(1) = π²/6
/// let pi = core::f64::consts::PI;
/// assert!((trigamma(1.0) - pi * pi / 6.0).abs() < 1e-13);
/// ```
pub fn trigamma(x: f64) -> f64 {
    // B₂ₖ for k = 1..8: 1/6, −1/30, 1/42, −1/30, 5/66, −691/2730, 7/6, −3617/510
    const BERNOULLI: [f64; 8] = [
        1.0 / 6.0,
        -1.0 / 30.0,
        1.0 / 42.0,
        -1.0 / 30.0,
        5.0 / 66.0,
        -691.0 / 2730.0,
        7.0 / 6.0,
        -3617.0 / 510.0,
    ];
    const SHIFT_TO: f64 = 20.0;

    if x.is_nan() {
        return x;
    }
    if x <= 0.0 && x == x.floor() {
        return f64::NAN;
    }
    if x < 0.0 {
        let s = (PI * x).sin();
        return PI * PI / (s * s) - trigamma(1.0 - x);
    }

    let mut acc = 0.0;
    let mut xx = x;
    while xx < SHIFT_TO {
        acc += 1.0 / (xx * xx);
        xx += 1.0;
    }

    // ψ′(x) ~ 1/x + 1/(2x²) + Σ B₂ₖ / x^{2k+1}
    let inv = 1.0 / xx;
    let inv2 = inv * inv;
    let mut term = inv * inv2;
    let mut series = 0.0;
    for &b in &BERNOULLI {
        series += b * term;
        term *= inv2;
    }
    acc + inv + 0.5 * inv2 + series
}
