//! Error function, complementary error function and the scaled complement.
//!
//! Rational approximations on |x| ≤ 0.5, 0.5 < |x| ≤ 4 and an asymptotic
//! form in 1/x² beyond, shared between all three functions.

use super::machine::F64;

/// 1/√π
const RSQRT_PI: f64 = 0.564189583547756;

const A: [f64; 5] = [
    7.7105849500132e-5,
    -0.00133733772997339,
    0.0323076579225834,
    0.0479137145607681,
    0.128379167095513,
];
const B: [f64; 3] = [0.00301048631703895, 0.0538971687740286, 0.375795757275549];
const P: [f64; 8] = [
    -1.36864857382717e-7,
    0.564195517478974,
    7.21175825088309,
    43.1622272220567,
    152.98928504694,
    339.320816734344,
    451.918953711873,
    300.459261020162,
];
const Q: [f64; 8] = [
    1.0,
    12.7827273196294,
    77.0001529352295,
    277.585444743988,
    638.980264465631,
    931.35409485061,
    790.950925327898,
    300.459260956983,
];
const R: [f64; 5] = [
    2.10144126479064,
    26.2370141675169,
    21.3688200555087,
    4.6580782871847,
    0.282094791773523,
];
const S: [f64; 4] = [94.153775055546, 187.11481179959, 99.0191814623914, 18.0124575948747];

/// Horner evaluation, highest-order coefficient first.
#[inline]
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().fold(0.0, |acc, &ci| acc * x + ci)
}

/// x·(1 + A(x²))/B(x²), valid for |x| ≤ 0.5.
#[inline]
fn erf_small(x: f64) -> f64 {
    let t = x * x;
    let top = poly(&A, t) + 1.0;
    let bot = poly(&B, t) * t + 1.0;
    x * (top / bot)
}

/// P(|x|)/Q(|x|) ≈ exp(x²)·erfc(|x|) for 0.5 < |x| ≤ 4.
#[inline]
fn erfcx_mid(ax: f64) -> f64 {
    poly(&P, ax) / poly(&Q, ax)
}

/// Asymptotic exp(x²)·erfc(|x|) for |x| > 4.
#[inline]
fn erfcx_tail(ax: f64) -> f64 {
    let t = 1.0 / (ax * ax);
    let top = poly(&R, t);
    let bot = poly(&S, t) * t + 1.0;
    (RSQRT_PI - t * top / bot) / ax
}

/// Error function erf(x) = (2/√π) ∫₀ˣ e^{−t²} dt.
///
/// # Example
///
/// ```
/// use nmath_core::special::erf;
///
/// assert!(erf(0.0).abs() < 1e-16);
/// assert!((erf(1.0) - 0.8427007929497149).abs() < 1e-13);
/// assert_eq!(erf(6.0), 1.0);
/// ```
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    let ax = x.abs();
    if ax <= 0.5 {
        return erf_small(x);
    }
    if ax >= 5.8 {
        return x.signum();
    }
    let r = if ax <= 4.0 {
        0.5 - (-x * x).exp() * erfcx_mid(ax) + 0.5
    } else {
        0.5 - (-x * x).exp() * erfcx_tail(ax) + 0.5
    };
    if x < 0.0 { -r } else { r }
}

/// Complementary error function erfc(x) = 1 − erf(x), without cancellation
/// for large positive x.
///
/// # Example
///
/// ```
/// use nmath_core::special::erfc;
///
/// assert!((erfc(1.0) - 0.15729920705028513).abs() < 1e-14);
/// assert!(erfc(30.0) == 0.0);
/// ```
pub fn erfc(x: f64) -> f64 {
    erfc1(false, x)
}

/// Scaled complementary error function exp(x²)·erfc(x).
///
/// # Example
///
/// ```
/// use nmath_core::special::erfcx;
///
/// // ~ 1/(x√π) for large x
/// let x = 1e4_f64;
/// assert!((erfcx(x) * x * core::f64::consts::PI.sqrt() - 1.0).abs() < 1e-8);
/// ```
pub fn erfcx(x: f64) -> f64 {
    erfc1(true, x)
}

/// erfc(x) when `scaled` is false, exp(x²)·erfc(x) when true.
pub(crate) fn erfc1(scaled: bool, x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    let ax = x.abs();
    if ax <= 0.5 {
        let r = 0.5 - erf_small(x) + 0.5;
        return if scaled { (x * x).exp() * r } else { r };
    }

    let ret = if ax <= 4.0 {
        erfcx_mid(ax)
    } else {
        if x <= -5.6 {
            return if scaled { (x * x).exp() * 2.0 } else { 2.0 };
        }
        if !scaled && (x > 100.0 || x * x > -F64.exp_arg_min()) {
            return 0.0;
        }
        erfcx_tail(ax)
    };

    if scaled {
        if x < 0.0 { (x * x).exp() * 2.0 - ret } else { ret }
    } else {
        let r = (-x * x).exp() * ret;
        if x < 0.0 { 2.0 - r } else { r }
    }
}
