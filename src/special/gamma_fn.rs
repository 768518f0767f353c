//! Gamma and log-gamma functions.
//!
//! Two families live here. The TOMS 708 routines ([`log_gamma`],
//! [`log_gamma1p`], [`gam1`]) are the short rational approximations the
//! incomplete beta core is built on; they assume a positive argument. The
//! full-range [`gamma`] / [`lgamma`] (Chebyshev series on [1, 2] with a
//! Stirling tail corrected by `lgammacor`) cover the whole real line and are
//! what the incomplete gamma and the quantile iteration use.

use core::f64::consts::PI;

use super::elementary::{chebyshev_eval, log1pmx, logcf, sinpi};

/// ln √(2π)
pub(crate) const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;
/// ln √(π/2)
const LN_SQRT_PI_D2: f64 = 0.225_791_352_644_727_43;
/// Euler–Mascheroni constant γ.
const EULER: f64 = 0.577_215_664_901_532_9;

/// Stirling-series coefficients B₂ₖ/(2k(2k−1)), k = 1..6, shared with the
/// beta corrections in `beta_fn`.
pub(crate) const STIRLING: [f64; 6] = [
    0.0833333333333333,
    -0.00277777777760991,
    7.9365066682539e-4,
    -5.9520293135187e-4,
    8.37308034031215e-4,
    -0.00165322962780713,
];

/// Factorial lookup table: FACTORIAL[n] = n!, exact in f64 for n ≤ 20.
const FACTORIAL: [f64; 21] = [
    1.0,
    1.0,
    2.0,
    6.0,
    24.0,
    120.0,
    720.0,
    5040.0,
    40320.0,
    362880.0,
    3628800.0,
    39916800.0,
    479001600.0,
    6227020800.0,
    87178291200.0,
    1307674368000.0,
    20922789888000.0,
    355687428096000.0,
    6402373705728000.0,
    121645100408832000.0,
    2432902008176640000.0,
];

/// Chebyshev coefficients for Γ(x) on [1, 2] (first 22 of 42 suffice for
/// double precision).
const GAMCS: [f64; 22] = [
    0.008571195590989331,
    0.004415381324841007,
    0.05685043681599363,
    -0.0042198353964185605,
    0.0013268081812124602,
    -0.00018930245297988804,
    0.00003606925327441245,
    -0.000006056761904460864,
    0.0000010558295463022833,
    -0.0000001811967365542384,
    0.000000031177249647153223,
    -0.000000005354219639019687,
    0.0000000009193275519859589,
    -0.00000000015779412802883398,
    0.000000000027079806229349545,
    -0.00000000000464681865382573,
    0.000000000000797335019200742,
    -0.0000000000001368078209830916,
    0.00000000000002347319486563801,
    -0.000000000000004027432614949067,
    0.0000000000000006910051747372101,
    -0.00000000000000011855845002219929,
];

/// Chebyshev coefficients for the Stirling remainder on [10, ∞)
/// (5 of 15 needed for double precision).
const ALGMCS: [f64; 5] = [
    0.1666389480451863247205729650822,
    -0.1384948176067563840732986059135e-4,
    0.9810825646924729426157171547487e-8,
    -0.1809129475572494194263306266719e-10,
    0.6221098041892605227126015543416e-13,
];

// ---------------------------------------------------------------------------
// TOMS 708 family
// ---------------------------------------------------------------------------

/// ln Γ(a) for a > 0.
///
/// Rational approximation of ln Γ(1+a) for a ≤ 2.25, upward product
/// reduction below 10 and a six-term Stirling series above.
///
/// # Example
///
/// ```
/// use nmath_core::special::log_gamma;
///
/// assert!((log_gamma(10.0) - 12.801827480081469).abs() < 1e-12);
/// assert!(log_gamma(f64::NAN).is_nan());
/// ```
pub fn log_gamma(a: f64) -> f64 {
    // ln √(2π) − 1/2
    const D: f64 = 0.418938533204673;

    if a.is_nan() {
        return a;
    }
    if a <= 0.8 {
        return log_gamma1p(a) - a.ln();
    }
    if a <= 2.25 {
        return log_gamma1p(a - 0.5 - 0.5);
    }
    if a < 10.0 {
        let n = (a - 1.25) as i32;
        let mut t = a;
        let mut w = 1.0;
        for _ in 0..n {
            t -= 1.0;
            w *= t;
        }
        return log_gamma1p(t - 1.0) + w.ln();
    }
    let t = 1.0 / (a * a);
    let w = stirling_series(t) / a;
    D + w + (a - 0.5) * (a.ln() - 1.0)
}

/// ln Γ(1 + a) for −0.2 ≤ a ≤ 1.25.
pub fn log_gamma1p(a: f64) -> f64 {
    if a < 0.6 {
        const P: [f64; 7] = [
            0.577215664901533,
            0.844203922187225,
            -0.168860593646662,
            -0.780427615533591,
            -0.402055799310489,
            -0.0673562214325671,
            -0.00271935708322958,
        ];
        const Q: [f64; 6] = [
            2.88743195473681,
            3.12755088914843,
            1.56875193295039,
            0.361951990101499,
            0.0325038868253937,
            6.67465618796164e-4,
        ];
        let num = P.iter().rev().fold(0.0, |acc, &p| acc * a + p);
        let den = Q.iter().rev().fold(0.0, |acc, &q| (acc + q) * a) + 1.0;
        return -a * (num / den);
    }

    const R: [f64; 6] = [
        0.422784335098467,
        0.848044614534529,
        0.565221050691933,
        0.156513060486551,
        0.017050248402265,
        4.97958207639485e-4,
    ];
    const S: [f64; 5] = [
        1.24313399877507,
        0.548042109832463,
        0.10155218743983,
        0.00713309612391,
        1.16165475989616e-4,
    ];
    let x = a - 0.5 - 0.5;
    let num = R.iter().rev().fold(0.0, |acc, &r| acc * x + r);
    let den = S.iter().rev().fold(0.0, |acc, &s| (acc + s) * x) + 1.0;
    x * (num / den)
}

/// 1/Γ(a + 1) − 1 for −0.5 ≤ a ≤ 1.5.
pub fn gam1(a: f64) -> f64 {
    let d = a - 0.5;
    let t = if d > 0.0 { d - 0.5 } else { a };

    if t < 0.0 {
        const R: [f64; 9] = [
            -0.422784335098468,
            -0.771330383816272,
            -0.244757765222226,
            0.118378989872749,
            9.30357293360349e-4,
            -0.0118290993445146,
            0.00223047661158249,
            2.66505979058923e-4,
            -1.32674909766242e-4,
        ];
        const S1: f64 = 0.273076135303957;
        const S2: f64 = 0.0559398236957378;

        let top = R.iter().rev().fold(0.0, |acc, &r| acc * t + r);
        let bot = (S2 * t + S1) * t + 1.0;
        let w = top / bot;
        if d > 0.0 { t * w / a } else { a * (w + 0.5 + 0.5) }
    } else if t == 0.0 {
        0.0
    } else {
        const P: [f64; 7] = [
            0.577215664901533,
            -0.409078193005776,
            -0.230975380857675,
            0.0597275330452234,
            0.0076696818164949,
            -0.00514889771323592,
            5.89597428611429e-4,
        ];
        const Q: [f64; 4] = [
            0.427569613095214,
            0.158451672430138,
            0.0261132021441447,
            0.00423244297896961,
        ];

        let top = P.iter().rev().fold(0.0, |acc, &p| acc * t + p);
        let bot = Q.iter().rev().fold(0.0, |acc, &q| (acc + q) * t) + 1.0;
        let w = top / bot;
        if d > 0.0 { t / a * (w - 0.5 - 0.5) } else { a * w }
    }
}

/// Σ STIRLING[k]·tᵏ, the bracketed part of the Stirling correction.
#[inline]
pub(crate) fn stirling_series(t: f64) -> f64 {
    STIRLING.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

// ---------------------------------------------------------------------------
// Full-range gamma
// ---------------------------------------------------------------------------

/// Gamma function Γ(x) on the whole real line.
///
/// Chebyshev series on [1, 2] moved by recurrence for |x| ≤ 10, Stirling's
/// formula with the `lgammacor` remainder above, reflection below zero.
/// Returns NaN at the poles 0, −1, −2, … and for NaN input; +∞ past
/// x ≈ 171.61.
///
/// # Example
///
/// ```
/// use nmath_core::special::gamma;
///
/// assert_eq!(gamma(5.0), 24.0);
/// let sqrt_pi = core::f64::consts::PI.sqrt();
/// assert!((gamma(0.5) - sqrt_pi).abs() < 1e-14);
/// ```
pub fn gamma(x: f64) -> f64 {
    const XMIN: f64 = -170.5674972726612;
    const XMAX: f64 = 171.61447887182298;
    const XSML: f64 = 2.2474362225598545e-308;

    if x.is_nan() {
        return x;
    }
    if x == 0.0 || (x < 0.0 && x == x.round()) {
        log::debug!("gamma: pole at x = {x}");
        return f64::NAN;
    }
    if x > 0.0 && x <= 21.0 && x == x.floor() {
        return FACTORIAL[x as usize - 1];
    }

    let y = x.abs();
    if y <= 10.0 {
        // Reduce to Γ(1 + frac) and recur n steps.
        let mut n = x as i32;
        if x < 0.0 {
            n -= 1;
        }
        let frac = x - f64::from(n);
        n -= 1;
        let mut value = chebyshev_eval(frac * 2.0 - 1.0, &GAMCS) + 0.9375;
        if n == 0 {
            return value;
        }
        if n < 0 {
            if frac < XSML {
                log::debug!("gamma: x = {x} too close to a pole, result overflows");
                return if x > 0.0 { f64::INFINITY } else { f64::NEG_INFINITY };
            }
            for i in 0..-n {
                value /= x + f64::from(i);
            }
            return value;
        }
        for i in 1..=n {
            value *= frac + f64::from(i);
        }
        return value;
    }

    if x > XMAX {
        return f64::INFINITY;
    }
    if x < XMIN {
        return 0.0;
    }

    let correction = if (2.0 * y) == (2.0 * y).round() { stirlerr(y) } else { lgammacor(y) };
    let value = ((y - 0.5) * y.ln() - y + LN_SQRT_2PI + correction).exp();

    if x > 0.0 {
        return value;
    }
    let sinpiy = sinpi(y);
    if sinpiy == 0.0 {
        return f64::INFINITY;
    }
    -PI / (y * sinpiy * value)
}

/// ln |Γ(x)| on the whole real line; +∞ at the poles.
///
/// # Example
///
/// ```
/// use nmath_core::special::lgamma;
///
/// assert!((lgamma(0.5) - 0.5723649429247001).abs() < 1e-14);
/// assert!(lgamma(-2.0).is_infinite());
/// ```
pub fn lgamma(x: f64) -> f64 {
    const XMAX: f64 = 2.5327372760800758e305;

    if x.is_nan() {
        return x;
    }
    if x <= 0.0 && x == x.trunc() {
        return f64::INFINITY;
    }
    let y = x.abs();
    if y < 1e-306 {
        return -y.ln();
    }
    if y <= 10.0 {
        return gamma(x).abs().ln();
    }
    if y > XMAX {
        return f64::INFINITY;
    }
    if x > 0.0 {
        if x > 1e17 {
            return x * (x.ln() - 1.0);
        }
        if x > 4934720.0 {
            return LN_SQRT_2PI + (x - 0.5) * x.ln() - x;
        }
        return LN_SQRT_2PI + (x - 0.5) * x.ln() - x + lgammacor(x);
    }
    let sinpiy = sinpi(y).abs();
    if sinpiy == 0.0 {
        return f64::INFINITY;
    }
    LN_SQRT_PI_D2 + (x - 0.5) * y.ln() - x - sinpiy.ln() - lgammacor(y)
}

/// ln Γ(1 + a), accurate also for small |a| where `lgamma(1 + a)` cancels.
///
/// # Example
///
/// ```
/// use nmath_core::special::lgamma1p;
///
/// // −γa + (π²/12)a² + O(a³) near zero
/// let a = 1e-10;
/// let pi2 = core::f64::consts::PI * core::f64::consts::PI;
/// let series = -0.5772156649015329 * a + pi2 / 12.0 * a * a;
/// assert!((lgamma1p(a) - series).abs() < 1e-25);
/// ```
pub fn lgamma1p(a: f64) -> f64 {
    if a.abs() >= 0.5 {
        return lgamma(a + 1.0);
    }

    // Coefficients (ζ(i+2) − 1)/(i+2), i = 0..39, for the series of
    // ln Γ(1+a) + γa; the remainder is closed by a continued fraction.
    const COEFFS: [f64; 40] = [
        0.3224670334241132182362075833230126,
        0.06735230105319809513324605383715,
        0.02058080842778454787900092413529198,
        0.007385551028673985266273097291406834,
        0.002890510330741523285752988298486755,
        0.001192753911703260977113935692828109,
        0.0005096695247430424223356548135815582,
        0.0002231547584535793797614188036013401,
        0.0000994575127818085337145958900319017,
        0.00004492623673813314170020750240635786,
        0.00002050721277567069155316650397830591,
        0.000009439488275268395903987425104415055,
        0.000004374866789907487804181793223952411,
        0.000002039215753801366236781900709670839,
        0.0000009551412130407419832857179772951265,
        0.0000004492469198764566043294290331193655,
        0.0000002120718480555466586923135901077628,
        0.0000001004322482396809960872083050053344,
        0.0000000476981016936398056576019341724673,
        0.00000002271109460894316491031998116062124,
        0.00000001083865921489695409107491757968159,
        0.000000005183475041970046655121248647057669,
        0.000000002483674543802478317185008663991718,
        0.00000000119214014058609120744254820277464,
        0.0000000005731367241678862013330194857961011,
        0.0000000002759522885124233145178149692816341,
        0.0000000001330476437424448948149715720858008,
        0.00000000006422964563838100022082448087644648,
        0.00000000003104424774732227276239215783404066,
        0.00000000001502138408075414217093301048780668,
        0.000000000007275974480239079662504549924814047,
        0.000000000003527742476575915083615072228655483,
        0.000000000001711991790559617908601084114443031,
        0.0000000000008315385841420284819798357793954418,
        0.0000000000004042200525289440065536008957032895,
        0.0000000000001966475631096616490411045679010286,
        0.00000000000009573630387838555763782200936508615,
        0.00000000000004664076026428374224576492565974577,
        0.00000000000002273736960065972320633279596737272,
        0.00000000000001109139947083452201658320007192334,
    ];
    // ζ(N+2) − 1
    const C: f64 = 0.2273736845824652515226821577978691e-12;
    const TOL_LOGCF: f64 = 1e-14;

    let n = COEFFS.len() as f64;
    let tail = C * logcf(-a / 2.0, n + 2.0, 1.0, TOL_LOGCF);
    let lgam = COEFFS.iter().rev().fold(tail, |acc, &c| c - a * acc);
    (a * lgam - EULER) * a - log1pmx(a)
}

/// Stirling remainder ln Γ(x) − [(x − ½) ln x − x + ln √(2π)] for x ≥ 10.
pub(crate) fn lgammacor(x: f64) -> f64 {
    const XBIG: f64 = 94906265.62425156;

    if x < 10.0 {
        return f64::NAN;
    }
    if x < XBIG {
        let tmp = 10.0 / x;
        return chebyshev_eval(tmp * tmp * 2.0 - 1.0, &ALGMCS) / x;
    }
    1.0 / (x * 12.0)
}

/// Error of Stirling's approximation to ln n!:
/// ln n! − [(n + ½) ln n − n + ln √(2π)].
///
/// Tabulated at half-integers up to 15, computed from [`lgamma`] /
/// [`lgamma1p`] below that and from the asymptotic series above.
pub(crate) fn stirlerr(n: f64) -> f64 {
    const S0: f64 = 1.0 / 12.0;
    const S1: f64 = 1.0 / 360.0;
    const S2: f64 = 1.0 / 1260.0;
    const S3: f64 = 1.0 / 1680.0;
    const S4: f64 = 1.0 / 1188.0;

    const SFERR_HALVES: [f64; 31] = [
        0.0,
        0.1534264097200273452913848,
        0.0810614667953272582196702,
        0.0548141210519176538961390,
        0.0413406959554092940938221,
        0.03316287351993628748511048,
        0.02767792568499833914878929,
        0.02374616365629749597132920,
        0.02079067210376509311152277,
        0.01848845053267318523077934,
        0.01664469118982119216319487,
        0.01513497322191737887351255,
        0.01387612882307074799874573,
        0.01281046524292022692424986,
        0.01189670994589177009505572,
        0.01110455975820691732662991,
        0.010411265261972096497478567,
        0.009799416126158803298389475,
        0.009255462182712732917728637,
        0.008768700134139385462952823,
        0.008330563433362871256469318,
        0.0079341145643140205472481,
        0.007573675487951840794972024,
        0.007244554301320383179543912,
        0.006942840107209529865664152,
        0.006665247032707682442354394,
        0.006408994188004207068439631,
        0.006171712263039457647532867,
        0.005951370112758847735624416,
        0.005746216513010115682023589,
        0.00555473355196280137103869,
    ];

    if n <= 15.0 {
        let nn = n + n;
        if nn == nn.trunc() {
            return SFERR_HALVES[nn as usize];
        }
        let lgam = if n < 1.0 { lgamma1p(n) } else { lgamma(n + 1.0) };
        return lgam - (n + 0.5) * n.ln() + n - LN_SQRT_2PI;
    }

    let nn = n * n;
    if n > 500.0 {
        return (S0 - S1 / nn) / n;
    }
    if n > 80.0 {
        return (S0 - (S1 - S2 / nn) / nn) / n;
    }
    if n > 35.0 {
        return (S0 - (S1 - (S2 - S3 / nn) / nn) / nn) / n;
    }
    (S0 - (S1 - (S2 - (S3 - S4 / nn) / nn) / nn) / nn) / n
}
