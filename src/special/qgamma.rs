//! Gamma and chi-squared quantiles.
//!
//! The search runs in three phases: a closed-form starting value
//! ([`qchisq_appr`]), a seven-term Taylor refinement of the chi-squared
//! quantile driven by [`pgamma_raw`](super::pgamma_raw), and a short Newton
//! polish on ln P. The phase that ended the refinement fixes how many Newton
//! steps the polish may take; see [`QuantilePhase::newton_budget`].

use core::f64::consts::LN_2;
use core::fmt;

use log::{debug, warn};

use super::elementary::{dt_log_lower, dt_log_upper, dt_lower_linear, quantile_boundary};
use super::gamma_fn::{lgamma, lgamma1p};
use super::incgamma::{dgamma, pgamma, pgamma_raw};
use super::machine::F64;
use super::normal_fn::qnorm;
use super::SpecialError;

/// Relative tolerance of the AS 91 start for small ν.
const EPS1: f64 = 1e-2;
/// Taylor convergence tolerance, and the "start is effectively zero" cutoff.
const EPS2: f64 = 5e-7;
/// Newton stops when |ln P(x) − ln p| < EPS_N·|ln p|.
const EPS_N: f64 = 1e-15;
/// Lower-tail probabilities outside [P_MIN, P_MAX] skip the Taylor phase.
const P_MIN: f64 = 1e-100;
const P_MAX: f64 = 1.0 - 1e-14;
/// Shapes below this are flagged as unreliable.
const TINY_SHAPE: f64 = 1e-10;

const I420: f64 = 1.0 / 420.0;
const I2520: f64 = 1.0 / 2520.0;
const I5040: f64 = 1.0 / 5040.0;

/// How the starting value and Taylor refinement ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantilePhase {
    /// The starting value was not finite; it is returned as is.
    NonFiniteStart,
    /// The starting chi-squared value was below 5e-7.
    TinyChiSquare,
    /// The lower-tail probability lies outside [1e-100, 1 − 1e-14].
    ExtremeProbability,
    /// A Taylor step produced a non-finite residual or a non-positive
    /// iterate; the search restarted from the initial value.
    TaylorAborted,
    /// The Taylor refinement converged.
    TaylorConverged,
    /// The Taylor refinement hit its iteration cap.
    TaylorExhausted,
}

impl QuantilePhase {
    /// Newton steps allowed after this phase.
    ///
    /// 0 for a non-finite start, 20 for either early exit, 27 after an
    /// aborted Taylor phase, otherwise 1 (7 when the shape is below 1e-10).
    pub fn newton_budget(self, tiny_shape: bool) -> u32 {
        match self {
            Self::NonFiniteStart => 0,
            Self::TinyChiSquare | Self::ExtremeProbability => 20,
            Self::TaylorAborted => 27,
            Self::TaylorConverged | Self::TaylorExhausted => {
                if tiny_shape { 7 } else { 1 }
            }
        }
    }
}

impl fmt::Display for QuantilePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteStart => write!(f, "non-finite starting value"),
            Self::TinyChiSquare => write!(f, "starting value below 5e-7"),
            Self::ExtremeProbability => write!(f, "extreme probability"),
            Self::TaylorAborted => write!(f, "Taylor refinement aborted"),
            Self::TaylorConverged => write!(f, "Taylor refinement converged"),
            Self::TaylorExhausted => write!(f, "Taylor refinement hit its iteration cap"),
        }
    }
}

/// Settings for the gamma quantile search.
#[derive(Debug, Clone, Copy)]
pub struct QuantileSettings {
    /// Maximum number of Taylor refinement steps.
    pub max_taylor_iter: usize,
    /// Apply the second-order (Halley) correction to each Newton step.
    pub second_order: bool,
    /// Replace the phase-dependent Newton budget.
    pub newton_budget: Option<u32>,
}

impl Default for QuantileSettings {
    fn default() -> Self {
        Self {
            max_taylor_iter: 1000,
            second_order: true,
            newton_budget: None,
        }
    }
}

/// Outcome of a gamma quantile search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileSearch {
    /// The quantile.
    pub x: f64,
    /// How the refinement phase ended.
    pub phase: QuantilePhase,
    /// Newton steps that were allowed.
    pub newton_budget: u32,
    /// Newton steps that were accepted.
    pub newton_steps: u32,
}

/// Starting value for the chi-squared quantile with `nu` degrees of
/// freedom, given `g = ln Γ(nu/2)`.
///
/// Uses the small-value power approximation when `nu < −1.24·ln p`,
/// Wilson–Hilferty when `nu > 0.32`, and otherwise AS 91's Newton
/// iteration to relative tolerance `tol`.
///
/// # Example
///
/// ```
/// use nmath_core::special::{qchisq_appr, lgamma};
///
/// // Wilson–Hilferty is within a few percent of qchisq(0.95, 10) = 18.307
/// let ch = qchisq_appr(0.95, 10.0, lgamma(5.0), true, false, 1e-2);
/// assert!((ch / 18.307038053275146 - 1.0).abs() < 0.01);
/// ```
pub fn qchisq_appr(p: f64, nu: f64, g: f64, lower_tail: bool, log_p: bool, tol: f64) -> f64 {
    const C7: f64 = 4.67;
    const C8: f64 = 6.66;
    const C9: f64 = 6.73;
    const C10: f64 = 13.32;
    const MAX_IT: usize = 1000;

    if p.is_nan() || nu.is_nan() {
        return p + nu;
    }
    if (log_p && p > 0.0) || (!log_p && !(0.0..=1.0).contains(&p)) {
        debug!("qchisq_appr: probability {p} out of range");
        return f64::NAN;
    }
    if nu <= 0.0 {
        debug!("qchisq_appr: non-positive degrees of freedom {nu}");
        return f64::NAN;
    }

    let alpha = 0.5 * nu;
    let c = alpha - 1.0;

    let p1 = dt_log_lower(p, lower_tail, log_p);
    if nu < -1.24 * p1 {
        // small chi-squared
        let lgam1pa = if alpha < 0.5 { lgamma1p(alpha) } else { alpha.ln() + g };
        return ((lgam1pa + p1) / alpha + LN_2).exp();
    }

    if nu > 0.32 {
        // Wilson–Hilferty
        let x = qnorm(p, 0.0, 1.0, lower_tail, log_p);
        let p1 = 2.0 / (9.0 * nu);
        let mut ch = nu * (x * p1.sqrt() + 1.0 - p1).powi(3);
        // p tending to 1
        if ch > 2.2 * nu + 6.0 {
            ch = -2.0 * (dt_log_upper(p, lower_tail, log_p) - c * (0.5 * ch).ln() + g);
        }
        return ch;
    }

    // AS 91 for 1.24·(−ln p) ≤ nu ≤ 0.32
    let mut ch = 0.4;
    let a = dt_log_upper(p, lower_tail, log_p) + g + c * LN_2;
    for _ in 0..MAX_IT {
        let q = ch;
        let p1 = 1.0 / (1.0 + ch * (C7 + ch));
        let p2 = ch * (C9 + ch * (C8 + ch));
        let t = -0.5 + (C7 + 2.0 * ch) * p1 - (C9 + ch * (C10 + 3.0 * ch)) / p2;
        ch -= (1.0 - (a + 0.5 * ch).exp() * p2 * p1) / t;
        if (q - ch).abs() <= tol * ch.abs() {
            return ch;
        }
    }
    warn!("qchisq_appr: no convergence after {MAX_IT} steps, ch = {ch}");
    ch
}

/// Seven-term Taylor refinement of the chi-squared quantile `ch` for the
/// lower-tail probability `p_`.
fn taylor_refine(ch0: f64, p_: f64, alpha: f64, g: f64, max_iter: usize) -> (f64, QuantilePhase) {
    let c = alpha - 1.0;
    let s6 = (120.0 + c * (346.0 + 127.0 * c)) * I5040;

    let mut ch = ch0;
    for _ in 0..max_iter {
        let q = ch;
        let p1 = 0.5 * ch;
        let p2 = p_ - pgamma_raw(p1, alpha, true, false);
        if !p2.is_finite() || ch <= 0.0 {
            return (ch0, QuantilePhase::TaylorAborted);
        }

        let t = p2 * (alpha * LN_2 + g + p1 - c * ch.ln()).exp();
        let b = t / ch;
        let a = 0.5 * t - b * c;

        let s1 = (210.0 + a * (140.0 + a * (105.0 + a * (84.0 + a * (70.0 + 60.0 * a))))) * I420;
        let s2 = (420.0 + a * (735.0 + a * (966.0 + a * (1141.0 + 1278.0 * a)))) * I2520;
        let s3 = (210.0 + a * (462.0 + a * (707.0 + 932.0 * a))) * I2520;
        let s4 = (252.0 + a * (672.0 + 1182.0 * a) + c * (294.0 + a * (889.0 + 1740.0 * a))) * I5040;
        let s5 = (84.0 + 2264.0 * a + c * (1175.0 + 606.0 * a)) * I2520;

        ch += t * (1.0 + 0.5 * t * s1 - b * c * (s1 - b * (s2 - b * (s3 - b * (s4 - b * (s5 - b * s6))))));
        if (q - ch).abs() < EPS2 * ch {
            return (ch, QuantilePhase::TaylorConverged);
        }
        if (q - ch).abs() > 0.1 * ch {
            ch = if ch < q { 0.9 * q } else { 1.1 * q };
        }
    }

    warn!("qgamma: Taylor refinement did not converge in {max_iter} steps (shape {alpha})");
    (ch, QuantilePhase::TaylorExhausted)
}

/// Newton polish on ln P(x) − ln p. Returns the iterate and the number of
/// accepted steps.
#[allow(clippy::too_many_arguments)]
fn newton_polish(
    mut x: f64,
    p: f64,
    alpha: f64,
    scale: f64,
    lower_tail: bool,
    log_p: bool,
    budget: u32,
    second_order: bool,
) -> (f64, u32) {
    let p = if log_p { p } else { p.ln() };

    let mut p_ = if x == 0.0 {
        x = F64.min_positive;
        let p_ = pgamma(x, alpha, scale, lower_tail, true);
        if (lower_tail && p_ > p * (1.0 + 1e-7)) || (!lower_tail && p_ < p * (1.0 - 1e-7)) {
            return (0.0, 0);
        }
        p_
    } else {
        pgamma(x, alpha, scale, lower_tail, true)
    };
    if p_ == f64::NEG_INFINITY {
        return (0.0, 0);
    }

    let mut steps = 0;
    for i in 1..=budget {
        let p1 = p_ - p;
        if p1.abs() < (EPS_N * p).abs() {
            break;
        }
        let g = dgamma(x, alpha, scale, true);
        if g == f64::NEG_INFINITY {
            break;
        }

        // f = ln P − p, f' = ±density/P
        let fprime = if lower_tail { (g - p_).exp() } else { -(g - p_).exp() };
        let mut delta = p1 / fprime;
        if second_order {
            // f''/f' = (α − 1)/x − 1/scale − f'
            let h = (alpha - 1.0) / x - 1.0 / scale - fprime;
            let denom = 1.0 - 0.5 * delta * h;
            if denom.is_finite() && denom > 0.5 {
                delta /= denom;
            }
        }

        let t = x - delta;
        p_ = pgamma(t, alpha, scale, lower_tail, true);
        if (p_ - p).abs() > p1.abs() || (i > 1 && (p_ - p).abs() == p1.abs()) {
            break;
        }
        x = t;
        steps += 1;
    }
    (x, steps)
}

/// Gamma quantile search with explicit settings, reporting how it ended.
///
/// `p` must already be an interior probability (see [`qgamma`] for the
/// boundary handling).
///
/// # Example
///
/// ```
/// use nmath_core::special::{qgamma_search, QuantilePhase, QuantileSettings};
///
/// let s = qgamma_search(0.5, 3.0, 1.0, true, false, &QuantileSettings::default());
/// assert_eq!(s.phase, QuantilePhase::TaylorConverged);
/// assert_eq!(s.newton_budget, 1);
/// ```
pub fn qgamma_search(
    p: f64,
    alpha: f64,
    scale: f64,
    lower_tail: bool,
    log_p: bool,
    settings: &QuantileSettings,
) -> QuantileSearch {
    let tiny_shape = alpha < TINY_SHAPE;
    if tiny_shape {
        warn!("qgamma: shape {alpha} is extremely small; results may be unreliable");
    }

    let p_ = dt_lower_linear(p, lower_tail, log_p);
    let g = lgamma(alpha);

    let mut ch = qchisq_appr(p, 2.0 * alpha, g, lower_tail, log_p, EPS1);
    let phase = if !ch.is_finite() {
        QuantilePhase::NonFiniteStart
    } else if ch < EPS2 {
        QuantilePhase::TinyChiSquare
    } else if !(P_MIN..=P_MAX).contains(&p_) {
        QuantilePhase::ExtremeProbability
    } else {
        let (refined, phase) = taylor_refine(ch, p_, alpha, g, settings.max_taylor_iter);
        ch = refined;
        phase
    };

    let newton_budget = settings
        .newton_budget
        .unwrap_or_else(|| phase.newton_budget(tiny_shape));
    let x = 0.5 * scale * ch;
    let (x, newton_steps) = if newton_budget > 0 {
        newton_polish(x, p, alpha, scale, lower_tail, log_p, newton_budget, settings.second_order)
    } else {
        (x, 0)
    };
    debug!("qgamma: p = {p}, shape = {alpha}: {phase}, {newton_steps}/{newton_budget} Newton steps");

    QuantileSearch {
        x,
        phase,
        newton_budget,
        newton_steps,
    }
}

/// Gamma quantile for an interior probability, with explicit settings.
pub fn qgamma_ratio_with(
    p: f64,
    alpha: f64,
    scale: f64,
    lower_tail: bool,
    log_p: bool,
    settings: &QuantileSettings,
) -> f64 {
    qgamma_search(p, alpha, scale, lower_tail, log_p, settings).x
}

/// Gamma quantile x with `pgamma_raw(x/scale, alpha) = p`, for a
/// probability already checked to be strictly inside its range.
///
/// # Example
///
/// ```
/// use nmath_core::special::qgamma_ratio;
///
/// // median of the standard exponential is ln 2
/// let m = qgamma_ratio(0.5, 1.0, 1.0, true, false);
/// assert!((m - core::f64::consts::LN_2).abs() < 1e-14);
/// ```
pub fn qgamma_ratio(p: f64, alpha: f64, scale: f64, lower_tail: bool, log_p: bool) -> f64 {
    qgamma_ratio_with(p, alpha, scale, lower_tail, log_p, &QuantileSettings::default())
}

/// Gamma quantile function with the given shape and scale.
///
/// NaN arguments propagate; a probability outside its range, `shape < 0` or
/// `scale ≤ 0` give NaN. `p = 0` maps to 0 and `p = 1` to +∞.
///
/// # Example
///
/// ```
/// use nmath_core::special::qgamma;
///
/// assert_eq!(qgamma(0.0, 2.0, 1.0, true, false), 0.0);
/// assert_eq!(qgamma(1.0, 2.0, 1.0, true, false), f64::INFINITY);
/// assert!(qgamma(1.5, 2.0, 1.0, true, false).is_nan());
/// ```
pub fn qgamma(p: f64, alpha: f64, scale: f64, lower_tail: bool, log_p: bool) -> f64 {
    if p.is_nan() || alpha.is_nan() || scale.is_nan() {
        return p + alpha + scale;
    }
    if let Some(q) = quantile_boundary(p, 0.0, f64::INFINITY, lower_tail, log_p) {
        return q;
    }
    if alpha < 0.0 || scale <= 0.0 {
        debug!("qgamma: invalid shape {alpha} or scale {scale}");
        return f64::NAN;
    }
    if alpha == 0.0 {
        return 0.0;
    }
    qgamma_ratio(p, alpha, scale, lower_tail, log_p)
}

/// Chi-squared quantile function with `df` degrees of freedom.
///
/// # Example
///
/// ```
/// use nmath_core::special::qchisq;
///
/// assert!((qchisq(0.95, 1.0, true, false) - 3.841458820694124).abs() < 1e-12);
/// ```
pub fn qchisq(p: f64, df: f64, lower_tail: bool, log_p: bool) -> f64 {
    qgamma(p, 0.5 * df, 2.0, lower_tail, log_p)
}

/// Inverse of the regularized lower incomplete gamma function: the x with
/// P(a, x) = p.
///
/// Requires a > 0 and 0 ≤ p ≤ 1.
///
/// # Errors
///
/// Returns [`SpecialError::DomainError`] for arguments outside the domain,
/// and [`SpecialError::ConvergenceFailure`] if the Taylor refinement hit
/// its iteration cap.
///
/// # Example
///
/// ```
/// use nmath_core::special::{gamma_inc, gamma_inc_inv};
///
/// let x = gamma_inc_inv(2.5, 0.3).unwrap();
/// assert!((gamma_inc(2.5, x).unwrap() - 0.3).abs() < 1e-14);
/// ```
pub fn gamma_inc_inv(a: f64, p: f64) -> Result<f64, SpecialError> {
    // NaN fails both comparisons
    if !(a > 0.0) || !(0.0..=1.0).contains(&p) {
        return Err(SpecialError::DomainError);
    }
    if let Some(x) = quantile_boundary(p, 0.0, f64::INFINITY, true, false) {
        return Ok(x);
    }
    let s = qgamma_search(p, a, 1.0, true, false, &QuantileSettings::default());
    if s.phase == QuantilePhase::TaylorExhausted {
        return Err(SpecialError::ConvergenceFailure);
    }
    Ok(s.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
        ((a - b) / b).abs() < tol
    }

    // =====================================================================
    // Phases and Newton budgets
    // =====================================================================

    #[test]
    fn newton_budgets_are_pinned() {
        use QuantilePhase::*;
        assert_eq!(NonFiniteStart.newton_budget(false), 0);
        assert_eq!(TinyChiSquare.newton_budget(false), 20);
        assert_eq!(ExtremeProbability.newton_budget(false), 20);
        assert_eq!(TaylorAborted.newton_budget(false), 27);
        assert_eq!(TaylorConverged.newton_budget(false), 1);
        assert_eq!(TaylorExhausted.newton_budget(false), 1);
        assert_eq!(TaylorConverged.newton_budget(true), 7);
        assert_eq!(TaylorExhausted.newton_budget(true), 7);
        assert_eq!(TinyChiSquare.newton_budget(true), 20);
        assert_eq!(TaylorAborted.newton_budget(true), 27);
        assert_eq!(NonFiniteStart.newton_budget(true), 0);
    }

    #[test]
    fn central_probability_converges_in_taylor_phase() {
        let s = qgamma_search(0.5, 3.0, 1.0, true, false, &QuantileSettings::default());
        assert_eq!(s.phase, QuantilePhase::TaylorConverged);
        assert_eq!(s.newton_budget, 1);
        assert!(s.newton_steps <= 1);
        assert!((pgamma_raw(s.x, 3.0, true, false) - 0.5).abs() < 1e-14);
    }

    #[test]
    fn tiny_start_goes_straight_to_newton() {
        // small chi-squared start: P(5, x) ≈ x⁵/120
        let p = 1e-120;
        let s = qgamma_search(p, 5.0, 1.0, true, false, &QuantileSettings::default());
        assert_eq!(s.phase, QuantilePhase::TinyChiSquare);
        assert_eq!(s.newton_budget, 20);
        let lp = pgamma_raw(s.x, 5.0, true, true);
        assert!((lp - p.ln()).abs() < 1e-12 * p.ln().abs());
    }

    #[test]
    fn extreme_probability_goes_straight_to_newton() {
        // upper tail 1e-20: lower-tail probability rounds above 1 − 1e-14
        let s = qgamma_search(1e-20, 3.0, 1.0, false, false, &QuantileSettings::default());
        assert_eq!(s.phase, QuantilePhase::ExtremeProbability);
        assert_eq!(s.newton_budget, 20);
        let lq = pgamma_raw(s.x, 3.0, false, true);
        assert!((lq - 1e-20_f64.ln()).abs() < 1e-12 * 46.0);

        // lower tail below 1e-100 with a start well away from zero
        let s = qgamma_search(1e-120, 1000.0, 1.0, true, false, &QuantileSettings::default());
        assert_eq!(s.phase, QuantilePhase::ExtremeProbability);
        let lp = pgamma_raw(s.x, 1000.0, true, true);
        assert!((lp - 1e-120_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn exhausted_taylor_phase_still_polishes() {
        let settings = QuantileSettings {
            max_taylor_iter: 0,
            ..QuantileSettings::default()
        };
        let s = qgamma_search(0.3, 4.0, 1.0, true, false, &settings);
        assert_eq!(s.phase, QuantilePhase::TaylorExhausted);
        assert_eq!(s.newton_budget, 1);
        // one Newton step from Wilson–Hilferty
        assert!((pgamma_raw(s.x, 4.0, true, false) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn budget_override_skips_polish() {
        let settings = QuantileSettings {
            newton_budget: Some(0),
            ..QuantileSettings::default()
        };
        let s = qgamma_search(0.5, 3.0, 2.0, true, false, &settings);
        assert_eq!(s.newton_budget, 0);
        assert_eq!(s.newton_steps, 0);
        // the Taylor phase alone is good to its 5e-7 tolerance
        assert!((pgamma_raw(s.x / 2.0, 3.0, true, false) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn plain_newton_matches_second_order() {
        let plain = QuantileSettings {
            second_order: false,
            ..QuantileSettings::default()
        };
        let a = qgamma_ratio_with(0.8, 2.5, 1.0, true, false, &plain);
        let b = qgamma_ratio(0.8, 2.5, 1.0, true, false);
        assert!(rel_eq(a, b, 1e-10));
    }

    // =====================================================================
    // Starting values
    // =====================================================================

    #[test]
    fn qchisq_appr_regimes() {
        // small chi-squared: nu < −1.24·ln p, exact to leading order
        let ch = qchisq_appr(1e-30, 4.0, lgamma(2.0), true, false, EPS1);
        let p = pgamma_raw(0.5 * ch, 2.0, true, false);
        assert!(rel_eq(p, 1e-30, 1e-6));

        // AS 91 for 1.24·(−ln p) ≤ nu ≤ 0.32; refined by the full search
        let ch = qchisq_appr(0.9, 0.3, lgamma(0.15), true, false, EPS1);
        assert!(ch.is_finite() && ch > 0.0);
        let x = qgamma_ratio(0.9, 0.15, 1.0, true, false);
        assert!((pgamma_raw(x, 0.15, true, false) - 0.9).abs() < 1e-12);

        // p tending to 1 triggers the upper-tail correction
        let ch = qchisq_appr(1e-10, 4.0, lgamma(2.0), false, false, EPS1);
        assert!(ch > 2.2 * 4.0 + 6.0);
        let q = pgamma_raw(0.5 * ch, 2.0, false, false);
        assert!(rel_eq(q, 1e-10, 0.5));
    }

    #[test]
    fn qchisq_appr_invalid() {
        assert!(qchisq_appr(0.5, 0.0, 0.0, true, false, EPS1).is_nan());
        assert!(qchisq_appr(1.5, 2.0, 0.0, true, false, EPS1).is_nan());
        assert!(qchisq_appr(f64::NAN, 2.0, 0.0, true, false, EPS1).is_nan());
    }

    // =====================================================================
    // Reference values
    // =====================================================================

    #[test]
    fn chi_squared_reference_values() {
        assert!(rel_eq(qchisq(0.95, 1.0, true, false), 3.841458820694124, 1e-13));
        assert!(rel_eq(qchisq(0.95, 10.0, true, false), 18.307038053275146, 1e-13));
        assert!(rel_eq(qchisq(0.99, 1.0, true, false), 6.634896601021214, 1e-13));
        assert!(rel_eq(qchisq(0.05, 10.0, false, false), 18.307038053275146, 1e-13));
    }

    #[test]
    fn exponential_quantiles() {
        let (p, scale) = (0.3_f64, 2.0);
        let expected = -scale * (-p).ln_1p();
        assert!(rel_eq(qgamma(p, 1.0, scale, true, false), expected, 1e-13));
    }

    #[test]
    fn log_and_upper_tail_agree() {
        let a = qgamma(0.3_f64.ln(), 2.5, 1.0, false, true);
        let b = qgamma(0.7, 2.5, 1.0, true, false);
        assert!(rel_eq(a, b, 1e-12));
    }

    #[test]
    fn large_shape_median() {
        // median of Gamma(a) ≈ a − 1/3 + 8/(405a)
        let a = 1e9;
        let m = qgamma_ratio(0.5, a, 1.0, true, false);
        assert!(rel_eq(m, a - 1.0 / 3.0, 1e-12));
    }

    #[test]
    fn wrapper_boundaries() {
        assert!(qgamma(f64::NAN, 1.0, 1.0, true, false).is_nan());
        assert!(qgamma(0.5, -1.0, 1.0, true, false).is_nan());
        assert!(qgamma(0.5, 1.0, 0.0, true, false).is_nan());
        assert!(qgamma(0.1, 1.0, 1.0, true, true).is_nan());
        assert_eq!(qgamma(0.5, 0.0, 1.0, true, false), 0.0);
        assert_eq!(qgamma(0.0, 1.0, 1.0, true, true), f64::INFINITY);
        assert_eq!(qgamma(1.0, 1.0, 1.0, false, false), 0.0);
    }

    #[test]
    fn gamma_inc_inv_errors() {
        assert_eq!(gamma_inc_inv(0.0, 0.5), Err(SpecialError::DomainError));
        assert_eq!(gamma_inc_inv(1.0, 1.5), Err(SpecialError::DomainError));
        assert_eq!(gamma_inc_inv(1.0, 0.0), Ok(0.0));
        assert_eq!(gamma_inc_inv(1.0, 1.0), Ok(f64::INFINITY));
    }
}
