//! Randomized invariants of the beta and gamma ratios.

use nmath_core::special::{
    erf, ibeta_ratio, log_gamma, pgamma_raw, pnorm, qgamma_ratio, qnorm, RatioStatus,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn ibeta_tails_sum_to_one(a in 0.01_f64..500.0, b in 0.01_f64..500.0, x in 0.0_f64..=1.0) {
        let r = ibeta_ratio(a, b, x, 1.0 - x);
        prop_assert_eq!(r.status, RatioStatus::Ok);
        prop_assert!((r.w + r.w1 - 1.0).abs() <= 10.0 * f64::EPSILON, "w={}, w1={}", r.w, r.w1);
        prop_assert!((0.0..=1.0).contains(&r.w));
    }

    #[test]
    fn ibeta_swapping_parameters_swaps_tails(
        a in 0.05_f64..200.0,
        b in 0.05_f64..200.0,
        x in 0.001_f64..0.999,
    ) {
        let y = 1.0 - x;
        let r = ibeta_ratio(a, b, x, y);
        let s = ibeta_ratio(b, a, y, x);
        prop_assert!((r.w - s.w1).abs() < 1e-13, "{} vs {}", r.w, s.w1);
        prop_assert!((r.w1 - s.w).abs() < 1e-13, "{} vs {}", r.w1, s.w);
    }

    #[test]
    fn ibeta_monotone_in_x(
        a in 0.05_f64..100.0,
        b in 0.05_f64..100.0,
        x1 in 0.0_f64..=1.0,
        x2 in 0.0_f64..=1.0,
    ) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let w_lo = ibeta_ratio(a, b, lo, 1.0 - lo).w;
        let w_hi = ibeta_ratio(a, b, hi, 1.0 - hi).w;
        prop_assert!(w_lo <= w_hi + 1e-14, "I({lo}) = {w_lo} > I({hi}) = {w_hi}");
    }

    #[test]
    fn pgamma_tails_sum_to_one(alph in 0.01_f64..1000.0, x in 0.0_f64..2000.0) {
        let p = pgamma_raw(x, alph, true, false);
        let q = pgamma_raw(x, alph, false, false);
        prop_assert!((p + q - 1.0).abs() < 1e-12, "P={p}, Q={q}");
    }

    #[test]
    fn pgamma_monotone_in_x(alph in 0.01_f64..300.0, x1 in 0.0_f64..600.0, x2 in 0.0_f64..600.0) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        prop_assert!(pgamma_raw(lo, alph, true, false) <= pgamma_raw(hi, alph, true, false) + 1e-13);
    }

    #[test]
    fn pgamma_log_agrees_with_linear(alph in 0.05_f64..200.0, x in 0.01_f64..400.0) {
        for &lower in &[true, false] {
            let lin = pgamma_raw(x, alph, lower, false);
            let lg = pgamma_raw(x, alph, lower, true);
            if lin > 1e-300 {
                prop_assert!(
                    (lg - lin.ln()).abs() <= 1e-10 * lg.abs().max(1.0),
                    "lower={lower}: log={lg}, ln(linear)={}", lin.ln()
                );
            }
        }
    }

    #[test]
    fn qgamma_round_trip(
        p in 1e-6_f64..(1.0 - 1e-6),
        shape in 0.1_f64..1000.0,
        scale in 0.01_f64..100.0,
    ) {
        let x = qgamma_ratio(p, shape, scale, true, false);
        prop_assert!(x > 0.0 && x.is_finite(), "x = {x}");
        let back = pgamma_raw(x / scale, shape, true, false);
        prop_assert!((back - p).abs() <= 1e-8 * p, "p={p}, back={back}");
    }

    #[test]
    fn qnorm_inverts_pnorm(p in 1e-12_f64..(1.0 - 1e-12)) {
        let z = qnorm(p, 0.0, 1.0, true, false);
        let back = pnorm(z, 0.0, 1.0, true, false);
        prop_assert!((back - p).abs() <= 1e-12 * p.max(1e-3), "p={p}, back={back}");
    }

    #[test]
    fn erf_is_odd(x in -6.0_f64..6.0) {
        prop_assert_eq!(erf(-x), -erf(x));
    }

    #[test]
    fn log_gamma_recurrence(a in 0.5_f64..150.0) {
        let lhs = log_gamma(a + 1.0) - log_gamma(a);
        prop_assert!((lhs - a.ln()).abs() <= 1e-12 * log_gamma(a + 1.0).abs().max(1.0));
    }
}
