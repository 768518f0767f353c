use super::*;

// ======================== Normal ========================

#[test]
fn normal_pdf_standard() {
    let n = Normal::new(0.0_f64, 1.0).unwrap();
    let expected = 1.0 / (2.0 * core::f64::consts::PI).sqrt();
    assert!((n.pdf(0.0) - expected).abs() < 1e-15);
}

#[test]
fn normal_cdf_standard() {
    let n = Normal::new(0.0_f64, 1.0).unwrap();
    assert!((n.cdf(0.0) - 0.5).abs() < 1e-15);
    assert!((n.cdf(1.0) - 0.8413447460685429).abs() < 1e-15);
    assert!((n.cdf(-1.0) - 0.15865525393145702).abs() < 1e-15);
    // far tail keeps relative accuracy in sf
    let s = n.sf(10.0);
    assert!((s / 7.619853024160527e-24 - 1.0).abs() < 1e-9);
}

#[test]
fn normal_quantile() {
    let n = Normal::new(0.0_f64, 1.0).unwrap();
    assert_eq!(n.quantile(0.5), 0.0);
    assert!((n.quantile(0.975) - 1.959963984540054).abs() < 1e-13);
    assert!((n.quantile(0.025) + 1.959963984540054).abs() < 1e-13);
    assert_eq!(n.quantile(0.0), f64::NEG_INFINITY);
    assert!(n.quantile(1.5).is_nan());
}

#[test]
fn normal_mean_variance() {
    let n = Normal::new(3.0_f64, 2.0).unwrap();
    assert!((n.mean() - 3.0).abs() < 1e-14);
    assert!((n.variance() - 4.0).abs() < 1e-14);
    assert!((n.quantile(0.5) - 3.0).abs() < 1e-14);
}

#[test]
fn normal_ln_pdf() {
    let n = Normal::new(0.0_f64, 1.0).unwrap();
    assert!((n.ln_pdf(0.0) - n.pdf(0.0).ln()).abs() < 1e-14);
    assert!((n.ln_pdf(3.0) - n.pdf(3.0).ln()).abs() < 1e-13);
    // stays finite where pdf underflows
    assert!((n.ln_pdf(50.0) + 1250.0 + 0.5 * (2.0 * core::f64::consts::PI).ln()).abs() < 1e-10);
}

#[test]
fn normal_invalid() {
    assert_eq!(Normal::new(0.0_f64, 0.0).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Normal::new(0.0_f64, -1.0).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Normal::new(f64::NAN, 1.0).unwrap_err(), StatsError::InvalidParameter);
}

#[test]
fn normal_f32() {
    let n = Normal::new(0.0_f32, 1.0).unwrap();
    assert!((n.cdf(0.0) - 0.5).abs() < 1e-6);
    assert!((n.quantile(0.975) - 1.959_964).abs() < 1e-5);
    assert!((n.mean()).abs() < 1e-7);
}

// ======================== Exponential ========================

#[test]
fn exponential_pdf_cdf() {
    let e = Exponential::new(1.0_f64).unwrap();
    assert!((e.pdf(0.0) - 1.0).abs() < 1e-14);
    assert!((e.pdf(1.0) - (-1.0_f64).exp()).abs() < 1e-14);
    assert!((e.cdf(0.0)).abs() < 1e-14);
    assert!((e.cdf(1.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-14);
    assert!((e.sf(30.0) / (-30.0_f64).exp() - 1.0).abs() < 1e-12);
    assert_eq!(e.pdf(-1.0), 0.0);
}

#[test]
fn exponential_quantile() {
    let e = Exponential::new(2.0_f64).unwrap();
    assert_eq!(e.quantile(0.0), 0.0);
    let q = e.quantile(0.5);
    assert!((q - core::f64::consts::LN_2 / 2.0).abs() < 1e-13);
    assert!((e.cdf(q) - 0.5).abs() < 1e-13);
}

#[test]
fn exponential_mean_variance() {
    let e = Exponential::new(0.5_f64).unwrap();
    assert!((e.mean() - 2.0).abs() < 1e-14);
    assert!((e.variance() - 4.0).abs() < 1e-14);
}

#[test]
fn exponential_invalid() {
    assert_eq!(Exponential::new(0.0_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Exponential::new(-1.0_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Exponential::new(f64::INFINITY).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Gamma ========================

#[test]
fn gamma_pdf_at_mode() {
    // Gamma(2, 1): mode at x = 1, f(1) = e^{-1}
    let g = Gamma::new(2.0_f64, 1.0).unwrap();
    assert!((g.pdf(1.0) - (-1.0_f64).exp()).abs() < 1e-14);
    assert_eq!(g.pdf(0.0), 0.0);
    let h = Gamma::new(0.5_f64, 1.0).unwrap();
    assert_eq!(h.pdf(0.0), f64::INFINITY);
}

#[test]
fn gamma_cdf() {
    // Gamma(2, 1): F(x) = 1 − (1 + x) e^{−x}
    let g = Gamma::new(2.0_f64, 1.0).unwrap();
    for &x in &[0.1, 1.0, 2.5, 7.0] {
        let expected = 1.0 - (1.0 + x) * (-x as f64).exp();
        assert!((g.cdf(x) - expected).abs() < 1e-14, "x = {x}");
        assert!((g.cdf(x) + g.sf(x) - 1.0).abs() < 1e-14);
    }
}

#[test]
fn gamma_quantile_roundtrip() {
    for &(shape, rate) in &[(0.3_f64, 1.0_f64), (2.0, 0.5), (7.5, 3.0), (150.0, 1.0)] {
        let g = Gamma::new(shape, rate).unwrap();
        for &p in &[0.01_f64, 0.25, 0.5, 0.9, 0.999] {
            let x = g.quantile(p);
            assert!((g.cdf(x) - p).abs() < 1e-10 * p.max(1e-3), "α={shape}, β={rate}, p={p}");
        }
    }
}

#[test]
fn gamma_mean_variance() {
    let g = Gamma::new(3.0_f64, 2.0).unwrap();
    assert!((g.mean() - 1.5).abs() < 1e-14);
    assert!((g.variance() - 0.75).abs() < 1e-14);
}

#[test]
fn gamma_invalid() {
    assert_eq!(Gamma::new(0.0_f64, 1.0).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Gamma::new(1.0_f64, -1.0).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Beta ========================

#[test]
fn beta_uniform_case() {
    let b = Beta::new(1.0_f64, 1.0).unwrap();
    for &x in &[0.0, 0.2, 0.5, 0.9, 1.0] {
        assert!((b.pdf(x) - 1.0).abs() < 1e-14, "x = {x}");
        assert!((b.cdf(x) - x).abs() < 1e-14);
    }
    assert_eq!(b.pdf(1.5), 0.0);
}

#[test]
fn beta_symmetric() {
    let b = Beta::new(3.5_f64, 3.5).unwrap();
    assert!((b.cdf(0.5) - 0.5).abs() < 1e-14);
    assert!((b.cdf(0.3) - b.sf(0.7)).abs() < 1e-14);
    assert!((b.pdf(0.2) - b.pdf(0.8)).abs() < 1e-13);
}

#[test]
fn beta_closed_form() {
    // Beta(2, 5): I_0.5 = 57/64, f(x) = 30 x (1−x)^4
    let b = Beta::new(2.0_f64, 5.0).unwrap();
    assert!((b.cdf(0.5) - 0.890625).abs() < 1e-14);
    let x = 0.3_f64;
    assert!((b.pdf(x) - 30.0 * x * (1.0 - x).powi(4)).abs() < 1e-13);
    // α < 1 diverges at 0
    let u = Beta::new(0.5_f64, 2.0).unwrap();
    assert_eq!(u.pdf(0.0), f64::INFINITY);
}

#[test]
fn beta_quantile_roundtrip() {
    for &(a, b) in &[(2.0_f64, 5.0_f64), (0.5, 0.5), (0.2, 3.0), (40.0, 60.0)] {
        let d = Beta::new(a, b).unwrap();
        for &p in &[0.05_f64, 0.3, 0.5, 0.8, 0.99] {
            let x = d.quantile(p);
            assert!((d.cdf(x) - p).abs() < 1e-12, "a={a}, b={b}, p={p}");
        }
    }
    let d = Beta::new(2.0_f64, 5.0).unwrap();
    assert_eq!(d.quantile(0.0), 0.0);
    assert_eq!(d.quantile(1.0), 1.0);
}

#[test]
fn beta_mean_variance() {
    let b = Beta::new(2.0_f64, 3.0).unwrap();
    assert!((b.mean() - 0.4).abs() < 1e-14);
    assert!((b.variance() - 0.04).abs() < 1e-14);
}

#[test]
fn beta_invalid() {
    assert_eq!(Beta::new(0.0_f64, 1.0).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Beta::new(1.0_f64, -2.0).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== ChiSquared ========================

#[test]
fn chi_squared_cdf() {
    // χ²(2): F(x) = 1 − e^{−x/2}
    let chi2 = ChiSquared::new(2.0_f64).unwrap();
    for &x in &[0.5, 2.0, 9.0] {
        assert!((chi2.cdf(x) - (1.0 - (-x / 2.0_f64).exp())).abs() < 1e-14);
    }
    assert_eq!(chi2.cdf(-1.0), 0.0);
}

#[test]
fn chi_squared_quantile_reference() {
    let c1 = ChiSquared::new(1.0_f64).unwrap();
    assert!((c1.quantile(0.95) - 3.841458820694124).abs() < 1e-10);
    let c10 = ChiSquared::new(10.0_f64).unwrap();
    assert!((c10.quantile(0.95) - 18.307038053275146).abs() < 1e-10);
    for &p in &[0.001_f64, 0.1, 0.5, 0.9] {
        let x = c10.quantile(p);
        assert!((c10.cdf(x) - p).abs() < 1e-12, "p = {p}");
    }
}

#[test]
fn chi_squared_mean_variance() {
    let chi2 = ChiSquared::new(5.0_f64).unwrap();
    assert!((chi2.mean() - 5.0).abs() < 1e-14);
    assert!((chi2.variance() - 10.0).abs() < 1e-14);
}

#[test]
fn chi_squared_invalid() {
    assert_eq!(ChiSquared::new(0.0_f64).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== StudentT ========================

#[test]
fn student_t_cauchy() {
    // ν = 1 is Cauchy: F(x) = 1/2 + atan(x)/π
    let t = StudentT::new(1.0_f64).unwrap();
    for &x in &[-5.0, -0.3, 0.0, 1.0, 40.0] {
        let expected = 0.5 + (x as f64).atan() / core::f64::consts::PI;
        assert!((t.cdf(x) - expected).abs() < 1e-14, "x = {x}");
    }
    assert!((t.quantile(0.75) - 1.0).abs() < 1e-12);
    assert!((t.pdf(0.0) - 1.0 / core::f64::consts::PI).abs() < 1e-14);
}

#[test]
fn student_t_symmetric() {
    let t = StudentT::new(5.0_f64).unwrap();
    assert!((t.cdf(0.0) - 0.5).abs() < 1e-15);
    for &x in &[0.5, 2.0, 10.0] {
        assert!((t.cdf(-x) - t.sf(x)).abs() < 1e-15);
        assert!((t.cdf(x) + t.cdf(-x) - 1.0).abs() < 1e-15);
        assert!((t.pdf(x) - t.pdf(-x)).abs() < 1e-15);
    }
}

#[test]
fn student_t_quantile_roundtrip() {
    let t = StudentT::new(10.0_f64).unwrap();
    assert!((t.quantile(0.975) - 2.228139).abs() < 1e-6);
    assert_eq!(t.quantile(0.5), 0.0);
    for &df in &[0.7_f64, 3.0, 30.0] {
        let t = StudentT::new(df).unwrap();
        for &p in &[0.01_f64, 0.2, 0.6, 0.95, 0.999] {
            let x = t.quantile(p);
            assert!((t.cdf(x) - p).abs() < 1e-12, "df={df}, p={p}");
        }
    }
}

#[test]
fn student_t_large_df_approaches_normal() {
    let t = StudentT::new(1e6_f64).unwrap();
    let n = Normal::new(0.0_f64, 1.0).unwrap();
    for &x in &[-2.0, 0.5, 1.96] {
        assert!((t.cdf(x) - n.cdf(x)).abs() < 1e-6, "x = {x}");
    }
}

#[test]
fn student_t_mean_variance() {
    let t = StudentT::new(4.0_f64).unwrap();
    assert!((t.mean()).abs() < 1e-14);
    assert!((t.variance() - 2.0).abs() < 1e-14);
    assert!(StudentT::new(1.0_f64).unwrap().mean().is_nan());
    assert!(StudentT::new(1.5_f64).unwrap().variance().is_infinite());
}

#[test]
fn student_t_invalid() {
    assert_eq!(StudentT::new(0.0_f64).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Binomial ========================

#[test]
fn binomial_pmf() {
    // B(3, 0.5): 1/8, 3/8, 3/8, 1/8
    let b = Binomial::new(3, 0.5_f64).unwrap();
    assert!((b.pmf(0) - 0.125).abs() < 1e-14);
    assert!((b.pmf(1) - 0.375).abs() < 1e-14);
    assert!((b.pmf(2) - 0.375).abs() < 1e-14);
    assert!((b.pmf(3) - 0.125).abs() < 1e-14);
    assert_eq!(b.pmf(4), 0.0);
}

#[test]
fn binomial_degenerate_p() {
    let zero = Binomial::new(4, 0.0_f64).unwrap();
    assert_eq!(zero.pmf(0), 1.0);
    assert_eq!(zero.pmf(2), 0.0);
    assert_eq!(zero.cdf(0), 1.0);
    let one = Binomial::new(4, 1.0_f64).unwrap();
    assert_eq!(one.pmf(4), 1.0);
    assert_eq!(one.cdf(3), 0.0);
}

#[test]
fn binomial_cdf_via_pmf_sum() {
    let b = Binomial::new(10, 0.3_f64).unwrap();
    for k in 0..=10 {
        let cdf = b.cdf(k);
        let pmf_sum: f64 = (0..=k).map(|j| b.pmf(j)).sum();
        assert!(
            (cdf - pmf_sum).abs() < 1e-13,
            "k={k}: cdf={cdf}, pmf_sum={pmf_sum}"
        );
        assert!((cdf + b.sf(k) - 1.0).abs() < 1e-14);
    }
}

#[test]
fn binomial_mean_variance() {
    let b = Binomial::new(20, 0.3_f64).unwrap();
    assert!((b.mean() - 6.0).abs() < 1e-14);
    assert!((b.variance() - 4.2).abs() < 1e-14);
}

#[test]
fn binomial_invalid() {
    assert_eq!(Binomial::new(10, -0.1_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Binomial::new(10, 1.1_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Binomial::new(10, f64::NAN).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Poisson ========================

#[test]
fn poisson_pmf() {
    let p = Poisson::new(1.0_f64).unwrap();
    let e = (-1.0_f64).exp();
    assert!((p.pmf(0) - e).abs() < 1e-14);
    assert!((p.pmf(1) - e).abs() < 1e-14);
    assert!((p.pmf(2) - e / 2.0).abs() < 1e-14);
    assert!((p.ln_pmf(3) - (e / 6.0).ln()).abs() < 1e-14);
}

#[test]
fn poisson_cdf() {
    let p = Poisson::new(3.0_f64).unwrap();
    for k in 0..15 {
        let cdf = p.cdf(k);
        let pmf_sum: f64 = (0..=k).map(|j| p.pmf(j)).sum();
        assert!(
            (cdf - pmf_sum).abs() < 1e-14,
            "k={k}: cdf={cdf}, pmf_sum={pmf_sum}"
        );
    }
    // far upper tail via sf keeps relative accuracy
    let s = p.sf(40);
    let direct: f64 = (41..80).map(|j| p.pmf(j)).sum();
    assert!((s / direct - 1.0).abs() < 1e-11);
}

#[test]
fn poisson_mean_variance() {
    let p = Poisson::new(5.5_f64).unwrap();
    assert!((p.mean() - 5.5).abs() < 1e-14);
    assert!((p.variance() - 5.5).abs() < 1e-14);
}

#[test]
fn poisson_invalid() {
    assert_eq!(Poisson::new(0.0_f64).unwrap_err(), StatsError::InvalidParameter);
    assert_eq!(Poisson::new(-1.0_f64).unwrap_err(), StatsError::InvalidParameter);
}

// ======================== Cross-distribution ========================

#[test]
fn gamma_exponential_equivalence() {
    // Gamma(1, λ) = Exponential(λ)
    let g = Gamma::new(1.0_f64, 2.0).unwrap();
    let e = Exponential::new(2.0).unwrap();
    for &x in &[0.0, 0.5, 1.0, 2.0, 5.0] {
        assert!(
            (g.pdf(x) - e.pdf(x)).abs() < 1e-15,
            "pdf at {x}: {} vs {}",
            g.pdf(x),
            e.pdf(x)
        );
        assert!(
            (g.cdf(x) - e.cdf(x)).abs() < 1e-15,
            "cdf at {x}: {} vs {}",
            g.cdf(x),
            e.cdf(x)
        );
    }
}

#[test]
fn chi_squared_gamma_equivalence() {
    // χ²(k) = Gamma(k/2, 1/2)
    let chi2 = ChiSquared::new(6.0_f64).unwrap();
    let g = Gamma::new(3.0, 0.5).unwrap();
    for &x in &[1.0, 3.0, 5.0, 10.0] {
        assert!((chi2.pdf(x) - g.pdf(x)).abs() < 1e-15, "pdf at {x}");
        assert!((chi2.cdf(x) - g.cdf(x)).abs() < 1e-15, "cdf at {x}");
    }
    assert!((chi2.quantile(0.3) - g.quantile(0.3)).abs() < 1e-12);
}

#[test]
fn poisson_gamma_duality() {
    // P(N ≤ k) for N ~ Poisson(λ) equals P(G > λ) for G ~ Gamma(k+1, 1)
    let p = Poisson::new(4.2_f64).unwrap();
    for k in [0_u64, 3, 9] {
        let g = Gamma::new(k as f64 + 1.0, 1.0).unwrap();
        assert!((p.cdf(k) - g.sf(4.2)).abs() < 1e-15, "k = {k}");
    }
}

#[test]
fn binomial_beta_duality() {
    // P(X ≤ k) for X ~ B(n, p) equals P(Y > p) for Y ~ Beta(k+1, n−k)
    let b = Binomial::new(12, 0.35_f64).unwrap();
    for k in [0_u64, 4, 11] {
        let y = Beta::new(k as f64 + 1.0, (12 - k) as f64).unwrap();
        assert!((b.cdf(k) - y.sf(0.35)).abs() < 1e-15, "k = {k}");
    }
}

#[test]
fn f32_facade() {
    let g = Gamma::new(2.0_f32, 1.0).unwrap();
    assert!((g.cdf(1.0) - 0.264_241_1).abs() < 1e-6);
    let b = Beta::new(2.0_f32, 5.0).unwrap();
    assert!((b.cdf(0.5) - 0.890_625).abs() < 1e-6);
    let p = Poisson::new(3.0_f32).unwrap();
    assert!((p.pmf(0) - 0.049_787_07).abs() < 1e-7);
}

#[test]
fn error_display() {
    let s = format!("{}", StatsError::InvalidParameter);
    assert!(s.contains("parameter"));
    let e: Box<dyn std::error::Error> = Box::new(StatsError::InvalidParameter);
    assert_eq!(e.to_string(), s);
}
