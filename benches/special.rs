use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use nmath_core::special::{
    ibeta_ratio, log_beta, log_gamma, pgamma_raw, qgamma_ratio, qgamma_search, QuantileSettings,
};

// ---------------------------------------------------------------------------
// Incomplete beta ratio, one input per evaluation regime
// ---------------------------------------------------------------------------

fn ibeta(c: &mut Criterion) {
    let mut g = c.benchmark_group("ibeta_ratio");

    let cases = [
        ("power_series", 0.5, 3.0, 0.1),
        ("continued_fraction", 40.0, 60.0, 0.45),
        ("asymptotic_grat", 2.0, 2000.0, 0.0005),
        ("large_symmetric", 5000.0, 5000.0, 0.5),
        ("tiny_a", 1e-20, 2.0, 0.3),
    ];
    for (name, a, b, x) in cases {
        g.bench_function(name, |bench| {
            bench.iter(|| ibeta_ratio(black_box(a), black_box(b), black_box(x), black_box(1.0 - x)))
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Incomplete gamma ratio
// ---------------------------------------------------------------------------

fn pgamma(c: &mut Criterion) {
    let mut g = c.benchmark_group("pgamma_raw");

    let cases = [
        ("small_x", 0.3, 2.5),
        ("upper_series", 5.0, 40.0),
        ("continued_fraction", 30.0, 10.0),
        ("asymptotic", 1e5, 1e5 + 300.0),
        ("log_reentry", 1000.0, 5.0),
    ];
    for (name, x, alph) in cases {
        g.bench_function(name, |bench| {
            bench.iter(|| pgamma_raw(black_box(x), black_box(alph), true, false))
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Gamma quantile
// ---------------------------------------------------------------------------

fn qgamma(c: &mut Criterion) {
    let mut g = c.benchmark_group("qgamma_ratio");

    g.bench_function("median_shape_3", |b| {
        b.iter(|| qgamma_ratio(black_box(0.5), black_box(3.0), 1.0, true, false))
    });
    g.bench_function("tail_shape_0.1", |b| {
        b.iter(|| qgamma_ratio(black_box(1e-8), black_box(0.1), 1.0, true, false))
    });
    g.bench_function("large_shape", |b| {
        b.iter(|| qgamma_ratio(black_box(0.975), black_box(1e6), 1.0, true, false))
    });

    let no_taylor = QuantileSettings {
        max_taylor_iter: 0,
        ..QuantileSettings::default()
    };
    g.bench_function("no_taylor", |b| {
        b.iter(|| qgamma_search(black_box(0.5), black_box(3.0), 1.0, true, false, &no_taylor))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Log-gamma layer
// ---------------------------------------------------------------------------

fn log_gamma_layer(c: &mut Criterion) {
    let mut g = c.benchmark_group("log_gamma");

    for a in [0.3, 1.7, 7.5, 250.0] {
        g.bench_function(format!("log_gamma_{a}"), |b| b.iter(|| log_gamma(black_box(a))));
    }
    g.bench_function("log_beta_mixed", |b| {
        b.iter(|| log_beta(black_box(3.5), black_box(400.0)))
    });

    g.finish();
}

criterion_group!(benches, ibeta, pgamma, qgamma, log_gamma_layer);
criterion_main!(benches);
