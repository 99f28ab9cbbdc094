use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use op_instruments::{MarketParameters, OptionDirection};
use op_math::BisectionSettings;
use op_methods::SimulationSettings;
use op_pricingengines::{binomial_american, black_scholes, implied_volatility, mc_arithmetic_asian};
use std::hint::black_box;

fn benchmark_market() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.20, 0.0)
}

fn bench_black_scholes(c: &mut Criterion) {
    let market = benchmark_market();
    c.bench_function("black_scholes_call", |b| {
        b.iter(|| black_scholes(OptionDirection::Call, black_box(&market)).expect("valid inputs"))
    });
}

fn bench_implied_volatility(c: &mut Criterion) {
    let market = benchmark_market();
    let settings = BisectionSettings::default();
    c.bench_function("implied_volatility_call", |b| {
        b.iter(|| {
            implied_volatility(
                OptionDirection::Call,
                black_box(10.4506),
                &market,
                &settings,
            )
            .expect("price within bounds")
        })
    });
}

fn bench_binomial_american(c: &mut Criterion) {
    let market = benchmark_market();
    let mut group = c.benchmark_group("binomial_american_put");
    for steps in [100_usize, 500, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            b.iter(|| {
                binomial_american(OptionDirection::Put, black_box(&market), steps)
                    .expect("stable lattice")
            })
        });
    }
    group.finish();
}

fn bench_mc_asian(c: &mut Criterion) {
    let market = benchmark_market();
    let mut group = c.benchmark_group("mc_arithmetic_asian");
    group.sample_size(10);
    for parallel in [false, true] {
        let settings = SimulationSettings {
            paths: 50_000,
            parallel,
            ..SimulationSettings::default()
        };
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_with_input(BenchmarkId::from_parameter(label), &settings, |b, s| {
            b.iter(|| {
                mc_arithmetic_asian(OptionDirection::Call, black_box(&market), 12, true, s)
                    .expect("valid inputs")
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_black_scholes,
    bench_implied_volatility,
    bench_binomial_american,
    bench_mc_asian
);
criterion_main!(benches);
