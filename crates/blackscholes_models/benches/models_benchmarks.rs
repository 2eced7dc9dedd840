//! Criterion benchmarks for Black-Scholes valuation.
//!
//! Covers closed-form pricing, the full greek set, implied volatility and a
//! contract re-resolution after a spot move.

use blackscholes_core::types::{Numeric, Quantity};
use blackscholes_models::analytical::{evaluate, GreekSet, ImpliedVolSolver};
use blackscholes_models::params::OptionParameters;
use blackscholes_models::valuation::Contract;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn spots(n: usize) -> Vec<f64> {
    (0..n).map(|i| 80.0 + 40.0 * i as f64 / n as f64).collect()
}

fn params(n: usize) -> OptionParameters {
    OptionParameters::new(100.0, 1.0, 0.03, 0.0, "C", Numeric::Vector(spots(n)))
}

/// Benchmark pricing with and without greeks.
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let vol = Quantity::from(0.25);

    for size in [1, 100, 10000] {
        let p = params(size);
        group.bench_with_input(BenchmarkId::new("price_only", size), &p, |b, p| {
            b.iter(|| evaluate(black_box(p), &vol, GreekSet::none()));
        });
        group.bench_with_input(BenchmarkId::new("all_greeks", size), &p, |b, p| {
            b.iter(|| evaluate(black_box(p), &vol, GreekSet::all()));
        });
    }

    group.finish();
}

/// Benchmark implied volatility across vector sizes.
fn bench_implied_vol(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_vol");
    let solver = ImpliedVolSolver::default();

    for size in [1, 100, 1000] {
        let p = params(size);
        let targets = evaluate(&p, &Quantity::from(0.3), GreekSet::none())
            .expect("benchmark inputs broadcast")
            .price;
        group.bench_with_input(BenchmarkId::new("solve", size), &targets, |b, targets| {
            b.iter(|| solver.solve_vol(black_box(targets), &p));
        });
    }

    group.finish();
}

/// Benchmark a spot move with the price held fixed.
fn bench_recalculate(c: &mut Criterion) {
    c.bench_function("recalculate_spot_move", |b| {
        let mut contract = Contract::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", 1240.0).with_price(36.0);
        let mut spot = 1240.0;
        b.iter(|| {
            spot += 0.01;
            contract.holding_price_fixed().set_spot(spot);
            black_box(contract.vol())
        });
    });
}

criterion_group!(benches, bench_evaluate, bench_implied_vol, bench_recalculate);
criterion_main!(benches);
