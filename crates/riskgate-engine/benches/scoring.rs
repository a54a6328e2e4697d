//! Scoring benchmark
//!
//! The engine sits on the login path; a verdict should cost well under 1μs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskgate_engine::{score, RiskInput, Signal};

fn scoring_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    group.bench_function("clean", |b| {
        let input = RiskInput::clean();
        b.iter(|| score(black_box(&input)))
    });

    group.bench_function("all_signals", |b| {
        let input = Signal::ALL.iter().fold(RiskInput::clean(), |i, s| i.with(*s));
        b.iter(|| score(black_box(&input)))
    });

    group.finish();
}

fn scoring_scaling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_fired_rules");

    for fired in [1usize, 5, 10, 20].iter() {
        let input = Signal::ALL[..*fired]
            .iter()
            .fold(RiskInput::clean(), |i, s| i.with(*s));
        group.bench_with_input(BenchmarkId::from_parameter(fired), &input, |b, input| {
            b.iter(|| score(black_box(input)))
        });
    }

    group.finish();
}

criterion_group!(benches, scoring_benchmark, scoring_scaling_benchmark);
criterion_main!(benches);
