use RustedRoots::numerical::methods::MethodKind;
use RustedRoots::numerical::solve_method::{SolveMethod, SolverConfig};
use RustedRoots::symbolic::formulas::{cubic, cubic_derivative};
use criterion::{Criterion, criterion_group, criterion_main};
use rust_decimal_macros::dec;
use std::hint::black_box;

fn bench_methods(c: &mut Criterion) {
    let f = cubic(dec!(1), dec!(4.74));
    let df = cubic_derivative(dec!(1), dec!(4.74));
    let config = SolverConfig::new().set_accuracy(8).set_suppress_trace(true);
    let mut group = c.benchmark_group("root finding, accuracy 8");
    for (kind, l, r) in [
        (MethodKind::Tangent, dec!(0.102), dec!(2)),
        (MethodKind::Secant, dec!(-4.24), dec!(-0.5)),
        (MethodKind::SimpleIteration, dec!(-5.74), dec!(-3.262)),
        (MethodKind::Bisection, dec!(-6), dec!(-4)),
    ] {
        group.bench_function(kind.to_string(), |b| {
            b.iter(|| {
                SolveMethod::with_method(&f, Some(&df), kind, black_box(l), black_box(r), &config)
                    .and_then(|mut solver| solver.run())
            })
        });
    }
    group.finish();
}

fn bench_trace_rendering(c: &mut Criterion) {
    let f = cubic(dec!(1), dec!(4.74));
    let df = cubic_derivative(dec!(1), dec!(4.74));
    let config = SolverConfig::new().set_accuracy(3);
    c.bench_function("tangent method with trace", |b| {
        b.iter(|| {
            SolveMethod::with_method(&f, Some(&df), MethodKind::Tangent, dec!(0.102), dec!(2), &config)
                .and_then(|mut solver| solver.run())
        })
    });
}

criterion_group!(benches, bench_methods, bench_trace_rendering);
criterion_main!(benches);
