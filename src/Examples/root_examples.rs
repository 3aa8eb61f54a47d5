// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::numerical::methods::MethodKind;
use crate::numerical::methods::simple_iteration::SimpleIteration;
use crate::numerical::solve_method::{SolveError, SolveMethod, SolverConfig};
use crate::numerical::trace::ConsoleSink;
use crate::symbolic::decimal_context::parse_decimal;
use crate::symbolic::expression::Expression;
use crate::symbolic::formulas::{cubic, cubic_derivative};
use rust_decimal::Decimal;

/// Run example number `example`; unknown numbers do nothing.
pub fn root_examples(example: usize) -> Result<(), SolveError> {
    let d = parse_decimal;
    let f = cubic(Decimal::ONE, d("4.74")?);
    let df = cubic_derivative(Decimal::ONE, d("4.74")?);
    match example {
        0 => {
            // every method with its trace, the way a worked solution is written out
            let config = SolverConfig::new().set_accuracy(3);
            for (kind, l, r) in [
                (MethodKind::Tangent, "0.102", "2"),
                (MethodKind::Secant, "-4.24", "-0.5"),
                (MethodKind::SimpleIteration, "-5.74", "-3.262"),
                (MethodKind::Bisection, "-5.74", "-3.74"),
            ] {
                let report = SolveMethod::with_method(&f, Some(&df), kind, d(l)?, d(r)?, &config)?
                    .with_sink(Box::new(ConsoleSink))
                    .run()?;
                println!("{} \n", report);
            }
        }
        1 => {
            // the same root at growing accuracy
            for accuracy in [2, 4, 8, 12] {
                let config = SolverConfig::new().set_accuracy(accuracy).set_suppress_trace(true);
                let report =
                    SolveMethod::with_method(&f, Some(&df), MethodKind::Tangent, d("-6")?, d("-4")?, &config)?.run()?;
                println!("accuracy {}: {} after {} steps", accuracy, report, report.iterations);
            }
        }
        2 => {
            // step by hand, printing the bracket after each bisection step
            let config = SolverConfig::new().set_accuracy(3).set_suppress_trace(true);
            let mut solver = SolveMethod::with_method(&f, None, MethodKind::Bisection, d("0")?, d("3")?, &config)?;
            for _ in 0..5 {
                let x = solver.step()?;
                let state = solver.state();
                println!("x = {}, bracket [{}, {}]", x, state.lbound, state.rbound);
            }
        }
        3 => {
            // fixed k, no derivative needed
            let config = SolverConfig::new().set_accuracy(3);
            let rule = Box::new(SimpleIteration::with_k(d("0.05")?));
            let report = SolveMethod::new(&f, rule, d("-5.74")?, d("-3.262")?, &config)?
                .with_sink(Box::new(ConsoleSink))
                .run()?;
            println!("{}", report);
        }
        4 => {
            // a stop rule of one's own
            let threshold = d("0.01")?;
            let small = Expression::new("small residual", "|{f_plus}| < 0.01", move |s| {
                Ok(s.var("f_plus")?.abs() < threshold)
            })
            .with_dynamic(&["f_plus"])
            .with_nickname("f_plus", "f(x+eps)");
            let config = SolverConfig::new().set_accuracy(3);
            let report = SolveMethod::with_method(&f, None, MethodKind::Secant, d("-4.24")?, d("-0.5")?, &config)?
                .with_stop_predicate(small)
                .with_sink(Box::new(ConsoleSink))
                .run()?;
            println!("{}", report);
        }
        5 => {
            // g(x) = x^2 - 4 started at the vertex: the tangent is horizontal
            let g = Expression::new("g(x)", "{x}^2 - 4", |s| {
                let ctx = s.ctx();
                ctx.sub(ctx.powi(s.var("x")?, 2)?, Decimal::from(4))
            })
            .with_dynamic(&["x"]);
            let dg = Expression::new("g'(x)", "2*{x}", |s| s.ctx().mul(Decimal::TWO, s.var("x")?)).with_dynamic(&["x"]);
            let config = SolverConfig::new().set_accuracy(3);
            match SolveMethod::with_method(&g, Some(&dg), MethodKind::Tangent, d("-1")?, d("0")?, &config)?.run() {
                Ok(report) => println!("{}", report),
                Err(err) => println!("error: {}", err),
            }
        }
        _ => {}
    }
    Ok(())
}
