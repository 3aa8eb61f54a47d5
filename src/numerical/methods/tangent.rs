//! Tangent (Newton) method: `x = x - f(x)/f'(x)`, started from the right bound.
//!
//! A zero derivative at an iterate is a singular step and ends the run with
//! [`ExprError::DivisionBySingularity`](crate::symbolic::expression::ExprError).
use crate::numerical::methods::MethodKind;
use crate::numerical::solve_method::{IterState, SolveError, StepRule, evaluate_at};
use crate::symbolic::decimal_context::DecimalContext;
use crate::symbolic::expression::{Bindings, Expression, bindings};
use crate::symbolic::formulas::newton_step;
use rust_decimal::Decimal;

pub struct Tangent<'a> {
    derivative: &'a Expression,
    step: Expression,
}

impl<'a> Tangent<'a> {
    pub fn new(derivative: &'a Expression) -> Self {
        Tangent {
            derivative,
            step: newton_step(),
        }
    }
}

impl StepRule for Tangent<'_> {
    fn kind(&self) -> MethodKind {
        MethodKind::Tangent
    }

    fn step_formula(&self) -> &Expression {
        &self.step
    }

    fn initial_x(&self, state: &IterState, _ctx: &DecimalContext) -> Result<Decimal, SolveError> {
        Ok(state.rbound)
    }

    fn step_inputs(
        &self,
        function: &Expression,
        state: &IterState,
        ctx: &DecimalContext,
    ) -> Result<Bindings, SolveError> {
        let f_x = evaluate_at(function, ctx, state.x)?;
        let df_x = evaluate_at(self.derivative, ctx, state.x)?;
        Ok(bindings(&[("x", state.x), ("f_x", f_x), ("df_x", df_x)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::solve_method::{SolveMethod, SolverConfig};
    use crate::symbolic::expression::ExprError;
    use crate::symbolic::formulas::{cubic, cubic_derivative};
    use rust_decimal_macros::dec;

    fn config() -> SolverConfig {
        SolverConfig::new().set_accuracy(3).set_suppress_trace(true)
    }

    #[test]
    fn test_starts_from_right_bound() {
        let f = cubic(dec!(1), dec!(4.74));
        let df = cubic_derivative(dec!(1), dec!(4.74));
        let solver = SolveMethod::new(&f, Box::new(Tangent::new(&df)), dec!(0.102), dec!(2), &config()).unwrap();
        assert_eq!(solver.x(), dec!(2));
    }

    #[test]
    fn test_first_step() {
        let f = cubic(dec!(1), dec!(4.74));
        let df = cubic_derivative(dec!(1), dec!(4.74));
        let mut solver = SolveMethod::new(&f, Box::new(Tangent::new(&df)), dec!(0.102), dec!(2), &config()).unwrap();
        // 2 - 20.22/29.96 with five significant digits
        assert_eq!(solver.step().unwrap(), dec!(1.3251));
        assert!(!solver.stop_needed().unwrap());
    }

    #[test]
    fn test_step_at_root_stays() {
        let f = cubic(dec!(1), dec!(4.74));
        let df = cubic_derivative(dec!(1), dec!(4.74));
        let mut solver = SolveMethod::new(&f, Box::new(Tangent::new(&df)), dec!(-6), dec!(-4.74), &config()).unwrap();
        assert_eq!(solver.step().unwrap(), dec!(-4.74));
        assert!(solver.stop_needed().unwrap());
    }

    #[test]
    fn test_zero_derivative_is_singular() {
        // g(x) = x^2 - 4 has g'(0) = 0
        let g = Expression::new("g(x)", "{x}^2 - 4", |s| {
            let ctx = s.ctx();
            ctx.sub(ctx.powi(s.var("x")?, 2)?, Decimal::from(4))
        })
        .with_dynamic(&["x"]);
        let dg = Expression::new("g'(x)", "2*{x}", |s| s.ctx().mul(Decimal::TWO, s.var("x")?)).with_dynamic(&["x"]);
        let mut solver = SolveMethod::new(&g, Box::new(Tangent::new(&dg)), dec!(-1), dec!(0), &config()).unwrap();
        let err = solver.run().unwrap_err();
        assert!(matches!(
            err,
            SolveError::Expression(ExprError::DivisionBySingularity { .. })
        ));
    }
}
