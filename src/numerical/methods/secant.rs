//! Secant method with the right bound held fixed: `x = x - f(x)/(f(x) - f(b))*(x - b)`,
//! started from the left bound.
use crate::numerical::methods::MethodKind;
use crate::numerical::solve_method::{IterState, SolveError, StepRule, evaluate_at};
use crate::symbolic::decimal_context::DecimalContext;
use crate::symbolic::expression::{Bindings, Expression, bindings};
use crate::symbolic::formulas::secant_step;
use rust_decimal::Decimal;

pub struct Secant {
    step: Expression,
}

impl Secant {
    pub fn new() -> Self {
        Secant { step: secant_step() }
    }
}

impl Default for Secant {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRule for Secant {
    fn kind(&self) -> MethodKind {
        MethodKind::Secant
    }

    fn step_formula(&self) -> &Expression {
        &self.step
    }

    fn initial_x(&self, state: &IterState, _ctx: &DecimalContext) -> Result<Decimal, SolveError> {
        Ok(state.lbound)
    }

    fn step_inputs(
        &self,
        function: &Expression,
        state: &IterState,
        ctx: &DecimalContext,
    ) -> Result<Bindings, SolveError> {
        let f_x = evaluate_at(function, ctx, state.x)?;
        let f_b = evaluate_at(function, ctx, state.rbound)?;
        Ok(bindings(&[
            ("x", state.x),
            ("f_x", f_x),
            ("b", state.rbound),
            ("f_b", f_b),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::solve_method::{SolveMethod, SolverConfig};
    use crate::symbolic::expression::ExprError;
    use crate::symbolic::formulas::cubic;
    use rust_decimal_macros::dec;

    #[test]
    fn test_starts_from_left_bound_and_keeps_right_bound() {
        let f = cubic(dec!(1), dec!(4.74));
        let config = SolverConfig::new().set_accuracy(3).set_suppress_trace(true);
        let mut solver = SolveMethod::new(&f, Box::new(Secant::new()), dec!(-4.24), dec!(-0.5), &config).unwrap();
        assert_eq!(solver.x(), dec!(-4.24));
        for _ in 0..3 {
            solver.step().unwrap();
            assert_eq!(solver.state().rbound, dec!(-0.5));
            assert_eq!(solver.state().lbound, dec!(-4.24));
        }
    }

    #[test]
    fn test_trace_uses_function_values() {
        let f = cubic(dec!(1), dec!(4.74));
        let config = SolverConfig::new().set_accuracy(3);
        let mut solver = SolveMethod::new(&f, Box::new(Secant::new()), dec!(-4.24), dec!(-0.5), &config).unwrap();
        solver.step().unwrap();
        assert!(solver.trace()[1].starts_with("x = x - f(x)/(f(x) - f(b))*(x - b) = (-4.24) - "));
    }

    #[test]
    fn test_equal_function_values_are_singular() {
        // f(-1) = f(1) = 0 on the cubic: the secant through them is horizontal
        let f = cubic(dec!(1), dec!(4.74));
        let config = SolverConfig::new().set_accuracy(3).set_suppress_trace(true);
        let mut solver = SolveMethod::new(&f, Box::new(Secant::new()), dec!(-1), dec!(1), &config).unwrap();
        let err = solver.step().unwrap_err();
        assert!(matches!(
            err,
            SolveError::Expression(ExprError::DivisionBySingularity { .. })
        ));
    }
}
