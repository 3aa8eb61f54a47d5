//! Bisection (half-division) method.
//!
//! Each step takes the midpoint of the bracket and replaces the bound on the same side
//! of the root: if `f(mid)` and `f(lbound)` are both positive (or both not), the midpoint
//! becomes the new `lbound`, otherwise the new `rbound`. The bracket is assumed to contain
//! exactly one sign change; this is not checked.
use crate::numerical::methods::MethodKind;
use crate::numerical::solve_method::{IterState, SolveError, StepRule, evaluate_at};
use crate::symbolic::decimal_context::DecimalContext;
use crate::symbolic::expression::{Bindings, Expression, bindings};
use crate::symbolic::formulas::midpoint;
use rust_decimal::Decimal;

pub struct Bisection {
    midpoint: Expression,
}

impl Bisection {
    pub fn new() -> Self {
        Bisection { midpoint: midpoint() }
    }

    fn bounds(state: &IterState) -> Bindings {
        bindings(&[("a", state.lbound), ("b", state.rbound)])
    }
}

impl Default for Bisection {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRule for Bisection {
    fn kind(&self) -> MethodKind {
        MethodKind::Bisection
    }

    fn step_formula(&self) -> &Expression {
        &self.midpoint
    }

    fn initial_x(&self, state: &IterState, ctx: &DecimalContext) -> Result<Decimal, SolveError> {
        Ok(self.midpoint.execute(ctx, &Self::bounds(state))?)
    }

    fn step_inputs(
        &self,
        _function: &Expression,
        state: &IterState,
        _ctx: &DecimalContext,
    ) -> Result<Bindings, SolveError> {
        Ok(Self::bounds(state))
    }

    fn advance(
        &self,
        function: &Expression,
        state: &mut IterState,
        x_new: Decimal,
        ctx: &DecimalContext,
    ) -> Result<Option<String>, SolveError> {
        let f_mid = evaluate_at(function, ctx, x_new)?;
        let f_left = evaluate_at(function, ctx, state.lbound)?;
        state.x = x_new;
        if (f_mid > Decimal::ZERO) == (f_left > Decimal::ZERO) {
            state.lbound = x_new;
        } else {
            state.rbound = x_new;
        }
        Ok(Some(format!("new bounds [{}, {}]", state.lbound, state.rbound)))
    }
}
