//! Simple (fixed-point) iteration `x = x - k*f(x)`, started from the bracket midpoint.
//!
//! `k = 1/f'(x0)` is computed once, before the first step, from the derivative at the
//! starting point. It can also be fixed in advance with [`SimpleIteration::with_k`], in
//! which case no derivative is needed.
use crate::numerical::methods::MethodKind;
use crate::numerical::solve_method::{IterState, SolveError, StepRule, evaluate_at};
use crate::symbolic::decimal_context::DecimalContext;
use crate::symbolic::expression::{Bindings, Expression, bindings};
use crate::symbolic::formulas::{iteration_constant, midpoint, simple_iteration_step};
use rust_decimal::Decimal;

pub struct SimpleIteration<'a> {
    derivative: Option<&'a Expression>,
    constant: Expression,
    step: Expression,
    k: Option<Decimal>,
}

impl<'a> SimpleIteration<'a> {
    pub fn new(derivative: &'a Expression) -> Self {
        SimpleIteration {
            derivative: Some(derivative),
            constant: iteration_constant(),
            step: simple_iteration_step(),
            k: None,
        }
    }

    /// use a known `k` instead of deriving it
    pub fn with_k(k: Decimal) -> Self {
        SimpleIteration {
            derivative: None,
            constant: iteration_constant(),
            step: simple_iteration_step(),
            k: Some(k),
        }
    }

    pub fn k(&self) -> Option<Decimal> {
        self.k
    }
}

impl StepRule for SimpleIteration<'_> {
    fn kind(&self) -> MethodKind {
        MethodKind::SimpleIteration
    }

    fn step_formula(&self) -> &Expression {
        &self.step
    }

    fn initial_x(&self, state: &IterState, ctx: &DecimalContext) -> Result<Decimal, SolveError> {
        Ok(midpoint().execute(ctx, &bindings(&[("a", state.lbound), ("b", state.rbound)]))?)
    }

    fn prepare(
        &mut self,
        _function: &Expression,
        state: &IterState,
        ctx: &DecimalContext,
    ) -> Result<Vec<String>, SolveError> {
        if let Some(k) = self.k {
            return Ok(vec![format!("k = {}", k)]);
        }
        let derivative = self.derivative.ok_or(SolveError::MissingDerivative {
            method: MethodKind::SimpleIteration,
        })?;
        let inputs = bindings(&[("df_x0", evaluate_at(derivative, ctx, state.x)?)]);
        self.k = Some(self.constant.execute(ctx, &inputs)?);
        let line = format!(
            "k = {} = {}",
            self.constant.render_unified(),
            self.constant.render_local(ctx, &inputs)?
        );
        Ok(vec![line])
    }

    fn step_inputs(
        &self,
        function: &Expression,
        state: &IterState,
        ctx: &DecimalContext,
    ) -> Result<Bindings, SolveError> {
        let k = self.k.ok_or(SolveError::NotPrepared {
            method: MethodKind::SimpleIteration,
        })?;
        let f_x = evaluate_at(function, ctx, state.x)?;
        Ok(bindings(&[("x", state.x), ("k", k), ("f_x", f_x)]))
    }
}
