//! Concrete expressions: the cubic used throughout the examples, its hand-written derivative
//! and the helper formulas each iterative method displays and evaluates.
//!
//! Evaluation order follows the written formula left to right, with every intermediate
//! result rounded by the caller's [`DecimalContext`](crate::symbolic::decimal_context::DecimalContext).
use crate::symbolic::expression::Expression;
use rust_decimal::Decimal;

/// symbols used for the perturbed evaluations of the convergence check
pub const F_PLUS: &str = "f_plus";
pub const F_MINUS: &str = "f_minus";

/// `f(x) = a*x^3 + b*a*x^2 - a*x - b*a`, i.e. `a*(x + b)*(x^2 - 1)`
pub fn cubic(a: Decimal, b: Decimal) -> Expression {
    Expression::new("f(x)", "{a}*{x}^3 + {b}*{a}*{x}^2 - {a}*{x} - {b}*{a}", |s| {
        let ctx = s.ctx();
        let (a, b, x) = (s.var("a")?, s.var("b")?, s.var("x")?);
        let cubic_term = ctx.mul(a, ctx.powi(x, 3)?)?;
        let square_term = ctx.mul(ctx.mul(b, a)?, ctx.powi(x, 2)?)?;
        let sum = ctx.add(cubic_term, square_term)?;
        let sum = ctx.sub(sum, ctx.mul(a, x)?)?;
        ctx.sub(sum, ctx.mul(b, a)?)
    })
    .with_statics(&[("a", a), ("b", b)])
    .with_dynamic(&["x"])
}

/// `f'(x) = 3*a*x^2 + 2*b*a*x - a`
pub fn cubic_derivative(a: Decimal, b: Decimal) -> Expression {
    Expression::new("f'(x)", "3*{a}*{x}^2 + 2*{b}*{a}*{x} - {a}", |s| {
        let ctx = s.ctx();
        let (a, b, x) = (s.var("a")?, s.var("b")?, s.var("x")?);
        let square_term = ctx.mul(ctx.mul(Decimal::from(3), a)?, ctx.powi(x, 2)?)?;
        let linear_term = ctx.mul(ctx.mul(ctx.mul(Decimal::TWO, b)?, a)?, x)?;
        ctx.sub(ctx.add(square_term, linear_term)?, a)
    })
    .with_statics(&[("a", a), ("b", b)])
    .with_dynamic(&["x"])
}

/// bisection: `(a+b)/2`
pub fn midpoint() -> Expression {
    Expression::new("midpoint", "({a}+{b})/2", |s| {
        let ctx = s.ctx();
        ctx.div(ctx.add(s.var("a")?, s.var("b")?)?, Decimal::TWO)
    })
    .with_dynamic(&["a", "b"])
}

/// tangent (Newton): `x - f(x)/f'(x)`
pub fn newton_step() -> Expression {
    Expression::new("tangent step", "{x} - {f_x}/{df_x}", |s| {
        let ctx = s.ctx();
        ctx.sub(s.var("x")?, ctx.div(s.var("f_x")?, s.var("df_x")?)?)
    })
    .with_dynamic(&["x", "f_x", "df_x"])
    .with_nickname("f_x", "f(x)")
    .with_nickname("df_x", "f'(x)")
}

/// secant with the right bound fixed: `x - f(x)/(f(x) - f(b))*(x - b)`
pub fn secant_step() -> Expression {
    Expression::new("secant step", "{x} - {f_x}/({f_x} - {f_b})*({x} - {b})", |s| {
        let ctx = s.ctx();
        let (x, f_x, b, f_b) = (s.var("x")?, s.var("f_x")?, s.var("b")?, s.var("f_b")?);
        let slope_inverse = ctx.div(f_x, ctx.sub(f_x, f_b)?)?;
        ctx.sub(x, ctx.mul(slope_inverse, ctx.sub(x, b)?)?)
    })
    .with_dynamic(&["x", "f_x", "b", "f_b"])
    .with_nickname("f_x", "f(x)")
    .with_nickname("f_b", "f(b)")
}

/// simple iteration: `x - k*f(x)`
pub fn simple_iteration_step() -> Expression {
    Expression::new("simple iteration step", "{x} - {k}*{f_x}", |s| {
        let ctx = s.ctx();
        ctx.sub(s.var("x")?, ctx.mul(s.var("k")?, s.var("f_x")?)?)
    })
    .with_dynamic(&["x", "k", "f_x"])
    .with_nickname("f_x", "f(x)")
}

/// fixed-point constant `k = 1/f'(x0)`
pub fn iteration_constant() -> Expression {
    Expression::new("k", "1/{df_x0}", |s| s.ctx().div(Decimal::ONE, s.var("df_x0")?))
        .with_dynamic(&["df_x0"])
        .with_nickname("df_x0", "f'(x0)")
}

/// Default stop predicate: the function changes sign across `[x - eps, x + eps]`,
/// i.e. `f(x+eps)*f(x-eps) < 0`. Evaluated on signs, so the product can never overflow.
pub fn sign_change_check() -> Expression<bool> {
    Expression::new("sign change", "{f_plus}*{f_minus} < 0", |s| {
        let (plus, minus) = (s.var(F_PLUS)?, s.var(F_MINUS)?);
        Ok(!plus.is_zero() && !minus.is_zero() && plus.is_sign_negative() != minus.is_sign_negative())
    })
    .with_dynamic(&[F_PLUS, F_MINUS])
    .with_nickname(F_PLUS, "f(x+eps)")
    .with_nickname(F_MINUS, "f(x-eps)")
}
