/// # Decimal context
/// fixed-precision decimal arithmetic: every operation is rounded to the configured
/// number of significant digits (half to even)
///# Example
/// ```
/// use RustedRoots::symbolic::decimal_context::DecimalContext;
/// use rust_decimal::Decimal;
/// let ctx = DecimalContext::new(3);
/// let third = ctx.div(Decimal::ONE, Decimal::from(3)).unwrap();
/// assert_eq!(third.to_string(), "0.333");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod decimal_context;
///____________________________________________________________________________________________________________________________
/// # Expression
/// a formula that can be shown three ways (with symbols, with values substituted, with values
/// and the result) and evaluated under a decimal context
///# Example
/// ```
/// use RustedRoots::symbolic::decimal_context::DecimalContext;
/// use RustedRoots::symbolic::expression::{Expression, bindings};
/// use rust_decimal::Decimal;
/// let double = Expression::new("double", "2*{x}", |s| s.ctx().mul(Decimal::TWO, s.var("x")?))
///     .with_dynamic(&["x"]);
/// let values = bindings(&[("x", Decimal::from(-3))]);
/// assert_eq!(double.render_substituted(&values), "2*(-3)");
/// assert_eq!(double.execute(&DecimalContext::new(5), &values).unwrap(), Decimal::from(-6));
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod expression;
/// the cubic, its derivative and the step formulas of every method
pub mod formulas;
