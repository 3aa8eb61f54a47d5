//! # Expression
//!
//! An [`Expression`] binds a textual template to a decimal evaluation function, so that one
//! declarative definition can be shown both as a general rule and as a worked numeric instance.
//!
//! ## Parameters
//! - **static** parameters are fixed at construction (polynomial coefficients, ...) and are
//!   substituted into every rendering
//! - **dynamic** parameters are supplied at each call (the point `x`, `f(x)`, ...); they may
//!   carry a *nickname*, the symbol shown in the general formula (`df_x` -> `f'(x)`)
//!
//! ## Renderings
//! - [`Expression::render_unified`] : statics substituted, dynamic names left symbolic
//! - [`Expression::render_local`]   : everything substituted, followed by `= <result>`
//! - [`Expression::compile`]        : the low-level template fill both of them use
//!
//! Placeholders are written `{name}`. Negative values are wrapped in parentheses before
//! substitution so that `x - {f_x}` never renders as `x - -3`.
//!
//! # Example
//! ```
//! use RustedRoots::symbolic::decimal_context::DecimalContext;
//! use RustedRoots::symbolic::expression::{bindings, Expression};
//! use rust_decimal::Decimal;
//!
//! let shifted = Expression::new("g(x)", "{x} + {c}", |s| s.ctx().add(s.var("x")?, s.var("c")?))
//!     .with_static("c", Decimal::from(2))
//!     .with_dynamic(&["x"]);
//! let ctx = DecimalContext::new(5);
//! assert_eq!(shifted.render_unified(), "x + 2");
//! let at = bindings(&[("x", Decimal::from(-3))]);
//! assert_eq!(shifted.render_local(&ctx, &at).unwrap(), "(-3) + 2 = -1");
//! ```
use crate::symbolic::decimal_context::DecimalContext;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is a valid regex")
});

/// Values of dynamic parameters for one evaluation call
pub type Bindings = HashMap<String, Decimal>;

/// Build [`Bindings`] from `(name, value)` pairs.
pub fn bindings(pairs: &[(&str, Decimal)]) -> Bindings {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Errors raised while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("variable `{name}` is missing for expression {expression}")]
    MissingVariable { name: String, expression: String },

    #[error("division by singularity: {numerator}/0")]
    DivisionBySingularity { numerator: Decimal },

    #[error("decimal overflow in `{operation}`")]
    Overflow { operation: &'static str },

    #[error("invalid decimal number: `{text}`")]
    InvalidNumber { text: String },
}

/// What an evaluation function sees: the call's dynamic values, the expression's statics
/// and the numeric context of the caller.
pub struct Scope<'a> {
    expression: &'a str,
    dynamic: &'a Bindings,
    statics: &'a HashMap<String, Decimal>,
    ctx: &'a DecimalContext,
}

impl<'a> Scope<'a> {
    /// dynamic values shadow statics of the same name
    pub fn var(&self, name: &str) -> Result<Decimal, ExprError> {
        self.dynamic
            .get(name)
            .or_else(|| self.statics.get(name))
            .copied()
            .ok_or_else(|| ExprError::MissingVariable {
                name: name.to_string(),
                expression: self.expression.to_string(),
            })
    }

    pub fn ctx(&self) -> &DecimalContext {
        self.ctx
    }
}

type Evaluator<T> = Arc<dyn Fn(&Scope<'_>) -> Result<T, ExprError> + Send + Sync>;

#[derive(Clone)]
pub struct Expression<T = Decimal> {
    name: String,
    template: String,
    static_params: HashMap<String, Decimal>,
    dynamic_params: Vec<String>,
    nicknames: HashMap<String, String>,
    evaluator: Evaluator<T>,
}

impl<T> Expression<T> {
    pub fn new<F>(name: &str, template: &str, evaluator: F) -> Self
    where
        F: Fn(&Scope<'_>) -> Result<T, ExprError> + Send + Sync + 'static,
    {
        Expression {
            name: name.to_string(),
            template: template.to_string(),
            static_params: HashMap::new(),
            dynamic_params: Vec::new(),
            nicknames: HashMap::new(),
            evaluator: Arc::new(evaluator),
        }
    }

    ////////////////////////////BUILDERS///////////////////////////////////
    pub fn with_static(mut self, name: &str, value: Decimal) -> Self {
        self.static_params.insert(name.to_string(), value);
        self
    }

    pub fn with_statics(mut self, params: &[(&str, Decimal)]) -> Self {
        for (name, value) in params {
            self.static_params.insert(name.to_string(), *value);
        }
        self
    }

    /// Declare the names every call must supply. Order is kept.
    pub fn with_dynamic(mut self, names: &[&str]) -> Self {
        for name in names {
            if !self.dynamic_params.iter().any(|n| n == name) {
                self.dynamic_params.push(name.to_string());
            }
        }
        self
    }

    pub fn with_nickname(mut self, name: &str, symbol: &str) -> Self {
        self.nicknames.insert(name.to_string(), symbol.to_string());
        self
    }

    ////////////////////////////GETTERS///////////////////////////////////
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn dynamic_params(&self) -> &[String] {
        &self.dynamic_params
    }

    pub fn static_param(&self, name: &str) -> Option<Decimal> {
        self.static_params.get(name).copied()
    }

    /// symbol shown for a dynamic parameter in the unified rendering
    pub fn symbol_of<'s>(&'s self, name: &'s str) -> &'s str {
        self.nicknames.get(name).map(String::as_str).unwrap_or(name)
    }

    ////////////////////////////EVALUATION///////////////////////////////////
    pub fn execute(&self, ctx: &DecimalContext, dynamic_values: &Bindings) -> Result<T, ExprError> {
        if let Some(missing) = self
            .dynamic_params
            .iter()
            .find(|name| !dynamic_values.contains_key(name.as_str()))
        {
            return Err(ExprError::MissingVariable {
                name: missing.clone(),
                expression: self.name.clone(),
            });
        }
        let scope = Scope {
            expression: &self.name,
            dynamic: dynamic_values,
            statics: &self.static_params,
            ctx,
        };
        (self.evaluator)(&scope)
    }

    ////////////////////////////RENDERING///////////////////////////////////
    /// Fill the template with `values` (and the statics when `include_static` is set).
    /// Explicit values win over statics; placeholders without a value stay as `{name}`.
    pub fn compile(
        &self,
        values: &HashMap<String, String>,
        parenthesize_negatives: bool,
        include_static: bool,
    ) -> String {
        let wrap = |text: String| {
            if parenthesize_negatives && text.starts_with('-') {
                format!("({})", text)
            } else {
                text
            }
        };
        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures| {
                let name = &caps[1];
                if let Some(value) = values.get(name) {
                    wrap(value.clone())
                } else if let Some(value) = self.static_params.get(name).filter(|_| include_static) {
                    wrap(value.to_string())
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    /// The general formula: statics as numbers, dynamic parameters as symbols.
    pub fn render_unified(&self) -> String {
        let symbols: HashMap<String, String> = self
            .dynamic_params
            .iter()
            .map(|name| (name.clone(), self.symbol_of(name).to_string()))
            .collect();
        self.compile(&symbols, true, true)
    }

    /// The formula with every value substituted, without the result.
    pub fn render_substituted(&self, dynamic_values: &Bindings) -> String {
        let values: HashMap<String, String> = dynamic_values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        self.compile(&values, true, true)
    }
}

impl<T: fmt::Display> Expression<T> {
    /// `"<substituted formula> = <result>"`
    pub fn render_local(&self, ctx: &DecimalContext, dynamic_values: &Bindings) -> Result<String, ExprError> {
        let result = self.execute(ctx, dynamic_values)?;
        Ok(format!("{} = {}", self.render_substituted(dynamic_values), result))
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("name", &self.name)
            .field("template", &self.template)
            .field("static_params", &self.static_params)
            .field("dynamic_params", &self.dynamic_params)
            .field("nicknames", &self.nicknames)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.render_unified())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scaled() -> Expression {
        Expression::new("h(x)", "{k}*{x} - {shift}", |s| {
            let ctx = s.ctx();
            ctx.sub(ctx.mul(s.var("k")?, s.var("x")?)?, s.var("shift")?)
        })
        .with_statics(&[("k", dec!(2.5)), ("shift", dec!(-1))])
        .with_dynamic(&["x"])
    }

    #[test]
    fn test_execute_uses_statics_and_dynamics() {
        let ctx = DecimalContext::new(6);
        let value = scaled().execute(&ctx, &bindings(&[("x", dec!(2))])).unwrap();
        assert_eq!(value, dec!(6));
    }

    #[test]
    fn test_missing_dynamic_variable() {
        let ctx = DecimalContext::new(6);
        let err = scaled().execute(&ctx, &Bindings::new()).unwrap_err();
        assert_eq!(
            err,
            ExprError::MissingVariable { name: "x".to_string(), expression: "h(x)".to_string() }
        );
    }

    #[test]
    fn test_undeclared_name_read_by_evaluator() {
        let broken = Expression::new("broken", "{x} + {y}", |s| s.ctx().add(s.var("x")?, s.var("y")?))
            .with_dynamic(&["x"]);
        let ctx = DecimalContext::new(6);
        let err = broken.execute(&ctx, &bindings(&[("x", dec!(1))])).unwrap_err();
        assert!(matches!(err, ExprError::MissingVariable { ref name, .. } if name == "y"));
    }

    #[test]
    fn test_render_unified_keeps_dynamic_symbols() {
        let expr = scaled();
        assert_eq!(expr.render_unified(), "2.5*x - (-1)");
        // no hidden state between calls
        assert_eq!(expr.render_unified(), expr.render_unified());
    }

    #[test]
    fn test_nicknames_in_unified_form() {
        let expr = Expression::new("step", "{x} - {f_x}/{df_x}", |s| {
            let ctx = s.ctx();
            ctx.sub(s.var("x")?, ctx.div(s.var("f_x")?, s.var("df_x")?)?)
        })
        .with_dynamic(&["x", "f_x", "df_x"])
        .with_nickname("f_x", "f(x)")
        .with_nickname("df_x", "f'(x)");
        assert_eq!(expr.render_unified(), "x - f(x)/f'(x)");
        assert_eq!(expr.symbol_of("df_x"), "f'(x)");
        assert_eq!(expr.symbol_of("x"), "x");
    }

    #[test]
    fn test_render_local_parenthesizes_negatives() {
        let ctx = DecimalContext::new(6);
        let local = scaled().render_local(&ctx, &bindings(&[("x", dec!(-2))])).unwrap();
        assert_eq!(local, "2.5*(-2) - (-1) = -4.0");
    }

    #[test]
    fn test_render_local_matches_substituted_plus_result() {
        let ctx = DecimalContext::new(6);
        let expr = scaled();
        for x in [dec!(0.5), dec!(3), dec!(12.25)] {
            let values = bindings(&[("x", x)]);
            let expected = format!(
                "{} = {}",
                expr.template().replace("{k}", "2.5").replace("{shift}", "(-1)").replace("{x}", &x.to_string()),
                expr.execute(&ctx, &values).unwrap()
            );
            assert_eq!(expr.render_local(&ctx, &values).unwrap(), expected);
        }
    }

    #[test]
    fn test_compile_flags() {
        let expr = scaled();
        let values: HashMap<String, String> = [("x".to_string(), "-7".to_string())].into_iter().collect();
        assert_eq!(expr.compile(&values, false, true), "2.5*-7 - -1");
        assert_eq!(expr.compile(&values, true, false), "{k}*(-7) - {shift}");
        assert_eq!(expr.compile(&HashMap::new(), true, true), "2.5*{x} - (-1)");
    }

    #[test]
    fn test_display_and_debug() {
        let expr = scaled();
        assert_eq!(expr.to_string(), "h(x) = 2.5*x - (-1)");
        assert!(format!("{:?}", expr).contains("h(x)"));
    }

    #[test]
    fn test_boolean_expression() {
        let positive = Expression::new("p", "{v} > 0", |s| Ok(s.var("v")? > Decimal::ZERO)).with_dynamic(&["v"]);
        let ctx = DecimalContext::new(4);
        assert_eq!(positive.render_local(&ctx, &bindings(&[("v", dec!(-0.5))])).unwrap(), "(-0.5) > 0 = false");
        assert!(positive.execute(&ctx, &bindings(&[("v", dec!(1))])).unwrap());
    }

    #[test]
    fn test_expression_is_shareable_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Expression>();
        assert_send_sync::<Expression<bool>>();
    }
}
