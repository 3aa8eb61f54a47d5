//! The four iterative methods and the tag naming them.
//!
//! | method | initial x | step |
//! |---|---|---|
//! | [`bisection::Bisection`] | midpoint | `(a+b)/2`, then keep the half with the sign change |
//! | [`tangent::Tangent`] | `rbound` | `x - f(x)/f'(x)` |
//! | [`secant::Secant`] | `lbound` | `x - f(x)/(f(x) - f(b))*(x - b)` |
//! | [`simple_iteration::SimpleIteration`] | midpoint | `x - k*f(x)`, `k = 1/f'(x0)` |
use crate::numerical::solve_method::{SolveError, StepRule};
use crate::symbolic::expression::Expression;
use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};

pub mod bisection;
pub mod secant;
pub mod simple_iteration;
pub mod tangent;

use bisection::Bisection;
use secant::Secant;
use simple_iteration::SimpleIteration;
use tangent::Tangent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum MethodKind {
    #[strum(to_string = "bisection method", serialize = "bisection")]
    Bisection,
    #[strum(to_string = "tangent method", serialize = "tangent", serialize = "newton")]
    #[serde(alias = "newton")]
    Tangent,
    #[strum(to_string = "secant method", serialize = "secant")]
    Secant,
    #[strum(to_string = "simple iteration method", serialize = "simple_iteration")]
    SimpleIteration,
}

impl MethodKind {
    pub fn needs_derivative(self) -> bool {
        matches!(self, MethodKind::Tangent | MethodKind::SimpleIteration)
    }

    /// Build the step rule for this method. Tangent and simple iteration borrow the
    /// caller's derivative for the lifetime of the run.
    pub fn rule<'a>(self, derivative: Option<&'a Expression>) -> Result<Box<dyn StepRule + 'a>, SolveError> {
        let missing = || SolveError::MissingDerivative { method: self };
        let rule: Box<dyn StepRule + 'a> = match self {
            MethodKind::Bisection => Box::new(Bisection::new()),
            MethodKind::Secant => Box::new(Secant::new()),
            MethodKind::Tangent => Box::new(Tangent::new(derivative.ok_or_else(missing)?)),
            MethodKind::SimpleIteration => Box::new(SimpleIteration::new(derivative.ok_or_else(missing)?)),
        };
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::formulas::cubic_derivative;
    use rust_decimal_macros::dec;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_and_parsing() {
        assert_eq!(MethodKind::Tangent.to_string(), "tangent method");
        assert_eq!(MethodKind::from_str("newton").unwrap(), MethodKind::Tangent);
        assert_eq!(MethodKind::from_str("Simple_Iteration").unwrap(), MethodKind::SimpleIteration);
        assert!(MethodKind::from_str("regula_falsi").is_err());
        assert_eq!(MethodKind::iter().count(), 4);
    }

    #[test]
    fn test_rules_for_every_method() {
        let df = cubic_derivative(dec!(1), dec!(4.74));
        for kind in MethodKind::iter() {
            let rule = kind.rule(Some(&df)).unwrap();
            assert_eq!(rule.kind(), kind);
            let needs = kind.needs_derivative();
            assert_eq!(kind.rule(None).is_err(), needs);
        }
    }
}
