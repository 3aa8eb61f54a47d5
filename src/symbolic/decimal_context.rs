//! # Decimal context
//!
//! Explicit numeric context for decimal arithmetic. Every solver instance owns one,
//! so the working precision is fixed for the whole run and two runs with different
//! accuracies never influence each other.
//!
//! Each operation is carried out exactly (within the 28 significant digits of
//! [`Decimal`]) and then rounded to `precision` significant digits with
//! half-even rounding, the same rule a hand calculation with guard digits would use.
//!
//! # Example
//! ```
//! use RustedRoots::symbolic::decimal_context::DecimalContext;
//! use rust_decimal::Decimal;
//! let ctx = DecimalContext::new(3);
//! let third = ctx.div(Decimal::ONE, Decimal::from(3)).unwrap();
//! assert_eq!(third.to_string(), "0.333");
//! ```
use crate::symbolic::expression::ExprError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// the largest number of significant digits a [`Decimal`] can hold
pub const MAX_PRECISION: u32 = 28;
/// the largest scale a [`Decimal`] can display
const MAX_SCALE: u32 = 28;

/// digits of the coefficient, trailing zeros included
fn significant_digits(value: Decimal) -> u32 {
    value.mantissa().unsigned_abs().checked_ilog10().map_or(1, |d| d + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalContext {
    precision: u32,
}

impl DecimalContext {
    /// precision is clamped into `1..=MAX_PRECISION`
    pub fn new(precision: u32) -> Self {
        DecimalContext {
            precision: precision.clamp(1, MAX_PRECISION),
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Round to the context precision (significant digits, half-even).
    ///
    /// A value that already fits keeps its own scale, so `20.22` stays `20.22` at any
    /// precision above four instead of being padded with zeros.
    pub fn round(&self, value: Decimal) -> Decimal {
        if significant_digits(value) <= self.precision {
            return value;
        }
        let rounded = value
            .round_sf_with_strategy(self.precision, RoundingStrategy::MidpointNearestEven)
            .unwrap_or(value);
        if rounded.scale() > MAX_SCALE {
            rounded.round_dp_with_strategy(MAX_SCALE, RoundingStrategy::MidpointNearestEven)
        } else {
            rounded
        }
    }

    pub fn add(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ExprError> {
        lhs.checked_add(rhs)
            .map(|v| self.round(v))
            .ok_or(ExprError::Overflow { operation: "+" })
    }

    pub fn sub(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ExprError> {
        lhs.checked_sub(rhs)
            .map(|v| self.round(v))
            .ok_or(ExprError::Overflow { operation: "-" })
    }

    pub fn mul(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ExprError> {
        lhs.checked_mul(rhs)
            .map(|v| self.round(v))
            .ok_or(ExprError::Overflow { operation: "*" })
    }

    /// Division; a zero divisor is reported as a singularity rather than an overflow.
    pub fn div(&self, numerator: Decimal, denominator: Decimal) -> Result<Decimal, ExprError> {
        if denominator.is_zero() {
            return Err(ExprError::DivisionBySingularity { numerator });
        }
        numerator
            .checked_div(denominator)
            .map(|v| self.round(v))
            .ok_or(ExprError::Overflow { operation: "/" })
    }

    /// Integer power, computed exactly and rounded once at the end.
    pub fn powi(&self, base: Decimal, exponent: u32) -> Result<Decimal, ExprError> {
        let mut acc = Decimal::ONE;
        for _ in 0..exponent {
            acc = acc
                .checked_mul(base)
                .ok_or(ExprError::Overflow { operation: "^" })?;
        }
        Ok(self.round(acc))
    }
}

impl Default for DecimalContext {
    fn default() -> Self {
        DecimalContext::new(MAX_PRECISION)
    }
}

/// Parse user input exactly, without rounding to any context.
pub fn parse_decimal(text: &str) -> Result<Decimal, ExprError> {
    Decimal::from_str(text.trim()).map_err(|_| ExprError::InvalidNumber {
        text: text.to_string(),
    })
}

/// `10^-digits`, the convergence tolerance for a given number of decimal digits
pub fn epsilon_for(digits: u32) -> Decimal {
    Decimal::new(1, digits)
}
