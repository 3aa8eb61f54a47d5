//! # Solve method driver
//!
//! [`SolveMethod`] drives one iterative method over a target [`Expression`]:
//!
//! ```text
//!  Initialized --run()--> Iterating --stop predicate holds--> Converged
//!                             |
//!                             +--max_iterations reached--> Err(NonConvergence)
//! ```
//!
//! The method itself is a [`StepRule`]: it picks the starting point, computes one-time
//! preparation values, supplies the inputs of its step formula and applies the result
//! (bisection also narrows the bracket). The driver owns everything else: the decimal
//! context (`accuracy + 2` significant digits for the whole run), the tolerance
//! `epsilon = 10^-accuracy`, the stop predicate and the trace.
//!
//! Trace lines look like
//! ```text
//! Attempt to find root in [0.102, 2],
//! Use 'tangent method':
//! Step #1:
//! x = x - f(x)/f'(x) = 2 - 20.22/29.96 = 1.3251
//! { check f(x+eps)*f(x-eps) < 0 = 4.6009*4.5679 < 0 = false }
//! ```
//!
//! # Example
//! ```
//! use RustedRoots::numerical::methods::MethodKind;
//! use RustedRoots::numerical::solve_method::{SolveMethod, SolverConfig};
//! use RustedRoots::symbolic::formulas::{cubic, cubic_derivative};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let (a, b) = (Decimal::ONE, Decimal::from_str("4.74").unwrap());
//! let f = cubic(a, b);
//! let df = cubic_derivative(a, b);
//! let config = SolverConfig::new().set_accuracy(3).set_suppress_trace(true);
//! let mut solver = SolveMethod::with_method(
//!     &f, Some(&df), MethodKind::Tangent,
//!     Decimal::from_str("0.102").unwrap(), Decimal::from(2), &config,
//! ).unwrap();
//! let report = solver.run().unwrap();
//! assert!((report.root - Decimal::ONE).abs() < Decimal::from_str("0.001").unwrap());
//! ```
use crate::numerical::methods::MethodKind;
use crate::numerical::trace::TraceSink;
use crate::symbolic::decimal_context::{DecimalContext, MAX_PRECISION, epsilon_for};
use crate::symbolic::expression::{Bindings, ExprError, Expression, bindings};
use crate::symbolic::formulas::{F_MINUS, F_PLUS, sign_change_check};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

pub const DEFAULT_ACCURACY: u32 = 4;
/// two guard digits have to fit into the decimal mantissa
pub const MAX_ACCURACY: u32 = MAX_PRECISION - 2;
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Errors of a solver run. Expression errors (missing variables, division by a zero
/// derivative, overflow) pass through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Expression(#[from] ExprError),

    #[error("{method} did not converge after {iterations} iterations, last x = {x}")]
    NonConvergence {
        method: MethodKind,
        iterations: usize,
        x: Decimal,
    },

    #[error("invalid accuracy: must be in 1..={max}. got {got}")]
    InvalidAccuracy { got: u32, max: u32 },

    #[error("invalid max_iterations: must be >= 1. got {got}")]
    InvalidMaxIterations { got: usize },

    #[error("{method} needs a derivative expression")]
    MissingDerivative { method: MethodKind },

    #[error("{method} was stepped before its preparation")]
    NotPrepared { method: MethodKind },
}

////////////////////////////////////////////CONFIG////////////////////////////////////////////
/// Configuration shared by every method
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// number of decimal digits of the tolerance, `epsilon = 10^-accuracy`
    ///
    /// Arithmetic runs at `accuracy + 2` significant digits, so `x ± epsilon` is only
    /// distinguishable from `x` while the root has at most two integer digits. Roots
    /// of magnitude 100 and above never pass the sign-change check and end in
    /// [`SolveError::NonConvergence`]; rescale such functions first.
    pub accuracy: u32,
    pub suppress_trace: bool,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            suppress_trace: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn set_suppress_trace(mut self, suppress_trace: bool) -> Self {
        self.suppress_trace = suppress_trace;
        self
    }

    pub fn set_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), SolveError> {
        if self.accuracy == 0 || self.accuracy > MAX_ACCURACY {
            return Err(SolveError::InvalidAccuracy {
                got: self.accuracy,
                max: MAX_ACCURACY,
            });
        }
        if self.max_iterations == 0 {
            return Err(SolveError::InvalidMaxIterations { got: 0 });
        }
        Ok(())
    }
}

/////////////////////////////////////////STATE AND REPORT/////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Iterating,
    Converged,
}

/// Mutable part of a run: the iterate, the bracket and the step counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterState {
    pub x: Decimal,
    pub lbound: Decimal,
    pub rbound: Decimal,
    pub iteration: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub x: Decimal,
    pub lbound: Decimal,
    pub rbound: Decimal,
}

/// Outcome of a converged run.
#[derive(Debug, Clone)]
pub struct RootReport {
    pub method: MethodKind,
    pub root: Decimal,
    /// f(root)
    pub f_root: Decimal,
    pub iterations: usize,
    pub lbound: Decimal,
    pub rbound: Decimal,
    pub history: Vec<StepRecord>,
    pub trace: Vec<String>,
}

impl fmt::Display for RootReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Root is {}, proof: {}", self.root, self.f_root)
    }
}

/// Evaluate a one-variable function at `x`. The variable is the function's first
/// dynamic parameter, `x` when it declares none.
pub fn evaluate_at(function: &Expression, ctx: &DecimalContext, x: Decimal) -> Result<Decimal, ExprError> {
    let variable = function.dynamic_params().first().map(String::as_str).unwrap_or("x");
    function.execute(ctx, &bindings(&[(variable, x)]))
}

///////////////////////////////////////////STEP RULE///////////////////////////////////////////
/// What distinguishes one iterative method from another.
pub trait StepRule {
    fn kind(&self) -> MethodKind;

    /// the formula shown and evaluated at every step
    fn step_formula(&self) -> &Expression;

    /// starting iterate, computed from the initial bracket
    fn initial_x(&self, state: &IterState, ctx: &DecimalContext) -> Result<Decimal, SolveError>;

    /// One-time values computed before iterating; returns their trace lines.
    fn prepare(
        &mut self,
        _function: &Expression,
        _state: &IterState,
        _ctx: &DecimalContext,
    ) -> Result<Vec<String>, SolveError> {
        Ok(Vec::new())
    }

    /// dynamic values for [`StepRule::step_formula`] at the current state
    fn step_inputs(
        &self,
        function: &Expression,
        state: &IterState,
        ctx: &DecimalContext,
    ) -> Result<Bindings, SolveError>;

    /// Apply a freshly computed iterate. May return one extra trace line.
    fn advance(
        &self,
        _function: &Expression,
        state: &mut IterState,
        x_new: Decimal,
        _ctx: &DecimalContext,
    ) -> Result<Option<String>, SolveError> {
        state.x = x_new;
        Ok(None)
    }
}

///////////////////////////////////////////DRIVER///////////////////////////////////////////
pub struct SolveMethod<'a> {
    function: &'a Expression,
    rule: Box<dyn StepRule + 'a>,
    state: IterState,
    accuracy: u32,
    epsilon: Decimal,
    ctx: DecimalContext,
    stop_predicate: Expression<bool>,
    suppress_trace: bool,
    max_iterations: usize,
    phase: Phase,
    prepare_trace: Vec<String>,
    trace: Vec<String>,
    history: Vec<StepRecord>,
    sink: Option<Box<dyn TraceSink + 'a>>,
}

impl<'a> SolveMethod<'a> {
    pub fn new(
        function: &'a Expression,
        mut rule: Box<dyn StepRule + 'a>,
        lbound: Decimal,
        rbound: Decimal,
        config: &SolverConfig,
    ) -> Result<Self, SolveError> {
        config.validate()?;
        let ctx = DecimalContext::new(config.accuracy + 2);
        let mut state = IterState {
            x: Decimal::ZERO,
            lbound,
            rbound,
            iteration: 0,
        };
        state.x = rule.initial_x(&state, &ctx)?;
        let prepare_trace = rule.prepare(function, &state, &ctx)?;
        Ok(SolveMethod {
            function,
            rule,
            state,
            accuracy: config.accuracy,
            epsilon: epsilon_for(config.accuracy),
            ctx,
            stop_predicate: sign_change_check(),
            suppress_trace: config.suppress_trace,
            max_iterations: config.max_iterations,
            phase: Phase::Initialized,
            prepare_trace,
            trace: Vec::new(),
            history: Vec::new(),
            sink: None,
        })
    }

    /// Build the rule for `kind` and the driver around it.
    pub fn with_method(
        function: &'a Expression,
        derivative: Option<&'a Expression>,
        kind: MethodKind,
        lbound: Decimal,
        rbound: Decimal,
        config: &SolverConfig,
    ) -> Result<Self, SolveError> {
        let rule = kind.rule(derivative)?;
        Self::new(function, rule, lbound, rbound, config)
    }

    /// Replace the sign-change check. The predicate may read `x`, `epsilon`,
    /// `f_plus` (= f(x+eps)) and `f_minus` (= f(x-eps)).
    pub fn with_stop_predicate(mut self, predicate: Expression<bool>) -> Self {
        self.stop_predicate = predicate;
        self
    }

    /// echo trace lines to `sink` as they are produced
    pub fn with_sink(mut self, sink: Box<dyn TraceSink + 'a>) -> Self {
        self.sink = Some(sink);
        self
    }

    ////////////////////////////GETTERS///////////////////////////////////
    pub fn kind(&self) -> MethodKind {
        self.rule.kind()
    }
    pub fn x(&self) -> Decimal {
        self.state.x
    }
    pub fn state(&self) -> &IterState {
        &self.state
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }
    pub fn epsilon(&self) -> Decimal {
        self.epsilon
    }
    pub fn context(&self) -> &DecimalContext {
        &self.ctx
    }
    pub fn trace(&self) -> &[String] {
        &self.trace
    }
    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    ////////////////////////////TRACE HOOKS///////////////////////////////////
    fn show(&mut self, line: String) {
        if self.suppress_trace {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(&line);
        }
        self.trace.push(line);
    }

    fn show_header(&mut self) {
        let header = format!(
            "Attempt to find root in [{}, {}],",
            self.state.lbound, self.state.rbound
        );
        self.show(header);
        self.show(format!("Use '{}':", self.rule.kind()));
    }

    fn show_cache_prepare(&mut self) {
        for line in self.prepare_trace.clone() {
            self.show(line);
        }
    }

    fn show_step_prepare(&mut self) {
        self.show(format!("Step #{}:", self.state.iteration));
    }

    fn show_step(&mut self, inputs: &Bindings, x_new: Decimal) {
        if self.suppress_trace {
            return;
        }
        let formula = self.rule.step_formula();
        let line = format!(
            "x = {} = {} = {}",
            formula.render_unified(),
            formula.render_substituted(inputs),
            x_new
        );
        self.show(line);
    }

    fn show_check(&mut self, inputs: &Bindings, result: bool) {
        if self.suppress_trace {
            return;
        }
        let line = format!(
            "{{ check {} = {} = {} }}",
            self.stop_predicate.render_unified(),
            self.stop_predicate.render_substituted(inputs),
            result
        );
        self.show(line);
    }

    ////////////////////////////ITERATION///////////////////////////////////
    /// One update of the iterate (and, for bisection, of the bracket).
    pub fn step(&mut self) -> Result<Decimal, SolveError> {
        if self.phase == Phase::Initialized {
            self.phase = Phase::Iterating;
        }
        self.state.iteration += 1;
        self.show_step_prepare();

        let inputs = self.rule.step_inputs(self.function, &self.state, &self.ctx)?;
        let x_new = self.rule.step_formula().execute(&self.ctx, &inputs)?;
        self.show_step(&inputs, x_new);

        if let Some(note) = self.rule.advance(self.function, &mut self.state, x_new, &self.ctx)? {
            self.show(note);
        }
        self.history.push(StepRecord {
            step: self.state.iteration,
            x: self.state.x,
            lbound: self.state.lbound,
            rbound: self.state.rbound,
        });
        debug!(
            "{} step {}: x = {}, bracket [{}, {}]",
            self.rule.kind(),
            self.state.iteration,
            self.state.x,
            self.state.lbound,
            self.state.rbound
        );
        Ok(self.state.x)
    }

    /// Evaluate the stop predicate around the current iterate.
    pub fn stop_needed(&mut self) -> Result<bool, SolveError> {
        let x = self.state.x;
        let f_plus = evaluate_at(self.function, &self.ctx, self.ctx.add(x, self.epsilon)?)?;
        let f_minus = evaluate_at(self.function, &self.ctx, self.ctx.sub(x, self.epsilon)?)?;
        let inputs = bindings(&[
            ("x", x),
            ("epsilon", self.epsilon),
            (F_PLUS, f_plus),
            (F_MINUS, f_minus),
        ]);
        let stop = self.stop_predicate.execute(&self.ctx, &inputs)?;
        self.show_check(&inputs, stop);
        Ok(stop)
    }

    /// Iterate until the stop predicate holds. At least one step is always taken:
    /// the predicate is only meaningful once the starting point has been updated.
    pub fn run(&mut self) -> Result<RootReport, SolveError> {
        info!(
            "{} started on [{}, {}] with accuracy {}",
            self.rule.kind(),
            self.state.lbound,
            self.state.rbound,
            self.accuracy
        );
        self.show_header();
        self.show_cache_prepare();
        self.phase = Phase::Iterating;

        let mut steps_this_run = 0;
        while steps_this_run < self.max_iterations {
            self.step()?;
            steps_this_run += 1;
            if self.stop_needed()? {
                self.phase = Phase::Converged;
                let report = self.report()?;
                info!("{} converged: {}", self.rule.kind(), report);
                self.log_statistics(&report);
                return Ok(report);
            }
        }
        warn!(
            "{} stopped after {} iterations without convergence",
            self.rule.kind(),
            self.max_iterations
        );
        Err(SolveError::NonConvergence {
            method: self.rule.kind(),
            iterations: self.state.iteration,
            x: self.state.x,
        })
    }

    fn report(&self) -> Result<RootReport, SolveError> {
        Ok(RootReport {
            method: self.rule.kind(),
            root: self.state.x,
            f_root: evaluate_at(self.function, &self.ctx, self.state.x)?,
            iterations: self.state.iteration,
            lbound: self.state.lbound,
            rbound: self.state.rbound,
            history: self.history.clone(),
            trace: self.trace.clone(),
        })
    }

    fn log_statistics(&self, report: &RootReport) {
        let mut builder = Builder::default();
        builder.push_record(["quantity".to_string(), "value".to_string()]);
        builder.push_record(["method".to_string(), report.method.to_string()]);
        builder.push_record(["root".to_string(), report.root.to_string()]);
        builder.push_record(["f(root)".to_string(), report.f_root.to_string()]);
        builder.push_record(["iterations".to_string(), report.iterations.to_string()]);
        builder.push_record(["epsilon".to_string(), self.epsilon.to_string()]);
        builder.push_record(["precision, digits".to_string(), self.ctx.precision().to_string()]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        info!("\n \n CALC STATISTICS \n \n {}", table);
    }
}
