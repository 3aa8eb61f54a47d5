//! Task files: which cubic to solve, with which settings, by which methods on which brackets.
//!
//! ```toml
//! loglevel = "info"
//! history_dir = "results"
//!
//! [function]
//! a = "1"
//! b = "4.74"
//!
//! [solver]
//! accuracy = 3
//! max_iterations = 500
//!
//! [[runs]]
//! method = "tangent"
//! lbound = "0.102"
//! rbound = "2"
//! ```
//! Numbers are written as strings so they reach the solver digit for digit.
//! Every section is optional; a missing one takes the value of [`SolveTask::default`].
use crate::Utils::logger::{parse_loglevel, save_history_to_csv};
use crate::numerical::methods::MethodKind;
use crate::numerical::solve_method::{RootReport, SolveError, SolveMethod, SolverConfig};
use crate::numerical::trace::TraceSink;
use crate::symbolic::decimal_context::parse_decimal;
use crate::symbolic::expression::{ExprError, Expression};
use crate::symbolic::formulas::{cubic, cubic_derivative};
use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot read task file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed task file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Number(#[from] ExprError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("cannot write history: {0}")]
    Csv(#[from] csv::Error),

    #[error("loglevel must be debug, info, warn, error, off or none. got {0}")]
    InvalidLogLevel(String),
}

/// coefficients of `f(x) = a*x^3 + b*a*x^2 - a*x - b*a`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FunctionSection {
    pub a: String,
    pub b: String,
}

impl Default for FunctionSection {
    fn default() -> Self {
        FunctionSection {
            a: "1".to_string(),
            b: "4.74".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Run {
    pub method: MethodKind,
    pub lbound: String,
    pub rbound: String,
}

impl Run {
    fn new(method: MethodKind, lbound: &str, rbound: &str) -> Self {
        Run {
            method,
            lbound: lbound.to_string(),
            rbound: rbound.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolveTask {
    pub function: FunctionSection,
    pub solver: SolverConfig,
    pub loglevel: Option<String>,
    /// one `<run number>_<method>.csv` per run is written here when set
    pub history_dir: Option<PathBuf>,
    pub runs: Vec<Run>,
}

/// One run per method, each on a bracket holding a single root, accuracy 3.
impl Default for SolveTask {
    fn default() -> Self {
        SolveTask {
            function: FunctionSection::default(),
            solver: SolverConfig::new().set_accuracy(3),
            loglevel: None,
            history_dir: None,
            runs: vec![
                Run::new(MethodKind::Tangent, "0.102", "2"),
                Run::new(MethodKind::Secant, "-4.24", "-0.5"),
                Run::new(MethodKind::SimpleIteration, "-5.74", "-3.262"),
                Run::new(MethodKind::Bisection, "-5.74", "-3.74"),
            ],
        }
    }
}

impl FromStr for SolveTask {
    type Err = TaskError;

    fn from_str(text: &str) -> Result<Self, TaskError> {
        let task: SolveTask = toml::from_str(text)?;
        task.validate()?;
        Ok(task)
    }
}

impl SolveTask {
    pub fn from_file(path: &Path) -> Result<Self, TaskError> {
        fs::read_to_string(path)?.parse()
    }

    /// Check everything that can be checked before solving: log level, solver
    /// settings and that every number parses.
    pub fn validate(&self) -> Result<(), TaskError> {
        if let Some(level) = &self.loglevel {
            if parse_loglevel(level).is_none() {
                return Err(TaskError::InvalidLogLevel(level.clone()));
            }
        }
        self.solver.validate()?;
        self.coefficients()?;
        for run in &self.runs {
            parse_decimal(&run.lbound)?;
            parse_decimal(&run.rbound)?;
        }
        Ok(())
    }

    pub fn coefficients(&self) -> Result<(Decimal, Decimal), ExprError> {
        Ok((parse_decimal(&self.function.a)?, parse_decimal(&self.function.b)?))
    }

    pub fn function(&self) -> Result<(Expression, Expression), ExprError> {
        let (a, b) = self.coefficients()?;
        Ok((cubic(a, b), cubic_derivative(a, b)))
    }

    /// Run every configured method in order and stop at the first failure.
    pub fn solve_all(&self) -> Result<Vec<RootReport>, TaskError> {
        self.solve_all_with(|| None)
    }

    /// Same as [`SolveTask::solve_all`], echoing each run's trace to the sink `make_sink` builds.
    pub fn solve_all_with<'s, F>(&self, make_sink: F) -> Result<Vec<RootReport>, TaskError>
    where
        F: Fn() -> Option<Box<dyn TraceSink + 's>>,
    {
        let (f, df) = self.function()?;
        info!("solving {} with {} runs", f, self.runs.len());
        let mut reports = Vec::with_capacity(self.runs.len());
        for (i, run) in self.runs.iter().enumerate() {
            let lbound = parse_decimal(&run.lbound)?;
            let rbound = parse_decimal(&run.rbound)?;
            let mut solver = SolveMethod::with_method(&f, Some(&df), run.method, lbound, rbound, &self.solver)?;
            if let Some(sink) = make_sink() {
                solver = solver.with_sink(sink);
            }
            let report = solver.run()?;
            if let Some(dir) = &self.history_dir {
                fs::create_dir_all(dir)?;
                let name = format!("{}_{}.csv", i + 1, run.method.to_string().replace(' ', "_"));
                save_history_to_csv(&report, &dir.join(name))?;
            }
            reports.push(report);
        }
        Ok(reports)
    }
}
