/// # Root finding in fixed-precision decimals
/// four iterative methods (bisection, tangent, secant, simple iteration) driven by one loop
///  Example#1
/// ```
/// use RustedRoots::numerical::methods::MethodKind;
/// use RustedRoots::numerical::solve_method::{SolveMethod, SolverConfig};
/// use RustedRoots::symbolic::formulas::cubic;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// let f = cubic(Decimal::ONE, Decimal::from_str("4.74").unwrap());
/// let config = SolverConfig::new().set_accuracy(3);
/// let mut solver = SolveMethod::with_method(
///     &f, None, MethodKind::Bisection,
///     Decimal::from_str("-5.74").unwrap(), Decimal::from_str("-3.74").unwrap(), &config,
/// ).unwrap();
/// let report = solver.run().unwrap();
/// for line in &report.trace {
///     println!("{}", line);
/// }
/// assert_eq!(report.root, Decimal::from_str("-4.74").unwrap());
/// ```
pub mod solve_method;
/// the method tag and one step rule per method
pub mod methods;
pub mod trace;
