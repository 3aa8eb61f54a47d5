//! examples of usage of RustedRoots
/// the four methods on the cubic with roots -4.74, -1 and 1
pub mod root_examples;
