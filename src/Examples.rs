//! examples of usage of RustedEqGen
/// the ANOROC-string equation built term by term
pub mod equation_examples;
