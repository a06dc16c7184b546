#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// # Symbolic engine
/// expression tree, operators, substitution and the canonical text form
///# Example#
/// ```
/// use RustedEqGen::symbolic::symbolic_engine::Expr;
/// let G = Expr::tensor("G", None, &["mu", "nu"]);
/// let term = Expr::var("R") * G;
/// assert_eq!(term.to_string(), "(R * G(mu, nu))");
/// assert!(term.contains_variable("mu"));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// LaTeX rendering of expressions
///# Example#
/// ```
/// use RustedEqGen::symbolic::symbolic_engine::Expr;
/// let e = Expr::var("K") / Expr::var("K_tot");
/// assert_eq!(e.to_latex(), r"\frac{K}{K_{tot}}");
/// ```
pub mod symbolic_latex;
/// constant folding and a normal form for comparing sums and products
pub mod symbolic_simplify;
/// linspace
pub mod utils;
