//! Assembly of one field equation from annotated terms.
//!
//! # Example
//! ```
//! use RustedEqGen::equation::term_registry::TermRegistry;
//! use RustedEqGen::equation::equation_assembler::EquationAssembler;
//! use RustedEqGen::symbolic::symbolic_engine::Expr;
//! let mut registry = TermRegistry::new();
//! for name in ["a", "b", "c", "d", "e", "f"] {
//!     registry.register(Expr::var(name), name).unwrap();
//! }
//! let equation = EquationAssembler::default().assemble(&registry).unwrap();
//! // only the first five terms make the left-hand side
//! assert!(!equation.lhs().contains_variable("f"));
//! ```
/// ordered, append-only term collection
pub mod term_registry;
/// fixed right-hand side background expressions
pub mod background;
/// lhs/rhs construction
pub mod equation_assembler;
/// text and expression sinks
pub mod render_surface;
/// step-by-step replay of the registry
pub mod step_explainer;
