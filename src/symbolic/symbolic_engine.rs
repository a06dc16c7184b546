//! # Symbolic Engine Module
//!
//! This module provides the symbolic expression tree used to build field equations
//! term by term. Expressions are immutable: every operation returns a new tree.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! The core symbolic expression type supporting:
//! - **Variables**: `Var(String)` - symbols like "R", "K_tot", "chi"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Exponential**: `Exp` - e^x
//! - **Applied functions**: `Func` - e.g. `G(mu, nu)`, `T^(eff)(mu, nu)`, `phi()`
//! - **Derivatives**: `Derivative` - unevaluated partial derivative of an expression
//!
//! ### Key Methods
//! - `Symbols(symbols: &str)` - Create multiple variables from comma-separated string
//! - `func` / `func_sup` / `tensor` - build applied functions
//! - `derivative(var)` - wrap the expression into an unevaluated derivative
//! - `substitute_variable()` / `subs()` - replace a symbol by an expression
//! - `contains_variable()` - symbol lookup
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Expression Tree**: Uses Box<Expr> for nested expressions
//!
//! 2. **Operator Overloading**: Implements std::ops traits (Add, Sub, Mul, Div, Neg) for
//!    natural mathematical syntax: `x + y * z`
//!
//! 3. **Canonical text form**: `Display` prints a fully parenthesised form that is stable
//!    and is used for textual checks on terms

#![allow(non_camel_case_types)]

use std::fmt;

use itertools::Itertools;

use crate::errors::EquationError;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust
/// use RustedEqGen::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(format!("{}", expr), "(x + 2)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "K_tot", "mu")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Applied function `name^(sup)(args)`; `sup` is an optional superscript label
    Func {
        name: String,
        sup: Option<Box<Expr>>,
        args: Vec<Expr>,
    },
    /// Unevaluated partial derivative of the first expression with respect to the second
    Derivative(Box<Expr>, Box<Expr>),
}

/// Replacement value of a substitution.
///
/// Only an expression is a valid replacement; a bare label is kept so that callers can
/// describe what they asked for and get a proper error back.
#[derive(Clone, Debug, PartialEq)]
pub enum Replacement {
    Expr(Expr),
    Label(String),
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Replacement::Expr(expr) => write!(f, "{}", expr),
            Replacement::Label(label) => write!(f, "'{}'", label),
        }
    }
}

/// A named symbol together with what should replace it
#[derive(Clone, Debug, PartialEq)]
pub struct Substitution {
    pub target: String,
    pub replacement: Replacement,
}

impl Substitution {
    pub fn new(target: &str, replacement: Replacement) -> Self {
        Substitution {
            target: target.to_string(),
            replacement,
        }
    }
}

/// Display implementation for pretty printing symbolic expressions.
///
/// Converts expressions to a fully parenthesised text form. This is the canonical
/// text form of an expression.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Func { name, sup, args } => {
                write!(f, "{}", name)?;
                if let Some(sup) = sup {
                    write!(f, "^({})", sup)?;
                }
                write!(f, "({})", args.iter().join(", "))
            }
            Expr::Derivative(expr, var) => write!(f, "Derivative({}, {})", expr, var),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// Whitespace is trimmed and empty names are skipped.
    ///
    /// # Examples
    /// ```rust
    /// use RustedEqGen::symbolic::symbolic_engine::Expr;
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect()
    }

    /// Single symbol
    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Applied function without superscript, e.g. `H(mu, nu)` or `phi()`
    pub fn func(name: &str, args: Vec<Expr>) -> Expr {
        Expr::Func {
            name: name.to_string(),
            sup: None,
            args,
        }
    }

    /// Applied function with a superscript label, e.g. `T^(eff)(mu, nu)`
    pub fn func_sup(name: &str, sup: Expr, args: Vec<Expr>) -> Expr {
        Expr::Func {
            name: name.to_string(),
            sup: Some(sup.boxed()),
            args,
        }
    }

    /// Tensor-like function of index symbols: `tensor("T", Some("eff"), &["mu", "nu"])`
    /// gives `T^(eff)(mu, nu)`.
    pub fn tensor(name: &str, sup: Option<&str>, indices: &[&str]) -> Expr {
        let args = indices.iter().map(|i| Expr::var(i)).collect();
        match sup {
            Some(label) => Expr::func_sup(name, Expr::var(label), args),
            None => Expr::func(name, args),
        }
    }

    /// Unevaluated partial derivative of `self` with respect to `var`
    pub fn derivative(self, var: Expr) -> Expr {
        Expr::Derivative(self.boxed(), var.boxed())
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Checks if expression is exactly one (constant 1.0).
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }

    /// Rebuilds the node with `f` applied to every direct child.
    pub(crate) fn map_children<F>(&self, f: &F) -> Expr
    where
        F: Fn(&Expr) -> Expr,
    {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Sub(lhs, rhs) => Expr::Sub(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Mul(lhs, rhs) => Expr::Mul(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Div(lhs, rhs) => Expr::Div(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Pow(base, exp) => Expr::Pow(f(base).boxed(), f(exp).boxed()),
            Expr::Exp(expr) => Expr::Exp(f(expr).boxed()),
            Expr::Func { name, sup, args } => Expr::Func {
                name: name.clone(),
                sup: sup.as_ref().map(|s| f(s).boxed()),
                args: args.iter().map(f).collect(),
            },
            Expr::Derivative(expr, var) => Expr::Derivative(f(expr).boxed(), f(var).boxed()),
        }
    }

    /// substitute a variable with an expression
    pub fn substitute_variable(&self, var: &str, expr: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => expr.clone(),
            _ => self.map_children(&|child: &Expr| child.substitute_variable(var, expr)),
        }
    }

    /// Applies a substitution.
    ///
    /// A label-valued replacement is not an expression and yields
    /// `EquationError::MalformedSubstitution`, whether or not the target occurs.
    pub fn subs(&self, substitution: &Substitution) -> Result<Expr, EquationError> {
        match &substitution.replacement {
            Replacement::Expr(replacement) => {
                Ok(self.substitute_variable(&substitution.target, replacement))
            }
            Replacement::Label(label) => Err(EquationError::MalformedSubstitution {
                target: substitution.target.clone(),
                replacement: label.clone(),
            }),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right)
            | Expr::Derivative(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::Exp(expr) => expr.contains_variable(var_name),
            Expr::Func { sup, args, .. } => {
                sup.as_ref().is_some_and(|s| s.contains_variable(var_name))
                    || args.iter().any(|a| a.contains_variable(var_name))
            }
        }
    }

    /// Sum of a sequence of expressions as a left fold: `((e0 + e1) + e2) + ...`.
    /// Returns `None` for an empty sequence.
    pub fn sum<I>(exprs: I) -> Option<Expr>
    where
        I: IntoIterator<Item = Expr>,
    {
        exprs.into_iter().reduce(|acc, e| acc + e)
    }
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic variables from a comma-separated list
/// Usage: symbols!(x, y, z) -> creates variables x, y, z
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        {
            let var_names = stringify!($($var),+);
            let vars = $crate::symbolic::symbolic_engine::Expr::Symbols(var_names);
            let mut iter = vars.into_iter();
            ($(
                {
                    let $var = iter.next().unwrap();
                    $var
                }
            ),+)
        }
    };
}
