//! # Symbolic Expression Simplification Module
//!
//! Algebraic clean-up and normal-form comparison for symbolic expressions.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: Evaluates arithmetic operations on numerical constants
//! 2. **Algebraic Identities**: Applies rules like x + 0 = x, x * 1 = x, x ^ 0 = 1, exp(0) = 1
//! 3. **Zero Elimination**: Removes multiplication by zero throughout expressions
//!
//! ## Normal form
//!
//! `normal_form()` flattens chains of sums and products, folds their constants and sorts
//! the operands by their canonical text, so that (a + b) and (b + a) compare equal.
//! Function applications and derivatives are kept as opaque atoms with normalised children.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Recursively simplifies the expression with constant folding and basic identities.
    ///
    /// ## Examples
    ///
    /// - `0 * (x + y)` → `0`
    /// - `x + 0` → `x`
    /// - `2 * 3` → `6`
    /// - `exp(0)` → `1`
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                (l, r) if l.is_zero() => r,
                (l, r) if r.is_zero() => l,
                (l, r) => l + r,
            },
            Expr::Sub(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                (l, r) if r.is_zero() => l,
                (l, r) if l == r => Expr::Const(0.0),
                (l, r) if l.is_zero() => (-r).simplify_(),
                (l, r) => l - r,
            },
            Expr::Mul(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                (l, r) if l.is_zero() || r.is_zero() => Expr::Const(0.0),
                (l, r) if l.is_one() => r,
                (l, r) if r.is_one() => l,
                (l, r) => l * r,
            },
            Expr::Div(lhs, rhs) => match (lhs.simplify_(), rhs.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) if b != 0.0 => Expr::Const(a / b),
                (l, r) if l.is_zero() && !r.is_zero() => Expr::Const(0.0),
                (l, r) if r.is_one() => l,
                (l, r) => l / r,
            },
            Expr::Pow(base, exp) => match (base.simplify_(), exp.simplify_()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(b)),
                (_, e) if e.is_zero() => Expr::Const(1.0),
                (b, e) if e.is_one() => b,
                (b, e) => b.pow(e),
            },
            Expr::Exp(expr) => match expr.simplify_() {
                e if e.is_zero() => Expr::Const(1.0),
                e => e.exp(),
            },
            Expr::Func { .. } => self.map_children(&|child: &Expr| child.simplify_()),
            Expr::Derivative(expr, var) => match expr.simplify_() {
                Expr::Const(_) => Expr::Const(0.0),
                e => e.derivative(var.simplify_()),
            },
        }
    }

    /// Flattens a chain of sums and differences into signed addends.
    /// `a - b` contributes `a` and `-1 * b`.
    pub fn collect_addends(&self) -> Vec<Expr> {
        match self {
            Expr::Add(lhs, rhs) => {
                let mut terms = lhs.collect_addends();
                terms.extend(rhs.collect_addends());
                terms
            }
            Expr::Sub(lhs, rhs) => {
                let mut terms = lhs.collect_addends();
                terms.extend(
                    rhs.collect_addends()
                        .into_iter()
                        .map(|t| Expr::Const(-1.0) * t),
                );
                terms
            }
            _ => vec![self.clone()],
        }
    }

    /// Flattens a chain of products into its factors.
    pub fn collect_factors(&self) -> Vec<Expr> {
        match self {
            Expr::Mul(lhs, rhs) => {
                let mut factors = lhs.collect_factors();
                factors.extend(rhs.collect_factors());
                factors
            }
            _ => vec![self.clone()],
        }
    }

    /// Order-insensitive normal form used for comparing expressions.
    pub fn normal_form(&self) -> Expr {
        let simplified = self.simplify_();
        match &simplified {
            Expr::Add(_, _) | Expr::Sub(_, _) => {
                let mut constant = 0.0;
                let mut terms: Vec<Expr> = Vec::new();
                for term in simplified.collect_addends() {
                    match term.normal_form() {
                        Expr::Const(c) => constant += c,
                        t => terms.push(t),
                    }
                }
                if constant != 0.0 || terms.is_empty() {
                    terms.push(Expr::Const(constant));
                }
                terms.sort_by_key(|t| t.to_string());
                Expr::sum(terms).unwrap_or(Expr::Const(0.0))
            }
            Expr::Mul(_, _) => {
                let mut coefficient = 1.0;
                let mut factors: Vec<Expr> = Vec::new();
                for factor in simplified.collect_factors() {
                    match factor.normal_form() {
                        Expr::Const(c) => coefficient *= c,
                        f => factors.push(f),
                    }
                }
                if coefficient == 0.0 {
                    return Expr::Const(0.0);
                }
                factors.sort_by_key(|f| f.to_string());
                if coefficient != 1.0 || factors.is_empty() {
                    factors.insert(0, Expr::Const(coefficient));
                }
                factors
                    .into_iter()
                    .reduce(|acc, f| acc * f)
                    .unwrap_or(Expr::Const(1.0))
            }
            _ => simplified.map_children(&|child: &Expr| child.normal_form()),
        }
    }

    /// Structural equality after bringing both sides to normal form.
    pub fn equivalent(&self, other: &Expr) -> bool {
        self.normal_form() == other.normal_form()
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::Expr;
    use crate::symbols;

    #[test]
    fn test_constant_folding_and_identities() {
        let x = Expr::var("x");
        let e = (x.clone() + Expr::Const(0.0)) * Expr::Const(1.0);
        assert_eq!(e.simplify_(), x);
        let zero = Expr::Const(0.0) * (x.clone() + Expr::var("y"));
        assert_eq!(zero.simplify_(), Expr::Const(0.0));
        let folded = Expr::Const(8.0) * Expr::Const(0.5);
        assert_eq!(folded.simplify_(), Expr::Const(4.0));
        assert_eq!(Expr::Const(0.0).exp().simplify_(), Expr::Const(1.0));
        assert_eq!(x.clone().pow(Expr::Const(1.0)).simplify_(), x);
    }

    #[test]
    fn test_field_derivative_is_not_folded_away() {
        let phi = Expr::func("phi", vec![]);
        let d = phi.derivative(Expr::var("mu"));
        assert_eq!(d.simplify_(), d);
        let dc = Expr::Const(3.0).derivative(Expr::var("mu"));
        assert_eq!(dc.simplify_(), Expr::Const(0.0));
    }

    #[test]
    fn test_equivalence_ignores_order() {
        let (a, b, c) = symbols!(a, b, c);
        let left = a.clone() + b.clone() + c.clone();
        let right = c.clone() + (b.clone() + a.clone());
        assert!(left.equivalent(&right));
        let prod1 = a.clone() * Expr::Const(2.0) * b.clone();
        let prod2 = b.clone() * a.clone() * Expr::Const(2.0);
        assert!(prod1.equivalent(&prod2));
        assert!(!left.equivalent(&(a.clone() + b.clone())));
    }

    #[test]
    fn test_equivalence_of_differences() {
        let (a, b) = symbols!(a, b);
        let diff = a.clone() - b.clone();
        let sum = Expr::Const(-1.0) * b.clone() + a.clone();
        assert!(diff.equivalent(&sum));
        assert!((a.clone() - a.clone()).equivalent(&Expr::Const(0.0)));
    }

    #[test]
    fn test_equivalence_inside_functions() {
        let (a, b) = symbols!(a, b);
        let f1 = Expr::func("V", vec![a.clone() + b.clone()]);
        let f2 = Expr::func("V", vec![b.clone() + a.clone()]);
        assert!(f1.equivalent(&f2));
    }
}
