//! Builds the final `lhs = rhs` equation.
//!
//! The left-hand side is the sum of the first `lhs_arity` registered terms in insertion
//! order; later terms take part in the explanation only. The right-hand side is built
//! from the background alone:
//!
//! ```text
//! exp(-phi) (T_eff + d_mu phi d_nu phi - 1/2 G V(phi))
//!   + 8 pi G_N (T_matter + chi Psi_mu Psi_nu)
//!   + kappa_11^2 T_brane |_(reduction)
//! ```

use std::fmt;

use log::{info, warn};

use crate::equation::background::Background;
use crate::equation::term_registry::TermRegistry;
use crate::errors::EquationError;
use crate::symbolic::symbolic_engine::Expr;

pub const DEFAULT_LHS_ARITY: usize = 5;

/// Formal equality `lhs = rhs`
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    lhs: Expr,
    rhs: Expr,
}

impl Equation {
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Equation { lhs, rhs }
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    pub fn to_latex(&self) -> String {
        format!("{} = {}", self.lhs.to_latex(), self.rhs.to_latex())
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

#[derive(Clone, Debug)]
pub struct EquationAssembler {
    background: Background,
    lhs_arity: usize,
}

impl Default for EquationAssembler {
    fn default() -> Self {
        EquationAssembler::new(Background::default(), DEFAULT_LHS_ARITY)
    }
}

impl EquationAssembler {
    pub fn new(background: Background, lhs_arity: usize) -> Self {
        EquationAssembler {
            background,
            lhs_arity,
        }
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn lhs_arity(&self) -> usize {
        self.lhs_arity
    }

    pub fn assemble(&self, registry: &TermRegistry) -> Result<Equation, EquationError> {
        if self.lhs_arity == 0 {
            return Err(EquationError::InvalidArity);
        }
        if registry.len() < self.lhs_arity {
            return Err(EquationError::InsufficientTerms {
                required: self.lhs_arity,
                found: registry.len(),
            });
        }
        let ignored = registry.len() - self.lhs_arity;
        if ignored > 0 {
            warn!(
                "{} trailing term(s) are explained but left out of the equation",
                ignored
            );
        }
        let lhs = Expr::sum(
            registry
                .terms()
                .take(self.lhs_arity)
                .map(|t| t.expression().clone()),
        )
        .ok_or(EquationError::InvalidArity)?;

        let rhs = self.damping_block() + self.matter_block() + self.brane_block()?;
        info!("equation assembled from {} terms", self.lhs_arity);
        Ok(Equation::new(lhs, rhs))
    }

    /// exp(-phi) * (T_eff + d_mu phi * d_nu phi - 1/2 * G * V(phi))
    pub fn damping_block(&self) -> Expr {
        let bg = &self.background;
        let kinetic = bg.dilaton.clone().derivative(bg.index_mu.clone())
            * bg.dilaton.clone().derivative(bg.index_nu.clone());
        let potential = Expr::Const(1.0) / Expr::Const(2.0) * bg.metric.clone() * bg.potential.clone();
        (-bg.dilaton.clone()).exp() * (bg.effective_source.clone() + kinetic - potential)
    }

    /// 8 * pi * G_N * (T_matter + chi * Psi(mu) * Psi(nu))
    pub fn matter_block(&self) -> Expr {
        let bg = &self.background;
        Expr::Const(8.0)
            * Expr::var("pi")
            * bg.newton_constant.clone()
            * (bg.matter_source.clone() + bg.coupling.clone() * bg.outer_product())
    }

    /// kappa_11^2 * T_brane with the dimensional reduction applied
    pub fn brane_block(&self) -> Result<Expr, EquationError> {
        let bg = &self.background;
        let reduced = bg.brane_source.subs(&bg.reduction)?;
        Ok(bg.brane_coupling.clone() * reduced)
    }
}
