//! Fixed background expressions of the right-hand side.
//!
//! They are not contributed by the caller: the assembler receives them as an explicit
//! configuration object. `Background::default()` is the dilaton/string background
//! (effective, matter and brane stress-energy with their couplings).

use crate::Utils::config::{BackgroundConfig, ReplacementConfig};
use crate::symbolic::symbolic_engine::{Expr, Replacement, Substitution};

#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    /// dilaton field phi()
    pub dilaton: Expr,
    /// first and second free index symbols
    pub index_mu: Expr,
    pub index_nu: Expr,
    /// T^(eff)_{mu nu}
    pub effective_source: Expr,
    /// G_{mu nu}
    pub metric: Expr,
    /// V(phi)
    pub potential: Expr,
    /// G_N
    pub newton_constant: Expr,
    /// T^(matter)_{mu nu}
    pub matter_source: Expr,
    /// chi
    pub coupling: Expr,
    /// name of the field whose outer product corrects the matter source
    pub outer_field: String,
    /// kappa_11^2
    pub brane_coupling: Expr,
    /// T^(brane)_{mu nu}
    pub brane_source: Expr,
    /// dimensional reduction applied to the brane source
    pub reduction: Substitution,
}

impl Default for Background {
    fn default() -> Self {
        Background::from_config(&BackgroundConfig::default())
    }
}

impl Background {
    pub fn from_config(config: &BackgroundConfig) -> Self {
        let mu = config.indices.0.as_str();
        let nu = config.indices.1.as_str();
        let dilaton = Expr::func(&config.dilaton, vec![]);
        let replacement = match &config.reduction.replacement {
            ReplacementConfig::Symbol(name) => Replacement::Expr(Expr::var(name)),
            ReplacementConfig::Constant(value) => Replacement::Expr(Expr::Const(*value)),
            ReplacementConfig::Label(label) => Replacement::Label(label.clone()),
        };
        Background {
            index_mu: Expr::var(mu),
            index_nu: Expr::var(nu),
            effective_source: Expr::tensor("T", Some("eff"), &[mu, nu]),
            metric: Expr::tensor("G", None, &[mu, nu]),
            potential: Expr::func("V", vec![dilaton.clone()]),
            dilaton,
            newton_constant: Expr::var(&config.newton_constant),
            matter_source: Expr::tensor("T", Some("matter"), &[mu, nu]),
            coupling: Expr::var(&config.coupling),
            outer_field: config.outer_field.clone(),
            brane_coupling: Expr::var(&config.brane_coupling)
                .pow(Expr::Const(config.brane_coupling_power)),
            brane_source: Expr::tensor("T", Some("brane"), &[mu, nu]),
            reduction: Substitution::new(&config.reduction.target, replacement),
        }
    }

    /// Psi(mu) * Psi(nu)
    pub fn outer_product(&self) -> Expr {
        Expr::func(&self.outer_field, vec![self.index_mu.clone()])
            * Expr::func(&self.outer_field, vec![self.index_nu.clone()])
    }
}
