//! Ordered, append-only collection of annotated terms.
//!
//! Terms are never mutated or removed once registered. Each term carries a flag telling
//! the step explainer whether the cutoff curve should accompany it. `register` infers the
//! flag from the canonical text of the expression (marker substring, `"K"` by default);
//! `register_tagged` lets the caller decide.

use log::{debug, info};

use crate::errors::EquationError;
use crate::symbolic::symbolic_engine::Expr;

/// Marker substring associated with the non-perturbative cutoff `K`
pub const DEFAULT_CUTOFF_MARKER: &str = "K";

#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    expression: Expr,
    description: String,
    cutoff: bool,
}

impl Term {
    pub fn expression(&self) -> &Expr {
        &self.expression
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// whether the cutoff curve is drawn for this term
    pub fn has_cutoff(&self) -> bool {
        self.cutoff
    }
}

#[derive(Clone, Debug)]
pub struct TermRegistry {
    terms: Vec<Term>,
    marker: String,
}

impl Default for TermRegistry {
    fn default() -> Self {
        TermRegistry::new()
    }
}

impl TermRegistry {
    pub fn new() -> Self {
        TermRegistry {
            terms: Vec::new(),
            marker: DEFAULT_CUTOFF_MARKER.to_string(),
        }
    }

    /// Registry whose `register` flags terms containing `marker` in their text form.
    /// An empty marker would match nothing and is refused.
    pub fn with_marker(marker: &str) -> Result<Self, EquationError> {
        if marker.trim().is_empty() {
            return Err(EquationError::Config(
                "cutoff marker must not be empty".to_string(),
            ));
        }
        Ok(TermRegistry {
            terms: Vec::new(),
            marker: marker.to_string(),
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Appends a term; the cutoff flag is inferred from the marker substring.
    pub fn register(&mut self, expression: Expr, description: &str) -> Result<&Term, EquationError> {
        let cutoff = expression.to_string().contains(&self.marker);
        self.register_tagged(expression, description, cutoff)
    }

    /// Appends a term with an explicit cutoff flag.
    pub fn register_tagged(
        &mut self,
        expression: Expr,
        description: &str,
        cutoff: bool,
    ) -> Result<&Term, EquationError> {
        let index = self.terms.len();
        if description.trim().is_empty() {
            return Err(EquationError::EmptyDescription { index });
        }
        info!("term #{} registered: {}", index + 1, description);
        debug!("term #{} expression: {}, cutoff: {}", index + 1, expression, cutoff);
        self.terms.push(Term {
            expression,
            description: description.to_string(),
            cutoff,
        });
        Ok(&self.terms[index])
    }

    /// Read-only view in insertion order; call again to restart.
    pub fn terms(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<'a> IntoIterator for &'a TermRegistry {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms()
    }
}
