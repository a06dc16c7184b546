//! Error type shared by registration, assembly, explanation and plotting.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EquationError {
    /// a term was registered without an explanatory text
    #[error("term #{index} has an empty description")]
    EmptyDescription { index: usize },

    #[error("left-hand side needs {required} terms, registry holds {found}")]
    InsufficientTerms { required: usize, found: usize },

    #[error("left-hand side arity must be at least 1")]
    InvalidArity,

    /// the replacement of a substitution is a bare label, not an expression
    #[error("cannot substitute '{target}' with label '{replacement}': replacement must be an expression")]
    MalformedSubstitution { target: String, replacement: String },

    #[error("invalid plot domain [{start}, {end}] with {samples} samples")]
    InvalidPlotDomain { start: f64, end: f64, samples: usize },

    #[error("rendering failed: {0}")]
    Render(#[from] std::io::Error),

    #[error("plotting failed: {0}")]
    Plot(String),

    #[error("sample export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
