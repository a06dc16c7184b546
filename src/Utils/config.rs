//! Settings of an equation generation run, read from a TOML document.
//!
//! Every section and key is optional; missing values fall back to the defaults of the
//! dilaton/string background, an lhs arity of 5, the `K` cutoff marker and a 100-sample
//! cutoff curve on [0, 5].
//!
//! ```toml
//! loglevel = "info"
//! [assembler]
//! lhs_arity = 5
//! [background.reduction]
//! target = "4D"
//! replacement = { symbol = "4D" }
//! [plot]
//! samples = 200
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::Utils::plots::CutoffSettings;
use crate::equation::equation_assembler::DEFAULT_LHS_ARITY;
use crate::equation::step_explainer::DEFAULT_TITLE;
use crate::equation::term_registry::DEFAULT_CUTOFF_MARKER;
use crate::errors::EquationError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EquationConfig {
    /// debug, info, warn, error, off or none
    pub loglevel: Option<String>,
    pub log_to_file: bool,
    pub title: String,
    pub assembler: AssemblerConfig,
    pub background: BackgroundConfig,
    pub plot: PlotConfig,
}

impl Default for EquationConfig {
    fn default() -> Self {
        EquationConfig {
            loglevel: Some("info".to_string()),
            log_to_file: false,
            title: DEFAULT_TITLE.to_string(),
            assembler: AssemblerConfig::default(),
            background: BackgroundConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    pub lhs_arity: usize,
    pub marker: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        AssemblerConfig {
            lhs_arity: DEFAULT_LHS_ARITY,
            marker: DEFAULT_CUTOFF_MARKER.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub dilaton: String,
    pub indices: (String, String),
    pub newton_constant: String,
    pub coupling: String,
    pub outer_field: String,
    pub brane_coupling: String,
    pub brane_coupling_power: f64,
    pub reduction: ReductionConfig,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            dilaton: "phi".to_string(),
            indices: ("mu".to_string(), "nu".to_string()),
            newton_constant: "G_N".to_string(),
            coupling: "chi".to_string(),
            outer_field: "Psi".to_string(),
            brane_coupling: "kappa_11".to_string(),
            brane_coupling_power: 2.0,
            reduction: ReductionConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    pub target: String,
    pub replacement: ReplacementConfig,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        ReductionConfig {
            target: "4D".to_string(),
            replacement: ReplacementConfig::Symbol("4D".to_string()),
        }
    }
}

/// `{ symbol = "x" }`, `{ constant = 1.0 }` or `{ label = "reduction" }`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementConfig {
    Symbol(String),
    Constant(f64),
    Label(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
    pub width: u32,
    pub height: u32,
    pub output_dir: PathBuf,
    pub export_csv: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            start: 0.0,
            end: 5.0,
            samples: 100,
            width: 800,
            height: 400,
            output_dir: PathBuf::from("plots"),
            export_csv: false,
        }
    }
}

impl PlotConfig {
    pub fn cutoff_settings(&self) -> CutoffSettings {
        CutoffSettings {
            start: self.start,
            end: self.end,
            samples: self.samples,
        }
    }
}

impl EquationConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, EquationError> {
        let config: EquationConfig =
            toml::from_str(input).map_err(|e| EquationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make a run silently do nothing
    pub fn validate(&self) -> Result<(), EquationError> {
        if self.assembler.marker.trim().is_empty() {
            return Err(EquationError::Config(
                "assembler.marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, EquationError> {
        let content = fs::read_to_string(path)
            .map_err(|e| EquationError::Config(format!("{}: {}", path.display(), e)))?;
        let config = EquationConfig::from_toml_str(&content)?;
        info!("configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Reads `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, EquationError> {
        if path.exists() {
            EquationConfig::from_file(path)
        } else {
            Ok(EquationConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = EquationConfig::from_toml_str("").unwrap();
        assert_eq!(config, EquationConfig::default());
        assert_eq!(config.assembler.lhs_arity, 5);
        assert_eq!(config.assembler.marker, "K");
        assert_eq!(config.plot.cutoff_settings(), CutoffSettings::default());
    }

    #[test]
    fn test_partial_document_overrides() {
        let input = r#"
loglevel = "warn"
title = "Toy Equation Generation"

[assembler]
lhs_arity = 3

[background]
indices = ["alpha", "beta"]

[background.reduction]
target = "4D"
replacement = { label = "reduction" }

[plot]
samples = 50
export_csv = true
"#;
        let config = EquationConfig::from_toml_str(input).unwrap();
        assert_eq!(config.loglevel.as_deref(), Some("warn"));
        assert_eq!(config.title, "Toy Equation Generation");
        assert_eq!(config.assembler.lhs_arity, 3);
        assert_eq!(config.assembler.marker, "K");
        assert_eq!(
            config.background.indices,
            ("alpha".to_string(), "beta".to_string())
        );
        assert_eq!(config.background.newton_constant, "G_N");
        assert_eq!(
            config.background.reduction.replacement,
            ReplacementConfig::Label("reduction".to_string())
        );
        assert_eq!(config.plot.samples, 50);
        assert!(config.plot.export_csv);
        assert_eq!(config.plot.end, 5.0);
    }

    #[test]
    fn test_replacement_variants() {
        let config = EquationConfig::from_toml_str(
            "[background.reduction]\nreplacement = { constant = 4.0 }\n",
        )
        .unwrap();
        assert_eq!(
            config.background.reduction.replacement,
            ReplacementConfig::Constant(4.0)
        );
        assert_eq!(config.background.reduction.target, "4D");
    }

    #[test]
    fn test_malformed_document_is_config_error() {
        let err = EquationConfig::from_toml_str("[assembler]\nlhs_arity = \"five\"\n").unwrap_err();
        assert!(matches!(err, EquationError::Config(_)));
    }

    #[test]
    fn test_empty_marker_is_config_error() {
        let err = EquationConfig::from_toml_str("[assembler]\nmarker = \"\"\n").unwrap_err();
        assert!(matches!(err, EquationError::Config(_)));
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("equation_config.toml");
        let missing = EquationConfig::load_or_default(&path).unwrap();
        assert_eq!(missing, EquationConfig::default());

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[assembler]\nmarker = \"R\"").unwrap();
        let loaded = EquationConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.assembler.marker, "R");
    }
}
