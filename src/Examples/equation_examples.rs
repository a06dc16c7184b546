#![allow(non_snake_case)]

use crate::Utils::config::EquationConfig;
use crate::Utils::plots::{BitmapPlotter, CutoffVisualizer, PlotSurface};
use crate::equation::background::Background;
use crate::equation::equation_assembler::{Equation, EquationAssembler};
use crate::equation::render_surface::RenderSurface;
use crate::equation::step_explainer::{ExplainReport, StepExplainer};
use crate::equation::term_registry::TermRegistry;
use crate::errors::EquationError;
use crate::symbolic::symbolic_engine::Expr;

/// The five ANOROC-string terms: cutoff-regularised gravity, curvature coupling, string
/// correction from compact dimensions, 1-loop quantum correction and 8D gravity.
pub fn anoroc_registry(marker: &str) -> Result<TermRegistry, EquationError> {
    let idx = ["mu", "nu"];
    let G = Expr::tensor("G", None, &idx);
    let H = Expr::tensor("H", None, &idx);
    let V = Expr::tensor("V", Some("string"), &idx);
    let Q = Expr::tensor("Q", None, &idx);
    let K = Expr::var("K");
    let K_tot = Expr::var("K_tot");
    let R = Expr::var("R");
    let g_z = Expr::var("g_z");
    let l_5 = Expr::var("l_5");
    let hbar = Expr::var("hbar'");

    let mut registry = TermRegistry::with_marker(marker)?;
    registry.register(
        (Expr::Const(1.0) - (-(K / K_tot)).exp()) * G,
        "Non-perturbative cutoff to regularize gravity at Planck scales",
    )?;
    registry.register(R * H.clone(), "Curvature coupling term for modified gravity effects")?;
    registry.register(
        g_z.pow(Expr::Const(2.0)) * l_5.pow(Expr::Const(2.0)) * V,
        "String theory correction from compactified dimensions",
    )?;
    registry.register(hbar * Q, "Quantum corrections from 1-loop effects")?;
    registry.register(
        Expr::tensor("G", Some("8"), &["AB"])
            * Expr::func_sup("g", Expr::var("AB"), vec![Expr::Const(4.0)])
            + H,
        "Higher-dimensional (8D) gravity terms projected to 4D",
    )?;
    Ok(registry)
}

/// Builds the ANOROC equation, shows it and explains it step by step
pub fn anoroc_walkthrough(
    config: &EquationConfig,
    render: &mut dyn RenderSurface,
    plot: &mut dyn PlotSurface,
) -> Result<(Equation, ExplainReport), EquationError> {
    let registry = anoroc_registry(&config.assembler.marker)?;
    let assembler = EquationAssembler::new(
        Background::from_config(&config.background),
        config.assembler.lhs_arity,
    );
    let equation = assembler.assemble(&registry)?;
    let visualizer = CutoffVisualizer::new(config.plot.cutoff_settings());
    let mut explainer = StepExplainer::new(render, plot, visualizer).with_title(&config.title);
    explainer.present_equation(&equation)?;
    let report = explainer.explain(&registry)?;
    Ok((equation, report))
}

/// PNG plotter configured from the `[plot]` section
pub fn bitmap_plotter(config: &EquationConfig) -> BitmapPlotter {
    BitmapPlotter::new(
        &config.plot.output_dir,
        (config.plot.width, config.plot.height),
        config.plot.export_csv,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utils::config::ReplacementConfig;
    use crate::Utils::plots::RecordingPlotter;
    use crate::equation::render_surface::RecordingSurface;

    #[test]
    fn test_anoroc_terms_text_forms() {
        let registry = anoroc_registry("K").unwrap();
        let texts: Vec<String> = registry.terms().map(|t| t.expression().to_string()).collect();
        assert_eq!(
            texts,
            vec![
                "((1 - exp((-1 * (K / K_tot)))) * G(mu, nu))",
                "(R * H(mu, nu))",
                "(((g_z ^ 2) * (l_5 ^ 2)) * V^(string)(mu, nu))",
                "(hbar' * Q(mu, nu))",
                "((G^(8)(AB) * g^(AB)(4)) + H(mu, nu))",
            ]
        );
    }

    #[test]
    fn test_walkthrough_with_defaults() {
        let config = EquationConfig::default();
        let mut render = RecordingSurface::new();
        let mut plot = RecordingPlotter::new();
        let (equation, report) = anoroc_walkthrough(&config, &mut render, &mut plot).unwrap();
        assert_eq!(report.steps.len(), 5);
        assert_eq!(report.plots(), 1);
        assert!(equation.lhs().contains_variable("K_tot"));
        assert!(equation.rhs().contains_variable("G_N"));
    }

    #[test]
    fn test_walkthrough_stops_on_label_replacement() {
        let mut config = EquationConfig::default();
        config.background.reduction.replacement = ReplacementConfig::Label("reduction".to_string());
        let mut render = RecordingSurface::new();
        let mut plot = RecordingPlotter::new();
        let err = anoroc_walkthrough(&config, &mut render, &mut plot).unwrap_err();
        assert!(matches!(err, EquationError::MalformedSubstitution { .. }));
        assert!(render.items.is_empty());
    }

    #[test]
    fn test_walkthrough_refuses_empty_marker() {
        let mut config = EquationConfig::default();
        config.assembler.marker = String::new();
        let mut render = RecordingSurface::new();
        let mut plot = RecordingPlotter::new();
        let err = anoroc_walkthrough(&config, &mut render, &mut plot).unwrap_err();
        assert!(matches!(err, EquationError::Config(_)));
        assert!(plot.plots.is_empty());
    }
}
