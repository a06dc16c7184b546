//! Step-by-step walk through the registered terms.
//!
//! Every term is visited once, in insertion order: a heading with its ordinal and
//! description, the rendered expression, and the cutoff curve when the term is flagged.
//! Failures of the surfaces are returned as they are.

use log::{debug, info};

use crate::Utils::plots::{CutoffVisualizer, PlotSurface};
use crate::equation::equation_assembler::Equation;
use crate::equation::render_surface::RenderSurface;
use crate::equation::term_registry::TermRegistry;
use crate::errors::EquationError;

pub const DEFAULT_TITLE: &str = "ANOROC-String Equation Generation";

/// What happened at one step
#[derive(Clone, Debug, PartialEq)]
pub struct ExplainedStep {
    pub ordinal: usize,
    pub description: String,
    pub plotted: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExplainReport {
    pub steps: Vec<ExplainedStep>,
}

impl ExplainReport {
    pub fn plots(&self) -> usize {
        self.steps.iter().filter(|s| s.plotted).count()
    }
}

pub struct StepExplainer<'a> {
    render: &'a mut dyn RenderSurface,
    plot: &'a mut dyn PlotSurface,
    visualizer: CutoffVisualizer,
    title: String,
}

impl<'a> StepExplainer<'a> {
    pub fn new(
        render: &'a mut dyn RenderSurface,
        plot: &'a mut dyn PlotSurface,
        visualizer: CutoffVisualizer,
    ) -> Self {
        StepExplainer {
            render,
            plot,
            visualizer,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// "ANOROC-String Equation Generation" -> "ANOROC-String"
    fn title_stem(&self) -> &str {
        self.title
            .strip_suffix(" Equation Generation")
            .unwrap_or(&self.title)
    }

    /// Heading followed by the assembled equation
    pub fn present_equation(&mut self, equation: &Equation) -> Result<(), EquationError> {
        let heading = format!("## Final {} Equation", self.title_stem());
        self.render.render_text(&heading)?;
        self.render.render_equation(equation)
    }

    pub fn explain(&mut self, registry: &TermRegistry) -> Result<ExplainReport, EquationError> {
        self.render.render_text(&format!("## {}", self.title))?;
        let mut report = ExplainReport::default();
        for (i, term) in registry.terms().enumerate() {
            let ordinal = i + 1;
            debug!("explaining step {}: {}", ordinal, term.description());
            self.render
                .render_text(&format!("### Step {}: {}", ordinal, term.description()))?;
            self.render.render_text("**Term added:**")?;
            self.render.render_expr(term.expression())?;
            if term.has_cutoff() {
                self.visualizer.render_cutoff_curve(&mut *self.plot)?;
            }
            report.steps.push(ExplainedStep {
                ordinal,
                description: term.description().to_string(),
                plotted: term.has_cutoff(),
            });
        }
        info!(
            "explained {} steps, {} cutoff plot(s)",
            report.steps.len(),
            report.plots()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utils::plots::{LinePlot, RecordingPlotter};
    use crate::equation::render_surface::{MarkdownSurface, RecordingSurface, Rendered};
    use crate::symbolic::symbolic_engine::Expr;
    use std::io::{self, Write};

    struct FailingPlotter;

    /// reports a closed pipe as soon as a chunk containing `fail_on` arrives
    struct ClosingWriter {
        written: Vec<u8>,
        fail_on: &'static str,
    }

    impl Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if String::from_utf8_lossy(buf).contains(self.fail_on) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl PlotSurface for FailingPlotter {
        fn plot_line(&mut self, _plot: &LinePlot) -> Result<(), EquationError> {
            Err(EquationError::Plot("backend unavailable".to_string()))
        }
    }

    #[test]
    fn test_explain_emits_heading_description_and_term_per_step() {
        let mut registry = TermRegistry::new();
        registry.register(Expr::var("a"), "A").unwrap();
        registry.register(Expr::var("b"), "B").unwrap();
        let mut render = RecordingSurface::new();
        let mut plot = RecordingPlotter::new();
        let report = StepExplainer::new(&mut render, &mut plot, CutoffVisualizer::default())
            .explain(&registry)
            .unwrap();
        assert_eq!(
            render.items,
            vec![
                Rendered::Text("## ANOROC-String Equation Generation".to_string()),
                Rendered::Text("### Step 1: A".to_string()),
                Rendered::Text("**Term added:**".to_string()),
                Rendered::Expr(Expr::var("a")),
                Rendered::Text("### Step 2: B".to_string()),
                Rendered::Text("**Term added:**".to_string()),
                Rendered::Expr(Expr::var("b")),
            ]
        );
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.plots(), 0);
        assert!(plot.plots.is_empty());
    }

    #[test]
    fn test_visualizer_runs_once_per_flagged_term() {
        let mut registry = TermRegistry::new();
        registry.register(Expr::var("K"), "cutoff one").unwrap();
        registry.register(Expr::var("x"), "plain").unwrap();
        registry.register(Expr::var("K_tot"), "cutoff two").unwrap();
        let mut render = RecordingSurface::new();
        let mut plot = RecordingPlotter::new();
        let report = StepExplainer::new(&mut render, &mut plot, CutoffVisualizer::default())
            .explain(&registry)
            .unwrap();
        let flags: Vec<bool> = report.steps.iter().map(|s| s.plotted).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(plot.plots.len(), 2);
    }

    #[test]
    fn test_plot_failure_propagates() {
        let mut registry = TermRegistry::new();
        registry.register(Expr::var("K"), "cutoff").unwrap();
        registry.register(Expr::var("x"), "never reached").unwrap();
        let mut render = RecordingSurface::new();
        let mut plot = FailingPlotter;
        let err = StepExplainer::new(&mut render, &mut plot, CutoffVisualizer::default())
            .explain(&registry)
            .unwrap_err();
        assert!(matches!(err, EquationError::Plot(_)));
        assert!(!render.texts().contains(&"### Step 2: never reached"));
    }

    #[test]
    fn test_render_failure_propagates_and_stops_the_walk() {
        let mut registry = TermRegistry::new();
        registry.register(Expr::var("a"), "first").unwrap();
        registry.register(Expr::var("b"), "second").unwrap();
        let mut out = MarkdownSurface::new(ClosingWriter {
            written: Vec::new(),
            fail_on: "",
        });
        let mut plot = RecordingPlotter::new();
        let err = StepExplainer::new(&mut out, &mut plot, CutoffVisualizer::default())
            .explain(&registry)
            .unwrap_err();
        match err {
            EquationError::Render(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(out.into_inner().written.is_empty());
        assert!(plot.plots.is_empty());
    }

    #[test]
    fn test_render_failure_mid_walk_emits_no_later_step() {
        let mut registry = TermRegistry::new();
        registry.register(Expr::var("a"), "first").unwrap();
        registry.register(Expr::var("b"), "second").unwrap();
        let mut out = MarkdownSurface::new(ClosingWriter {
            written: Vec::new(),
            fail_on: "**Term added:**",
        });
        let mut plot = RecordingPlotter::new();
        let result = StepExplainer::new(&mut out, &mut plot, CutoffVisualizer::default())
            .explain(&registry);
        assert!(matches!(result, Err(EquationError::Render(_))));
        let text = String::from_utf8(out.into_inner().written).unwrap();
        assert!(text.contains("### Step 1: first"));
        assert!(!text.contains("### Step 2: second"));
    }

    #[test]
    fn test_present_equation_uses_title_stem() {
        let mut render = RecordingSurface::new();
        let mut plot = RecordingPlotter::new();
        let equation = Equation::new(Expr::var("a"), Expr::var("b"));
        StepExplainer::new(&mut render, &mut plot, CutoffVisualizer::default())
            .present_equation(&equation)
            .unwrap();
        assert_eq!(
            render.items,
            vec![
                Rendered::Text("## Final ANOROC-String Equation".to_string()),
                Rendered::Equation(equation),
            ]
        );
    }
}
