//! Where explanatory text and expressions are pushed to.
//!
//! `MarkdownSurface` writes Markdown with `$$ ... $$` LaTeX blocks to any writer (stdout
//! in the demo binary). `RecordingSurface` keeps everything in memory.

use std::io::Write;

use crate::equation::equation_assembler::Equation;
use crate::errors::EquationError;
use crate::symbolic::symbolic_engine::Expr;

pub trait RenderSurface {
    fn render_text(&mut self, text: &str) -> Result<(), EquationError>;

    fn render_expr(&mut self, expr: &Expr) -> Result<(), EquationError>;

    fn render_equation(&mut self, equation: &Equation) -> Result<(), EquationError>;
}

pub struct MarkdownSurface<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownSurface<W> {
    pub fn new(writer: W) -> Self {
        MarkdownSurface { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn math_block(&mut self, latex: &str) -> Result<(), EquationError> {
        writeln!(self.writer, "$$\n{}\n$$\n", latex)?;
        Ok(())
    }
}

impl MarkdownSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        MarkdownSurface::new(std::io::stdout())
    }
}

impl<W: Write> RenderSurface for MarkdownSurface<W> {
    fn render_text(&mut self, text: &str) -> Result<(), EquationError> {
        writeln!(self.writer, "{}\n", text)?;
        Ok(())
    }

    fn render_expr(&mut self, expr: &Expr) -> Result<(), EquationError> {
        self.math_block(&expr.to_latex())
    }

    fn render_equation(&mut self, equation: &Equation) -> Result<(), EquationError> {
        self.math_block(&equation.to_latex())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// One rendered item
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered {
    Text(String),
    Expr(Expr),
    Equation(Equation),
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub items: Vec<Rendered>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Rendered::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn exprs(&self) -> Vec<&Expr> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Rendered::Expr(expr) => Some(expr),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn render_text(&mut self, text: &str) -> Result<(), EquationError> {
        self.items.push(Rendered::Text(text.to_string()));
        Ok(())
    }

    fn render_expr(&mut self, expr: &Expr) -> Result<(), EquationError> {
        self.items.push(Rendered::Expr(expr.clone()));
        Ok(())
    }

    fn render_equation(&mut self, equation: &Equation) -> Result<(), EquationError> {
        self.items.push(Rendered::Equation(equation.clone()));
        Ok(())
    }
}
