use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use RustedEqGen::Examples::equation_examples::anoroc_registry;
use RustedEqGen::Utils::plots::{CutoffVisualizer, RecordingPlotter};
use RustedEqGen::equation::equation_assembler::EquationAssembler;
use RustedEqGen::equation::render_surface::RecordingSurface;
use RustedEqGen::equation::step_explainer::StepExplainer;
use RustedEqGen::equation::term_registry::TermRegistry;
use RustedEqGen::symbolic::symbolic_engine::Expr;

fn large_registry(n: usize) -> TermRegistry {
    let mut registry = TermRegistry::new();
    for i in 0..n {
        let expr = Expr::var(&format!("c_{}", i)) * Expr::tensor("H", None, &["mu", "nu"]);
        registry
            .register(expr, &format!("term {}", i))
            .expect("non-empty description");
    }
    registry
}

fn bench_assemble_anoroc(c: &mut Criterion) {
    let registry = anoroc_registry("K").expect("example registry");
    let assembler = EquationAssembler::default();
    c.bench_function("assemble ANOROC", |b| {
        b.iter(|| assembler.assemble(black_box(&registry)))
    });
}

fn bench_explain_large_registry(c: &mut Criterion) {
    let registry = large_registry(1000);
    c.bench_function("explain 1000 terms", |b| {
        b.iter(|| {
            let mut render = RecordingSurface::new();
            let mut plot = RecordingPlotter::new();
            StepExplainer::new(&mut render, &mut plot, CutoffVisualizer::default())
                .explain(black_box(&registry))
        })
    });
}

fn bench_latex_equation(c: &mut Criterion) {
    let registry = anoroc_registry("K").expect("example registry");
    let equation = EquationAssembler::default()
        .assemble(&registry)
        .expect("five terms registered");
    c.bench_function("latex ANOROC equation", |b| {
        b.iter(|| black_box(&equation).to_latex())
    });
}

criterion_group!(
    benches,
    bench_assemble_anoroc,
    bench_explain_large_registry,
    bench_latex_equation
);
criterion_main!(benches);
