#![allow(non_snake_case)]
use std::path::Path;
use std::process;

use log::{error, info};

use RustedEqGen::Examples::equation_examples::{anoroc_walkthrough, bitmap_plotter};
use RustedEqGen::Utils::config::EquationConfig;
use RustedEqGen::Utils::logger::init_logger;
use RustedEqGen::equation::render_surface::MarkdownSurface;
use RustedEqGen::errors::EquationError;

const CONFIG_FILE: &str = "equation_config.toml";

fn run() -> Result<(), EquationError> {
    let config = EquationConfig::load_or_default(Path::new(CONFIG_FILE))?;
    init_logger(config.loglevel.as_deref(), config.log_to_file)?;
    let mut render = MarkdownSurface::stdout();
    let mut plotter = bitmap_plotter(&config);
    let (equation, report) = anoroc_walkthrough(&config, &mut render, &mut plotter)?;
    info!("final equation: {}", equation);
    info!(
        "{} steps explained, plots written: {:?}",
        report.steps.len(),
        plotter.written()
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
