//! Cutoff factor plots.
//!
//! `CutoffVisualizer` samples `f(x) = 1 - e^{-x}` on an evenly spaced grid of the ratio
//! `x = K/K_tot` and hands a `LinePlot` to a `PlotSurface`. `BitmapPlotter` draws PNG
//! files with plotters (and can dump the samples to csv), `RecordingPlotter` keeps the
//! plots in memory.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::info;
use plotters::prelude::*;

use crate::errors::EquationError;
use crate::symbolic::utils::linspace;

/// A single labelled line chart
#[derive(Clone, Debug, PartialEq)]
pub struct LinePlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
    pub grid: bool,
}

pub trait PlotSurface {
    fn plot_line(&mut self, plot: &LinePlot) -> Result<(), EquationError>;
}

/// sampling domain of the cutoff curve
#[derive(Clone, Debug, PartialEq)]
pub struct CutoffSettings {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for CutoffSettings {
    fn default() -> Self {
        CutoffSettings {
            start: 0.0,
            end: 5.0,
            samples: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CutoffCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct CutoffVisualizer {
    settings: CutoffSettings,
}

impl CutoffVisualizer {
    pub fn new(settings: CutoffSettings) -> Self {
        CutoffVisualizer { settings }
    }

    pub fn settings(&self) -> &CutoffSettings {
        &self.settings
    }

    /// 1 - e^{-x} on the configured grid
    pub fn samples(&self) -> Result<CutoffCurve, EquationError> {
        let CutoffSettings {
            start,
            end,
            samples,
        } = self.settings;
        if samples < 2 || !(end > start) || !start.is_finite() || !end.is_finite() {
            return Err(EquationError::InvalidPlotDomain {
                start,
                end,
                samples,
            });
        }
        let x = linspace(start, end, samples);
        let y = x.iter().map(|&k| 1.0 - (-k).exp()).collect();
        Ok(CutoffCurve { x, y })
    }

    pub fn render_cutoff_curve(&self, surface: &mut dyn PlotSurface) -> Result<(), EquationError> {
        let curve = self.samples()?;
        let plot = LinePlot {
            x: curve.x,
            y: curve.y,
            title: "Non-Perturbative Cutoff Behavior".to_string(),
            x_label: "K/K_tot".to_string(),
            y_label: "Cutoff Factor".to_string(),
            legend: "(1 - e^{-K/K_tot})".to_string(),
            grid: true,
        };
        surface.plot_line(&plot)
    }
}

/// Renders each plot into `<output_dir>/cutoff_<n>.png`
pub struct BitmapPlotter {
    output_dir: PathBuf,
    size: (u32, u32),
    export_csv: bool,
    counter: usize,
    written: Vec<PathBuf>,
}

impl BitmapPlotter {
    pub fn new(output_dir: &Path, size: (u32, u32), export_csv: bool) -> Self {
        BitmapPlotter {
            output_dir: output_dir.to_path_buf(),
            size,
            export_csv,
            counter: 0,
            written: Vec::new(),
        }
    }

    /// files produced so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn draw_png(&self, plot: &LinePlot, filename: &Path) -> Result<(), EquationError> {
        let plot_err = |e: &dyn std::fmt::Display| EquationError::Plot(e.to_string());
        let x_min = plot.x.iter().cloned().fold(f64::INFINITY, f64::min);
        let x_max = plot.x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let y_min = plot.y.iter().cloned().fold(f64::INFINITY, f64::min);
        let mut y_max = plot.y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }
        let pad = 0.05 * (y_max - y_min);

        let root_area = BitMapBackend::new(filename, self.size).into_drawing_area();
        root_area.fill(&WHITE).map_err(|e| plot_err(&e))?;

        let mut chart = ChartBuilder::on(&root_area)
            .caption(&plot.title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, (y_min - pad)..(y_max + pad))
            .map_err(|e| plot_err(&e))?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(plot.x_label.as_str()).y_desc(plot.y_label.as_str());
        if !plot.grid {
            mesh.disable_x_mesh().disable_y_mesh();
        }
        mesh.draw().map_err(|e| plot_err(&e))?;

        let series: Vec<(f64, f64)> = plot.x.iter().cloned().zip(plot.y.iter().cloned()).collect();
        chart
            .draw_series(LineSeries::new(series, &BLUE))
            .map_err(|e| plot_err(&e))?
            .label(plot.legend.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| plot_err(&e))?;
        root_area.present().map_err(|e| plot_err(&e))?;
        Ok(())
    }
}

impl PlotSurface for BitmapPlotter {
    fn plot_line(&mut self, plot: &LinePlot) -> Result<(), EquationError> {
        std::fs::create_dir_all(&self.output_dir)?;
        self.counter += 1;
        let png = self.output_dir.join(format!("cutoff_{}.png", self.counter));
        self.draw_png(plot, &png)?;
        info!("cutoff plot saved to {}", png.display());
        self.written.push(png);
        if self.export_csv {
            let csv_path = self.output_dir.join(format!("cutoff_{}.csv", self.counter));
            save_plot_to_csv(plot, &csv_path)?;
            self.written.push(csv_path);
        }
        Ok(())
    }
}

/// Writes the samples of a plot as two labelled columns
pub fn save_plot_to_csv(plot: &LinePlot, filename: &Path) -> Result<(), EquationError> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record([plot.x_label.as_str(), plot.y_label.as_str()])?;
    for (x, y) in plot.x.iter().zip(plot.y.iter()) {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Clone, Debug, Default)]
pub struct RecordingPlotter {
    pub plots: Vec<LinePlot>,
}

impl RecordingPlotter {
    pub fn new() -> Self {
        RecordingPlotter::default()
    }
}

impl PlotSurface for RecordingPlotter {
    fn plot_line(&mut self, plot: &LinePlot) -> Result<(), EquationError> {
        self.plots.push(plot.clone());
        Ok(())
    }
}
