//! PNG output through plotters' bitmap backend.

use crate::error::ReportError;
use crate::render::{RenderConfig, Renderer};
use crate::report::{Artifact, Chart, HistogramGrid, LineChart};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FONT: &str = "sans-serif";

/// Writes `<out_dir>/<name>.png` per artifact.
#[derive(Debug, Clone)]
pub struct SaveRenderer {
    out_dir: PathBuf,
    config: RenderConfig,
}

impl SaveRenderer {
    pub fn new(out_dir: impl Into<PathBuf>, config: RenderConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            config,
        }
    }

    pub fn target(&self, artifact: &Artifact) -> PathBuf {
        self.out_dir.join(artifact.file_name())
    }
}

impl Renderer for SaveRenderer {
    fn render(&mut self, artifact: &Artifact) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(&self.out_dir)
            .map_err(|e| ReportError::render(artifact.file_name(), e))?;
        let path = self.target(artifact);
        draw_png(&path, self.config, artifact)?;
        info!("saved {}", path.display());
        Ok(path)
    }
}

/// Draw one artifact into a PNG file at `path`.
pub fn draw_png(path: &Path, config: RenderConfig, artifact: &Artifact) -> Result<(), ReportError> {
    debug!(
        "drawing '{}' into {} ({}x{})",
        artifact.chart.title(),
        path.display(),
        config.width,
        config.height
    );
    draw(path, config, &artifact.chart).map_err(|e| ReportError::render(artifact.file_name(), e))
}

fn draw(path: &Path, config: RenderConfig, chart: &Chart) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;
    match chart {
        Chart::Line(line) => draw_line(&root, line)?,
        Chart::Histogram(grid) => draw_histogram_grid(&root, grid)?,
    }
    root.present()?;
    Ok(())
}

fn draw_line(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    line: &LineChart,
) -> Result<(), Box<dyn Error>> {
    let (x0, x1) = line.x_range();
    let (y0, y1) = line.y_range();
    let pad = (y1 - y0) * 0.05;

    let mut chart = ChartBuilder::on(root)
        .caption(&line.title, (FONT, 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(90)
        .build_cartesian_2d(x0..x1, (y0 - pad)..(y1 + pad))?;

    chart
        .configure_mesh()
        .x_desc(line.x_label.as_str())
        .y_desc(line.y_label.as_str())
        .draw()?;

    for (idx, series) in line.series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(series.name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Near-square grid, one small histogram per column.
fn draw_histogram_grid(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    grid: &HistogramGrid,
) -> Result<(), Box<dyn Error>> {
    let titled = root.titled(&grid.title, (FONT, 28))?;

    let cols = ((grid.panels.len() as f64).sqrt().ceil() as usize).max(1);
    let rows = grid.panels.len().div_ceil(cols).max(1);

    for (area, panel) in titled.split_evenly((rows, cols)).iter().zip(&grid.panels) {
        let lo = panel.bins.first().map_or(0.0, |b| b.lower);
        let hi = panel.bins.last().map_or(1.0, |b| b.upper);
        let top = panel.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.column, (FONT, 16))
            .margin(6)
            .x_label_area_size(24)
            .y_label_area_size(40)
            .build_cartesian_2d(lo..hi, 0.0..top * 1.05)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(4)
            .y_labels(4)
            .label_style((FONT, 10))
            .draw()?;

        chart.draw_series(panel.bins.iter().map(|b| {
            Rectangle::new(
                [(b.lower, 0.0), (b.upper, b.count as f64)],
                BLUE.mix(0.6).filled(),
            )
        }))?;
    }
    Ok(())
}
