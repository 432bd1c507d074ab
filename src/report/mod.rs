//! Report planning: turn loaded tables into named charts, then hand them
//! to a renderer.
//!
//! Pipeline per invocation:
//! 1) load every input file in order (first failure aborts),
//! 2) check the columns the kind needs on every table,
//! 3) plan the artifacts,
//! 4) render them one by one. Files written before a render failure stay.

pub mod chart;
pub mod derive;
pub mod kind;
pub mod manifest;

pub use chart::{Artifact, Chart, HistogramGrid, HistogramPanel, LineChart, Series};
pub use kind::{OutputMode, ReportKind, ReportRequest, usage};

use crate::error::ReportError;
use crate::render::Renderer;
use crate::table::{SampleTable, load_table, parse::TIMESTAMP};

use std::path::PathBuf;
use tracing::{info, warn};

pub const CPU_COLUMNS: [&str; 4] = [TIMESTAMP, "user", "system", "total"];
const CPU_SERIES: [&str; 3] = ["user", "system", "total"];

pub const GC_COLUMNS: [&str; 7] = [
    TIMESTAMP,
    "gcId",
    "elapsedMs",
    "cpuUsedMs",
    "totalPause",
    "longestPause",
    "heapUsedAfter",
];

pub const HEAP_COLUMNS: [&str; 4] = [TIMESTAMP, "duration", "used", "committed"];

/// One overlay chart: the same column from every table on one axis.
#[derive(Debug, Clone, Copy)]
pub struct OverlayMetric {
    pub column: &'static str,
    pub suffix: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    /// Plot the per-table running total instead of the raw values.
    pub cumulative: bool,
}

const fn metric(
    column: &'static str,
    suffix: &'static str,
    title: &'static str,
    y_label: &'static str,
) -> OverlayMetric {
    OverlayMetric {
        column,
        suffix,
        title,
        y_label,
        cumulative: false,
    }
}

pub const GC_METRICS: [OverlayMetric; 5] = [
    metric("elapsedMs", "_elapsed", "GC Elapsed Time", "millis"),
    metric(
        "longestPause",
        "_longest",
        "GC Longest Pause per Collection",
        "millis",
    ),
    metric(
        "totalPause",
        "_total_pause",
        "GC Total Pause per Collection",
        "millis",
    ),
    metric(
        "heapUsedAfter",
        "_heap_after",
        "Heap Used After Collection",
        "bytes",
    ),
    OverlayMetric {
        column: "cpuUsedMs",
        suffix: "_cpu_cumulative",
        title: "GC Cumulative Time",
        y_label: "millis",
        cumulative: true,
    },
];

pub const HEAP_METRICS: [OverlayMetric; 3] = [
    metric("used", "_heap_used", "Heap Used", "bytes"),
    metric("committed", "_heap_committed", "Heap Committed", "bytes"),
    metric("duration", "_gc_duration", "GC Duration", "millis"),
];

pub const HISTOGRAM_SUFFIX: &str = "_hist";

/// Knobs that change what gets planned (not how it is drawn).
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Appended to the CPU artifact name: `""` gives `run1`, `"_cpu"` gives `run1_cpu`.
    pub cpu_suffix: String,
}

/// An artifact and where the renderer put it.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub artifact: Artifact,
    pub path: PathBuf,
}

/// Run one request end to end.
pub fn run(
    request: &ReportRequest,
    options: &PlanOptions,
    renderer: &mut dyn Renderer,
) -> Result<Vec<Rendered>, ReportError> {
    let mut tables = Vec::with_capacity(request.sources().len());
    for path in request.sources() {
        tables.push(load_table(path)?);
    }

    let artifacts = plan(request.kind(), &tables, options)?;
    info!(
        "{} report over {} table(s): {} chart(s)",
        request.kind(),
        tables.len(),
        artifacts.len()
    );

    let mut out = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = renderer.render(&artifact)?;
        out.push(Rendered { artifact, path });
    }
    Ok(out)
}

/// Plan every artifact a kind produces over `tables` (in input order).
pub fn plan(
    kind: ReportKind,
    tables: &[SampleTable],
    options: &PlanOptions,
) -> Result<Vec<Artifact>, ReportError> {
    check_labels(kind, tables)?;
    match kind {
        ReportKind::Cpu => tables
            .iter()
            .map(|t| plot_cpu(t, &options.cpu_suffix))
            .collect(),
        ReportKind::Gc => plot_gc(tables),
        ReportKind::GcHistogram => tables.iter().map(plot_gc_histogram).collect(),
        ReportKind::Heap => overlay(tables, &HEAP_COLUMNS, &HEAP_METRICS),
    }
}

/// Per-table kinds name one file after each label, so a repeated label would
/// overwrite an earlier chart. Overlays only lose legend clarity.
fn check_labels(kind: ReportKind, tables: &[SampleTable]) -> Result<(), ReportError> {
    let mut seen: Vec<&SampleTable> = Vec::with_capacity(tables.len());
    for table in tables {
        if let Some(first) = seen.iter().find(|t| t.label() == table.label()) {
            match kind {
                ReportKind::Cpu | ReportKind::GcHistogram => {
                    return Err(ReportError::input(
                        table.source(),
                        format!(
                            "label '{}' is already used by {}; its chart would be overwritten",
                            table.label(),
                            first.source().display()
                        ),
                    ));
                }
                ReportKind::Gc | ReportKind::Heap => warn!(
                    "{} and {} share the legend label '{}'",
                    first.source().display(),
                    table.source().display(),
                    table.label()
                ),
            }
        }
        seen.push(table);
    }
    Ok(())
}

/// `user`, `system` and `total` against `timestamp` on one chart.
pub fn plot_cpu(table: &SampleTable, suffix: &str) -> Result<Artifact, ReportError> {
    table.require_all(&CPU_COLUMNS)?;
    let ts = table.require(TIMESTAMP)?;

    let mut series = Vec::with_capacity(CPU_SERIES.len());
    for name in CPU_SERIES {
        series.push(Series {
            name: name.to_string(),
            points: zip_points(ts, table.require(name)?),
        });
    }

    Ok(Artifact {
        name: format!("{}{}", table.label(), suffix),
        chart: Chart::Line(LineChart {
            title: format!("CPU Load: {}", table.label()),
            x_label: TIMESTAMP.to_string(),
            y_label: "load".to_string(),
            series,
        }),
    })
}

/// Five overlays (one series per table each), named after all labels.
pub fn plot_gc(tables: &[SampleTable]) -> Result<Vec<Artifact>, ReportError> {
    overlay(tables, &GC_COLUMNS, &GC_METRICS)
}

/// 50-bin histogram for every numeric column of one table.
pub fn plot_gc_histogram(table: &SampleTable) -> Result<Artifact, ReportError> {
    if table.columns().is_empty() {
        return Err(ReportError::input(table.source(), "no numeric columns"));
    }

    let panels = table
        .columns()
        .iter()
        .map(|c| HistogramPanel {
            column: c.name.clone(),
            bins: derive::histogram(&c.values, derive::HISTOGRAM_BINS),
        })
        .collect();

    Ok(Artifact {
        name: format!("{}{}", table.label(), HISTOGRAM_SUFFIX),
        chart: Chart::Histogram(HistogramGrid {
            title: table.label().to_string(),
            panels,
        }),
    })
}

/// Underscore-join of the labels, in input order.
pub fn combined_base(tables: &[SampleTable]) -> String {
    tables
        .iter()
        .map(SampleTable::label)
        .collect::<Vec<_>>()
        .join("_")
}

fn overlay(
    tables: &[SampleTable],
    required: &[&str],
    metrics: &[OverlayMetric],
) -> Result<Vec<Artifact>, ReportError> {
    for table in tables {
        table.require_all(required)?;
    }
    let base = combined_base(tables);

    let mut artifacts = Vec::with_capacity(metrics.len());
    for m in metrics {
        let mut series = Vec::with_capacity(tables.len());
        for table in tables {
            let ts = table.require(TIMESTAMP)?;
            let raw = table.require(m.column)?;
            let points = if m.cumulative {
                zip_points(ts, &derive::cumulative_sum(raw))
            } else {
                zip_points(ts, raw)
            };
            series.push(Series {
                name: table.label().to_string(),
                points,
            });
        }

        artifacts.push(Artifact {
            name: format!("{}{}", base, m.suffix),
            chart: Chart::Line(LineChart {
                title: m.title.to_string(),
                x_label: TIMESTAMP.to_string(),
                y_label: m.y_label.to_string(),
                series,
            }),
        });
    }
    Ok(artifacts)
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}
