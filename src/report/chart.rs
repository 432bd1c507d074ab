//! Backend-independent chart model. Planning produces these, renderers
//! draw them.

use serde::Serialize;

/// One named series against the shared `timestamp` axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramPanel {
    pub column: String,
    pub bins: Vec<Bin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramGrid {
    pub title: String,
    pub panels: Vec<HistogramPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chart {
    Line(LineChart),
    Histogram(HistogramGrid),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Line(c) => &c.title,
            Chart::Histogram(h) => &h.title,
        }
    }
}

/// A chart plus the deterministic name it is saved under (without `.png`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub name: String,
    pub chart: Chart,
}

impl Artifact {
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}

/// Min/max over finite values, padded so a flat or empty range still has
/// extent.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

impl LineChart {
    pub fn x_range(&self) -> (f64, f64) {
        value_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
    }

    pub fn y_range(&self) -> (f64, f64) {
        value_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
    }
}
