//! JSON summary of what a run produced.

use crate::report::chart::Chart;
use crate::report::kind::{OutputMode, ReportKind};
use crate::report::{ReportRequest, Rendered};
use crate::Result;

use anyhow::Context;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub kind: ReportKind,
    pub output: OutputMode,
    pub sources: Vec<String>,
    pub artifacts: Vec<ArtifactEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEntry {
    pub name: String,
    pub path: String,
    pub title: String,
    pub series: Vec<SeriesEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesEntry {
    pub name: String,
    pub points: usize,
}

impl Manifest {
    pub fn build(request: &ReportRequest, rendered: &[Rendered]) -> Self {
        let artifacts = rendered
            .iter()
            .map(|r| ArtifactEntry {
                name: r.artifact.name.clone(),
                path: r.path.display().to_string(),
                title: r.artifact.chart.title().to_string(),
                series: series_entries(&r.artifact.chart),
            })
            .collect();

        Manifest {
            kind: request.kind(),
            output: request.output(),
            sources: request
                .sources()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            artifacts,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write manifest {}", path.display()))?;
        Ok(())
    }
}

/// Histogram panels are listed like series, counting filled samples.
fn series_entries(chart: &Chart) -> Vec<SeriesEntry> {
    match chart {
        Chart::Line(line) => line
            .series
            .iter()
            .map(|s| SeriesEntry {
                name: s.name.clone(),
                points: s.points.len(),
            })
            .collect(),
        Chart::Histogram(grid) => grid
            .panels
            .iter()
            .map(|p| SeriesEntry {
                name: p.column.clone(),
                points: p.bins.iter().map(|b| b.count as usize).sum(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::chart::{Artifact, LineChart, Series};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn serializes_kind_and_series_counts() {
        let request = ReportRequest::new(
            ReportKind::Cpu,
            vec![PathBuf::from("run1.csv")],
            OutputMode::Save,
        )
        .unwrap();
        let rendered = vec![Rendered {
            artifact: Artifact {
                name: "run1".into(),
                chart: Chart::Line(LineChart {
                    title: "CPU Load: run1".into(),
                    x_label: "timestamp".into(),
                    y_label: "load".into(),
                    series: vec![Series {
                        name: "user".into(),
                        points: vec![(0.0, 1.0), (1.0, 4.0)],
                    }],
                }),
            },
            path: PathBuf::from("./run1.png"),
        }];

        let value = serde_json::to_value(Manifest::build(&request, &rendered)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "cpu",
                "output": "save",
                "sources": ["run1.csv"],
                "artifacts": [{
                    "name": "run1",
                    "path": "./run1.png",
                    "title": "CPU Load: run1",
                    "series": [{"name": "user", "points": 2}]
                }]
            })
        );
    }

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let request =
            ReportRequest::new(ReportKind::Gc, vec![PathBuf::from("a.csv")], OutputMode::Show)
                .unwrap();
        let path = dir.path().join("manifest.json");
        Manifest::build(&request, &[]).write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"kind\": \"gc\""), "{}", text);
        assert!(text.contains("\"output\": \"show\""));
    }
}
