use crate::error::ReportError;
use std::path::{Path, PathBuf};

/// One numeric column, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// A header column left out because one of its cells is not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedColumn {
    pub name: String,
    /// 1-based data row of the first offending cell.
    pub row: usize,
    pub cell: String,
}

/// Rows of one exported CSV file, stored column-wise.
///
/// Read-only once built: derived series are computed into separate values
/// rather than appended here.
#[derive(Debug, Clone)]
pub struct SampleTable {
    source: PathBuf,
    label: String,
    rows: usize,
    columns: Vec<Column>,
    dropped: Vec<DroppedColumn>,
}

impl SampleTable {
    pub fn new(source: PathBuf, label: String, rows: usize, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == rows));
        Self {
            source,
            label,
            rows,
            columns,
            dropped: Vec::new(),
        }
    }

    pub fn with_dropped(mut self, dropped: Vec<DroppedColumn>) -> Self {
        self.dropped = dropped;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Like [`column`](Self::column) but a missing column is an input error.
    /// A column present in the header but dropped as non-numeric is reported
    /// with its first bad cell.
    pub fn require(&self, name: &str) -> Result<&[f64], ReportError> {
        if let Some(values) = self.column(name) {
            return Ok(values);
        }
        let reason = match self.dropped.iter().find(|d| d.name == name) {
            Some(d) => format!(
                "column '{}' is not numeric (row {}: {:?})",
                name, d.row, d.cell
            ),
            None => format!("missing required numeric column '{}'", name),
        };
        Err(ReportError::input(&self.source, reason))
    }

    /// Check a whole column set up front, so a report never half-renders
    /// because of a column discovered late.
    pub fn require_all(&self, names: &[&str]) -> Result<(), ReportError> {
        for name in names {
            self.require(name)?;
        }
        Ok(())
    }
}
