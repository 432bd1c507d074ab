use crate::diagnostics;
use crate::error::ReportError;
use crate::table::sample::{Column, DroppedColumn, SampleTable};
use crate::table::stem::label_for;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub const TIMESTAMP: &str = "timestamp";

/// Load one exported CSV file into a [`SampleTable`].
pub fn load_table(path: &Path) -> Result<SampleTable, ReportError> {
    let file = File::open(path).map_err(|e| ReportError::input(path, e))?;
    let table = parse_table(file, path)?;
    debug!(
        "loaded {} ({} rows, {} numeric columns)",
        path.display(),
        table.rows(),
        table.columns().len()
    );
    Ok(table)
}

/// Parse CSV text with a header row.
///
/// Every column whose cells all parse as floats is kept; other columns are
/// dropped. Ragged rows are an error, since a table shares one column set.
pub fn parse_table<R: Read>(reader: R, path: &Path) -> Result<SampleTable, ReportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ReportError::input(path, e))?
        .clone();
    if headers.is_empty() {
        return Err(ReportError::input(path, "no header row"));
    }

    let mut seen = BTreeSet::new();
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(ReportError::input(
                path,
                format!("duplicate column '{}' in header", name),
            ));
        }
    }

    let mut cells: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut numeric = vec![true; headers.len()];
    let mut dropped = Vec::new();
    let mut rows = 0usize;

    for record in rdr.records() {
        let record = record.map_err(|e| ReportError::input(path, e))?;
        rows += 1;
        for (idx, cell) in record.iter().enumerate() {
            if !numeric[idx] {
                continue;
            }
            match cell.parse::<f64>() {
                Ok(v) => cells[idx].push(v),
                Err(_) => {
                    debug!(
                        "{}: column '{}' is not numeric (row {}: {:?}), dropping it",
                        path.display(),
                        &headers[idx],
                        rows,
                        cell
                    );
                    numeric[idx] = false;
                    cells[idx] = Vec::new();
                    dropped.push(DroppedColumn {
                        name: headers[idx].to_string(),
                        row: rows,
                        cell: cell.to_string(),
                    });
                }
            }
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .zip(numeric)
        .filter_map(|((name, values), keep)| {
            keep.then(|| Column {
                name: name.to_string(),
                values,
            })
        })
        .collect();

    let table = SampleTable::new(path.to_path_buf(), label_for(path), rows, columns)
        .with_dropped(dropped);
    warn_on_backwards_time(&table);
    Ok(table)
}

/// Source logs are ordered, so a decreasing timestamp means the export is
/// suspect. Plotting still proceeds.
fn warn_on_backwards_time(table: &SampleTable) {
    let Some(ts) = table.column(TIMESTAMP) else {
        return;
    };
    for (idx, pair) in ts.windows(2).enumerate() {
        if pair[1] < pair[0] {
            // Header is line 1, so data row idx + 1 sits on line idx + 3.
            diagnostics::warn_at(
                table.source(),
                idx + 3,
                format!("timestamp goes backwards ({} after {})", pair[1], pair[0]),
            );
        }
    }
}
