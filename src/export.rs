//! Presentation adapters: chart datasets, table rows and CSV export.
//!
//! These are mechanical reshapes of report data; no metric is computed here
//! beyond the column sums of the CSV total row.

use crate::error::Result;
use crate::metrics::{format_currency, MeasureSet, MeasureView};
use serde::Serialize;
use std::io;
use std::path::Path;

pub const TOTAL_ROW_LABEL: &str = "Year Total";

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// Chart-library data: shared x-axis labels plus one dataset per measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart with a single dataset for the active measure.
pub fn chart_for_view<V: MeasureView>(measures: &MeasureSet<V>, view: V) -> ChartData {
    let series = measures.get(view);
    ChartData {
        labels: series.labels().into_iter().map(String::from).collect(),
        datasets: vec![Dataset {
            label: view.label().to_string(),
            data: series.values(),
        }],
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub period: String,
    pub values: Vec<f64>,
}

impl TableRow {
    /// Values as currency strings, in column order.
    pub fn formatted(&self) -> Vec<String> {
        self.values.iter().map(|v| format_currency(*v)).collect()
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// A report export: header, one row per period, and a trailing total row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub total: TableRow,
}

impl CsvTable {
    /// Build a table whose total row sums every column of `rows`.
    pub fn with_column_totals(headers: Vec<String>, rows: Vec<TableRow>) -> Self {
        let width = headers.len().saturating_sub(1);
        let mut sums = vec![0.0; width];
        for row in &rows {
            for (sum, v) in sums.iter_mut().zip(&row.values) {
                *sum += v;
            }
        }
        Self {
            headers,
            rows,
            total: TableRow {
                period: TOTAL_ROW_LABEL.to_string(),
                values: sums,
            },
        }
    }

    /// Number of data rows including the total row.
    pub fn data_row_count(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn write<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in self.rows.iter().chain(std::iter::once(&self.total)) {
            let mut record = Vec::with_capacity(row.values.len() + 1);
            record.push(row.period.clone());
            record.extend(row.values.iter().map(|v| csv_number(*v)));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write(file)
    }
}

/// Plain numeric cell: integers without a fraction, otherwise two decimals.
fn csv_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
