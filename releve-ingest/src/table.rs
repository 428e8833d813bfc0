//! Raw tabular input as read from a statement export, before any
//! institution-specific normalization.

use anyhow::{Context, Result};

/// A raw statement table: fixed source column names plus string rows.
///
/// Rows keep the width the export actually had; parsers compare that width
/// against their expected schema before touching any cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Read CSV bytes into a table. The export's own header row is skipped
    /// and `names` are assigned as the column names; fully blank lines are
    /// dropped.
    pub fn from_csv(bytes: &[u8], names: &[&str], delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("reading CSV record {}", i + 1))?;
            if i == 0 {
                continue; // export header
            }
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            columns: names.iter().map(|s| s.to_string()).collect(),
            rows,
        })
    }

    /// Width of the widest data row; the column-name count when there are
    /// no rows.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(self.columns.len())
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
