// ============================================================
// Layer 4 - CSV Table Loader / Writer
// ============================================================
// Reads a numeric CSV file into a SampleTable, and writes
// tables (encodings, reconstructions) back out.
//
// Every record becomes one row; every field must parse as f32.
// A header line is skipped unless the loader is told there is
// none.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::table::SampleTable;
use crate::domain::traits::TableSource;

/// Loads a sample table from a CSV file.
/// Implements the TableSource trait from Layer 3.
pub struct CsvTableLoader {
    path:        PathBuf,
    has_headers: bool,
}

impl CsvTableLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), has_headers: true }
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

impl TableSource for CsvTableLoader {
    fn load_table(&self) -> Result<SampleTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open '{}'", self.path.display()))?;

        let mut rows: Vec<Vec<f32>> = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Malformed CSV record {} in '{}'", line + 1, self.path.display()))?;
            let row = record
                .iter()
                .enumerate()
                .map(|(col, field)| {
                    field.parse::<f32>().with_context(|| {
                        format!("Record {}, column {}: '{field}' is not a number", line + 1, col + 1)
                    })
                })
                .collect::<Result<Vec<f32>>>()?;
            rows.push(row);
        }

        if rows.is_empty() {
            bail!("'{}' contains no data rows", self.path.display());
        }

        let table = SampleTable::from_rows(&rows)?;
        tracing::info!(
            "Loaded {} rows x {} features from '{}'",
            table.len(),
            table.width(),
            self.path.display()
        );
        Ok(table)
    }
}

/// Write `table` to `path` as CSV with a `f1,f2,...` header.
pub fn write_table(path: impl AsRef<Path>, table: &SampleTable) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    writer.write_record((1..=table.width()).map(|c| format!("f{c}")))?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} rows to '{}'", table.len(), path.display());
    Ok(())
}
