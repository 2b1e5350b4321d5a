// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The fit / encode operations accept "anything tabular" and the
// application layer loads tables from "somewhere". Both are
// expressed as traits so callers never depend on a concrete
// container or file format.

use anyhow::Result;

use crate::domain::table::SampleTable;

// ─── AsTable ──────────────────────────────────────────────────────────────────
/// Any value that can be converted into a 2D numeric table.
///
/// Implementations:
///   - SampleTable        → cloned as-is
///   - Vec<Vec<f32>>      → validated row by row
///   - [Vec<f32>]         → validated row by row
pub trait AsTable {
    fn to_table(&self) -> Result<SampleTable>;
}

impl AsTable for SampleTable {
    fn to_table(&self) -> Result<SampleTable> {
        Ok(self.clone())
    }
}

impl AsTable for [Vec<f32>] {
    fn to_table(&self) -> Result<SampleTable> {
        SampleTable::from_rows(self)
    }
}

impl AsTable for Vec<Vec<f32>> {
    fn to_table(&self) -> Result<SampleTable> {
        SampleTable::from_rows(self.as_slice())
    }
}

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Any component that can load a sample table.
///
/// Implementations:
///   - CsvTableLoader → reads a numeric CSV file
pub trait TableSource {
    fn load_table(&self) -> Result<SampleTable>;
}
