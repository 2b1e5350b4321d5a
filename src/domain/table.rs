// ============================================================
// Layer 3 - SampleTable
// ============================================================
// A 2D numeric table: each row is one independent observation,
// each column one feature of the fixed-width feature vector.
//
// Stored as a single contiguous row-major buffer:
//   values.len() == rows * width
//
// The table is immutable once built. Splitting into train /
// validation produces new tables via `select`.

use anyhow::{bail, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    values: Vec<f32>,
    rows:   usize,
    width:  usize,
}

impl SampleTable {
    /// Build a table from a flat row-major buffer with `width` columns.
    pub fn from_flat(values: Vec<f32>, width: usize) -> Result<Self> {
        if width == 0 {
            bail!("table width must be > 0");
        }
        if values.len() % width != 0 {
            bail!(
                "buffer length {} is not divisible by width {}",
                values.len(),
                width
            );
        }
        let rows = values.len() / width;
        Ok(Self { values, rows, width })
    }

    /// Build a table from per-observation rows.
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            bail!("table must have at least one row");
        };
        let width = first.as_ref().len();
        if width == 0 {
            bail!("table width must be > 0");
        }

        let mut values = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                bail!("row {i} has {} columns, expected {width}", row.len());
            }
            values.extend_from_slice(row);
        }

        Ok(Self { values, rows: rows.len(), width })
    }

    /// Number of rows (observations)
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of columns (features per observation)
    pub fn width(&self) -> usize {
        self.width
    }

    /// The `idx`-th row. Panics if `idx >= len()`.
    pub fn row(&self, idx: usize) -> &[f32] {
        let start = idx * self.width;
        &self.values[start..start + self.width]
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.width)
    }

    /// Flat row-major view of every value.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Copy the given rows, in the given order, into a new table.
    ///
    /// Panics if any index is out of range.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut values = Vec::with_capacity(indices.len() * self.width);
        for &idx in indices {
            values.extend_from_slice(self.row(idx));
        }
        Self { values, rows: indices.len(), width: self.width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![0.0, 1.0], vec![2.0]];
        assert!(SampleTable::from_rows(&rows).is_err());
    }

    #[test]
    fn test_from_flat_validates_width() {
        assert!(SampleTable::from_flat(vec![0.0; 6], 3).is_ok());
        assert!(SampleTable::from_flat(vec![0.0; 5], 3).is_err());
        assert!(SampleTable::from_flat(vec![], 0).is_err());
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let table = SampleTable::from_rows(&[[0.0f32, 0.5], [1.0, 1.5], [2.0, 2.5]]).unwrap();
        let picked = table.select(&[2, 0]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.row(0), &[2.0, 2.5]);
        assert_eq!(picked.row(1), &[0.0, 0.5]);
    }

    #[test]
    fn test_rows_iterates_every_row() {
        let table = SampleTable::from_flat((0..12).map(|v| v as f32).collect(), 4).unwrap();
        assert_eq!(table.rows().count(), 3);
        assert_eq!(table.rows().last().unwrap(), &[8.0, 9.0, 10.0, 11.0]);
    }
}
