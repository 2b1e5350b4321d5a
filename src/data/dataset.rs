use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::table::SampleTable;

/// One reconstruction sample: the model's target is its own input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionPair {
    pub input:  Vec<f32>,
    pub target: Vec<f32>,
}

impl ReconstructionPair {
    pub fn from_row(row: &[f32]) -> Self {
        Self { input: row.to_vec(), target: row.to_vec() }
    }

    pub fn width(&self) -> usize {
        self.input.len()
    }
}

/// Exposes every row of a table as a `(row, row)` pair.
pub struct ReconstructionDataset {
    table: SampleTable,
}

impl ReconstructionDataset {
    pub fn new(table: SampleTable) -> Self { Self { table } }

    pub fn width(&self) -> usize { self.table.width() }
}

impl Dataset<ReconstructionPair> for ReconstructionDataset {
    /// `None` is the out-of-range signal; no other bounds checking.
    fn get(&self, index: usize) -> Option<ReconstructionPair> {
        (index < self.table.len()).then(|| ReconstructionPair::from_row(self.table.row(index)))
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SampleTable {
        SampleTable::from_rows(&[[0.1f32, 0.2, 0.3], [0.4, 0.5, 0.6]]).unwrap()
    }

    #[test]
    fn test_pair_target_equals_input() {
        let ds = ReconstructionDataset::new(table());
        assert_eq!(ds.len(), 2);
        let pair = ds.get(1).unwrap();
        assert_eq!(pair.input, vec![0.4, 0.5, 0.6]);
        assert_eq!(pair.input, pair.target);
    }

    #[test]
    fn test_out_of_range_index_is_none() {
        let ds = ReconstructionDataset::new(table());
        assert!(ds.get(2).is_none());
    }
}
