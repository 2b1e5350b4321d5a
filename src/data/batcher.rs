// ============================================================
// Layer 4 - Reconstruction Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec of
// ReconstructionPairs into tensors for the model.
//
// How batching works here:
//   Input:  N pairs, each a feature vector of width F
//   Output: inputs / targets of shape [N, F, 1]
//
//   The features become the convolution channels and the
//   trailing singleton is the (single) timestep, so the
//   kernel-size-1 Conv1d mixes features per observation.
//
// Reference: Burn Book §4 (Batcher)

use std::sync::Arc;

use burn::{
    data::{
        dataloader::{batcher::Batcher, DataLoader, DataLoaderBuilder},
        dataset::Dataset,
    },
    prelude::*,
};

use crate::data::dataset::{ReconstructionDataset, ReconstructionPair};
use crate::domain::table::SampleTable;

// ─── ReconstructionBatch ──────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct ReconstructionBatch<B: Backend> {
    /// Shape: [batch_size, features, 1]
    pub inputs: Tensor<B, 3>,

    /// Shape: [batch_size, features, 1]; equal to `inputs`
    pub targets: Tensor<B, 3>,
}

// ─── ReconstructionBatcher ────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the
/// correct CPU / GPU.
#[derive(Clone, Debug)]
pub struct ReconstructionBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReconstructionBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    fn stack(&self, rows: Vec<f32>, batch_size: usize, width: usize) -> Tensor<B, 3> {
        Tensor::<B, 3>::from_data(
            TensorData::new(rows, [batch_size, width, 1]),
            &self.device,
        )
    }
}

impl<B: Backend> Batcher<ReconstructionPair, ReconstructionBatch<B>> for ReconstructionBatcher<B> {
    fn batch(&self, items: Vec<ReconstructionPair>) -> ReconstructionBatch<B> {
        let batch_size = items.len();
        // Every pair in a table has the same width
        let width = items.first().map(ReconstructionPair::width).unwrap_or(0);

        let input_flat: Vec<f32> = items
            .iter()
            .flat_map(|p| p.input.iter().copied())
            .collect();
        let target_flat: Vec<f32> = items
            .into_iter()
            .flat_map(|p| p.target)
            .collect();

        ReconstructionBatch {
            inputs:  self.stack(input_flat, batch_size, width),
            targets: self.stack(target_flat, batch_size, width),
        }
    }
}

/// Build an in-order (unshuffled) batch iterator over every row of `table`.
///
/// Runs on the calling thread; no worker threads are spawned.
pub fn reconstruction_loader<B: Backend>(
    table:      SampleTable,
    batch_size: usize,
    device:     B::Device,
) -> Arc<dyn DataLoader<ReconstructionBatch<B>>> {
    let dataset = ReconstructionDataset::new(table);
    tracing::debug!(
        "Building loader: {} rows of width {}, batch_size={}",
        dataset.len(),
        dataset.width(),
        batch_size,
    );
    DataLoaderBuilder::new(ReconstructionBatcher::<B>::new(device))
        .batch_size(batch_size)
        .build(dataset)
}
