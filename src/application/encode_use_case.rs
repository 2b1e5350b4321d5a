// ============================================================
// Layer 2 - EncodeUseCase
// ============================================================
// Loads a saved model and runs it over a CSV table, writing
// either the encodings or the reconstructions back out as CSV.

use anyhow::Result;

use crate::data::loader::{write_table, CsvTableLoader};
use crate::domain::{table::SampleTable, traits::TableSource};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{
    inferencer::{conv_encode, conv_encode_decode, tensor_to_table},
    model::ConvAutoencoder,
    Device, InferBackend,
};

/// What to produce for each input row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// `encoding_size` columns
    Encode,
    /// `input_size` columns, decoded from the encoding
    Reconstruct,
}

pub struct EncodeUseCase {
    model:  ConvAutoencoder<InferBackend>,
    device: Device,
}

impl EncodeUseCase {
    pub fn new(checkpoint_dir: &str) -> Result<Self> {
        let device = Device::default();
        let model  = CheckpointManager::open(checkpoint_dir)?.restore::<InferBackend>(&device)?;
        Ok(Self { model, device })
    }

    pub fn transform(&self, table: &SampleTable, transform: Transform, batch_size: usize) -> Result<SampleTable> {
        match transform {
            Transform::Encode => {
                tensor_to_table(conv_encode(&self.model, table, batch_size, &self.device)?)
            }
            Transform::Reconstruct => {
                tensor_to_table(conv_encode_decode(&self.model, table, batch_size, &self.device)?)
            }
        }
    }

    /// Read `input`, transform every row and write the result to `output`.
    pub fn run(
        &self,
        input:       &str,
        has_headers: bool,
        output:      &str,
        transform:   Transform,
        batch_size:  usize,
    ) -> Result<SampleTable> {
        let table = CsvTableLoader::new(input)
            .with_headers(has_headers)
            .load_table()?;

        let result = self.transform(&table, transform, batch_size)?;
        write_table(output, &result)?;

        tracing::info!(
            "{:?}: {} rows x {} columns written to '{}'",
            transform,
            result.len(),
            result.width(),
            output
        );
        Ok(result)
    }
}
