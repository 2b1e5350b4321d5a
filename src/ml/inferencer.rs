// ============================================================
// Layer 5 - Inferencer
// ============================================================
// Runs a trained model over every batch of a dataset and joins
// the per-batch outputs back into one tensor along the row axis.
//
//   conv_encode_data          loader → [rows, encoding_size]
//   conv_encode_decode_data   loader → [rows, input_size, 1]
//   conv_encode / conv_encode_decode build the loader from raw
//   tabular data first.
//
// These work on any Backend. A model trained on an autodiff
// backend should be passed in as `model.valid()`.

use anyhow::{anyhow, bail, Result};
use burn::{data::dataloader::DataLoader, prelude::*};

use crate::data::batcher::{reconstruction_loader, ReconstructionBatch};
use crate::domain::{table::SampleTable, traits::AsTable};
use crate::ml::model::ConvAutoencoder;

/// Default rows per batch for the table-level helpers
pub const DEFAULT_BATCH_SIZE: usize = 32;

pub fn conv_encode_data<B: Backend>(
    model:  &ConvAutoencoder<B>,
    loader: &dyn DataLoader<ReconstructionBatch<B>>,
) -> Result<Tensor<B, 2>> {
    let encoded: Vec<Tensor<B, 2>> = loader
        .iter()
        .map(|batch| model.encode(batch.inputs))
        .collect();
    concat_rows(encoded)
}

pub fn conv_encode<B: Backend, T: AsTable + ?Sized>(
    model:      &ConvAutoencoder<B>,
    data:       &T,
    batch_size: usize,
    device:     &B::Device,
) -> Result<Tensor<B, 2>> {
    let loader = table_loader(model, data, batch_size, device)?;
    conv_encode_data(model, loader.as_ref())
}

pub fn conv_encode_decode_data<B: Backend>(
    model:  &ConvAutoencoder<B>,
    loader: &dyn DataLoader<ReconstructionBatch<B>>,
) -> Result<Tensor<B, 3>> {
    let decoded: Vec<Tensor<B, 3>> = loader
        .iter()
        .map(|batch| model.decode(model.encode(batch.inputs)))
        .collect();
    concat_rows(decoded)
}

pub fn conv_encode_decode<B: Backend, T: AsTable + ?Sized>(
    model:      &ConvAutoencoder<B>,
    data:       &T,
    batch_size: usize,
    device:     &B::Device,
) -> Result<Tensor<B, 3>> {
    let loader = table_loader(model, data, batch_size, device)?;
    conv_encode_decode_data(model, loader.as_ref())
}

/// Flatten every dimension after the first: `[rows, ...]` → rows x product(rest).
pub fn tensor_to_table<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> Result<SampleTable> {
    let dims  = tensor.dims();
    let width = dims[1..].iter().product();
    let values = tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Cannot read tensor values: {e:?}"))?;
    SampleTable::from_flat(values, width)
}

fn table_loader<B: Backend, T: AsTable + ?Sized>(
    model:      &ConvAutoencoder<B>,
    data:       &T,
    batch_size: usize,
    device:     &B::Device,
) -> Result<std::sync::Arc<dyn DataLoader<ReconstructionBatch<B>>>> {
    if batch_size == 0 {
        bail!("batch_size must be > 0");
    }
    let table = data.to_table()?;
    if table.width() != model.input_size {
        bail!(
            "data has {} features but the model expects {}",
            table.width(),
            model.input_size
        );
    }
    Ok(reconstruction_loader::<B>(table, batch_size, device.clone()))
}

fn concat_rows<B: Backend, const D: usize>(parts: Vec<Tensor<B, D>>) -> Result<Tensor<B, D>> {
    if parts.is_empty() {
        bail!("no batches to concatenate");
    }
    Ok(Tensor::cat(parts, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::ml::model::cae_create;

    type TestBackend = NdArray<f32>;

    fn rows(n: usize, width: usize) -> Vec<Vec<f32>> {
        (0..n)
            .map(|r| (0..width).map(|c| ((r * width + c) % 11) as f32 / 10.0).collect())
            .collect()
    }

    fn model(width: usize, encoding: usize) -> ConvAutoencoder<TestBackend> {
        cae_create(width, encoding, &Default::default()).unwrap()
    }

    #[test]
    fn test_encode_shape_spans_partial_batches() {
        let model   = model(7, 3);
        let encoded = conv_encode(&model, &rows(45, 7), DEFAULT_BATCH_SIZE, &Default::default()).unwrap();
        assert_eq!(encoded.dims(), [45, 3]);
    }

    #[test]
    fn test_encode_decode_matches_input_shape() {
        let model   = model(6, 2);
        let decoded = conv_encode_decode(&model, &rows(10, 6), 4, &Default::default()).unwrap();
        assert_eq!(decoded.dims(), [10, 6, 1]);
    }

    #[test]
    fn test_encode_is_repeatable() {
        let model = model(5, 2);
        let data  = rows(20, 5);
        let a = conv_encode(&model, &data, 8, &Default::default()).unwrap();
        let b = conv_encode(&model, &data, 8, &Default::default()).unwrap();
        assert_eq!(
            a.into_data().to_vec::<f32>().unwrap(),
            b.into_data().to_vec::<f32>().unwrap()
        );
    }

    #[test]
    fn test_batched_decode_equals_single_forward() {
        let model = model(4, 2);
        let table = SampleTable::from_rows(&rows(9, 4)).unwrap();
        let whole = model.forward(Tensor::<TestBackend, 3>::from_data(
            TensorData::new(table.values().to_vec(), [9, 4, 1]),
            &Default::default(),
        ));
        let batched = conv_encode_decode(&model, &table, 2, &Default::default()).unwrap();

        let whole   = whole.into_data().to_vec::<f32>().unwrap();
        let batched = batched.into_data().to_vec::<f32>().unwrap();
        for (w, b) in whole.iter().zip(&batched) {
            assert!((w - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_tensor_to_table_flattens_trailing_dims() {
        let model   = model(3, 2);
        let decoded = conv_encode_decode(&model, &rows(4, 3), 32, &Default::default()).unwrap();
        let table   = tensor_to_table(decoded).unwrap();
        assert_eq!((table.len(), table.width()), (4, 3));
    }

    #[test]
    fn test_encode_empty_table_is_an_error() {
        let model = model(3, 2);
        let empty = SampleTable::from_flat(Vec::new(), 3).unwrap();
        assert!(conv_encode(&model, &empty, 32, &Default::default()).is_err());
        assert!(conv_encode_decode(&model, &empty, 32, &Default::default()).is_err());
    }

    #[test]
    fn test_encode_data_over_prebuilt_loader() {
        let model  = model(4, 3);
        let table  = SampleTable::from_rows(&rows(11, 4)).unwrap();
        let loader = reconstruction_loader::<TestBackend>(table.clone(), 5, Default::default());

        let encoded = conv_encode_data(&model, loader.as_ref()).unwrap();
        assert_eq!(encoded.dims(), [11, 3]);

        // Same rows, same order as the table-level helper
        let direct = conv_encode(&model, &table, 5, &Default::default()).unwrap();
        assert_eq!(
            encoded.into_data().to_vec::<f32>().unwrap(),
            direct.into_data().to_vec::<f32>().unwrap()
        );

        let decoded = conv_encode_decode_data(&model, loader.as_ref()).unwrap();
        assert_eq!(decoded.dims(), [11, 4, 1]);
    }

    #[test]
    fn test_width_mismatch_is_an_error() {
        let model = model(3, 2);
        assert!(conv_encode(&model, &rows(4, 5), 32, &Default::default()).is_err());
    }
}
