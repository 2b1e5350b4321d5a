//! Train a 1D convolutional autoencoder that compresses fixed-width feature
//! vectors into a smaller encoding and reconstructs them.
//!
//! ```no_run
//! use burn::backend::{Autodiff, NdArray};
//! use burn::module::AutodiffModule;
//! use conv_autoencoder::{cae_create, cae_fit, conv_encode, FitOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! type B = Autodiff<NdArray>;
//! let device = Default::default();
//! let rows: Vec<Vec<f32>> = (0..100).map(|i| vec![(i % 10) as f32 / 10.0; 8]).collect();
//!
//! let model   = cae_create::<B>(8, 3, &device)?;
//! let options = FitOptions { num_epochs: 50, return_loss: true, ..FitOptions::default() };
//! let trained = cae_fit(model, &rows, &options, &device)?;
//!
//! let encoded = conv_encode(&trained.model.valid(), &rows, 32, &device)?;
//! assert_eq!(encoded.dims(), [100, 3]);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;

pub use data::{
    batcher::{reconstruction_loader, ReconstructionBatch, ReconstructionBatcher},
    dataset::{ReconstructionDataset, ReconstructionPair},
    splitter::{split_train_val, SplitIndices},
};
pub use domain::{
    history::LossHistory,
    table::SampleTable,
    traits::{AsTable, TableSource},
};
pub use ml::{
    inferencer::{conv_encode, conv_encode_data, conv_encode_decode, conv_encode_decode_data},
    model::{cae_create, ConvAutoencoder, ConvAutoencoderConfig},
    trainer::{cae_fit, cae_train, FitOptions, Trained, TrainOptions},
};
