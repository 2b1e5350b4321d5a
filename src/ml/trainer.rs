// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Fixed-epoch train + validation loop using Burn's DataLoader
// and Adam, plus the `cae_fit` entry point that splits a raw
// table and builds the loaders first.
//
//   - Training uses B (an AutodiffBackend) for gradients
//   - model.valid() returns the model on B::InnerBackend, so
//     validation runs without autodiff bookkeeping and the
//     validation loader must produce InnerBackend batches
//   - The epoch count is the only stopping condition
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{bail, Result};
use burn::{
    data::dataloader::DataLoader,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    batcher::{reconstruction_loader, ReconstructionBatch},
    splitter::split_train_val,
};
use crate::domain::{history::LossHistory, traits::AsTable};
use crate::ml::model::ConvAutoencoder;

// ─── Options ──────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainOptions {
    pub num_epochs:    usize,
    pub learning_rate: f64,
    /// Keep the per-epoch loss history in the result
    pub return_loss:   bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            num_epochs:    1000,
            learning_rate: 1e-3,
            return_loss:   false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOptions {
    pub batch_size:    usize,
    pub num_epochs:    usize,
    pub learning_rate: f64,
    pub return_loss:   bool,
    /// Seeds the validation sample; `None` draws from OS entropy
    pub seed:          Option<u64>,
}

impl Default for FitOptions {
    fn default() -> Self {
        let train = TrainOptions::default();
        Self {
            batch_size:    32,
            num_epochs:    train.num_epochs,
            learning_rate: train.learning_rate,
            return_loss:   train.return_loss,
            seed:          None,
        }
    }
}

impl FitOptions {
    pub fn train_options(&self) -> TrainOptions {
        TrainOptions {
            num_epochs:    self.num_epochs,
            learning_rate: self.learning_rate,
            return_loss:   self.return_loss,
        }
    }
}

/// The trained model, plus the loss history when it was requested.
#[derive(Debug)]
pub struct Trained<B: AutodiffBackend> {
    pub model:  ConvAutoencoder<B>,
    pub losses: Option<LossHistory>,
}

// ─── Training loop ────────────────────────────────────────────────────────────
pub fn cae_train<B: AutodiffBackend>(
    mut model:    ConvAutoencoder<B>,
    train_loader: &dyn DataLoader<ReconstructionBatch<B>>,
    val_loader:   &dyn DataLoader<ReconstructionBatch<B::InnerBackend>>,
    options:      &TrainOptions,
) -> Trained<B> {
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim   = AdamConfig::new().with_epsilon(1e-8).init();
    let mut history = LossHistory::with_capacity(options.num_epochs);

    tracing::info!(
        "Training for {} epochs (lr={}, {} train / {} validation rows)",
        options.num_epochs,
        options.learning_rate,
        train_loader.num_items(),
        val_loader.num_items(),
    );

    for epoch in 1..=options.num_epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.inputs, batch.targets);

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(options.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;

        for batch in val_loader.iter() {
            let (loss, _) = model_valid.forward_loss(batch.inputs, batch.targets);
            val_loss_sum += loss.into_scalar().elem::<f64>();
            val_batches  += 1;
        }

        let avg_train_loss = mean(train_loss_sum, train_batches);
        let avg_val_loss   = mean(val_loss_sum, val_batches);
        history.push(avg_train_loss, avg_val_loss);

        tracing::debug!(
            "Epoch {:>4}/{} | train_loss={:.6} | val_loss={:.6}",
            epoch, options.num_epochs, avg_train_loss, avg_val_loss,
        );
    }

    if let (Some(train), Some(val)) = (history.train.last(), history.validation.last()) {
        tracing::info!("Training complete: train_loss={:.6}, val_loss={:.6}", train, val);
    }

    Trained {
        model,
        losses: options.return_loss.then_some(history),
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { f64::NAN }
}

// ─── Fit orchestrator ─────────────────────────────────────────────────────────
/// Split `data` into training / validation rows, batch both, and train.
pub fn cae_fit<B: AutodiffBackend, T: AsTable + ?Sized>(
    model:   ConvAutoencoder<B>,
    data:    &T,
    options: &FitOptions,
    device:  &B::Device,
) -> Result<Trained<B>> {
    if options.batch_size == 0 {
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

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    let split = split_train_val(table.len(), &mut rng);

    let train_loader = reconstruction_loader::<B>(
        table.select(&split.train),
        options.batch_size,
        device.clone(),
    );
    let val_loader = reconstruction_loader::<B::InnerBackend>(
        table.select(&split.validation),
        options.batch_size,
        device.clone(),
    );

    Ok(cae_train(model, train_loader.as_ref(), val_loader.as_ref(), &options.train_options()))
}
