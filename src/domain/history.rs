// ============================================================
// Layer 3 - LossHistory
// ============================================================
// One entry per epoch in each sequence, appended by the
// training loop and read-only once training ends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    /// Mean training batch loss per epoch
    pub train:      Vec<f64>,
    /// Mean validation batch loss per epoch (NaN if there was no validation batch)
    pub validation: Vec<f64>,
}

impl LossHistory {
    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            train:      Vec::with_capacity(epochs),
            validation: Vec::with_capacity(epochs),
        }
    }

    /// Record one finished epoch.
    pub fn push(&mut self, train_loss: f64, val_loss: f64) {
        self.train.push(train_loss);
        self.validation.push(val_loss);
    }

    /// Number of recorded epochs
    pub fn len(&self) -> usize {
        self.train.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty()
    }

    /// Iterate `(epoch, train_loss, val_loss)` with epochs numbered from 1.
    pub fn epochs(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.train
            .iter()
            .zip(&self.validation)
            .enumerate()
            .map(|(i, (&t, &v))| (i + 1, t, v))
    }
}
