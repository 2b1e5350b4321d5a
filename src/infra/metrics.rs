// ============================================================
// Layer 6 - Metrics Logger
// ============================================================
// Records the per-epoch loss history to a CSV file so learning
// curves can be plotted after a run.
//
// Output file: <checkpoint_dir>/metrics.csv
//
//   epoch,train_loss,val_loss
//   1,0.081234,0.079911
//   2,0.064310,0.066012
//   ...
//
// val_loss is NaN when the validation split was empty.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

use crate::domain::history::LossHistory;

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Starts at 1
    pub epoch:      usize,
    pub train_loss: f64,
    pub val_loss:   f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64) -> Self {
        Self { epoch, train_loss, val_loss }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// The epoch with the lowest validation loss, ignoring NaN entries.
pub fn best_epoch(history: &LossHistory) -> Option<EpochMetrics> {
    let mut best: Option<EpochMetrics> = None;
    for (epoch, train, val) in history.epochs() {
        let m = EpochMetrics::new(epoch, train, val);
        let improved = match best {
            None    => !val.is_nan(),
            Some(b) => m.is_improvement(b.val_loss),
        };
        if improved {
            best = Some(m);
        }
    }
    best
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Starts a fresh `metrics.csv` (header only), replacing any log
    /// left by an earlier run whose model has since been overwritten.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)?;
        writeln!(f, "epoch,train_loss,val_loss")?;
        tracing::debug!("Started metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.train_loss, m.val_loss)?;
        Ok(())
    }

    /// Append every epoch of a finished run.
    pub fn log_history(&self, history: &LossHistory) -> Result<()> {
        for (epoch, train, val) in history.epochs() {
            self.log(&EpochMetrics::new(epoch, train, val))?;
        }
        tracing::debug!(
            "Logged {} epochs to '{}'",
            history.len(),
            self.csv_path.display()
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
