// ============================================================
// Layer 2 - FitUseCase
// ============================================================
// Orchestrates a training run from files on disk:
//
//   Step 1: Load the CSV table           (Layer 4 - data)
//   Step 2: Build the model              (Layer 5 - ml)
//   Step 3: Split, batch and train       (Layer 5 - ml)
//   Step 4: Save weights + config        (Layer 6 - infra)
//   Step 5: Write the loss history CSV   (Layer 6 - infra)

use anyhow::Result;
use burn::tensor::backend::Backend;
use serde::{Deserialize, Serialize};

use crate::data::loader::CsvTableLoader;
use crate::domain::{history::LossHistory, traits::TableSource};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{best_epoch, MetricsLogger},
};
use crate::ml::{
    model::cae_create,
    trainer::{cae_fit, FitOptions},
    Device, TrainBackend,
};

// ─── Fit Configuration ────────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitConfig {
    pub data_path:      String,
    pub has_headers:    bool,
    pub checkpoint_dir: String,
    pub encoding_size:  usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub seed:           Option<u64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        let fit = FitOptions::default();
        Self {
            data_path:      "data/features.csv".to_string(),
            has_headers:    true,
            checkpoint_dir: "checkpoints".to_string(),
            encoding_size:  8,
            batch_size:     fit.batch_size,
            epochs:         fit.num_epochs,
            lr:             fit.learning_rate,
            seed:           None,
        }
    }
}

impl FitConfig {
    fn fit_options(&self) -> FitOptions {
        FitOptions {
            batch_size:    self.batch_size,
            num_epochs:    self.epochs,
            learning_rate: self.lr,
            return_loss:   true,
            seed:          self.seed,
        }
    }
}

// ─── FitUseCase ───────────────────────────────────────────────────────────────
pub struct FitUseCase {
    config: FitConfig,
}

impl FitUseCase {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline and return the recorded loss history.
    pub fn execute(&self) -> Result<LossHistory> {
        let cfg    = &self.config;
        let device = Device::default();

        // ── Step 1: Load data ─────────────────────────────────────────────────
        let table = CsvTableLoader::new(&cfg.data_path)
            .with_headers(cfg.has_headers)
            .load_table()?;

        // ── Step 2: Build model ───────────────────────────────────────────────
        if let Some(seed) = cfg.seed {
            TrainBackend::seed(seed);
        }
        let model = cae_create::<TrainBackend>(table.width(), cfg.encoding_size, &device)?;
        tracing::info!(
            "Model ready: {} features → {} encoding",
            table.width(),
            cfg.encoding_size
        );

        // ── Step 3: Train ─────────────────────────────────────────────────────
        let trained = cae_fit(model, &table, &cfg.fit_options(), &device)?;
        let history = trained.losses.unwrap_or_default();

        // ── Step 4: Save checkpoint ───────────────────────────────────────────
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir)?;
        ckpt.save(&trained.model)?;

        // ── Step 5: Metrics ───────────────────────────────────────────────────
        let metrics = MetricsLogger::new(ckpt.dir())?;
        metrics.log_history(&history)?;

        match best_epoch(&history) {
            Some(best) => tracing::info!(
                "Best validation loss {:.6} at epoch {}",
                best.val_loss,
                best.epoch
            ),
            None => tracing::warn!("No validation rows; validation loss was not measured"),
        }

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_execute_writes_checkpoint_and_metrics() {
        let dir  = tempfile::tempdir().unwrap();
        let data = dir.path().join("features.csv");
        let mut csv = String::from("a,b,c,d\n");
        for r in 0..12 {
            let row: Vec<String> = (0..4).map(|c| format!("{:.2}", ((r + c) % 5) as f32 / 5.0)).collect();
            csv.push_str(&row.join(","));
            csv.push('\n');
        }
        fs::write(&data, csv).unwrap();

        let ckpt_dir = dir.path().join("ckpt");
        let config = FitConfig {
            data_path:      data.to_string_lossy().into_owned(),
            checkpoint_dir: ckpt_dir.to_string_lossy().into_owned(),
            encoding_size:  2,
            epochs:         3,
            seed:           Some(11),
            ..FitConfig::default()
        };

        let history = FitUseCase::new(config).execute().unwrap();
        assert_eq!(history.len(), 3);
        assert!(ckpt_dir.join("model_config.json").exists());
        assert!(ckpt_dir.join("model.mpk.gz").exists());

        let metrics = fs::read_to_string(ckpt_dir.join("metrics.csv")).unwrap();
        assert_eq!(metrics.lines().count(), 4);
    }
}
