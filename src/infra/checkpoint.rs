// ============================================================
// Layer 6 - Checkpoint Manager
// ============================================================
// Saves and restores a trained autoencoder.
//
// What gets saved:
//   1. Model weights (model.mpk.gz), Burn's CompactRecorder
//   2. model_config.json, the architecture needed to rebuild
//      the module before its weights can be loaded into it
//
// Layout:
//   checkpoints/
//     model.mpk.gz
//     model_config.json
//     metrics.csv        ← written by MetricsLogger
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{bail, Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ml::model::{ConvAutoencoder, ConvAutoencoderConfig};

const MODEL_FILE:  &str = "model";
const CONFIG_FILE: &str = "model_config.json";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Creates the directory (and parents) if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create checkpoint dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Opens an existing checkpoint directory without touching the filesystem.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            bail!(
                "Checkpoint dir '{}' does not exist. Have you run 'fit' first?",
                dir.display()
            );
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the weights and the config needed to rebuild the model.
    pub fn save<B: Backend>(&self, model: &ConvAutoencoder<B>) -> Result<()> {
        self.save_config(&model.config())?;

        // The recorder appends its own extension
        let path = self.dir.join(MODEL_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::info!("Saved model to '{}'", self.dir.display());
        Ok(())
    }

    /// Rebuild the model from its saved config, then load the saved weights.
    pub fn restore<B: Backend>(&self, device: &B::Device) -> Result<ConvAutoencoder<B>> {
        let cfg   = self.load_config()?;
        let model = cfg.init::<B>(device);

        let path   = self.dir.join(MODEL_FILE);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load model '{}'. Have you run 'fit' first?", path.display())
            })?;

        tracing::info!(
            "Restored model ({} → {} features) from '{}'",
            cfg.input_size,
            cfg.encoding_size,
            self.dir.display()
        );
        Ok(model.load_record(record))
    }

    pub fn save_config(&self, cfg: &ConvAutoencoderConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved model config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<ConvAutoencoderConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. Make sure you have run 'fit' first.",
                    path.display()
                )
            })?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::ml::model::cae_create;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_save_then_restore() {
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path().join("ckpt")).unwrap();
        let device = Default::default();

        let model: ConvAutoencoder<TestBackend> = cae_create(6, 3, &device).unwrap();
        ckpt.save(&model).unwrap();

        let restored: ConvAutoencoder<TestBackend> = ckpt.restore(&device).unwrap();
        assert_eq!(restored.input_size, 6);
        assert_eq!(restored.encoding_size, 3);

        let x = Tensor::<TestBackend, 3>::ones([2, 6, 1], &device) * 0.5;
        let before = model.forward(x.clone()).into_data().to_vec::<f32>().unwrap();
        let after  = restored.forward(x).into_data().to_vec::<f32>().unwrap();
        // CompactRecorder stores half precision
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-2);
        }
    }

    #[test]
    fn test_restore_without_fit_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();
        assert!(ckpt.restore::<TestBackend>(&Default::default()).is_err());
    }

    #[test]
    fn test_open_missing_dir_does_not_create_it() {
        let dir     = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(CheckpointManager::open(&missing).is_err());
        assert!(!missing.exists());
    }

    #[test]
    fn test_open_restores_saved_model() {
        let dir    = tempfile::tempdir().unwrap();
        let device = Default::default();
        let model: ConvAutoencoder<TestBackend> = cae_create(4, 2, &device).unwrap();
        CheckpointManager::new(dir.path()).unwrap().save(&model).unwrap();

        let restored: ConvAutoencoder<TestBackend> =
            CheckpointManager::open(dir.path()).unwrap().restore(&device).unwrap();
        assert_eq!((restored.input_size, restored.encoding_size), (4, 2));
    }
}
