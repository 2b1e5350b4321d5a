// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the subcommands `fit`, `encode` and `reconstruct`
// and all their configurable flags.

use clap::{Args, Subcommand};

use crate::application::fit_use_case::FitConfig;
use crate::ml::inferencer::DEFAULT_BATCH_SIZE;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train an autoencoder on a numeric CSV table
    Fit(FitArgs),

    /// Write the encoding of every row using a saved model
    Encode(TransformArgs),

    /// Write the encode-then-decode reconstruction of every row
    Reconstruct(TransformArgs),
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// CSV file, one observation per row, one feature per column
    #[arg(long)]
    pub data: String,

    /// The CSV file has no header line
    #[arg(long)]
    pub no_header: bool,

    /// Directory to save the model, its config and metrics.csv
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Width of the compressed representation
    #[arg(long)]
    pub encoding_size: usize,

    /// Rows processed together in one forward/backward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Number of full passes through the training rows
    #[arg(long, default_value_t = 1000)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seed for the validation split and weight initialisation
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Convert CLI FitArgs into the application-layer FitConfig.
/// The application layer never sees clap types.
impl From<FitArgs> for FitConfig {
    fn from(a: FitArgs) -> Self {
        FitConfig {
            data_path:      a.data,
            has_headers:    !a.no_header,
            checkpoint_dir: a.checkpoint_dir,
            encoding_size:  a.encoding_size,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            seed:           a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// CSV file with the same feature columns the model was fit on
    #[arg(long)]
    pub data: String,

    /// The CSV file has no header line
    #[arg(long)]
    pub no_header: bool,

    /// Where to write the resulting CSV
    #[arg(long)]
    pub output: String,

    /// Directory the model was saved to by `fit`
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}
