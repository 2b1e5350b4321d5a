// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case. Printing final summaries happens here only.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, FitArgs, TransformArgs};

use crate::application::{
    encode_use_case::{EncodeUseCase, Transform},
    fit_use_case::FitUseCase,
};

#[derive(Parser, Debug)]
#[command(
    name = "cae",
    version,
    about = "Train a 1D convolutional autoencoder on tabular feature vectors, then encode or reconstruct them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Fit(args)         => run_fit(args),
            Commands::Encode(args)      => run_transform(args, Transform::Encode),
            Commands::Reconstruct(args) => run_transform(args, Transform::Reconstruct),
        }
    }
}

fn run_fit(args: FitArgs) -> Result<()> {
    tracing::info!("Fitting autoencoder on '{}'", args.data);
    let checkpoint_dir = args.checkpoint_dir.clone();

    let history = FitUseCase::new(args.into()).execute()?;

    match (history.train.last(), history.validation.last()) {
        (Some(train), Some(val)) => println!(
            "Trained {} epochs | train_loss={:.6} | val_loss={:.6}",
            history.len(), train, val
        ),
        _ => println!("No epochs were run."),
    }
    println!("Model saved to '{checkpoint_dir}'.");
    Ok(())
}

fn run_transform(args: TransformArgs, transform: Transform) -> Result<()> {
    let use_case = EncodeUseCase::new(&args.checkpoint_dir)?;
    let result   = use_case.run(
        &args.data,
        !args.no_header,
        &args.output,
        transform,
        args.batch_size,
    )?;
    println!(
        "Wrote {} rows x {} columns to '{}'.",
        result.len(),
        result.width(),
        args.output
    );
    Ok(())
}
