// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between a CSV file and model-ready tensors:
//
//   .csv file
//       │
//       ▼
//   CsvTableLoader         → SampleTable (rows x features)
//       │
//       ▼
//   split_train_val        → training / validation row indices
//       │
//       ▼
//   ReconstructionDataset  → implements Burn's Dataset trait
//       │
//       ▼
//   ReconstructionBatcher  → stacks pairs into [batch, features, 1]
//       │
//       ▼
//   DataLoader             → feeds batches to training / encoding
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads / writes numeric CSV tables
pub mod loader;

/// Implements Burn's Dataset trait for (input, target) pairs
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Samples the validation rows
pub mod splitter;
