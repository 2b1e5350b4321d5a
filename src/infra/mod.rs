// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting persistence used by the application layer:
//
//   checkpoint.rs - model weights (Burn CompactRecorder) plus
//                   the JSON model config needed to rebuild it
//   metrics.rs    - per-epoch loss history as CSV
//
// Reference: Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Loss history CSV logger
pub mod metrics;
