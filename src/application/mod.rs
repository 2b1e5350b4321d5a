// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Workflow coordination only: load files, call the ML layer,
// persist results. No model math and no printing here.

// Train from a CSV table and save a checkpoint
pub mod fit_use_case;

// Encode / reconstruct a CSV table with a saved checkpoint
pub mod encode_use_case;
