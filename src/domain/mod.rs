// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works on. No burn types, no file I/O.
//
//   table.rs   - the rectangular sample table fed to the model
//   history.rs - per-epoch train / validation loss sequences
//   traits.rs  - conversions into a table, table sources

/// Rectangular `f32` sample table (rows x features)
pub mod table;

/// Train / validation loss history
pub mod history;

/// Core abstractions that other layers implement
pub mod traits;
