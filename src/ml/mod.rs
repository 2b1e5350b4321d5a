// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// All Burn model and training code lives here.
//
//   model.rs      - the convolutional autoencoder
//   trainer.rs    - fixed-epoch training loop and fit entry point
//   inferencer.rs - encode / encode-then-decode over a dataset
//
// The binary picks a concrete backend below; the library
// functions stay generic over any Backend.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Convolutional autoencoder architecture
pub mod model;

/// Training loop and train/validation fit orchestration
pub mod trainer;

/// Batched encode / decode helpers
pub mod inferencer;

#[cfg(not(feature = "wgpu"))]
pub type InferBackend = burn::backend::NdArray;

#[cfg(feature = "wgpu")]
pub type InferBackend = burn::backend::Wgpu;

pub type TrainBackend = burn::backend::Autodiff<InferBackend>;

pub type Device = <InferBackend as burn::tensor::backend::Backend>::Device;
