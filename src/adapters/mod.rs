// Adapters layer: concrete implementations for external systems (model files, storage).

pub mod artifact;
pub mod storage;
