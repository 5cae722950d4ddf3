pub mod batch_pipeline;
pub mod manual_pipeline;

pub use batch_pipeline::BatchPipeline;
pub use manual_pipeline::ManualPipeline;
