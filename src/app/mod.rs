pub mod pipelines;
pub mod render;
