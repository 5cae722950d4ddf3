pub mod aligner;
pub mod csv_codec;
pub mod engine;
pub mod prediction;
pub mod report;

pub use crate::domain::model::{
    CampaignOutcome, ExpectedSchema, PredictionResult, Record, RecordSet, ScoredBatch,
};
pub use crate::domain::ports::{ConfigProvider, ModelArtifact, Pipeline, Storage};
pub use crate::utils::error::Result;
