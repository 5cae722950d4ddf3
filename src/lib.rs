pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{artifact::LinearModelArtifact, storage::LocalStorage};
pub use app::pipelines::{BatchPipeline, ManualPipeline};
pub use core::{aligner::align, engine::PredictionEngine, prediction::PredictionService};
pub use domain::form::CampaignForm;
pub use utils::error::{PredictorError, Result};
