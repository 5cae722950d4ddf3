use crate::domain::model::{CampaignOutcome, ScoredBatch};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct PredictionReport {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub rows: usize,
    pub predictions: Vec<RowPrediction>,
}

#[derive(Debug, Serialize)]
pub struct RowPrediction {
    pub row: usize,
    pub label: CampaignOutcome,
    /// Keyed by label, in label order.
    pub probabilities: Map<String, Value>,
}

impl PredictionReport {
    pub fn from_batch(batch: &ScoredBatch, model: &str) -> Self {
        let predictions = batch
            .predictions
            .iter()
            .enumerate()
            .map(|(row, prediction)| RowPrediction {
                row,
                label: prediction.label,
                probabilities: prediction
                    .distribution()
                    .map(|(label, p)| (label.as_str().to_string(), Value::from(p)))
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            model: model.to_string(),
            rows: batch.len(),
            predictions,
        }
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
