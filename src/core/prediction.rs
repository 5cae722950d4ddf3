use crate::core::aligner::align;
use crate::domain::model::{CampaignOutcome, PredictionResult, RecordSet, LABEL_COUNT};
use crate::domain::ports::ModelArtifact;
use crate::utils::error::{PredictorError, Result};
use std::sync::Arc;

pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Aligns records to the injected model and labels its output.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn ModelArtifact>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn ModelArtifact>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn ModelArtifact {
        self.model.as_ref()
    }

    /// Predict every row of `records`. Output row `i` belongs to input row `i`.
    pub fn predict_batch(&self, records: RecordSet) -> Result<Vec<PredictionResult>> {
        if records.is_empty() {
            return Err(PredictorError::EmptyInput);
        }

        let row_count = records.len();
        let aligned = align(records, self.model.expected_schema());
        tracing::debug!(
            "Aligned {} rows to {} columns (schema: {})",
            aligned.len(),
            aligned.columns.len(),
            if self.model.expected_schema().is_some() { "model" } else { "input" }
        );

        let classes = self
            .model
            .predict_class(&aligned)
            .map_err(|e| PredictorError::SchemaMismatch {
                reason: format!("{:#}", e),
            })?;
        let probabilities = self
            .model
            .predict_probabilities(&aligned)
            .map_err(|e| PredictorError::SchemaMismatch {
                reason: format!("{:#}", e),
            })?;

        if classes.len() != row_count || probabilities.len() != row_count {
            return Err(PredictorError::InvalidModelOutput {
                reason: format!(
                    "expected {} rows, model returned {} classes and {} probability vectors",
                    row_count,
                    classes.len(),
                    probabilities.len()
                ),
            });
        }

        classes
            .into_iter()
            .zip(probabilities)
            .enumerate()
            .map(|(row, (class, distribution))| label_row(row, class, &distribution))
            .collect()
    }
}

fn label_row(row: usize, class: usize, distribution: &[f64]) -> Result<PredictionResult> {
    let label = CampaignOutcome::from_index(class).ok_or_else(|| PredictorError::InvalidModelOutput {
        reason: format!("row {}: class index {} is outside the label set", row, class),
    })?;

    let probabilities: [f64; LABEL_COUNT] = distribution.try_into().map_err(|_| {
        PredictorError::InvalidModelOutput {
            reason: format!(
                "row {}: expected {} probabilities, got {}",
                row,
                LABEL_COUNT,
                distribution.len()
            ),
        }
    })?;

    if probabilities
        .iter()
        .any(|p| !p.is_finite() || *p < 0.0 || *p > 1.0)
    {
        return Err(PredictorError::InvalidModelOutput {
            reason: format!("row {}: probabilities {:?} are outside [0, 1]", row, probabilities),
        });
    }

    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(PredictorError::InvalidModelOutput {
            reason: format!("row {}: probabilities sum to {}", row, total),
        });
    }

    Ok(PredictionResult {
        label,
        probabilities,
    })
}
