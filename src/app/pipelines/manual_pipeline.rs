use crate::core::prediction::PredictionService;
use crate::core::{Pipeline, RecordSet, ScoredBatch};
use crate::domain::form::CampaignForm;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Single-campaign flow: form → one-row record set → prediction. Writes nothing.
pub struct ManualPipeline {
    form: CampaignForm,
    service: PredictionService,
}

impl ManualPipeline {
    pub fn new(form: CampaignForm, service: PredictionService) -> Self {
        Self { form, service }
    }
}

#[async_trait::async_trait]
impl Pipeline for ManualPipeline {
    async fn extract(&self) -> Result<RecordSet> {
        self.form.validate()?;
        tracing::debug!("Manual input: {:?}", self.form);
        Ok(self.form.to_record_set())
    }

    async fn transform(&self, data: RecordSet) -> Result<ScoredBatch> {
        let predictions = self.service.predict_batch(data.clone())?;
        if let Some(first) = predictions.first() {
            tracing::info!("🎯 Predicted Outcome: {}", first.label);
        }
        Ok(ScoredBatch {
            records: data,
            predictions,
        })
    }

    async fn load(&self, _result: &ScoredBatch) -> Result<Option<String>> {
        Ok(None)
    }
}
