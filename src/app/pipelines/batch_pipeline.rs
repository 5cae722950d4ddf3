use crate::core::csv_codec::{export_predictions, format_cell, parse_records};
use crate::core::prediction::PredictionService;
use crate::core::report::PredictionReport;
use crate::core::{ConfigProvider, Pipeline, RecordSet, ScoredBatch, Storage};
use crate::utils::error::Result;
use std::path::Path;

/// CSV 上傳流程：讀檔 → 預測 → 匯出
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) service: PredictionService,
    pub(crate) input_path: String,
    pub(crate) preview_rows: usize,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C, service: PredictionService, input_path: impl Into<String>) -> Self {
        Self {
            storage,
            config,
            service,
            input_path: input_path.into(),
            preview_rows: 5,
        }
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    fn output_file(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }

    fn log_preview(&self, records: &RecordSet) {
        for (i, record) in records.head(self.preview_rows).iter().enumerate() {
            let cells: Vec<String> = records
                .columns
                .iter()
                .map(|c| record.get(c).map(format_cell).unwrap_or_default())
                .collect();
            tracing::info!("👀 Row {}: {}", i, cells.join(", "));
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    async fn extract(&self) -> Result<RecordSet> {
        tracing::info!("📂 Reading campaign dataset from: {}", self.input_path);
        let bytes = self.storage.read_file(&self.input_path).await?;
        let records = parse_records(&bytes)?;

        tracing::info!(
            "📋 Uploaded {} rows with columns: {}",
            records.len(),
            records.columns.join(", ")
        );
        self.log_preview(&records);
        Ok(records)
    }

    async fn transform(&self, data: RecordSet) -> Result<ScoredBatch> {
        tracing::info!("🔧 Predicting {} rows with model '{}'", data.len(), self.service.model().name());
        let predictions = self.service.predict_batch(data.clone())?;
        Ok(ScoredBatch {
            records: data,
            predictions,
        })
    }

    async fn load(&self, result: &ScoredBatch) -> Result<Option<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (filename, bytes) = match format.as_str() {
                "csv" => (self.config.csv_filename(), export_predictions(result)?),
                "json" => (
                    self.config.json_filename(),
                    PredictionReport::from_batch(result, self.service.model().name())
                        .to_json_bytes()?,
                ),
                other => {
                    tracing::warn!("Skipping unsupported output format: {}", other);
                    continue;
                }
            };

            let path = self.output_file(filename);
            tracing::debug!("Writing {} ({} bytes)", path, bytes.len());
            self.storage.write_file(&path, &bytes).await?;
            written.push(path);
        }

        tracing::info!("💾 Wrote {} output file(s)", written.len());
        Ok(written.into_iter().next())
    }
}
