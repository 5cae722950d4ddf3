use crate::core::{Pipeline, ScoredBatch};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug)]
pub struct RunReport {
    pub batch: ScoredBatch,
    pub output_path: Option<String>,
}

pub struct PredictionEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> PredictionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// One align → predict → export pass. Errors stop the run before export.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting prediction run");
        self.monitor.log_stats("Start");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} records", records.len());
        self.monitor.log_stats("Extract");

        // Predict
        let batch = self.pipeline.transform(records).await?;
        tracing::info!("🎯 Predicted {} records", batch.len());
        self.monitor.log_stats("Predict");

        // Export
        let output_path = self.pipeline.load(&batch).await?;
        if let Some(path) = &output_path {
            tracing::info!("📁 Output saved to: {}", path);
        }
        self.monitor.log_stats("Export");
        self.monitor.log_final_stats();

        Ok(RunReport { batch, output_path })
    }
}
