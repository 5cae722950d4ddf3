use crate::domain::model::{ExpectedSchema, RecordSet, ScoredBatch};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn csv_filename(&self) -> &str {
        "predictions.csv"
    }
    fn json_filename(&self) -> &str {
        "predictions.json"
    }
}

/// A frozen, previously-trained classifier.
///
/// Implementations never mutate themselves after loading, so one instance is
/// shared read-only across every prediction run. Both prediction methods must
/// return one entry per input row, in input order. An `Err` means the model
/// rejected the input shape.
pub trait ModelArtifact: Send + Sync {
    fn predict_class(&self, records: &RecordSet) -> anyhow::Result<Vec<usize>>;

    fn predict_probabilities(&self, records: &RecordSet) -> anyhow::Result<Vec<Vec<f64>>>;

    /// Feature names the model was fit on, when the artifact records them.
    fn expected_schema(&self) -> Option<&ExpectedSchema> {
        None
    }

    fn name(&self) -> &str {
        "model"
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RecordSet>;
    async fn transform(&self, data: RecordSet) -> Result<ScoredBatch>;
    /// Returns the export location, if the pipeline writes one.
    async fn load(&self, result: &ScoredBatch) -> Result<Option<String>>;
}
