use campaign_predictor::core::aligner::align;
use campaign_predictor::core::csv_codec::parse_records;
use campaign_predictor::core::{CampaignOutcome, ConfigProvider, ModelArtifact};
use campaign_predictor::{
    BatchPipeline, CampaignForm, LinearModelArtifact, LocalStorage, ManualPipeline, PredictionEngine,
    PredictionService, PredictorError,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

struct TestConfig {
    output_path: String,
    formats: Vec<String>,
}

impl ConfigProvider for TestConfig {
    fn model_path(&self) -> &str {
        "models/campaign_event_model.json"
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }
}

fn model_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("models/campaign_event_model.json")
}

fn load_model() -> Arc<LinearModelArtifact> {
    Arc::new(LinearModelArtifact::load(model_path()).unwrap())
}

fn batch_pipeline(
    dir: &TempDir,
    upload: &str,
    formats: &[&str],
) -> BatchPipeline<LocalStorage, TestConfig> {
    std::fs::write(dir.path().join("upload.csv"), upload).unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap());
    let config = TestConfig {
        output_path: "output".to_string(),
        formats: formats.iter().map(|f| f.to_string()).collect(),
    };
    BatchPipeline::new(storage, config, PredictionService::new(load_model()), "upload.csv")
}

#[test]
fn test_shipped_model_exposes_eight_column_schema() {
    let model = load_model();
    let schema = model.expected_schema().unwrap();
    assert_eq!(schema.len(), 8);
    assert_eq!(schema.columns()[0], "target_gender");
    assert_eq!(schema.columns()[7], "time_of_day");
}

#[tokio::test]
async fn test_partial_upload_is_padded_and_predicted() {
    let model = load_model();
    let records = parse_records(b"duration_days,total_budget\n10,5000\n60,100000\n").unwrap();

    let aligned = align(records.clone(), model.expected_schema());
    assert_eq!(aligned.columns.len(), 8);
    for row in aligned.iter() {
        assert_eq!(row.len(), 8);
        assert_eq!(row.data.values().filter(|v| v.is_null()).count(), 6);
    }

    let service = PredictionService::new(model);
    let results = service.predict_batch(records).unwrap();
    assert_eq!(results.len(), 2);
    assert!(CampaignOutcome::ALL.contains(&results[0].label));
    assert_eq!(results[1].label, CampaignOutcome::Conversion);
}

#[tokio::test]
async fn test_manual_form_yields_single_valid_prediction() {
    let form = CampaignForm {
        target_gender: "Male".to_string(),
        target_age_group: "18-24".to_string(),
        target_interests: "Fashion".to_string(),
        duration_days: 10,
        total_budget: 5000,
        ad_platform: "Facebook".to_string(),
        ad_type: "Video".to_string(),
        time_of_day: "Morning".to_string(),
    };
    let engine = PredictionEngine::new(ManualPipeline::new(form, PredictionService::new(load_model())));

    let report = engine.run().await.unwrap();

    assert_eq!(report.batch.len(), 1);
    assert!(report.output_path.is_none());
    let result = &report.batch.predictions[0];
    assert!(CampaignOutcome::ALL.contains(&result.label));
    let total: f64 = result.probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_empty_upload_stops_before_export() {
    let dir = TempDir::new().unwrap();
    let pipeline = batch_pipeline(&dir, "duration_days,total_budget\n", &["csv"]);

    let err = PredictionEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, PredictorError::EmptyInput));
    assert!(!dir.path().join("output").join("predictions.csv").exists());
}

#[tokio::test]
async fn test_export_appends_predicted_outcome_column() {
    let dir = TempDir::new().unwrap();
    let upload =
        std::fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/campaigns.csv"))
            .unwrap();
    let pipeline = batch_pipeline(&dir, &upload, &["csv", "json"]);

    let report = PredictionEngine::new(pipeline).run().await.unwrap();
    assert_eq!(report.batch.len(), 3);

    let exported = std::fs::read(dir.path().join("output").join("predictions.csv")).unwrap();
    let text = String::from_utf8(exported).expect("export is UTF-8");
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let original: Vec<&str> = upload.lines().next().unwrap().split(',').collect();
    assert_eq!(headers.len(), original.len() + 1);
    assert_eq!(&headers[..original.len()], original.as_slice());
    assert_eq!(headers.last().unwrap(), "Predicted Outcome");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    for (row, prediction) in rows.iter().zip(&report.batch.predictions) {
        assert_eq!(&row[headers.len() - 1], prediction.label.as_str());
    }
    assert_eq!(&rows[0][0], "C-001");

    let json: Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("output").join("predictions.json")).unwrap()).unwrap();
    assert_eq!(json["rows"], 3);
    assert_eq!(json["model"], "campaign_event_model");
}

#[tokio::test]
async fn test_schema_less_model_rejects_mismatched_columns() {
    let mut spec: Value = serde_json::from_slice(&std::fs::read(model_path()).unwrap()).unwrap();
    spec.as_object_mut().unwrap().remove("feature_names");
    let legacy = LinearModelArtifact::from_json_str(&spec.to_string()).unwrap();
    assert!(legacy.expected_schema().is_none());

    let service = PredictionService::new(Arc::new(legacy));
    let records = parse_records(b"duration_days,total_budget\n10,5000\n").unwrap();

    let err = service.predict_batch(records).unwrap_err();
    match err {
        PredictorError::SchemaMismatch { reason } => assert!(reason.contains("expecting 8 features")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_na_cells_are_treated_as_missing() {
    let service = PredictionService::new(load_model());
    let records = parse_records(b"duration_days,total_budget,ad_type\nNaN,5000,N/A\n").unwrap();

    let results = service.predict_batch(records).unwrap();

    assert_eq!(results.len(), 1);
    let total: f64 = results[0].probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_malformed_upload_is_reported_before_prediction() {
    let dir = TempDir::new().unwrap();
    let pipeline = batch_pipeline(&dir, "duration_days,total_budget\n10\n", &["csv"]);

    let err = PredictionEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, PredictorError::MalformedUpload { .. }));
}

#[test]
fn test_missing_model_is_artifact_load_failure() {
    let err = LinearModelArtifact::load("models/nope.json").unwrap_err();
    assert!(matches!(err, PredictorError::ArtifactLoadFailure { .. }));
}
