//! Property-based tests for alignment and prediction serving
//!
//! - Alignment is structural: schema width and order on every row
//! - Serving preserves row order and the closed label set
//! - Run with ProptestConfig::with_cases(100)

use campaign_predictor::core::{CampaignOutcome, ExpectedSchema, ModelArtifact, Record, RecordSet};
use campaign_predictor::{align, LinearModelArtifact, PredictionService};
use proptest::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Strategies
// ============================================================================

const FEATURES: &[&str] = &[
    "target_gender",
    "target_age_group",
    "target_interests",
    "duration_days",
    "total_budget",
    "ad_platform",
    "ad_type",
    "time_of_day",
    "campaign_id",
    "region",
];

const NUMERIC: &[&str] = &["duration_days", "total_budget"];

/// Numeric features get numbers or gaps; everything else may also be text.
fn arb_value(column: &str) -> BoxedStrategy<Value> {
    if NUMERIC.contains(&column) {
        prop_oneof![Just(Value::Null), (1u64..=100_000).prop_map(Value::from)].boxed()
    } else {
        prop_oneof![
            Just(Value::Null),
            (1u64..=60).prop_map(Value::from),
            prop::sample::select(vec!["Male", "Female", "Video", "Story", "Google", "Night", "Fashion"])
                .prop_map(Value::from),
        ]
        .boxed()
    }
}

/// Record set over a random subset of feature names, in random order.
fn arb_record_set() -> impl Strategy<Value = RecordSet> {
    prop::sample::subsequence(FEATURES.to_vec(), 0..=FEATURES.len())
        .prop_shuffle()
        .prop_flat_map(|columns| {
            let row: Vec<BoxedStrategy<Value>> = columns.iter().map(|c| arb_value(c)).collect();
            (Just(columns), prop::collection::vec(row, 0..20))
        })
        .prop_map(|(columns, rows)| {
            let records = rows
                .into_iter()
                .map(|values| {
                    columns
                        .iter()
                        .zip(values)
                        .fold(Record::new(), |record, (column, value)| record.with(*column, value))
                })
                .collect();
            RecordSet::new(columns.iter().map(|c| c.to_string()).collect(), records)
        })
}

fn arb_schema() -> impl Strategy<Value = ExpectedSchema> {
    prop::sample::subsequence(FEATURES.to_vec(), 0..=FEATURES.len())
        .prop_shuffle()
        .prop_map(|columns| ExpectedSchema::new(columns).unwrap())
}

fn shipped_model() -> Arc<LinearModelArtifact> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/campaign_event_model.json");
    Arc::new(LinearModelArtifact::load(path).unwrap())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every aligned row has exactly the schema's columns, in order
    #[test]
    fn prop_align_matches_schema(records in arb_record_set(), schema in arb_schema()) {
        let aligned = align(records.clone(), Some(&schema));

        prop_assert_eq!(aligned.len(), records.len());
        prop_assert_eq!(aligned.columns.as_slice(), schema.columns());
        for (row, original) in aligned.iter().zip(records.iter()) {
            let keys: Vec<&String> = row.data.keys().collect();
            let expected: Vec<&String> = schema.columns().iter().collect();
            prop_assert_eq!(keys, expected);

            for column in schema.columns() {
                let value = row.get(column).unwrap();
                match original.get(column) {
                    Some(v) => {
                        prop_assert_eq!(value, v);
                    }
                    None => {
                        prop_assert!(value.is_null());
                    }
                }
            }
        }
    }

    /// Property: without a schema, alignment is the identity
    #[test]
    fn prop_align_without_schema_is_identity(records in arb_record_set()) {
        prop_assert_eq!(align(records.clone(), None), records);
    }

    /// Property: serving returns one result per row, labels closed, probabilities normalised
    #[test]
    fn prop_predict_batch_contract(records in arb_record_set()) {
        prop_assume!(!records.is_empty());
        let model = shipped_model();
        let service = PredictionService::new(model.clone());

        let results = service.predict_batch(records.clone()).unwrap();
        prop_assert_eq!(results.len(), records.len());

        for result in &results {
            prop_assert!(CampaignOutcome::ALL.contains(&result.label));
            let total: f64 = result.probabilities.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-6);
            prop_assert!(result.probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
        }

        // Row i of the batch matches row i predicted on its own.
        for (i, record) in records.iter().enumerate() {
            let single = RecordSet::new(records.columns.clone(), vec![record.clone()]);
            let alone = service.predict_batch(single).unwrap();
            prop_assert_eq!(&alone[0], &results[i]);
        }

        let again = service.predict_batch(records).unwrap();
        prop_assert_eq!(again, results);
        prop_assert!(model.expected_schema().is_some());
    }
}
