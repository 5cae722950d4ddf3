use crate::utils::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// 單筆活動設定：欄位名稱 → 純量值，`Value::Null` 代表缺值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 一批記錄與其欄位順序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Column order is taken from the record's own key order.
    pub fn single(record: Record) -> Self {
        let columns = record.data.keys().cloned().collect();
        Self {
            columns,
            records: vec![record],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

/// Ordered, duplicate-free feature names a model was fit on. Cloning shares
/// the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSchema(Arc<[String]>);

impl ExpectedSchema {
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(PredictorError::ValidationError {
                    field: "expected_schema".to_string(),
                    value: column.clone(),
                    reason: "duplicate feature name".to_string(),
                });
            }
        }

        Ok(Self(columns.into()))
    }

    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub const LABEL_COUNT: usize = 3;

/// Closed outcome set. Discriminants are the model's class indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignOutcome {
    Awareness = 0,
    Engagement = 1,
    Conversion = 2,
}

impl CampaignOutcome {
    pub const ALL: [CampaignOutcome; LABEL_COUNT] = [
        CampaignOutcome::Awareness,
        CampaignOutcome::Engagement,
        CampaignOutcome::Conversion,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CampaignOutcome::Awareness => "Awareness",
            CampaignOutcome::Engagement => "Engagement",
            CampaignOutcome::Conversion => "Conversion",
        }
    }
}

impl fmt::Display for CampaignOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: CampaignOutcome,
    /// Indexed by `CampaignOutcome::index`.
    pub probabilities: [f64; LABEL_COUNT],
}

impl PredictionResult {
    pub fn probability(&self, outcome: CampaignOutcome) -> f64 {
        self.probabilities[outcome.index()]
    }

    pub fn distribution(&self) -> impl Iterator<Item = (CampaignOutcome, f64)> + '_ {
        CampaignOutcome::ALL
            .into_iter()
            .map(move |outcome| (outcome, self.probabilities[outcome.index()]))
    }
}

/// 預測完成的批次：原始輸入與逐列結果
#[derive(Debug, Clone)]
pub struct ScoredBatch {
    pub records: RecordSet,
    pub predictions: Vec<PredictionResult>,
}

impl ScoredBatch {
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&Record, &PredictionResult)> {
        self.records.records.iter().zip(self.predictions.iter())
    }
}
