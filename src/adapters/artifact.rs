use crate::core::{ExpectedSchema, ModelArtifact, Record, RecordSet};
use crate::domain::model::LABEL_COUNT;
use crate::utils::error::{PredictorError, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// On-disk layout of a multinomial logistic campaign model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// Training column names. Absent for legacy artifacts.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub intercepts: Vec<f64>,
    /// One encoder per input column, in training order.
    pub features: Vec<FeatureEncoder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureEncoder {
    /// Standardised value times one weight per class.
    Numeric {
        mean: f64,
        scale: f64,
        weights: Vec<f64>,
    },
    /// One-hot category weights. Unknown categories contribute nothing.
    Categorical {
        categories: HashMap<String, Vec<f64>>,
    },
}

#[derive(Debug, Clone)]
pub struct LinearModelArtifact {
    name: String,
    schema: Option<ExpectedSchema>,
    intercepts: [f64; LABEL_COUNT],
    features: Vec<FeatureEncoder>,
}

impl LinearModelArtifact {
    /// 從 JSON 檔載入模型，失敗即為致命錯誤
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        tracing::info!("📦 Loading model artifact from: {}", path_str);

        let content = std::fs::read_to_string(path).map_err(|e| PredictorError::ArtifactLoadFailure {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let model = Self::from_json_str(&content).map_err(|e| PredictorError::ArtifactLoadFailure {
            path: path_str.clone(),
            reason: format!("{:#}", e),
        })?;

        tracing::info!(
            "✅ Model '{}' loaded: {} features, schema {}",
            model.name,
            model.features.len(),
            if model.schema.is_some() { "present" } else { "absent" }
        );
        Ok(model)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let spec: LinearModelSpec =
            serde_json::from_str(content).context("model artifact is not valid JSON")?;
        Self::from_spec(spec)
    }

    pub fn from_spec(spec: LinearModelSpec) -> anyhow::Result<Self> {
        let intercepts: [f64; LABEL_COUNT] = spec.intercepts.as_slice().try_into().map_err(|_| {
            anyhow::anyhow!(
                "model has {} classes, expected {}",
                spec.intercepts.len(),
                LABEL_COUNT
            )
        })?;
        ensure!(!spec.features.is_empty(), "model declares no features");

        for (i, feature) in spec.features.iter().enumerate() {
            match feature {
                FeatureEncoder::Numeric {
                    mean,
                    scale,
                    weights,
                } => {
                    ensure!(
                        mean.is_finite() && scale.is_finite() && *scale != 0.0,
                        "feature {}: mean and scale must be finite and scale non-zero",
                        i
                    );
                    ensure!(
                        weights.len() == LABEL_COUNT,
                        "feature {}: expected {} weights, got {}",
                        i,
                        LABEL_COUNT,
                        weights.len()
                    );
                }
                FeatureEncoder::Categorical { categories } => {
                    for (category, weights) in categories {
                        ensure!(
                            weights.len() == LABEL_COUNT,
                            "feature {} category '{}': expected {} weights, got {}",
                            i,
                            category,
                            LABEL_COUNT,
                            weights.len()
                        );
                    }
                }
            }
        }

        let schema = match spec.feature_names {
            Some(names) => {
                ensure!(
                    names.len() == spec.features.len(),
                    "{} feature names for {} features",
                    names.len(),
                    spec.features.len()
                );
                Some(ExpectedSchema::new(names)?)
            }
            None => None,
        };

        Ok(Self {
            name: spec.name.unwrap_or_else(|| "linear_model".to_string()),
            schema,
            intercepts,
            features: spec.features,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn check_shape(&self, records: &RecordSet) -> anyhow::Result<()> {
        if records.columns.len() != self.features.len() {
            bail!(
                "X has {} features, but {} is expecting {} features as input",
                records.columns.len(),
                self.name,
                self.features.len()
            );
        }
        if let Some(schema) = &self.schema {
            if records.columns != schema.columns() {
                bail!("the feature names should match those that were passed during fit");
            }
        }
        Ok(())
    }

    fn row_probabilities(&self, columns: &[String], record: &Record) -> anyhow::Result<[f64; LABEL_COUNT]> {
        let mut logits = self.intercepts;

        for (column, feature) in columns.iter().zip(&self.features) {
            let value = record.get(column).unwrap_or(&Value::Null);
            match feature {
                FeatureEncoder::Numeric {
                    mean,
                    scale,
                    weights,
                } => {
                    // 缺值以平均值補上，標準化後貢獻為零
                    let Some(x) = numeric_value(column, value)? else {
                        continue;
                    };
                    let z = (x - mean) / scale;
                    for (logit, w) in logits.iter_mut().zip(weights) {
                        *logit += z * w;
                    }
                }
                FeatureEncoder::Categorical { categories } => {
                    let key = match value {
                        Value::Null => continue,
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    if let Some(weights) = categories.get(&key) {
                        for (logit, w) in logits.iter_mut().zip(weights) {
                            *logit += w;
                        }
                    }
                }
            }
        }

        Ok(softmax(logits))
    }
}

fn numeric_value(column: &str, value: &Value) -> anyhow::Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .with_context(|| format!("column '{}': number out of range", column)),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Some(x)),
            _ => bail!("could not convert string to float: '{}' (column '{}')", s, column),
        },
        other => bail!("unsupported value {} in numeric column '{}'", other, column),
    }
}

fn softmax(logits: [f64; LABEL_COUNT]) -> [f64; LABEL_COUNT] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = logits.map(|l| (l - max).exp());
    let total: f64 = exps.iter().sum();
    exps.map(|e| e / total)
}

/// Lowest index wins ties.
fn argmax(probabilities: &[f64; LABEL_COUNT]) -> usize {
    let mut best = 0;
    for (i, p) in probabilities.iter().enumerate().skip(1) {
        if *p > probabilities[best] {
            best = i;
        }
    }
    best
}

impl ModelArtifact for LinearModelArtifact {
    fn predict_class(&self, records: &RecordSet) -> anyhow::Result<Vec<usize>> {
        self.check_shape(records)?;
        records
            .iter()
            .map(|record| {
                self.row_probabilities(&records.columns, record)
                    .map(|p| argmax(&p))
            })
            .collect()
    }

    fn predict_probabilities(&self, records: &RecordSet) -> anyhow::Result<Vec<Vec<f64>>> {
        self.check_shape(records)?;
        records
            .iter()
            .map(|record| {
                self.row_probabilities(&records.columns, record)
                    .map(|p| p.to_vec())
            })
            .collect()
    }

    fn expected_schema(&self) -> Option<&ExpectedSchema> {
        self.schema.as_ref()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
