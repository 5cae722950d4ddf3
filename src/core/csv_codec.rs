use crate::domain::model::{PredictionResult, Record, RecordSet, ScoredBatch};
use crate::utils::error::{PredictorError, Result};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

pub const PREDICTED_OUTCOME_COLUMN: &str = "Predicted Outcome";

/// 解析上傳的 CSV：首列為欄位名稱，其餘每列為一筆記錄
pub fn parse_records(bytes: &[u8]) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut seen = HashSet::with_capacity(columns.len());
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(PredictorError::MalformedUpload {
                reason: format!("duplicate column '{}'", column),
            });
        }
    }

    let mut records = Vec::new();
    // 欄位數不一致時 csv reader 會回報錯誤
    for row in reader.records() {
        let row = row.map_err(malformed)?;
        let mut data = Map::with_capacity(columns.len());
        for (column, cell) in columns.iter().zip(row.iter()) {
            data.insert(column.clone(), parse_cell(cell));
        }
        records.push(Record { data });
    }

    tracing::debug!("Parsed {} rows with columns {:?}", records.len(), columns);
    Ok(RecordSet::new(columns, records))
}

fn malformed(e: csv::Error) -> PredictorError {
    PredictorError::MalformedUpload {
        reason: e.to_string(),
    }
}

/// Cell text read as a missing value, in addition to the empty cell.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Empty and NA cells are missing; integer and float text become numbers.
fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() || NA_TOKENS.contains(&trimmed) {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(cell.to_string())
}

pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Header of a scored table and the position of its outcome column. An
/// existing `Predicted Outcome` column is reused rather than repeated.
pub fn outcome_layout(columns: &[String]) -> (Vec<String>, usize) {
    let mut header = columns.to_vec();
    match header.iter().position(|c| c == PREDICTED_OUTCOME_COLUMN) {
        Some(index) => (header, index),
        None => {
            header.push(PREDICTED_OUTCOME_COLUMN.to_string());
            let index = header.len() - 1;
            (header, index)
        }
    }
}

pub fn outcome_row(
    header: &[String],
    outcome_index: usize,
    record: &Record,
    prediction: &PredictionResult,
) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if i == outcome_index {
                prediction.label.as_str().to_string()
            } else {
                record.get(column).map(format_cell).unwrap_or_default()
            }
        })
        .collect()
}

/// Original columns plus the predicted label, one output row per input row.
///
/// An input that already carries a `Predicted Outcome` column has it
/// overwritten in place.
pub fn export_predictions(batch: &ScoredBatch) -> Result<Vec<u8>> {
    let (header, outcome_index) = outcome_layout(&batch.records.columns);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for (record, prediction) in batch.rows() {
        writer.write_record(outcome_row(&header, outcome_index, record, prediction))?;
    }

    writer
        .into_inner()
        .map_err(|e| PredictorError::IoError(e.into_error()))
}
