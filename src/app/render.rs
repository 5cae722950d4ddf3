use crate::core::csv_codec::{outcome_layout, outcome_row};
use crate::core::{PredictionResult, ScoredBatch};
use colored::Colorize;
use tabled::{builder::Builder, settings::Style};

const BAR_WIDTH: usize = 40;
const TABLE_PREVIEW_ROWS: usize = 20;

/// 機率長條圖，每個標籤一列
pub fn probability_chart(result: &PredictionResult) -> String {
    result
        .distribution()
        .map(|(label, p)| {
            let filled = (p * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<11} {:<width$} {:>6.2}%",
                label.as_str(),
                "█".repeat(filled.min(BAR_WIDTH)),
                p * 100.0,
                width = BAR_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn single_prediction(result: &PredictionResult) -> String {
    format!(
        "🎯 Predicted Outcome: {}\n\n{}",
        result.label.as_str().green().bold(),
        probability_chart(result)
    )
}

/// Rounded table of the scored rows, outcome column as in the CSV export.
pub fn batch_table(batch: &ScoredBatch) -> String {
    let (header, outcome_index) = outcome_layout(&batch.records.columns);

    let mut builder = Builder::default();
    builder.push_record(header.clone());
    for (record, prediction) in batch.rows().take(TABLE_PREVIEW_ROWS) {
        builder.push_record(outcome_row(&header, outcome_index, record, prediction));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    let mut rendered = table.to_string();

    if batch.len() > TABLE_PREVIEW_ROWS {
        rendered.push_str(&format!("\n... {} more rows", batch.len() - TABLE_PREVIEW_ROWS));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CampaignOutcome, Record, RecordSet};

    #[test]
    fn test_chart_has_one_line_per_label() {
        let result = PredictionResult {
            label: CampaignOutcome::Awareness,
            probabilities: [0.5, 0.25, 0.25],
        };
        let chart = probability_chart(&result);
        let lines: Vec<_> = chart.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Awareness"));
        assert!(lines[0].contains("50.00%"));
        assert_eq!(lines[0].matches('█').count(), 20);
        assert!(lines[2].starts_with("Conversion"));
    }

    fn engagement_batch(record: Record) -> ScoredBatch {
        ScoredBatch {
            records: RecordSet::single(record),
            predictions: vec![PredictionResult {
                label: CampaignOutcome::Engagement,
                probabilities: [0.2, 0.6, 0.2],
            }],
        }
    }

    #[test]
    fn test_batch_table_appends_outcome() {
        let table = batch_table(&engagement_batch(Record::new().with("duration_days", 10)));
        let lines: Vec<_> = table.lines().collect();

        assert!(lines[0].starts_with('╭'));
        assert!(lines[1].contains("duration_days") && lines[1].contains("Predicted Outcome"));
        assert!(lines[3].contains("10") && lines[3].contains("Engagement"));
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[test]
    fn test_batch_table_reuses_existing_outcome_column() {
        let table = batch_table(&engagement_batch(
            Record::new().with("Predicted Outcome", "old").with("duration_days", 5),
        ));

        assert_eq!(table.matches("Predicted Outcome").count(), 1);
        assert!(table.contains("Engagement"));
        assert!(!table.contains("old"));
    }
}
