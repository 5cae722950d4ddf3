use crate::domain::model::{ExpectedSchema, Record, RecordSet};
use serde_json::{Map, Value};

/// Reshape `records` to the column layout a model was fit on.
///
/// With a schema, every output row holds exactly the schema's columns in the
/// schema's order. Values are copied untouched, absent columns become
/// `Value::Null`, and columns the schema does not name are dropped. Without a
/// schema the input is returned as-is.
pub fn align(records: RecordSet, expected_schema: Option<&ExpectedSchema>) -> RecordSet {
    let Some(schema) = expected_schema else {
        return records;
    };

    let aligned = records
        .records
        .into_iter()
        .map(|record| align_record(record, schema))
        .collect();

    RecordSet::new(schema.columns().to_vec(), aligned)
}

fn align_record(mut record: Record, schema: &ExpectedSchema) -> Record {
    let mut data = Map::with_capacity(schema.len());
    for column in schema.columns() {
        let value = record.data.remove(column).unwrap_or(Value::Null);
        data.insert(column.clone(), value);
    }
    Record { data }
}
