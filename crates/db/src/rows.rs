//! Serialization of driver result rows into JSON values for the trace.

use serde_json::{Map, Number, Value};
use sqlx::any::AnyRow;
use sqlx::{Column, Row};

/// Convert a batch of rows into one JSON object per row.
pub fn rows_to_json(rows: &[AnyRow]) -> Vec<Value> {
    rows.iter().map(row_to_json).collect()
}

/// Convert one row into a JSON object keyed by column name.
pub fn row_to_json(row: &AnyRow) -> Value {
    let mut object = Map::new();
    for (index, column) in row.columns().iter().enumerate() {
        object.insert(column.name().to_string(), decode_value(row, index));
    }
    Value::Object(object)
}

/// Decode one column position into a JSON value.
///
/// The `Any` driver only reveals the backend's value kind at runtime, so
/// decoding cascades through the types the tour's schema can produce:
/// integers, floating point, booleans, text. NULL and anything undecodable
/// map to JSON null.
fn decode_value(row: &AnyRow, index: usize) -> Value {
    if let Ok(value) = row.try_get::<i64, _>(index) {
        return Value::Number(value.into());
    }
    if let Ok(value) = row.try_get::<f64, _>(index) {
        return Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<bool, _>(index) {
        return Value::Bool(value);
    }
    if let Ok(value) = row.try_get::<String, _>(index) {
        return Value::String(value);
    }
    Value::Null
}
