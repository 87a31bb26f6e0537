//! One parsed input row as a fixed set of typed column values.

use serde::{Deserialize, Serialize};

use crate::schema::{Schema, Value};

/// A typed row. Values are stored in schema order, exactly one per
/// column, and never change after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// Build a record from raw fields under a resolved schema.
    ///
    /// Total for any input shape: a missing trailing field reads as the
    /// empty string, surplus fields are ignored.
    pub fn from_fields(schema: &Schema, fields: &[String]) -> Self {
        let values = schema
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let raw = fields.get(i).map(String::as_str).unwrap_or("");
                Value::parse(raw, column.ty)
            })
            .collect();
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ColumnType};

    fn schema() -> Schema {
        Schema::new(vec![
            Column::new("id", ColumnType::Double),
            Column::new("name", ColumnType::String),
            Column::new("active", ColumnType::Boolean),
        ])
    }

    #[test]
    fn given_full_row_when_building_then_types_every_cell() {
        let record = Record::from_fields(
            &schema(),
            &["7".to_string(), "node".to_string(), "TRUE".to_string()],
        );

        assert_eq!(record.len(), 3);
        assert_eq!(record.value(0).and_then(Value::as_double), Some(7.0));
        assert_eq!(record.value(1).and_then(Value::as_text), Some("node"));
        assert_eq!(record.value(2).and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn given_short_row_when_building_then_missing_fields_read_empty() {
        let record = Record::from_fields(&schema(), &["1".to_string()]);

        assert_eq!(record.len(), 3);
        assert!(record.value(0).and_then(Value::as_double).is_some());
        assert_eq!(record.value(1).and_then(Value::as_text), Some(""));
        assert_eq!(record.value(2).and_then(Value::as_bool), Some(false));
    }

    #[test]
    fn given_long_row_when_building_then_surplus_fields_ignored() {
        let record = Record::from_fields(
            &schema(),
            &[
                "1".to_string(),
                "a".to_string(),
                "true".to_string(),
                "extra".to_string(),
            ],
        );

        assert_eq!(record.len(), 3);
    }
}
