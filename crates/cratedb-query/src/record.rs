use serde_json::Value as Json;

use crate::data_type::{ColumnType, DataType};
use crate::value::{Storage, Value};

/// One decoded row of a [`QueryResult`](crate::QueryResult).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// Decodes a row fragment such as `[7,"Calvin"]`.
    ///
    /// `names` and `types` are matched by position and may be shorter or
    /// longer than the row. Missing entries become an empty name and
    /// `NotSupported`. A fragment that is not a JSON array yields an empty
    /// record.
    pub fn new(row: &str, names: &[String], types: &[ColumnType]) -> Self {
        let items = match serde_json::from_str::<Json>(row) {
            Ok(Json::Array(items)) => items,
            _ => return Self::default(),
        };

        let values = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let name = names.get(i).cloned().unwrap_or_default();
                let column_type = types.get(i).cloned().unwrap_or_default();
                decode_value(name, column_type, item)
            })
            .collect();

        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `pos`, or an invalid value when out of range.
    pub fn value(&self, pos: usize) -> Value {
        self.values.get(pos).cloned().unwrap_or_default()
    }

    /// First value whose column is named `name`, or an invalid value.
    pub fn value_by_name(&self, name: &str) -> Value {
        self.values
            .iter()
            .find(|v| v.name() == name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn decode_value(name: String, column_type: ColumnType, item: &Json) -> Value {
    if let Json::Number(n) = item {
        if let Some(storage) = numeric_storage(column_type.data_type(), n) {
            return Value::new(name, column_type, storage);
        }
    }

    let storage = match item {
        Json::Null => return Value::null(name, column_type),
        Json::String(s) => Storage::String(s.clone()),
        Json::Bool(b) => Storage::Bool(*b),
        // Objects, arrays and numbers that don't fit the declared type
        // keep their JSON text.
        other => Storage::String(other.to_string()),
    };
    Value::new(name, column_type, storage)
}

/// Native storage for a number token, if the token kind satisfies the
/// declared type. Integer targets require an integer token that fits;
/// floating targets require a floating-point token.
fn numeric_storage(data_type: DataType, n: &serde_json::Number) -> Option<Storage> {
    match data_type {
        DataType::Byte | DataType::Short => n
            .as_i64()
            .and_then(|v| i16::try_from(v).ok())
            .map(Storage::Int16),
        DataType::Integer => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Storage::Int32),
        DataType::Long | DataType::Timestamp => n.as_i64().map(Storage::Int64),
        DataType::Double if n.is_f64() => n.as_f64().map(Storage::Double),
        DataType::Float if n.is_f64() => n.as_f64().map(|f| Storage::Float(f as f32)),
        _ => None,
    }
}
