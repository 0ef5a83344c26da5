/// Column type as reported by the server in `col_types`.
///
/// The discriminants are the wire codes used by the `/_sql?types` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum DataType {
    Null = 0,
    #[default]
    NotSupported = 1,
    Byte = 2,
    Boolean = 3,
    String = 4,
    Ip = 5,
    Double = 6,
    Float = 7,
    Short = 8,
    Integer = 9,
    Long = 10,
    Timestamp = 11,
    Object = 12,
    GeoPoint = 13,
    GeoShape = 14,
    Array = 100,
    Set = 101,
}

impl DataType {
    /// Maps a wire code to a type. Unknown codes become `NotSupported`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => DataType::Null,
            1 => DataType::NotSupported,
            2 => DataType::Byte,
            3 => DataType::Boolean,
            4 => DataType::String,
            5 => DataType::Ip,
            6 => DataType::Double,
            7 => DataType::Float,
            8 => DataType::Short,
            9 => DataType::Integer,
            10 => DataType::Long,
            11 => DataType::Timestamp,
            12 => DataType::Object,
            13 => DataType::GeoPoint,
            14 => DataType::GeoShape,
            100 => DataType::Array,
            101 => DataType::Set,
            _ => DataType::NotSupported,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// A column's declared type plus the `col_types` entry it was read from.
///
/// For composite types the definition keeps the inner type information,
/// e.g. `[100,9]` for an array of integers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnType {
    data_type: DataType,
    definition: String,
}

impl ColumnType {
    pub fn new(data_type: DataType, definition: impl Into<String>) -> Self {
        Self {
            data_type,
            definition: definition.into(),
        }
    }

    /// Reads one `col_types` entry: either a bare code or an array whose
    /// first element is the code.
    pub fn from_json(entry: &serde_json::Value) -> Self {
        let data_type = match entry {
            serde_json::Value::Number(n) => n.as_i64().map(DataType::from_code),
            serde_json::Value::Array(items) => items
                .first()
                .and_then(serde_json::Value::as_i64)
                .map(DataType::from_code),
            _ => None,
        };
        Self {
            data_type: data_type.unwrap_or_default(),
            definition: entry.to_string(),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl From<DataType> for ColumnType {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_codes_map_to_variants() {
        assert_eq!(DataType::from_code(0), DataType::Null);
        assert_eq!(DataType::from_code(9), DataType::Integer);
        assert_eq!(DataType::from_code(14), DataType::GeoShape);
        assert_eq!(DataType::from_code(100), DataType::Array);
        assert_eq!(DataType::from_code(101), DataType::Set);
        assert_eq!(DataType::Timestamp.code(), 11);
    }

    #[test]
    fn unknown_codes_are_not_supported() {
        assert_eq!(DataType::from_code(-1), DataType::NotSupported);
        assert_eq!(DataType::from_code(15), DataType::NotSupported);
        assert_eq!(DataType::from_code(99), DataType::NotSupported);
        assert_eq!(DataType::from_code(102), DataType::NotSupported);
    }

    #[test]
    fn column_type_from_code() {
        let ty = ColumnType::from_json(&json!(9));
        assert_eq!(ty.data_type(), DataType::Integer);
        assert_eq!(ty.definition(), "9");
    }

    #[test]
    fn column_type_from_composite() {
        let ty = ColumnType::from_json(&json!([100, 9]));
        assert_eq!(ty.data_type(), DataType::Array);
        assert_eq!(ty.definition(), "[100,9]");
    }

    #[test]
    fn column_type_from_garbage() {
        assert_eq!(
            ColumnType::from_json(&json!("nine")).data_type(),
            DataType::NotSupported
        );
        assert_eq!(
            ColumnType::from_json(&json!([])).data_type(),
            DataType::NotSupported
        );
        assert_eq!(
            ColumnType::from_json(&json!(["x", 9])).data_type(),
            DataType::NotSupported
        );
        assert_eq!(ColumnType::from_json(&json!(1.5)).definition(), "1.5");
    }
}
