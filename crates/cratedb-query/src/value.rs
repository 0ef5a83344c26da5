use crate::data_type::ColumnType;

/// Native representation a [`Value`] was decoded into.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Storage {
    /// The column type is known but no value could be produced.
    #[default]
    Invalid,
    /// The database NULL.
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
}

/// A single cell of a [`Record`](crate::Record).
///
/// Every accessor is total: when the stored representation cannot be
/// converted, the target type's zero value is returned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    name: String,
    column_type: ColumnType,
    storage: Storage,
}

impl Value {
    pub fn new(name: impl Into<String>, column_type: ColumnType, storage: Storage) -> Self {
        Self {
            name: name.into(),
            column_type,
            storage,
        }
    }

    pub fn invalid(column_type: ColumnType) -> Self {
        Self::new(String::new(), column_type, Storage::Invalid)
    }

    pub fn null(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self::new(name, column_type, Storage::Null)
    }

    /// Column name this value was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type of the column, independent of the storage.
    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.storage, Storage::Invalid)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.storage, Storage::Null)
    }

    pub fn as_string(&self) -> String {
        match &self.storage {
            Storage::Invalid | Storage::Null => String::new(),
            Storage::Bool(b) => b.to_string(),
            Storage::Int16(n) => n.to_string(),
            Storage::Int32(n) => n.to_string(),
            Storage::Int64(n) => n.to_string(),
            Storage::Float(f) => f.to_string(),
            Storage::Double(f) => f.to_string(),
            Storage::String(s) => s.clone(),
        }
    }

    /// `"false"`, `"0"` and `""` are false; any other string is true.
    pub fn as_bool(&self) -> bool {
        match &self.storage {
            Storage::Invalid | Storage::Null => false,
            Storage::Bool(b) => *b,
            Storage::Int16(n) => *n != 0,
            Storage::Int32(n) => *n != 0,
            Storage::Int64(n) => *n != 0,
            Storage::Float(f) => *f != 0.0,
            Storage::Double(f) => *f != 0.0,
            Storage::String(s) => !(s.is_empty() || s == "false" || s == "0"),
        }
    }

    pub fn as_i16(&self) -> i16 {
        match &self.storage {
            Storage::Invalid | Storage::Null => 0,
            Storage::Bool(b) => *b as i16,
            Storage::Int16(n) => *n,
            Storage::Int32(n) => *n as i16,
            Storage::Int64(n) => *n as i16,
            Storage::Float(f) => *f as i16,
            Storage::Double(f) => *f as i16,
            Storage::String(s) => integer_prefix(s).parse().unwrap_or(0),
        }
    }

    pub fn as_i32(&self) -> i32 {
        match &self.storage {
            Storage::Invalid | Storage::Null => 0,
            Storage::Bool(b) => *b as i32,
            Storage::Int16(n) => *n as i32,
            Storage::Int32(n) => *n,
            Storage::Int64(n) => *n as i32,
            Storage::Float(f) => *f as i32,
            Storage::Double(f) => *f as i32,
            Storage::String(s) => integer_prefix(s).parse().unwrap_or(0),
        }
    }

    pub fn as_i64(&self) -> i64 {
        match &self.storage {
            Storage::Invalid | Storage::Null => 0,
            Storage::Bool(b) => *b as i64,
            Storage::Int16(n) => *n as i64,
            Storage::Int32(n) => *n as i64,
            Storage::Int64(n) => *n,
            Storage::Float(f) => *f as i64,
            Storage::Double(f) => *f as i64,
            Storage::String(s) => integer_prefix(s).parse().unwrap_or(0),
        }
    }

    pub fn as_f32(&self) -> f32 {
        match &self.storage {
            Storage::Invalid | Storage::Null => 0.0,
            Storage::Bool(b) => *b as u8 as f32,
            Storage::Int16(n) => *n as f32,
            Storage::Int32(n) => *n as f32,
            Storage::Int64(n) => *n as f32,
            Storage::Float(f) => *f,
            Storage::Double(f) => *f as f32,
            Storage::String(s) => float_prefix(s).parse().unwrap_or(0.0),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match &self.storage {
            Storage::Invalid | Storage::Null => 0.0,
            Storage::Bool(b) => *b as u8 as f64,
            Storage::Int16(n) => *n as f64,
            Storage::Int32(n) => *n as f64,
            Storage::Int64(n) => *n as f64,
            Storage::Float(f) => *f as f64,
            Storage::Double(f) => *f,
            Storage::String(s) => float_prefix(s).parse().unwrap_or(0.0),
        }
    }
}

// ── Numeric prefix readers ─────────────────────────────────────
//
// Strings are read the way a stream extractor reads them: leading
// whitespace is skipped and the longest numeric prefix is used, so
// "12abc" reads as 12 and "1.2" reads as 1 for integer targets.

fn integer_prefix(s: &str) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let end = start + count_digits(&bytes[start..]);
    if end == start { "" } else { &s[..end] }
}

fn float_prefix(s: &str) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    &s[..end]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
