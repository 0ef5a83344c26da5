use serde_json::Value as Json;

use crate::data_type::ColumnType;
use crate::raw::{RawReply, bulk_error_positions};
use crate::record::Record;

/// A decoded reply of the `/_sql` endpoint.
///
/// The body is parsed once when the result is built. Rows are kept as
/// compact JSON text and only decoded into [`Record`]s on access.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    raw: RawReply,
    error: String,
    duration: f64,
    row_count: i32,
    cols: Vec<String>,
    col_types: Vec<ColumnType>,
    rows: Vec<String>,
}

impl QueryResult {
    pub fn new(raw: RawReply) -> Self {
        let mut result = Self {
            raw,
            ..Self::default()
        };

        let doc: Json = match serde_json::from_str(result.raw.body()) {
            Ok(doc) => doc,
            Err(e) => {
                result.error = parse_error_message(result.raw.body(), &e);
                return result;
            }
        };

        if let Some(error) = doc.get("error") {
            result.error = server_error_message(error);
            return result;
        }

        let failed = bulk_error_positions(&doc);
        if !failed.is_empty() {
            let positions: Vec<String> = failed.iter().map(|p| p.to_string()).collect();
            result.error = format!(
                "[crate] Error in bulk arguments [{}].",
                positions.join(", ")
            );
            return result;
        }

        result.row_count = doc
            .get("rowcount")
            .and_then(Json::as_i64)
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(0);
        result.duration = doc.get("duration").and_then(Json::as_f64).unwrap_or(0.0);

        if let Some(cols) = doc.get("cols").and_then(Json::as_array) {
            result.cols = cols
                .iter()
                .map(|c| c.as_str().unwrap_or_default().to_string())
                .collect();
        }
        if let Some(types) = doc.get("col_types").and_then(Json::as_array) {
            result.col_types = types.iter().map(ColumnType::from_json).collect();
        }
        if let Some(rows) = doc.get("rows").and_then(Json::as_array) {
            result.rows = rows.iter().map(Json::to_string).collect();
        }

        result
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Human readable error, empty on success.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn raw(&self) -> &RawReply {
        &self.raw
    }

    /// Server side execution time in milliseconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of affected or returned rows as reported by the server.
    pub fn row_count(&self) -> i32 {
        self.row_count
    }

    pub fn cols(&self) -> &[String] {
        &self.cols
    }

    pub fn col_types(&self) -> &[ColumnType] {
        &self.col_types
    }

    /// Row fragments exactly as they will be handed to [`Record::new`].
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of rows contained in the reply.
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Decodes row `pos`, or returns an empty record when out of range.
    pub fn record(&self, pos: usize) -> Record {
        match self.rows.get(pos) {
            Some(row) => Record::new(row, &self.cols, &self.col_types),
            None => Record::default(),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.rows
            .iter()
            .map(|row| Record::new(row, &self.cols, &self.col_types))
    }
}

impl From<RawReply> for QueryResult {
    fn from(raw: RawReply) -> Self {
        Self::new(raw)
    }
}

fn server_error_message(error: &Json) -> String {
    let Some(error) = error.as_object() else {
        return "Unknown error.".to_string();
    };

    let mut message = match error.get("component") {
        Some(Json::String(component)) => format!("[{component}] "),
        Some(_) => "[unknown] ".to_string(),
        None => "[crate] ".to_string(),
    };
    match error.get("message") {
        Some(Json::String(text)) => message.push_str(text),
        Some(_) => message.push_str("Unknown error."),
        None => {}
    }
    if let Some(code) = error
        .get("code")
        .and_then(Json::as_i64)
        .and_then(|c| i32::try_from(c).ok())
    {
        message.push_str(&format!(" ({code})"));
    }
    message
}

/// Formats a JSON syntax error with the byte offset it occurred at.
fn parse_error_message(body: &str, e: &serde_json::Error) -> String {
    let offset = if e.is_eof() {
        body.len()
    } else {
        byte_offset(body, e.line(), e.column())
    };
    let full = e.to_string();
    let location = format!(" at line {} column {}", e.line(), e.column());
    let text = full.strip_suffix(&location).unwrap_or(&full);
    format!("[json] parse error at offset {offset}: {text}")
}

fn byte_offset(body: &str, line: usize, column: usize) -> usize {
    let preceding: usize = body
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    preceding + column.saturating_sub(1)
}
