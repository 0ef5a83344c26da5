use crate::query::{Query, QueryKind};

/// Serializes `query` into the body expected by the `/_sql` endpoint.
///
/// Argument texts are inserted as-is. They must already be JSON arrays;
/// malformed arguments produce a body the server will reject.
pub fn request_body(query: &Query) -> String {
    // Display on a JSON string value escapes the statement.
    let stmt = serde_json::Value::from(query.statement());

    match query.kind() {
        QueryKind::Simple => format!(r#"{{"stmt":{stmt}}}"#),
        QueryKind::Parameterized => {
            format!(r#"{{"stmt":{stmt},"args":{}}}"#, query.arguments())
        }
        QueryKind::Bulk => format!(
            r#"{{"stmt":{stmt},"bulk_args":[{}]}}"#,
            query.bulk_arguments().join(",")
        ),
    }
}
