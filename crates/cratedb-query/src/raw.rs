use serde_json::Value as Json;

/// `rowcount` reported for a failed entry of a bulk operation.
pub const BULK_ERROR_ROWCOUNT: i64 = -2;

/// HTTP status code plus the unparsed reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    http_status: i32,
    body: String,
}

impl Default for RawReply {
    fn default() -> Self {
        Self {
            http_status: -1,
            body: String::new(),
        }
    }
}

impl RawReply {
    pub fn new(body: impl Into<String>, http_status: i32) -> Self {
        Self {
            http_status,
            body: body.into(),
        }
    }

    pub fn from_body(body: impl Into<String>) -> Self {
        Self::new(body, -1)
    }

    pub fn from_status(http_status: i32) -> Self {
        Self::new(String::new(), http_status)
    }

    /// Status code of the reply, `-1` if none was received.
    pub fn http_status(&self) -> i32 {
        self.http_status
    }

    pub fn set_http_status(&mut self, http_status: i32) {
        self.http_status = http_status;
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn is_empty(&self) -> bool {
        self.http_status == -1 && self.body.is_empty()
    }

    /// Whether the body reports an error.
    ///
    /// Empty and unparseable bodies count as errors, as do bodies with a
    /// top-level `error` member or a bulk `results` entry with
    /// `rowcount == -2`. The body is parsed on every call.
    pub fn has_error(&self) -> bool {
        if self.body.is_empty() {
            return true;
        }
        match serde_json::from_str::<Json>(&self.body) {
            Ok(doc) => doc.get("error").is_some() || !bulk_error_positions(&doc).is_empty(),
            Err(_) => true,
        }
    }
}

/// 1-based positions of failed entries in a bulk `results` array.
pub(crate) fn bulk_error_positions(doc: &Json) -> Vec<usize> {
    let Some(results) = doc.get("results").and_then(Json::as_array) else {
        return Vec::new();
    };
    results
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.get("rowcount").and_then(Json::as_i64) == Some(BULK_ERROR_ROWCOUNT)
        })
        .map(|(i, _)| i + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let r = RawReply::default();
        assert!(r.has_error());
        assert!(r.is_empty());
        assert_eq!(r.http_status(), -1);
        assert_eq!(r.body(), "");

        let r = RawReply::from_status(500);
        assert!(r.has_error());
        assert!(!r.is_empty());
        assert_eq!(r.http_status(), 500);

        let r = RawReply::from_body("{}");
        assert!(!r.has_error());
        assert!(!r.is_empty());
        assert_eq!(r.http_status(), -1);

        let r = RawReply::new("{}", 500);
        assert!(!r.has_error());
        assert_eq!(r.http_status(), 500);
        assert_eq!(r.body(), "{}");
    }

    #[test]
    fn is_empty_tracks_both_fields() {
        let mut r = RawReply::default();
        r.set_http_status(0);
        assert!(!r.is_empty());
        r.set_http_status(-1);
        assert!(r.is_empty());
        r.set_body("a");
        assert!(!r.is_empty());
        r.set_body("");
        assert!(r.is_empty());
    }

    #[test]
    fn error_detection() {
        let reply = |body: &str| RawReply::from_body(body);

        assert!(reply("").has_error());
        assert!(!reply(r#"{"a":0}"#).has_error());
        assert!(reply("a").has_error());
        assert!(reply(r#"{"error": 0}"#).has_error());
        assert!(!reply(r#"{"results":[{"rowcount":1},{"rowcount":1}]}"#).has_error());
        assert!(reply(r#"{"results":[{"rowcount":-2},{"rowcount":1}]}"#).has_error());
        assert!(reply(r#"{"results":[{"rowcount":1},{"rowcount":-2}]}"#).has_error());
        assert!(reply(r#"{"results":[{"rowcount":-2},{"rowcount":-2}]}"#).has_error());
        assert!(!reply(r#"{"results":[{"rowcount":-2.0}]}"#).has_error());
        assert!(!reply(r#"{"results":{"rowcount":-2}}"#).has_error());
    }

    #[test]
    fn bulk_positions_are_one_based() {
        let doc: Json = serde_json::from_str(
            r#"{"results":[{"rowcount":1},{"rowcount":-2},{},{"rowcount":-2}]}"#,
        )
        .unwrap();
        assert_eq!(bulk_error_positions(&doc), vec![2, 4]);
    }
}
