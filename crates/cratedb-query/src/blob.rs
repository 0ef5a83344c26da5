use std::fmt;

/// Where a blob operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobErrorKind {
    /// No endpoint could be reached.
    Transport,
    /// The server answered with an unexpected status code.
    Server,
    /// The client failed before talking to a server.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobError {
    pub kind: BlobErrorKind,
    pub message: String,
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for BlobError {}

/// Outcome of a blob operation. Blob endpoints report success purely
/// through status codes, so there is no reply body to decode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlobResult {
    key: String,
    error: Option<BlobError>,
}

impl BlobResult {
    pub fn ok(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            error: None,
        }
    }

    pub fn failed(key: impl Into<String>, kind: BlobErrorKind, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            error: Some(BlobError {
                kind,
                message: message.into(),
            }),
        }
    }

    /// SHA-1 hex digest identifying the blob.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&BlobError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> &str {
        self.error.as_ref().map_or("", |e| e.message.as_str())
    }

    /// True when the server itself rejected the operation, as opposed to
    /// a network failure. A failed existence check only means "missing"
    /// when this is true.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self.error,
            Some(BlobError {
                kind: BlobErrorKind::Server,
                ..
            })
        )
    }
}
