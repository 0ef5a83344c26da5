/// A request that produced no HTTP reply at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Stable numeric code used in synthesized error replies.
    pub fn code(&self) -> i32 {
        match self {
            TransportError::InvalidUrl(_) => 1,
            TransportError::Connect(_) => 2,
            TransportError::Timeout(_) => 3,
            TransportError::Io(_) => 4,
            TransportError::Other(_) => 5,
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> Self {
        let msg = e.to_string();
        match e {
            ureq::Error::BadUri(_) | ureq::Error::Http(_) => TransportError::InvalidUrl(msg),
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                TransportError::Connect(msg)
            }
            ureq::Error::Timeout(_) => TransportError::Timeout(msg),
            ureq::Error::Io(io) => match io.kind() {
                std::io::ErrorKind::ConnectionRefused
                | std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted
                | std::io::ErrorKind::NotConnected
                | std::io::ErrorKind::AddrNotAvailable => TransportError::Connect(msg),
                std::io::ErrorKind::TimedOut => TransportError::Timeout(msg),
                _ => TransportError::Io(msg),
            },
            _ => TransportError::Other(msg),
        }
    }
}

impl From<http::Error> for TransportError {
    fn from(e: http::Error) -> Self {
        TransportError::InvalidUrl(e.to_string())
    }
}

/// Why [`Executor::dispatch`](crate::Executor::dispatch) produced no reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Client is not connected.")]
    NotConnected,

    #[error("all {attempts} endpoints failed, last error: {last}")]
    Exhausted {
        attempts: usize,
        last: TransportError,
    },
}
