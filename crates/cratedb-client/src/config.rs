use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::policy::FailoverPolicy;
use crate::transport::HttpTransport;

/// Everything needed to build a connected [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub nodes: Vec<Endpoint>,
    pub policy: FailoverPolicy,
    pub default_schema: Option<String>,
    /// Whole-request timeout. No timeout when unset.
    pub timeout_ms: Option<u64>,
    pub max_redirects: u32,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            policy: FailoverPolicy::default(),
            default_schema: None,
            timeout_ms: None,
            max_redirects: 25,
            user_agent: "cratedb-client".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn transport(&self) -> HttpTransport {
        HttpTransport::new(self.timeout(), self.max_redirects, &self.user_agent)
    }
}
