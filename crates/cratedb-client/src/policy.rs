use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// How the endpoint list is reordered after a request succeeded on an
/// endpoint other than the first one.
///
/// Failover itself is the same for every policy: on a transport error the
/// next endpoint in the list is tried until all were tried once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailoverPolicy {
    /// Keep the configured order; every request starts at the first endpoint.
    AlwaysFirst,
    /// Move the endpoint that answered to the front.
    #[default]
    StickyLastSuccessful,
    /// Shuffle the endpoints.
    RandomPerAttempt,
}

impl FailoverPolicy {
    /// New ordering after `endpoints[succeeded]` answered.
    ///
    /// Returns `None` when the order stays as it is.
    pub fn reorder(self, endpoints: &[Endpoint], succeeded: usize) -> Option<Vec<Endpoint>> {
        if succeeded == 0 || succeeded >= endpoints.len() {
            return None;
        }
        match self {
            FailoverPolicy::AlwaysFirst => None,
            FailoverPolicy::StickyLastSuccessful => {
                let (head, tail) = endpoints.split_at(succeeded);
                Some(tail.iter().chain(head).cloned().collect())
            }
            FailoverPolicy::RandomPerAttempt => {
                let mut shuffled = endpoints.to_vec();
                shuffled.shuffle(&mut rand::thread_rng());
                Some(shuffled)
            }
        }
    }
}
