use cratedb_query::RawReply;
use http::{Request, Response, header};
use tracing::{debug, warn};

use crate::endpoint::Endpoint;
use crate::error::{DispatchError, TransportError};
use crate::policy::FailoverPolicy;
use crate::transport::Transport;

/// Sends requests to one endpoint of a cluster, failing over to the next
/// endpoint when a request produces no reply.
///
/// Requests carry only a path (e.g. `/_sql?types`); the executor resolves it
/// against the endpoint it picks and adds that endpoint's credentials.
///
/// An executor is meant for one caller at a time. Every send takes
/// `&mut self` because it may move the cursor and reorder the endpoints.
pub struct Executor<T> {
    transport: T,
    endpoints: Vec<Endpoint>,
    cursor: usize,
    policy: FailoverPolicy,
}

impl<T: Transport> Executor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            endpoints: Vec::new(),
            cursor: 0,
            policy: FailoverPolicy::default(),
        }
    }

    pub fn connect(&mut self, endpoints: Vec<Endpoint>, policy: FailoverPolicy) {
        self.endpoints = endpoints;
        self.policy = policy;
        self.cursor = 0;
    }

    pub fn disconnect(&mut self) {
        self.endpoints.clear();
        self.cursor = 0;
    }

    pub fn is_connected(&self) -> bool {
        !self.endpoints.is_empty()
    }

    /// Endpoints in the order the next request will try them.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn policy(&self) -> FailoverPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request`, trying each endpoint at most once.
    ///
    /// Any HTTP reply ends the attempt, whatever its status. Only when every
    /// endpoint failed at the transport level is an error returned.
    pub fn dispatch(
        &mut self,
        request: &Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, DispatchError> {
        if self.endpoints.is_empty() {
            return Err(DispatchError::NotConnected);
        }

        loop {
            let endpoint = &self.endpoints[self.cursor];
            debug!(
                endpoint = endpoint.address(),
                method = %request.method(),
                path = %request.uri(),
                "sending request"
            );

            match prepare(endpoint, request).and_then(|r| self.transport.send(r)) {
                Ok(response) => {
                    self.on_success();
                    return Ok(response);
                }
                Err(error) => {
                    warn!(endpoint = endpoint.address(), %error, "endpoint unreachable");
                    self.cursor += 1;
                    if self.cursor >= self.endpoints.len() {
                        self.cursor = 0;
                        let attempts = self.endpoints.len();
                        warn!(attempts, %error, "all endpoints failed");
                        return Err(DispatchError::Exhausted {
                            attempts,
                            last: error,
                        });
                    }
                }
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch), but folds failures into the same
    /// `{"error": {...}}` shape the server uses so callers classify every
    /// outcome through [`RawReply::has_error`].
    pub fn execute(&mut self, request: &Request<Vec<u8>>) -> RawReply {
        match self.dispatch(request) {
            Ok(response) => RawReply::new(
                String::from_utf8_lossy(response.body()).into_owned(),
                i32::from(response.status().as_u16()),
            ),
            Err(DispatchError::NotConnected) => {
                RawReply::from_body(error_body("Client is not connected.", 0, "client"))
            }
            Err(DispatchError::Exhausted { last, .. }) => {
                RawReply::from_body(error_body(&last.to_string(), last.code(), "transport"))
            }
        }
    }

    fn on_success(&mut self) {
        if let Some(reordered) = self.policy.reorder(&self.endpoints, self.cursor) {
            debug!(
                policy = ?self.policy,
                first = reordered[0].address(),
                "reordered endpoints"
            );
            self.endpoints = reordered;
        }
        self.cursor = 0;
    }
}

/// Resolves `request` against `endpoint`.
fn prepare(
    endpoint: &Endpoint,
    request: &Request<Vec<u8>>,
) -> Result<Request<Vec<u8>>, TransportError> {
    let path = request.uri().path_and_query().map_or("/", |p| p.as_str());
    let mut url = endpoint.url(path);
    if !url.contains("://") {
        url = format!("http://{url}");
    }

    let mut builder = Request::builder()
        .method(request.method().clone())
        .uri(url);
    for (name, value) in request.headers() {
        builder = builder.header(name, value);
    }
    if let Some(authorization) = endpoint.authorization() {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }
    Ok(builder.body(request.body().clone())?)
}

fn error_body(message: &str, code: i32, component: &str) -> String {
    serde_json::json!({
        "error": {
            "message": message,
            "code": code,
            "component": component,
        }
    })
    .to_string()
}
