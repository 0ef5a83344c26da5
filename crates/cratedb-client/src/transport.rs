use std::time::Duration;

use http::{Method, Request, Response};

use crate::error::TransportError;

/// Sends one HTTP request and returns whatever the server answered.
///
/// Any reply with a status code, including 4xx and 5xx, is `Ok`. `Err` is
/// reserved for requests that never produced a reply, which are the ones
/// the executor fails over on.
pub trait Transport {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError> {
        (**self).send(request)
    }
}

/// Blocking HTTP transport backed by a `ureq` agent.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>, max_redirects: u32, user_agent: &str) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .max_redirects(max_redirects)
            .user_agent(user_agent)
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(None, 25, "cratedb-client")
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError> {
        let (parts, body) = request.into_parts();
        let uri = parts.uri.to_string();

        let mut response = if parts.method == Method::POST || parts.method == Method::PUT {
            let mut builder = if parts.method == Method::PUT {
                self.agent.put(&uri)
            } else {
                self.agent.post(&uri)
            };
            for (name, value) in &parts.headers {
                builder = builder.header(name.clone(), value.clone());
            }
            builder.send(&body[..])?
        } else {
            let mut builder = if parts.method == Method::GET {
                self.agent.get(&uri)
            } else if parts.method == Method::HEAD {
                self.agent.head(&uri)
            } else if parts.method == Method::DELETE {
                self.agent.delete(&uri)
            } else {
                return Err(TransportError::Other(format!(
                    "unsupported method {}",
                    parts.method
                )));
            };
            for (name, value) in &parts.headers {
                builder = builder.header(name.clone(), value.clone());
            }
            builder.call()?
        };

        let status = response.status();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(Response::builder().status(status).body(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_method_is_rejected_before_sending() {
        let request = Request::builder()
            .method(Method::PATCH)
            .uri("http://127.0.0.1:1/_blobs/t/k")
            .body(Vec::new())
            .unwrap();

        let error = HttpTransport::default().send(request).unwrap_err();
        assert_eq!(error, TransportError::Other("unsupported method PATCH".into()));
    }
}
