//! The I/O half of the host-does-IO split.
//!
//! `Transport` executes one `HttpRequest` and reports what came back.
//! Status codes are never errors here; only a missing response is.

use std::time::Duration;

use fileclient_core::{HttpMethod, HttpRequest, HttpResponse, ResponseBody};
use thiserror::Error;

/// Failure to obtain any response at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{method} {url} failed: {source}")]
    Http {
        method: HttpMethod,
        url: String,
        #[source]
        source: ureq::Error,
    },
}

/// Executes requests synchronously. Called from a blocking task, never from
/// the session loop itself.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `ureq`-backed transport.
///
/// 4xx/5xx responses are returned as data, not as `Err`, so they reach the
/// formatter like any other status.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl UreqTransport {
    /// `timeout` bounds the whole round trip; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref().unwrap_or_default();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), request).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), request).call(),
            HttpMethod::Put => with_headers(self.agent.put(url), request).send(body.as_bytes()),
            HttpMethod::Post => with_headers(self.agent.post(url), request).send(body.as_bytes()),
        };
        let mut response = result.map_err(|source| TransportError::Http {
            method: request.method,
            url: request.url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // Binary and very large files still render; only a failed read
        // loses the body.
        let body = match response.body_mut().with_config().limit(u64::MAX).read_to_vec() {
            Ok(bytes) => ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => ResponseBody::Unreadable {
                reason: err.to_string(),
            },
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
