//! Default transport: blocking HTTP execution over ureq.
//!
//! # Design
//! One agent per transport, configured with `http_status_as_error(false)`
//! so 4xx/5xx responses come back as data rather than `Err`, leaving
//! status interpretation to the client. Descriptor extensions exist for
//! custom transports; this one ignores them.

use ureq::Agent;

use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Blocking [`Transport`] backed by a [`ureq::Agent`].
///
/// Cloning shares the agent and its connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // Builder faults (malformed URL, bad header name) surface here;
        // nothing validates earlier in the pipeline.
        let run = match &request.body {
            Some(body) => {
                let wire = builder
                    .body(body.as_bytes())
                    .map_err(|e| TransportError::with_source("invalid request", e))?;
                self.agent.run(wire)
            }
            None => {
                let wire = builder
                    .body(())
                    .map_err(|e| TransportError::with_source("invalid request", e))?;
                self.agent.run(wire)
            }
        };
        let mut response = run.map_err(|e| TransportError::with_source("request failed", e))?;

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
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| TransportError::with_source("failed to read response body", e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
