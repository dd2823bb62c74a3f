//! HTTP wire types and the transport seam.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe requests and responses as plain
//! data with owned fields. The client assembles an `HttpRequest` per call and
//! hands it to a [`Transport`], the only component that touches the network.
//! Keeping the boundary at a one-method trait means the request pipeline can
//! be exercised with a scripted transport in tests, and callers can swap the
//! bundled [`UreqTransport`](crate::transport::UreqTransport) for any HTTP
//! stack they already carry.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    /// GET and HEAD requests never carry a request body.
    pub fn is_bodyless(self) -> bool {
        matches!(self, Method::Get | Method::Head)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request descriptor.
///
/// Built fresh for every call by merging the client configuration with the
/// per-call options; never persisted and never shared between calls. The
/// `url` already contains any query string. `extensions` carries call options
/// the pipeline does not interpret, for transports that understand them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub extensions: Map<String, Value>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the [`Transport`] after executing an `HttpRequest`. The
/// body is fully buffered; decoding is the response resolver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }
}

/// Executes one request and reports one outcome.
///
/// Implementations decide everything below the request descriptor: connection
/// handling, redirects, timeouts. The client issues exactly one `send` per
/// call and never retries.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// A transport-level failure: network fault, aborted connection, or a
/// response too malformed to represent. The original error is preserved
/// as the source so callers can downcast if they know the transport.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
