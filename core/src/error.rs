//! Error types for the fetch client.
//!
//! # Design
//! Transport faults and non-2xx responses are wrapped into [`FetchError`]
//! capturing the method, final URL and attempted body. Decoding faults are
//! not wrapped: they surface as [`Error::Decode`], matching how the system
//! has always behaved. Nothing on the failure path is retried, logged or
//! recovered; every failure goes straight to the caller of the verb method.

use crate::http::{HttpResponse, Method, TransportError};

/// Errors returned by the client's verb methods.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed or the server answered with a non-2xx status.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A successful response body could not be decoded as the negotiated
    /// kind.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The request body could not be serialized.
    #[error("request body serialization failed: {0}")]
    Encode(#[source] serde_json::Error),
}

/// The structured failure for a request that was sent (or attempted):
/// what was asked for, and what went wrong.
#[derive(Debug, thiserror::Error)]
#[error("{method} {url} failed: {failure}")]
pub struct FetchError {
    pub method: Method,
    pub url: String,
    /// The body that was about to be sent, if any.
    pub body: Option<String>,
    pub failure: Failure,
}

impl FetchError {
    /// Status code of the failing response, when the failure is HTTP.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }

    /// The failing response, when the failure is HTTP.
    pub fn response(&self) -> Option<&HttpResponse> {
        match &self.failure {
            Failure::Http(response) => Some(response),
            Failure::Transport(_) => None,
        }
    }
}

/// What went wrong underneath a [`FetchError`], carried as-is.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The server answered with a non-2xx status; the response is carried
    /// unmodified.
    #[error("HTTP {}", .0.status)]
    Http(HttpResponse),

    /// The transport failed before a usable response existed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Body-decoding faults raised by the response resolver.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body was not valid JSON.
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Multipart bodies have no decoded representation here.
    #[error("multipart response bodies are not supported (Content-Type: {content_type})")]
    Multipart { content_type: String },
}
