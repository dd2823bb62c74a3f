//! Stateful HTTP request client with persistent, shareable configuration.
//!
//! # Overview
//! A [`FetchClient`] merges long-lived configuration (base URL, default
//! headers, auth token, response policy) with per-call [`CallOptions`],
//! builds a plain-data [`HttpRequest`], hands it to a [`Transport`], and
//! decodes the response into a [`ResponseValue`]. Failures come back as
//! one structured [`FetchError`] carrying the method, final URL, attempted
//! body and the underlying fault.
//!
//! # Design
//! - The transport is a trait seam; the bundled [`UreqTransport`] does
//!   blocking I/O, and tests substitute their own.
//! - Configuration is shared mutable state: per-call headers merge into
//!   the persistent defaults on purpose, and concurrent calls read the
//!   configuration step by step rather than atomically (an opt-in
//!   snapshot mode freezes it per call).
//! - Request and response descriptors use owned `String` / `Vec` fields
//!   and carry no I/O handles.
//! - Free verb functions ([`get`], [`post`], ...) delegate to one default
//!   client with an empty base URL.

pub mod client;
pub mod config;
pub mod error;
pub mod global;
pub mod http;
pub mod options;
pub mod resolve;
pub mod serialize;
pub mod transport;
pub mod url;

pub use client::FetchClient;
pub use config::{AuthToken, ClientConfig, ClientOptions, Headers};
pub use error::{DecodeError, Error, Failure, FetchError};
pub use global::{default_client, delete, get, head, options, patch, post, put};
pub use http::{HttpRequest, HttpResponse, Method, Transport, TransportError};
pub use options::{Body, CallOptions};
pub use resolve::{ResponseKind, ResponsePolicy, ResponseValue};
pub use transport::UreqTransport;
