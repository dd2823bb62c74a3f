//! Per-call options: body source, query pairs, header overrides and the
//! response-kind override.
//!
//! # Design
//! The body is a tagged union, so a call carries at most one body source
//! and "which encoding wins" is decided at the call site: each builder
//! call replaces the previous body outright. Query and form payloads are
//! ordered pair lists, giving the serialized output a stable order.

use serde_json::{Map, Value};

use crate::resolve::ResponseKind;

/// The single body source of a call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    None,
    /// JSON-encoded: the value's serialization text becomes the body.
    Json(Value),
    /// Form-encoded: pairs become an `application/x-www-form-urlencoded`
    /// body and the `Content-Type` default header is overwritten to match.
    Form(Vec<(String, Value)>),
    /// Raw text passed through unchanged. On GET and HEAD this is treated
    /// as a query-string fragment instead (see the request pipeline).
    Raw(String),
}

impl Body {
    pub fn is_none(&self) -> bool {
        matches!(self, Body::None)
    }
}

/// Options for a single call. All builders are chainable; a later body
/// builder replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub body: Body,
    pub query: Option<Vec<(String, Value)>>,
    pub headers: Vec<(String, String)>,
    pub response_type: Option<ResponseKind>,
    pub extensions: Map<String, Value>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `value` as a JSON body.
    pub fn json(mut self, value: Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    /// Send `pairs` as a form-encoded body.
    pub fn form<K: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        self.body = Body::Form(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Send `text` as the raw body.
    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body = Body::Raw(text.into());
        self
    }

    /// Append `pairs` to the URL as a query string.
    pub fn query<K: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        self.query = Some(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Add one header override for this call. Per-call headers merge into
    /// the client's persistent defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several header overrides for this call.
    pub fn headers<N: Into<String>, V: Into<String>>(
        mut self,
        pairs: impl IntoIterator<Item = (N, V)>,
    ) -> Self {
        self.headers
            .extend(pairs.into_iter().map(|(n, v)| (n.into(), v.into())));
        self
    }

    /// Override the response kind for this call only.
    pub fn response_type(mut self, kind: ResponseKind) -> Self {
        self.response_type = Some(kind);
        self
    }

    /// Attach a transport extension for this call. Extensions override the
    /// client's transport defaults key by key.
    pub fn extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}
