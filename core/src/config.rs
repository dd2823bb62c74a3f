//! Client configuration: persistent defaults shared by every call.
//!
//! # Design
//! Configuration is plain data mutated only through the client's setters.
//! Headers live in an ordered list with case-insensitive names so merge
//! order is observable in the outgoing request. Everything here persists
//! for the lifetime of the client and is shared by all calls issued
//! through it.

use serde_json::{Map, Value};

use crate::resolve::{ResponseKind, ResponsePolicy};

/// Ordered header collection with case-insensitive, last-writer-wins names.
///
/// A replaced entry keeps its position and original casing; only the value
/// changes. New names append in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, overwriting any existing entry with the same name
    /// ignoring ASCII case.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Look up a header value ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Merge pairs into this collection in their given order.
    pub fn merge(&mut self, pairs: impl IntoIterator<Item = (String, String)>) {
        for (name, value) in pairs {
            self.set(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Clone the entries into the pair list a request descriptor carries.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0.clone()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.set(name, value);
        }
        headers
    }
}

/// Authorization token, bare or with an explicit scheme.
///
/// A scheme supplied here replaces the configured authorization scheme for
/// subsequent requests; a bare token reuses whatever scheme is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
    pub scheme: Option<String>,
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scheme: None,
        }
    }

    pub fn with_scheme(token: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scheme: Some(scheme.into()),
        }
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Constructor options: initial headers merged over the defaults, plus
/// transport defaults carried on every request descriptor.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub headers: Vec<(String, String)>,
    pub transport_defaults: Map<String, Value>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn transport_default(mut self, key: impl Into<String>, value: Value) -> Self {
        self.transport_defaults.insert(key.into(), value);
        self
    }
}

/// The persistent per-client state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: Headers,
    pub auth_scheme: String,
    pub response_policy: ResponsePolicy,
    pub response_type: Option<ResponseKind>,
    pub transport_defaults: Map<String, Value>,
    pub snapshot: bool,
}

impl ClientConfig {
    /// Build the configuration for a new client: defaults, then the base
    /// URL and initial options layered on top.
    pub fn new(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let mut config = Self::default();
        config.base_url = base_url.into();
        config.headers.merge(options.headers);
        config.transport_defaults = options.transport_defaults;
        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut headers = Headers::new();
        headers.set("Accept", "application/json");
        headers.set("Content-Type", "application/json");
        Self {
            base_url: String::new(),
            headers,
            auth_scheme: "Bearer".to_string(),
            response_policy: ResponsePolicy::ContentNegotiation,
            response_type: None,
            transport_defaults: Map::new(),
            snapshot: false,
        }
    }
}
