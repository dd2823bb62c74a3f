//! The stateful fetch client: persistent configuration, verb methods and
//! the request pipeline.
//!
//! # Design
//! `FetchClient` owns a shared [`ClientConfig`] behind a mutex and an
//! abstract [`Transport`]. Every verb method runs the same pipeline:
//! overlay per-call options on the configuration, resolve the URL, encode
//! the body, hand the descriptor to the transport, then resolve or wrap
//! the outcome. The configuration is locked briefly at each step, not
//! across the whole call, so calls racing a setter can observe a
//! half-applied merge; that is documented behavior, with an opt-in
//! snapshot mode for callers that want build-time determinism.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, trace};

use crate::config::{AuthToken, ClientConfig, ClientOptions};
use crate::error::{Error, Failure, FetchError};
use crate::http::{HttpRequest, Method, Transport};
use crate::options::{Body, CallOptions};
use crate::resolve::{self, ResponseKind, ResponsePolicy, ResponseValue};
use crate::serialize;
use crate::transport::UreqTransport;
use crate::url;

/// Stateful HTTP client sharing one mutable configuration across calls.
///
/// Cloning shares the configuration and transport; clones see each
/// other's setter calls. Per-call headers merge into the shared defaults
/// and persist for later calls, which is intentional statefulness rather
/// than an accident of implementation.
#[derive(Clone)]
pub struct FetchClient {
    config: Arc<Mutex<ClientConfig>>,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    /// Client with default configuration and the bundled ureq transport.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        Self::with_transport(base_url, options, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(
        base_url: impl Into<String>,
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(ClientConfig::new(base_url, options))),
            transport,
        }
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> ClientConfig {
        self.lock().clone()
    }

    /// Replace the base URL, empty string included.
    pub fn set_base_url(&self, url: impl Into<String>) -> &Self {
        self.lock().base_url = url.into();
        self
    }

    /// Merge one header into the persistent defaults, overwriting an
    /// existing entry with the same name.
    pub fn set_header(&self, name: impl Into<String>, value: impl Into<String>) -> &Self {
        self.lock().headers.set(name, value);
        self
    }

    /// Merge headers into the persistent defaults in their given order.
    pub fn set_headers<N: Into<String>, V: Into<String>>(
        &self,
        headers: impl IntoIterator<Item = (N, V)>,
    ) -> &Self {
        self.lock()
            .headers
            .merge(headers.into_iter().map(|(n, v)| (n.into(), v.into())));
        self
    }

    /// Set the `Authorization` default header to `"<scheme> <token>"`.
    ///
    /// A token carrying its own scheme also replaces the configured
    /// scheme for every later `set_token` call.
    pub fn set_token(&self, auth: impl Into<AuthToken>) -> &Self {
        let auth = auth.into();
        let mut config = self.lock();
        if let Some(scheme) = auth.scheme {
            config.auth_scheme = scheme;
        }
        let header = format!("{} {}", config.auth_scheme, auth.token);
        config.headers.set("Authorization", header);
        self
    }

    /// Set the negotiated response kind. `None` disables automatic
    /// decoding under the explicit policy.
    pub fn set_response_type(&self, kind: Option<ResponseKind>) -> &Self {
        self.lock().response_type = kind;
        self
    }

    pub fn set_response_policy(&self, policy: ResponsePolicy) -> &Self {
        self.lock().response_policy = policy;
        self
    }

    /// When on, each call freezes the configuration right after its header
    /// merge and builds from the frozen copy.
    pub fn set_snapshot(&self, snapshot: bool) -> &Self {
        self.lock().snapshot = snapshot;
        self
    }

    pub fn get(&self, target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
        self.request(Method::Get, target, options)
    }

    pub fn post(&self, target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
        self.request(Method::Post, target, options)
    }

    pub fn put(&self, target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
        self.request(Method::Put, target, options)
    }

    pub fn patch(&self, target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
        self.request(Method::Patch, target, options)
    }

    pub fn delete(&self, target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
        self.request(Method::Delete, target, options)
    }

    pub fn head(&self, target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
        self.request(Method::Head, target, options)
    }

    pub fn options(&self, target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
        self.request(Method::Options, target, options)
    }

    /// Build the descriptor, send it, and resolve or wrap the outcome.
    fn request(
        &self,
        method: Method,
        target: &str,
        options: CallOptions,
    ) -> Result<ResponseValue, Error> {
        let CallOptions {
            body,
            query,
            headers,
            response_type,
            extensions,
        } = options;

        // The per-call kind overrides the configured one for this call
        // only; the policy is always configuration.
        let (policy, kind) = {
            let config = self.lock();
            (config.response_policy, response_type.or(config.response_type))
        };

        // Per-call headers merge into the persistent defaults and stay
        // there for later calls.
        if !headers.is_empty() {
            self.lock().headers.merge(headers);
        }

        // Snapshot mode freezes the configuration here, after the merge.
        let mut view = ConfigView::new(&self.config);

        let mut url = if url::is_absolute(target) {
            target.to_string()
        } else {
            view.read(|config| url::combine(&config.base_url, target))
        };

        // An empty query set yields no query string at all.
        let mut fragment = query
            .as_deref()
            .map(serialize::serialize)
            .filter(|fragment| !fragment.is_empty());

        // On GET and HEAD a raw body becomes a query-string fragment and
        // never reaches the wire as a body.
        let mut body = body;
        if method.is_bodyless() {
            body = match body {
                Body::Raw(text) => {
                    fragment = Some(match fragment.take() {
                        Some(existing) => format!("{existing}&{text}"),
                        None => text,
                    });
                    Body::None
                }
                other => other,
            };
        }

        // A URL already containing '?' gets the fragment concatenated with
        // no separator inserted.
        if let Some(fragment) = &fragment {
            if !url.contains('?') {
                url.push('?');
            }
            url.push_str(fragment);
        }

        // The body source was decided at the call site; a form body also
        // overwrites the persistent Content-Type.
        let encoded = match body {
            Body::None => None,
            Body::Json(value) => Some(serde_json::to_string(&value).map_err(Error::Encode)?),
            Body::Form(pairs) => {
                view.write(|config| {
                    config
                        .headers
                        .set("Content-Type", "application/x-www-form-urlencoded");
                });
                Some(serialize::serialize(&pairs))
            }
            Body::Raw(text) => Some(text),
        };

        let (header_pairs, mut extension_map) = view.read(|config| {
            (config.headers.to_pairs(), config.transport_defaults.clone())
        });
        extension_map.extend(extensions);

        let request = HttpRequest {
            method,
            url,
            headers: header_pairs,
            body: if method.is_bodyless() { None } else { encoded },
            extensions: extension_map,
        };

        debug!("{} {}", request.method, request.url);
        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(fault) => {
                return Err(Error::Fetch(FetchError {
                    method: request.method,
                    url: request.url,
                    body: request.body,
                    failure: Failure::Transport(fault),
                }));
            }
        };
        trace!("{} {} -> {}", request.method, request.url, response.status);

        if !response.is_success() {
            return Err(Error::Fetch(FetchError {
                method: request.method,
                url: request.url,
                body: request.body,
                failure: Failure::Http(response),
            }));
        }

        Ok(resolve::resolve(policy, kind, response)?)
    }

    fn lock(&self) -> MutexGuard<'_, ClientConfig> {
        lock(&self.config)
    }
}

impl fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Where the pipeline reads configuration after the header merge: the
/// shared state directly, or a per-call copy in snapshot mode. Writes
/// always land on the shared state, and on the copy too so the rest of
/// the build sees them.
enum ConfigView<'a> {
    Live(&'a Mutex<ClientConfig>),
    Snapshot {
        live: &'a Mutex<ClientConfig>,
        copy: ClientConfig,
    },
}

impl<'a> ConfigView<'a> {
    fn new(config: &'a Mutex<ClientConfig>) -> Self {
        let guard = lock(config);
        if guard.snapshot {
            let copy = ClientConfig::clone(&guard);
            drop(guard);
            ConfigView::Snapshot { live: config, copy }
        } else {
            drop(guard);
            ConfigView::Live(config)
        }
    }

    fn read<T>(&self, f: impl FnOnce(&ClientConfig) -> T) -> T {
        match self {
            ConfigView::Live(live) => f(&lock(live)),
            ConfigView::Snapshot { copy, .. } => f(copy),
        }
    }

    fn write(&mut self, f: impl Fn(&mut ClientConfig)) {
        match self {
            ConfigView::Live(live) => f(&mut lock(live)),
            ConfigView::Snapshot { live, copy } => {
                f(&mut lock(live));
                f(copy);
            }
        }
    }
}

/// Lock the configuration, recovering the data from a poisoned mutex.
fn lock(config: &Mutex<ClientConfig>) -> MutexGuard<'_, ClientConfig> {
    config.lock().unwrap_or_else(PoisonError::into_inner)
}
