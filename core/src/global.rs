//! Process-wide default client and free verb functions.
//!
//! # Design
//! One lazily-built client with an empty base URL backs the free
//! functions, so call sites can issue requests without constructing a
//! client first. It is a convenience handle onto the same implementation,
//! configurable through [`default_client`]; configuration set there
//! persists for every later free-function call in the process.

use std::sync::LazyLock;

use crate::client::FetchClient;
use crate::error::Error;
use crate::options::CallOptions;
use crate::resolve::ResponseValue;

static DEFAULT_CLIENT: LazyLock<FetchClient> = LazyLock::new(|| FetchClient::new(""));

/// The shared client behind the free verb functions.
pub fn default_client() -> &'static FetchClient {
    &DEFAULT_CLIENT
}

/// GET through the default client. Targets are normally absolute URLs,
/// since the default base URL is empty.
pub fn get(target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
    DEFAULT_CLIENT.get(target, options)
}

pub fn post(target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
    DEFAULT_CLIENT.post(target, options)
}

pub fn put(target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
    DEFAULT_CLIENT.put(target, options)
}

pub fn patch(target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
    DEFAULT_CLIENT.patch(target, options)
}

pub fn delete(target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
    DEFAULT_CLIENT.delete(target, options)
}

pub fn head(target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
    DEFAULT_CLIENT.head(target, options)
}

pub fn options(target: &str, options: CallOptions) -> Result<ResponseValue, Error> {
    DEFAULT_CLIENT.options(target, options)
}
