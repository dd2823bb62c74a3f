//! Response resolution: decoding a successful response into a value.
//!
//! # Design
//! Only 2xx responses reach this module; failures are wrapped before it.
//! Two policies have shipped historically and both are selectable:
//! content negotiation sniffs status and `Content-Type`, while the
//! explicit policy dispatches strictly on the configured response kind.
//! Decoding faults surface as [`DecodeError`] and are not wrapped into
//! the fetch-error shape.

use serde_json::Value;

use crate::error::DecodeError;
use crate::http::HttpResponse;

/// Which resolution policy the client runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// 204/205 resolve empty; a JSON `Content-Type` parses; anything else
    /// comes back raw.
    ContentNegotiation,
    /// Dispatch strictly on the configured [`ResponseKind`]; an unset kind
    /// yields the raw response.
    ExplicitKind,
}

/// How to decode a body under the explicit policy.
///
/// `Blob` and `Binary` both yield the body bytes; the split is kept
/// because callers select them as distinct kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Text,
    Blob,
    Binary,
    Form,
    Raw,
}

/// A decoded response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseValue {
    /// No content (status 204 or 205 under content negotiation).
    Empty,
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
    Form(Vec<(String, String)>),
    /// The undecoded response, headers and body as received.
    Raw(HttpResponse),
}

impl ResponseValue {
    /// True for the no-content outcome.
    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseValue::Empty)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseValue::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&[(String, String)]> {
        match self {
            ResponseValue::Form(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&HttpResponse> {
        match self {
            ResponseValue::Raw(response) => Some(response),
            _ => None,
        }
    }
}

/// Decode `response` under `policy`, with `kind` as the effective response
/// kind (per-call override already applied by the caller).
pub fn resolve(
    policy: ResponsePolicy,
    kind: Option<ResponseKind>,
    response: HttpResponse,
) -> Result<ResponseValue, DecodeError> {
    match policy {
        ResponsePolicy::ContentNegotiation => negotiate(response),
        ResponsePolicy::ExplicitKind => explicit(kind, response),
    }
}

fn negotiate(response: HttpResponse) -> Result<ResponseValue, DecodeError> {
    if response.status == 204 || response.status == 205 {
        return Ok(ResponseValue::Empty);
    }
    let is_json = response
        .content_type()
        .is_some_and(|ct| ct.contains("application/json"));
    if is_json {
        let value = serde_json::from_slice(&response.body)?;
        return Ok(ResponseValue::Json(value));
    }
    Ok(ResponseValue::Raw(response))
}

fn explicit(
    kind: Option<ResponseKind>,
    response: HttpResponse,
) -> Result<ResponseValue, DecodeError> {
    match kind {
        Some(ResponseKind::Json) => {
            let value = serde_json::from_slice(&response.body)?;
            Ok(ResponseValue::Json(value))
        }
        Some(ResponseKind::Text) => Ok(ResponseValue::Text(
            String::from_utf8_lossy(&response.body).into_owned(),
        )),
        Some(ResponseKind::Blob) | Some(ResponseKind::Binary) => {
            Ok(ResponseValue::Bytes(response.body))
        }
        Some(ResponseKind::Form) => {
            if let Some(ct) = response.content_type() {
                if ct.starts_with("multipart/") {
                    return Err(DecodeError::Multipart {
                        content_type: ct.to_string(),
                    });
                }
            }
            Ok(ResponseValue::Form(parse_form(&response.body)))
        }
        Some(ResponseKind::Raw) | None => Ok(ResponseValue::Raw(response)),
    }
}

/// Parse an `application/x-www-form-urlencoded` body into ordered pairs.
///
/// `+` decodes to space, invalid percent-escapes and non-UTF-8 bytes decode
/// lossily, empty segments are skipped, a segment without `=` becomes a
/// pair with an empty value.
fn parse_form(body: &[u8]) -> Vec<(String, String)> {
    let text = String::from_utf8_lossy(body);
    text.split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
