use axum::{
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Body served by `/text`.
pub const TEXT_BODY: &str = "hello from the mock server";

/// Body served by `/bytes`; deliberately not valid UTF-8.
pub const BYTES_BODY: &[u8] = &[0x00, 0x9f, 0x92, 0x96];

/// Body served by `/form`.
pub const FORM_BODY: &str = "a=1&b=two+words&c=%C3%A9";

/// What `/echo` reflects back about the incoming request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    pub method: String,
    pub path: String,
    /// Raw query string, empty when the URL carried none.
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl EchoResponse {
    /// Look up a reflected header ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/status/{code}", any(status))
        .route("/text", get(text))
        .route("/bytes", get(bytes))
        .route("/form", get(form))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<EchoResponse> {
    Json(EchoResponse {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body,
    })
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn text() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        TEXT_BODY,
    )
}

async fn bytes() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        BYTES_BODY.to_vec(),
    )
}

async fn form() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/x-www-form-urlencoded")],
        FORM_BODY,
    )
}
