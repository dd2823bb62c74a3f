//! Full pipeline tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port, then drives a
//! `FetchClient` with the bundled ureq transport over real HTTP. The
//! `/echo` routes reflect the request back as JSON, so the tests assert
//! on what actually went over the wire: resolved URLs, merged headers,
//! encoded bodies. Fixed-payload routes cover response decoding.

use fetch_core::{
    AuthToken, Body, CallOptions, Error, Failure, FetchClient, Method, ResponseKind,
    ResponsePolicy, ResponseValue,
};
use mock_server::{EchoResponse, BYTES_BODY, FORM_BODY, TEXT_BODY};
use serde_json::json;

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn echoed(value: &ResponseValue) -> EchoResponse {
    serde_json::from_value(value.as_json().expect("expected a JSON value").clone()).unwrap()
}

#[test]
fn get_sends_query_and_default_headers() {
    let client = FetchClient::new(start_server());
    let value = client
        .get(
            "/echo/users",
            CallOptions::new().query([("active", json!(true)), ("page", json!(2))]),
        )
        .unwrap();

    let echo = echoed(&value);
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo/users");
    assert_eq!(echo.query, "active=true&page=2");
    assert_eq!(echo.header("Accept"), Some("application/json"));
    assert_eq!(echo.header("Content-Type"), Some("application/json"));
    assert_eq!(echo.body, "");
}

#[test]
fn target_with_query_concatenates_fragment_without_separator() {
    let client = FetchClient::new(start_server());
    let value = client
        .get(
            "/echo/users?active=true",
            CallOptions::new().query([("page", json!(2))]),
        )
        .unwrap();

    assert_eq!(echoed(&value).query, "active=truepage=2");
}

#[test]
fn raw_body_on_get_travels_as_query_string() {
    let client = FetchClient::new(start_server());
    let value = client
        .get("/echo/search", CallOptions::new().body("q=rust"))
        .unwrap();

    let echo = echoed(&value);
    assert_eq!(echo.query, "q=rust");
    assert_eq!(echo.body, "");
}

#[test]
fn json_body_arrives_verbatim() {
    let client = FetchClient::new(start_server());
    let value = client
        .post(
            "/echo/login",
            CallOptions::new().json(json!({"user": "a", "pass": "b"})),
        )
        .unwrap();

    let echo = echoed(&value);
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, r#"{"user":"a","pass":"b"}"#);
    assert_eq!(echo.header("Content-Type"), Some("application/json"));
}

#[test]
fn form_body_encodes_and_content_type_sticks() {
    let client = FetchClient::new(start_server());
    let value = client
        .post(
            "/echo/form",
            CallOptions::new().form([("x", json!(1)), ("y", json!(2))]),
        )
        .unwrap();

    let echo = echoed(&value);
    assert_eq!(echo.body, "x=1&y=2");
    assert_eq!(
        echo.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );

    // The overwritten Content-Type persists onto the next call.
    let value = client.get("/echo", CallOptions::new()).unwrap();
    assert_eq!(
        echoed(&value).header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
}

#[test]
fn per_call_headers_persist_across_calls() {
    let client = FetchClient::new(start_server());
    client
        .get("/echo", CallOptions::new().header("X-Trace", "t-1"))
        .unwrap();

    let value = client.get("/echo", CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).header("X-Trace"), Some("t-1"));
}

#[test]
fn auth_token_shows_up_as_authorization_header() {
    let client = FetchClient::new(start_server());

    client.set_token("abc");
    let value = client.get("/echo", CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).header("Authorization"), Some("Bearer abc"));

    client.set_token(AuthToken::with_scheme("xyz", "Token"));
    let value = client.get("/echo", CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).header("Authorization"), Some("Token xyz"));
}

#[test]
fn verbs_reach_the_wire_with_their_method() {
    let client = FetchClient::new(start_server());

    let value = client.put("/echo", CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).method, "PUT");

    let value = client.patch("/echo", CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).method, "PATCH");

    let value = client.delete("/echo", CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).method, "DELETE");

    let value = client.options("/echo", CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).method, "OPTIONS");
}

#[test]
fn absolute_target_bypasses_the_base_url() {
    let base = start_server();
    let client = FetchClient::new("http://base-url-must-not-be-used.invalid");
    let value = client
        .get(&format!("{base}/echo/abs"), CallOptions::new())
        .unwrap();

    assert_eq!(echoed(&value).path, "/echo/abs");
}

#[test]
fn not_found_wraps_into_a_fetch_error() {
    let base = start_server();
    let client = FetchClient::new(base.clone());
    let err = client.get("/status/404", CallOptions::new()).unwrap_err();

    match err {
        Error::Fetch(fetch) => {
            assert_eq!(fetch.method, Method::Get);
            assert_eq!(fetch.url, format!("{base}/status/404"));
            assert_eq!(fetch.status(), Some(404));
            assert!(fetch.body.is_none());
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn no_content_resolves_empty() {
    let client = FetchClient::new(start_server());
    let value = client.post("/status/204", CallOptions::new()).unwrap();
    assert!(value.is_empty());
}

#[test]
fn non_json_content_type_resolves_raw() {
    let client = FetchClient::new(start_server());
    let value = client.get("/text", CallOptions::new()).unwrap();

    let raw = value.as_raw().expect("expected the raw response");
    assert_eq!(raw.status, 200);
    assert_eq!(raw.body, TEXT_BODY.as_bytes());
    assert_eq!(raw.content_type(), Some("text/plain; charset=utf-8"));
}

#[test]
fn head_request_resolves_without_a_body() {
    let client = FetchClient::new(start_server());
    let value = client.head("/status/200", CallOptions::new()).unwrap();

    let raw = value.as_raw().expect("expected the raw response");
    assert_eq!(raw.status, 200);
    assert!(raw.body.is_empty());
}

#[test]
fn explicit_kind_decodes_text_bytes_and_form() {
    let client = FetchClient::new(start_server());
    client.set_response_policy(ResponsePolicy::ExplicitKind);

    let value = client
        .get("/text", CallOptions::new().response_type(ResponseKind::Text))
        .unwrap();
    assert_eq!(value.as_text(), Some(TEXT_BODY));

    let value = client
        .get(
            "/bytes",
            CallOptions::new().response_type(ResponseKind::Binary),
        )
        .unwrap();
    assert_eq!(value.as_bytes(), Some(BYTES_BODY));

    let value = client
        .get("/form", CallOptions::new().response_type(ResponseKind::Form))
        .unwrap();
    assert_eq!(
        value.as_form().unwrap(),
        &[
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "two words".to_string()),
            ("c".to_string(), "\u{00e9}".to_string()),
        ]
    );
}

#[test]
fn explicit_policy_without_a_kind_returns_raw() {
    let client = FetchClient::new(start_server());
    client.set_response_policy(ResponsePolicy::ExplicitKind);
    client.set_response_type(None);

    let value = client.get("/echo", CallOptions::new()).unwrap();
    let raw = value.as_raw().expect("expected the raw response");
    assert_eq!(raw.status, 200);
}

#[test]
fn connection_failure_wraps_as_a_transport_fault() {
    // Nothing listens on port 1.
    let client = FetchClient::new("http://127.0.0.1:1");
    let err = client.get("/anything", CallOptions::new()).unwrap_err();

    match err {
        Error::Fetch(fetch) => {
            assert_eq!(fetch.method, Method::Get);
            assert_eq!(fetch.url, "http://127.0.0.1:1/anything");
            assert!(matches!(fetch.failure, Failure::Transport(_)));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn free_functions_use_the_default_client() {
    let base = start_server();
    let value = fetch_core::get(&format!("{base}/echo/free"), CallOptions::new()).unwrap();
    assert_eq!(echoed(&value).path, "/echo/free");
}

#[test]
fn concurrent_calls_share_one_client() {
    let client = FetchClient::new(start_server());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            std::thread::spawn(move || {
                let value = client
                    .get(
                        "/echo",
                        CallOptions::new().query([("worker", json!(i))]),
                    )
                    .unwrap();
                echoed(&value).query
            })
        })
        .collect();

    let mut queries: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    queries.sort();
    assert_eq!(
        queries,
        vec!["worker=0", "worker=1", "worker=2", "worker=3"]
    );
}

#[test]
fn verb_options_accept_a_prebuilt_body_enum() {
    let client = FetchClient::new(start_server());
    let options = CallOptions {
        body: Body::Raw("plain payload".to_string()),
        ..CallOptions::default()
    };
    let value = client.post("/echo", options).unwrap();
    assert_eq!(echoed(&value).body, "plain payload");
}
