mod common;

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use pam_policy_transport::{
    fetch, HttpTransport, Method, Transport, TransportConfig, TransportError,
};
use serde_json::{json, Value};

use common::TestServer;

fn engine() -> Router {
    Router::new()
        .route(
            "/v1/data/display",
            get(|| async { Json(json!({"result": {"display_spec": []}, "decision_id": "x"})) }),
        )
        .route(
            "/v1/data/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let accept = headers
                    .get("accept")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"result": {"received": body, "accept": accept}}))
            }),
        )
        .route("/v1/data/bare", get(|| async { Json(json!({"allow": true})) }))
        .route("/v1/data/list", get(|| async { Json(json!([1, 2, 3])) }))
        .route("/v1/data/text", get(|| async { "definitely not json" }))
        .route(
            "/v1/data/broken",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"result": {"allow": true}})),
                )
            }),
        )
        .route(
            "/v1/data/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"result": {}}))
            }),
        )
}

fn transport(server: &TestServer) -> HttpTransport {
    HttpTransport::new(server.base_url.clone(), TransportConfig::default()).unwrap()
}

#[test]
fn get_returns_result_object_without_envelope() {
    let server = TestServer::spawn(engine());
    let result = transport(&server)
        .request(Method::Get, "/v1/data/display", None)
        .unwrap();

    assert_eq!(Value::Object(result), json!({"display_spec": []}));
}

#[test]
fn post_sends_json_body_with_json_headers() {
    let server = TestServer::spawn(engine());
    let body = json!({"input": {"sysinfo": {"pam_username": "alice"}}});

    let result = transport(&server)
        .request(Method::Post, "/v1/data/echo", Some(&body))
        .unwrap();

    assert_eq!(result["received"], body);
    assert_eq!(result["accept"], "application/json");
}

#[test]
fn non_success_status_is_an_error() {
    let server = TestServer::spawn(engine());
    let err = transport(&server)
        .request(Method::Get, "/v1/data/broken", None)
        .unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 500, .. }));
}

#[test]
fn unknown_path_is_an_error() {
    let server = TestServer::spawn(engine());
    let err = transport(&server)
        .request(Method::Get, "/v1/data/nope", None)
        .unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 404, .. }));
}

#[test]
fn malformed_envelopes_are_errors() {
    let server = TestServer::spawn(engine());
    let t = transport(&server);

    assert!(matches!(
        t.request(Method::Get, "/v1/data/bare", None).unwrap_err(),
        TransportError::MissingResult { .. }
    ));
    assert!(matches!(
        t.request(Method::Get, "/v1/data/list", None).unwrap_err(),
        TransportError::NotAnObject { .. }
    ));
    assert!(matches!(
        t.request(Method::Get, "/v1/data/text", None).unwrap_err(),
        TransportError::Parse { .. }
    ));
}

#[test]
fn path_is_appended_without_normalization() {
    let server = TestServer::spawn(engine());
    let t = transport(&server);

    assert_eq!(t.url_for("/v1/data/display"), format!("{}/v1/data/display", server.base_url));
    // Without the leading slash the path runs into the port and the URL is invalid.
    assert!(t.request(Method::Get, "v1/data/display", None).is_err());
}

#[test]
fn slow_engine_times_out() {
    let server = TestServer::spawn(engine());
    let t = HttpTransport::new(
        server.base_url.clone(),
        TransportConfig::default().with_timeout(Duration::from_millis(200)),
    )
    .unwrap();

    let err = t.request(Method::Get, "/v1/data/slow", None).unwrap_err();
    assert!(err.is_timeout());
}

#[test]
fn fetch_yields_none_when_engine_is_unreachable() {
    // Port 1 on loopback is never served in test environments.
    let t = HttpTransport::new("http://127.0.0.1:1", TransportConfig::default()).unwrap();
    assert!(fetch(&t, Method::Get, "/v1/data/display", None).is_none());
}
