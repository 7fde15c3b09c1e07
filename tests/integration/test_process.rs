use super::helpers::{
    UpstreamCall, assert_status, expect_status, read_json, send, spawn_app,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use fkg_upload::infrastructure::upstream::traits::{ProcessMethod, ProcessRequest};
use serde_json::{Value, json};

const PROCESS_URI: &str = "/api/extensions/fkgupload/api/process";

fn request(method: &str, path: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(format!("{}{}", PROCESS_URI, path));
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    req.expect("failed to build process request")
}

fn only_process_call(calls: &[UpstreamCall]) -> ProcessRequest {
    assert_eq!(calls.len(), 1, "expected exactly one upstream call");
    match &calls[0] {
        UpstreamCall::Process { request, .. } => request.clone(),
        other => panic!("expected a process call, got {:?}", other),
    }
}

#[tokio::test]
async fn list_passes_upstream_json_through() {
    let app = spawn_app();
    let upstream_body = json!({"success": true, "data": [["a1b2c", 1, "42"]]});
    app.upstream.respond_to_process(200, &upstream_body.to_string());

    let res = send(&app.app, request("GET", "/7900/1001", None)).await;
    let res = expect_status(res, StatusCode::OK).await;
    let json: Value = read_json(res).await;
    assert_eq!(json, upstream_body);

    let call = only_process_call(&app.upstream.calls());
    assert_eq!(call, ProcessRequest::get(&["7900", "1001"]));
}

#[tokio::test]
async fn percent_encoded_ids_arrive_decoded() {
    let app = spawn_app();

    let res = send(&app.app, request("GET", "/7901/F%2F1", None)).await;
    expect_status(res, StatusCode::OK).await;

    let call = only_process_call(&app.upstream.calls());
    assert_eq!(call.segments, vec!["7901".to_string(), "F/1".to_string()]);
}

#[tokio::test]
async fn create_forwards_the_body_verbatim() {
    let app = spawn_app();
    let body = json!({"tema": "Bænk", "foto_objek": "1001", "foto_lokat": "a1b2c"});

    let res = send(&app.app, request("POST", "/7900", Some(body.clone()))).await;
    expect_status(res, StatusCode::OK).await;

    let call = only_process_call(&app.upstream.calls());
    assert_eq!(call, ProcessRequest::post(&["7900"], body));
}

#[tokio::test]
async fn update_forwards_set_primary() {
    let app = spawn_app();
    let body = json!({"objekt_id": "1001", "objekt_id_7900": "42"});

    let res = send(&app.app, request("PUT", "/7900", Some(body.clone()))).await;
    expect_status(res, StatusCode::OK).await;

    let call = only_process_call(&app.upstream.calls());
    assert_eq!(call.method, ProcessMethod::Put);
    assert_eq!(call.body, Some(body));
}

#[tokio::test]
async fn empty_mutation_body_is_forwarded_as_empty_object() {
    let app = spawn_app();

    let res = send(&app.app, request("POST", "/7900", None)).await;
    expect_status(res, StatusCode::OK).await;

    let call = only_process_call(&app.upstream.calls());
    assert_eq!(call.body, Some(json!({})));
}

#[tokio::test]
async fn delete_is_limited_to_link_records() {
    let app = spawn_app();

    let res = send(&app.app, request("DELETE", "/7900/42", None)).await;
    expect_status(res, StatusCode::OK).await;
    let call = only_process_call(&app.upstream.calls());
    assert_eq!(call, ProcessRequest::delete(&["7900", "42"]));

    let res = send(&app.app, request("DELETE", "/7901/42", None)).await;
    let res = expect_status(res, StatusCode::METHOD_NOT_ALLOWED).await;
    let json: Value = read_json(res).await;
    assert_eq!(json["success"], false);
    assert_eq!(app.upstream.calls().len(), 1);
}

#[tokio::test]
async fn upstream_rejection_becomes_a_500_envelope() {
    let app = spawn_app();
    app.upstream.respond_to_process(404, "no such record");

    let res = send(&app.app, request("GET", "/7900/1001", None)).await;
    let res = expect_status(res, StatusCode::INTERNAL_SERVER_ERROR).await;
    let json: Value = read_json(res).await;
    assert_eq!(
        json,
        json!({
            "success": false,
            "message": "Failed to relay request",
            "error": "HTTP error! status: 404, body: no such record",
        })
    );
}

#[tokio::test]
async fn invalid_json_body_is_not_forwarded() {
    let app = spawn_app();

    let req = Request::builder()
        .method("PUT")
        .uri(format!("{}/7900", PROCESS_URI))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    assert_status(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.upstream.calls().is_empty());
}

#[tokio::test]
async fn health_reports_upstream_and_request_id() {
    let app = spawn_app();

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("failed to build health request");
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    assert!(res.headers().contains_key("x-request-id"));
    let json: Value = read_json(res).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["upstream"], "https://gc2.test");
}
