use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use pagekeep::bridge::{ContentRemote, HttpRemote, SaveContentRequest};
use pagekeep::document::DocNode;
use pagekeep::error::PagekeepError;
use pagekeep::server;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::util::ServiceExt;

async fn send(method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = server::router().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn save(body: &str) -> (StatusCode, Value) {
    send("POST", "/api/pages/42/content", body).await
}

#[tokio::test]
async fn empty_body_object_is_rejected() {
    let (status, body) = save("{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content is required");
    assert_eq!(body["received"], "undefined");
}

#[tokio::test]
async fn array_content_is_rejected() {
    let (status, body) = save(r#"{"content": []}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content must be a valid JSON object");
    assert_eq!(body["received"], "array");
}

#[tokio::test]
async fn null_content_is_rejected() {
    let (status, body) = save(r#"{"content": null}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["received"], "null");
}

#[tokio::test]
async fn invalid_json_is_rejected_with_details() {
    let (status, body) = save("{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON in request body");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn primitive_body_is_rejected() {
    let (status, body) = save("17").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Request body is required");
    assert_eq!(body["received"], "number");
}

#[tokio::test]
async fn empty_content_object_is_echoed() {
    let (status, body) = save(r#"{"content": {}}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["pageId"], "42");
    assert_eq!(body["content"], json!({}));
    assert_eq!(body["html"], Value::Null);
    assert_eq!(body["markdown"], Value::Null);
    assert!(body["savedAt"].is_string());
}

#[tokio::test]
async fn renderings_are_echoed_when_present() {
    let request = json!({
        "content": { "type": "doc", "content": [] },
        "html": "<p>hi</p>",
        "markdown": "",
    });
    let (status, body) = save(&request.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"]["type"], "doc");
    assert_eq!(body["html"], "<p>hi</p>");
    assert_eq!(body["markdown"], Value::Null);
}

#[tokio::test]
async fn get_returns_placeholder() {
    let (status, body) = send("GET", "/api/pages/abc/content", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageId"], "abc");
    assert_eq!(body["content"], Value::Null);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn health_endpoint() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = server::router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

/// Serves `app` on an ephemeral local port and returns its base URL.
async fn listen(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn hello_request() -> SaveContentRequest {
    SaveContentRequest {
        content: DocNode::doc(vec![DocNode::paragraph("hello")]),
        html: Some("<p>hello</p>".to_string()),
        markdown: Some("hello".to_string()),
    }
}

#[tokio::test]
async fn http_remote_saves_through_the_content_api() {
    let base = listen(server::router()).await;
    let remote = HttpRemote::new(&base).unwrap();

    remote.save_content("42", &hello_request()).await.unwrap();
}

#[tokio::test]
async fn http_remote_reports_the_server_error_message() {
    let app = Router::new().route(
        "/api/pages/{id}/content",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Content is required", "received": "undefined" })),
            )
        }),
    );
    let base = listen(app).await;
    let remote = HttpRemote::new(&base).unwrap();

    match remote.save_content("42", &hello_request()).await {
        Err(PagekeepError::Remote(message)) => {
            assert!(message.contains("400"), "{}", message);
            assert!(message.contains("Content is required"), "{}", message);
        }
        other => panic!("expected a remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn http_remote_falls_back_to_the_status_reason() {
    let app = Router::new().route(
        "/api/pages/{id}/content",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
    );
    let base = listen(app).await;
    let remote = HttpRemote::new(&base).unwrap();

    match remote.save_content("42", &hello_request()).await {
        Err(PagekeepError::Remote(message)) => {
            assert_eq!(message, "503: Service Unavailable");
        }
        other => panic!("expected a remote error, got {:?}", other),
    }
}
