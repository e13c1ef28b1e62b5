use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, AgentDetails, ChatMessage, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- agent ---

#[tokio::test]
async fn agent_details_ok() {
    let resp = app().oneshot(get("/api/agent")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let agent: AgentDetails = body_json(resp).await;
    assert_eq!(agent.name, "assistant");
}

#[tokio::test]
async fn routes_live_under_api_prefix_only() {
    let resp = app().oneshot(get("/agent")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- chat ---

#[tokio::test]
async fn chat_replies_with_echo() {
    let resp = app()
        .oneshot(json_request("POST", "/api/chat", r#"{"message":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: ChatMessage = body_json(resp).await;
    assert_eq!(reply.role, "assistant");
    assert_eq!(reply.content, "echo: hello");
}

#[tokio::test]
async fn chat_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/chat", r#"{"text":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn chat_history_empty() {
    let resp = app().oneshot(get("/api/chat/history")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let history: Vec<ChatMessage> = body_json(resp).await;
    assert!(history.is_empty());
}

#[tokio::test]
async fn chat_history_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/chat", r#"{"message":"first"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/chat/history"))
        .await
        .unwrap();
    let history: Vec<ChatMessage> = body_json(resp).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, "user");
    assert_eq!(history[0].content, "first");
    assert_eq!(history[1].content, "echo: first");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri("/api/chat/history")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/chat/history"))
        .await
        .unwrap();
    let history: Vec<ChatMessage> = body_json(resp).await;
    assert!(history.is_empty());
}

// --- config / download ---

#[tokio::test]
async fn azure_config_ok() {
    let resp = app().oneshot(get("/api/config/azure")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let config: serde_json::Value = body_json(resp).await;
    assert_eq!(config["deployment"], "chat");
}

#[tokio::test]
async fn download_returns_contents() {
    let resp = app().oneshot(get("/api/download/report-7")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"contents of report-7");
}

#[tokio::test]
async fn download_missing_returns_404() {
    let resp = app().oneshot(get("/api/download/missing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- echo ---

#[tokio::test]
async fn echo_reports_request_shape() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/echo")
                .header("X-Client", "tests")
                .header(http::header::CONTENT_TYPE, "text/plain")
                .body("payload".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.headers["x-client"], "tests");
    assert_eq!(echo.headers["content-type"], "text/plain");
    assert_eq!(echo.body, "payload");
}
