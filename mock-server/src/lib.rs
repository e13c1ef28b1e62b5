use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentDetails {
    pub name: String,
    pub description: String,
    pub model: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AzureConfig {
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

/// What `/api/echo` saw. Header names are lowercase; repeated headers are
/// joined with `", "`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub type History = Arc<RwLock<Vec<ChatMessage>>>;

pub fn app() -> Router {
    let history: History = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/agent", get(agent_details))
        .route("/api/chat", post(chat))
        .route("/api/chat/history", get(chat_history).delete(clear_history))
        .route("/api/config/azure", get(azure_config))
        .route("/api/download/{file_id}", get(download))
        .route("/api/echo", any(echo))
        .with_state(history)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn agent_details() -> Json<AgentDetails> {
    Json(AgentDetails {
        name: "assistant".to_string(),
        description: "Answers questions about uploaded documents".to_string(),
        model: "gpt-4o".to_string(),
    })
}

async fn chat(State(history): State<History>, Json(input): Json<ChatRequest>) -> Json<ChatMessage> {
    let user = ChatMessage {
        id: Uuid::new_v4(),
        role: "user".to_string(),
        content: input.message,
    };
    let reply = ChatMessage {
        id: Uuid::new_v4(),
        role: "assistant".to_string(),
        content: format!("echo: {}", user.content),
    };
    let mut history = history.write().await;
    history.push(user);
    history.push(reply.clone());
    debug!(messages = history.len(), "chat message stored");
    Json(reply)
}

async fn chat_history(State(history): State<History>) -> Json<Vec<ChatMessage>> {
    Json(history.read().await.clone())
}

async fn clear_history(State(history): State<History>) -> StatusCode {
    history.write().await.clear();
    StatusCode::NO_CONTENT
}

async fn azure_config() -> Json<AzureConfig> {
    Json(AzureConfig {
        endpoint: "https://example.openai.azure.com".to_string(),
        deployment: "chat".to_string(),
        api_version: "2024-06-01".to_string(),
    })
}

async fn download(Path(file_id): Path<String>) -> Result<String, StatusCode> {
    if file_id == "missing" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(format!("contents of {file_id}"))
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    Json(Echo {
        method: method.to_string(),
        headers: flatten_headers(&headers),
        body,
    })
}

fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    flat
}
