//! Request dispatch for the chat backend API.
//!
//! # Design
//! `ApiClient` owns an immutable `RuntimeConfig` and a `Transport`. Building
//! a request (`build_request`) is pure: URL resolution plus the header merge.
//! `dispatch` hands that request to the transport exactly once and returns
//! whatever comes back; a non-2xx status is not an error at this layer.
//!
//! The typed calls at the bottom (`agent_details`, `chat_history`, ...) are
//! the caller layer. They all apply one status policy,
//! `HttpResponse::error_for_status`.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::RuntimeConfig;
use crate::diagnostics::ConfigSnapshot;
use crate::error::ApiError;
use crate::http::{CredentialsMode, HttpMethod, HttpRequest, HttpResponse};
use crate::options::{merge_headers, RequestOptions, DEFAULT_HEADERS};
use crate::transport::{Transport, UreqTransport};
use crate::types::{ChatMessage, ChatRequest};
use crate::url::build_url;

/// Routes logical API paths to the backend, directly or through a gateway.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    config: RuntimeConfig,
    transport: T,
    default_credentials: Option<CredentialsMode>,
}

impl ApiClient<UreqTransport> {
    /// Client over a ureq transport that resolves relative URLs against
    /// `config.origin`.
    pub fn new(config: RuntimeConfig) -> Self {
        let transport = UreqTransport::new(config.origin.as_deref());
        Self::with_transport(config, transport)
    }

    pub fn from_env() -> Self {
        Self::new(RuntimeConfig::from_env())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: RuntimeConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            default_credentials: None,
        }
    }

    /// Credentials mode applied when a call leaves `credentials` unset.
    /// Without this, unset credentials are passed through as unset.
    pub fn with_default_credentials(mut self, mode: CredentialsMode) -> Self {
        self.default_credentials = Some(mode);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The URL a call to `path` would target.
    pub fn url(&self, path: &str) -> String {
        build_url(&self.config, path)
    }

    pub fn diagnostics(&self) -> ConfigSnapshot {
        ConfigSnapshot::capture(&self.config)
    }

    /// Describe the request `dispatch` would send, without sending it.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        HttpRequest {
            method: options.method.unwrap_or_default(),
            url: self.url(path),
            headers: merge_headers(DEFAULT_HEADERS, &options.headers),
            body: options.body,
            credentials: options.credentials.or(self.default_credentials),
        }
    }

    /// Send one request for `path` and return the raw response.
    ///
    /// Only transport failures are errors; the response status is left for
    /// the caller to judge. No retries.
    pub fn dispatch(&self, path: &str, options: RequestOptions) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(path, options);
        debug!(method = request.method.as_str(), url = %request.url, "dispatching");
        self.transport.execute(&request)
    }

    fn fetch_json<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        self.dispatch(path, options)?.error_for_status()?.json()
    }

    pub fn agent_details(&self) -> Result<serde_json::Value, ApiError> {
        self.fetch_json("/agent", RequestOptions::new())
    }

    pub fn send_chat_message(&self, message: &str) -> Result<ChatMessage, ApiError> {
        let payload = ChatRequest {
            message: message.to_string(),
        };
        let options = RequestOptions::new()
            .method(HttpMethod::Post)
            .json(&payload)?
            .credentials(CredentialsMode::Include);
        self.fetch_json("/chat", options)
    }

    pub fn chat_history(&self) -> Result<Vec<ChatMessage>, ApiError> {
        let options = RequestOptions::new().credentials(CredentialsMode::Include);
        self.fetch_json("/chat/history", options)
    }

    pub fn azure_config(&self) -> Result<serde_json::Value, ApiError> {
        self.fetch_json("/config/azure", RequestOptions::new())
    }

    pub fn download_url(&self, file_id: &str) -> String {
        self.url(&format!("/download/{file_id}"))
    }
}
