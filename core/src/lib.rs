//! Endpoint resolution and request dispatch for the chat backend API.
//!
//! # Overview
//! Given a logical path such as `/chat` and a `RuntimeConfig`, the client
//! decides where the call goes (same-origin `/api/chat`, or
//! `<gateway>/api/chat` when routing through an API gateway) and sends it
//! with the default headers merged under the caller's.
//!
//! # Design
//! - `RuntimeConfig` is built once and owned by the client; nothing reads
//!   ambient globals at call time.
//! - URL resolution and header merging are pure and re-run on every call.
//! - `Transport` is the only place that does I/O. `dispatch` makes exactly
//!   one transport call and returns the raw response whatever its status.

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;
pub mod url;

pub use client::ApiClient;
pub use config::RuntimeConfig;
pub use diagnostics::ConfigSnapshot;
pub use error::ApiError;
pub use http::{CredentialsMode, HttpMethod, HttpRequest, HttpResponse};
pub use options::{merge_headers, RequestOptions};
pub use transport::{Transport, UreqTransport};
pub use types::{ChatMessage, ChatRequest};
pub use url::{build_url, normalize_path};
