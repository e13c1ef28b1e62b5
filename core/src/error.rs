//! Error types for the API client.
//!
//! # Design
//! `dispatch` only ever fails with `Transport` or `RelativeUrl`: a non-2xx
//! status is a normal response. `Status` exists for callers that opt into
//! treating non-2xx as failure via `HttpResponse::error_for_status`, which
//! the typed calls in `client` do.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ApiClient` and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client failed (DNS, connection refused, timeout).
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// A relative URL reached a transport that has no origin to resolve it.
    #[error("cannot resolve relative URL {0} without an origin")]
    RelativeUrl(String),

    /// The server answered with a non-2xx status.
    #[error("API call failed: {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ApiError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }
}
