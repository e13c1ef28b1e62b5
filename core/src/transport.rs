//! The seam between request building and the network.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and returns the response as data.
//! `UreqTransport` is the stock implementation. It never treats an HTTP
//! status as an error and never retries; every failure it reports carries
//! the underlying ureq error as its source.

use std::fmt;
use std::time::Duration;

use tracing::debug;
use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};
use ::url::Url;

use crate::error::ApiError;
use crate::http::{CredentialsMode, HttpMethod, HttpRequest, HttpResponse};

/// Executes a single HTTP request.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a ureq agent.
///
/// Relative URLs (`/api/...`) are resolved against `origin`, the way a
/// browser resolves them against the page origin.
///
/// Headers on the request are always sent as given. The request's
/// credentials mode only governs the transport's ambient credentials (the
/// analogue of a browser's cookie jar), added with `with_ambient_credential`:
/// `Omit` never attaches them, `Include` always does, and `SameOrigin` or an
/// unset mode attaches them only when the target shares `origin`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    origin: Option<String>,
    ambient: Vec<(String, String)>,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("origin", &self.origin)
            .field("ambient", &self.ambient.len())
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(origin: Option<&str>) -> Self {
        Self::build(origin, None)
    }

    /// Same as `new`, with a whole-request timeout.
    pub fn with_timeout(origin: Option<&str>, timeout: Duration) -> Self {
        Self::build(origin, Some(timeout))
    }

    fn build(origin: Option<&str>, timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self {
            agent,
            origin: origin.map(|o| o.trim_end_matches('/').to_string()),
            ambient: Vec::new(),
        }
    }

    /// Attach a credential header (e.g. a session `Cookie`) to requests whose
    /// credentials mode allows it. A header of the same name set on the
    /// request itself takes precedence.
    pub fn with_ambient_credential(mut self, name: &str, value: &str) -> Self {
        self.ambient.push((name.to_string(), value.to_string()));
        self
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Absolute URLs pass through; origin-relative ones are joined with the
    /// configured origin.
    fn absolute_url(&self, url: &str) -> Result<String, ApiError> {
        if !url.starts_with('/') {
            return Ok(url.to_string());
        }
        match &self.origin {
            Some(origin) => Ok(format!("{origin}{url}")),
            None => Err(ApiError::RelativeUrl(url.to_string())),
        }
    }

    /// Compares scheme, host and port; case and default ports are
    /// normalized by the parser. Unparseable URLs are never same-origin.
    fn same_origin(&self, absolute: &str) -> bool {
        let Some(origin) = self.origin.as_deref() else {
            return false;
        };
        match (Url::parse(origin), Url::parse(absolute)) {
            (Ok(origin), Ok(target)) => origin.origin() == target.origin(),
            _ => false,
        }
    }

    fn attach_ambient(&self, mode: Option<CredentialsMode>, absolute: &str) -> bool {
        match mode {
            Some(CredentialsMode::Omit) => false,
            Some(CredentialsMode::Include) => true,
            Some(CredentialsMode::SameOrigin) | None => self.same_origin(absolute),
        }
    }

    /// The request's headers, followed by any ambient credentials the
    /// credentials mode lets through.
    fn outgoing_headers<'a>(&'a self, request: &'a HttpRequest, absolute: &str) -> Vec<(&'a str, &'a str)> {
        let mut headers: Vec<(&str, &str)> = request
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if self.ambient.is_empty() || !self.attach_ambient(request.credentials, absolute) {
            return headers;
        }
        for (name, value) in &self.ambient {
            if request.header(name).is_none() {
                headers.push((name.as_str(), value.as_str()));
            }
        }
        headers
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.absolute_url(&request.url)?;
        let headers = self.outgoing_headers(request, &url);
        let body = request.body.as_deref();

        let result = match (request.method, body) {
            (HttpMethod::Get, None) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Get, Some(_)) => {
                send(with_headers(self.agent.get(&url).force_send_body(), &headers), body)
            }
            (HttpMethod::Delete, None) => with_headers(self.agent.delete(&url), &headers).call(),
            (HttpMethod::Delete, Some(_)) => {
                send(with_headers(self.agent.delete(&url).force_send_body(), &headers), body)
            }
            (HttpMethod::Post, _) => send(with_headers(self.agent.post(&url), &headers), body),
            (HttpMethod::Put, _) => send(with_headers(self.agent.put(&url), &headers), body),
            (HttpMethod::Patch, _) => send(with_headers(self.agent.patch(&url), &headers), body),
        };
        let mut response = result.map_err(|e| ApiError::transport(url.as_str(), e))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::transport(url.as_str(), e))?;

        debug!(method = request.method.as_str(), %url, status = status.as_u16(), "response received");
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(&str, &str)]) -> RequestBuilder<B> {
    for &(name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
