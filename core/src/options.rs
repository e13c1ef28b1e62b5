//! Caller-supplied request options and the header merge rule.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{CredentialsMode, HttpMethod};

/// Headers every dispatched request starts from.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[("Content-Type", "application/json")];

/// The recognized per-call options. Anything left unset falls back to the
/// dispatcher's defaults: `GET`, no body, `DEFAULT_HEADERS`, and the
/// client's credentials default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
    pub credentials: Option<CredentialsMode>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the body. Headers are left alone; the default
    /// `Content-Type` already announces JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = Some(mode);
        self
    }
}

/// Overlay `overrides` onto `defaults`, key by key.
///
/// Names compare ASCII case-insensitively. An override replaces the default
/// in place (keeping the caller's spelling of the name); new names are
/// appended in caller order. Defaults without an override survive.
pub fn merge_headers<K, V>(defaults: &[(K, V)], overrides: &[(String, String)]) -> Vec<(String, String)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();
    for (name, value) in overrides {
        match merged.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => *slot = (name.clone(), value.clone()),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}
