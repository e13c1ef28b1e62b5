//! Runtime configuration and base-URL resolution.
//!
//! # Design
//! `RuntimeConfig` is read once at process start and never mutated. It is
//! owned by the client (or borrowed by the free functions in `url`), so tests
//! can construct arbitrary configurations without touching the process
//! environment. `from_lookup` takes any key lookup for exactly that reason;
//! `from_env` is a thin wrapper over it.

use tracing::debug;

/// Environment variable enabling gateway routing when set to `"true"`.
pub const GATEWAY_ENABLED_VAR: &str = "USE_APIM";
/// Environment variable holding the gateway origin.
pub const GATEWAY_BASE_URL_VAR: &str = "API_BASE_URL";
/// Environment variable holding the informational environment label.
pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";
/// Environment variable holding the origin relative URLs resolve against.
pub const ORIGIN_VAR: &str = "API_ORIGIN";

const DEFAULT_ENVIRONMENT: &str = "development";

/// Process-wide configuration deciding where API calls are routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub gateway_enabled: bool,
    pub gateway_base_url: Option<String>,
    pub environment: String,
    /// Origin used by the transport to resolve relative URLs. Plays the role
    /// of the page origin a browser would apply; never consulted by
    /// `resolve_base_url`.
    pub origin: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gateway_enabled: false,
            gateway_base_url: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            origin: None,
        }
    }
}

impl RuntimeConfig {
    /// Direct (relative) routing, resolved against `origin` at dispatch time.
    pub fn relative(origin: Option<&str>) -> Self {
        Self {
            origin: origin.map(str::to_string),
            ..Self::default()
        }
    }

    /// Gateway routing through `base_url`.
    pub fn gateway(base_url: &str) -> Self {
        Self {
            gateway_enabled: true,
            gateway_base_url: Some(base_url.to_string()),
            ..Self::default()
        }
    }

    pub fn with_environment(mut self, environment: &str) -> Self {
        self.environment = environment.to_string();
        self
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.to_string());
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// The gateway flag is enabled only by the exact string `"true"`. Empty
    /// values for the optional entries are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            gateway_enabled: lookup(GATEWAY_ENABLED_VAR).as_deref() == Some("true"),
            gateway_base_url: lookup(GATEWAY_BASE_URL_VAR),
            environment: non_empty(ENVIRONMENT_VAR)
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            origin: non_empty(ORIGIN_VAR),
        }
    }

    /// The effective base URL: the gateway origin when gateway routing is
    /// enabled and configured, otherwise `""` (same-origin, relative routing).
    ///
    /// A gateway flag without a base URL falls back to relative routing.
    pub fn resolve_base_url(&self) -> String {
        if !self.gateway_enabled {
            return String::new();
        }
        match self.gateway_base_url.as_deref() {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => {
                debug!("gateway routing enabled without a base URL, using relative routing");
                String::new()
            }
        }
    }
}
