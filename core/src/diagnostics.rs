//! Read-only view of the resolved routing configuration, for troubleshooting.

use std::fmt;

use serde::Serialize;

use crate::config::RuntimeConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSnapshot {
    #[serde(rename = "useApim")]
    pub gateway_enabled: bool,
    #[serde(rename = "apimBaseUrl")]
    pub gateway_base_url: Option<String>,
    #[serde(rename = "baseUrl")]
    pub effective_base_url: String,
    pub environment: String,
}

impl ConfigSnapshot {
    pub fn capture(config: &RuntimeConfig) -> Self {
        Self {
            gateway_enabled: config.gateway_enabled,
            gateway_base_url: config.gateway_base_url.clone(),
            effective_base_url: config.resolve_base_url(),
            environment: config.environment.clone(),
        }
    }
}

impl fmt::Display for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = if self.effective_base_url.is_empty() {
            "(relative)"
        } else {
            self.effective_base_url.as_str()
        };
        write!(
            f,
            "environment={} gateway_enabled={} gateway_base_url={} effective_base_url={}",
            self.environment,
            self.gateway_enabled,
            self.gateway_base_url.as_deref().unwrap_or("(unset)"),
            base
        )
    }
}
