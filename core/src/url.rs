//! Logical path to request URL.
//!
//! Every URL carries exactly one `/api` segment between the effective base
//! and the normalized path, so backend routes are defined once under `/api`
//! whatever the deployment topology.

use std::borrow::Cow;

use crate::config::RuntimeConfig;

/// Prefix inserted between the base URL and the logical path.
pub const API_PREFIX: &str = "/api";

/// Ensure `path` starts with a single `/`, prepending one if missing.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Build the request URL for `path` under `config`.
///
/// Relative mode yields `/api<path>`; gateway mode yields
/// `<base without one trailing slash>/api<path>`. The path itself is not
/// validated.
pub fn build_url(config: &RuntimeConfig, path: &str) -> String {
    let path = normalize_path(path);
    let base = config.resolve_base_url();
    if base.is_empty() {
        return format!("{API_PREFIX}{path}");
    }
    let base = base.strip_suffix('/').unwrap_or(&base);
    format!("{base}{API_PREFIX}{path}")
}
