//! Endpoint dispatch.
//!
//! When the client runs against a local host it talks to the development
//! server directly; anywhere else it goes through the deployment's relative
//! API path on the configured origin.

use crate::core::config::ResolvedConfig;

/// Hosts that count as local development.
const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];

pub fn is_local_host(host: &str) -> bool {
    LOCAL_HOSTS.contains(&host.trim().to_ascii_lowercase().as_str())
}

/// Resolved URLs for every route the client calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Applies the local-vs-relative dispatch rule.
    pub fn dispatch(host: &str, origin: &str, local_base_url: &str, api_prefix: &str) -> Self {
        if is_local_host(host) {
            return Self::with_base(local_base_url);
        }

        let prefix = api_prefix.trim_matches('/');
        let origin = origin.trim_end_matches('/');
        if prefix.is_empty() {
            Self::with_base(origin)
        } else {
            Self::with_base(format!("{origin}/{prefix}"))
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::dispatch(
            &config.host,
            &config.origin,
            &config.local_base_url,
            &config.api_prefix,
        )
    }

    /// Uses `base` verbatim (tests, explicit overrides).
    pub fn with_base(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn analyze(&self) -> String {
        format!("{}/analyze", self.base)
    }

    pub fn sentiment_trend(&self) -> String {
        format!("{}/sentiment-trend", self.base)
    }

    pub fn health(&self) -> String {
        format!("{}/health", self.base)
    }
}
