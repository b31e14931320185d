// Client configuration
//
// Layered the usual way: built-in defaults, then an optional `portal.toml` next to the
// binary, then PORTAL_* environment variables (e.g. PORTAL_API_BASE_URL).

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::PortalError;

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the portal REST backend.
    pub api_base_url: String,
    /// Per-request timeout. There is no retry layer on top of this; retries are
    /// user-initiated by pressing the triggering button again.
    pub request_timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl PortalConfig {
    pub fn load() -> Result<Self, PortalError> {
        let defaults = PortalConfig::default();
        let cfg = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .add_source(File::with_name("portal").required(false))
            .add_source(Environment::with_prefix("PORTAL"))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = PortalConfig::default();
        assert!(
            cfg.api_base_url.starts_with("http"),
            "default base URL should be an http(s) URL: {}",
            cfg.api_base_url
        );
        assert!(cfg.request_timeout_secs > 0);
    }
}
