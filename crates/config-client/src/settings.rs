//! Environment-driven client settings.
//!
//! The base URL is read once, at construction, from [`BASE_URL_ENV`]. An
//! unset or empty variable selects [`DEFAULT_BASE_URL`]. A value that is not
//! a usable URL fails here rather than on the first call.

use config_model::ClientError;
use tracing::debug;

use crate::transport::{TransportConfig, DEFAULT_BASE_URL};

/// Environment variable holding the configuration service base URL.
pub const BASE_URL_ENV: &str = "CONFIG_API_BASE_URL";

/// Resolved startup settings for a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    base_url: String,
}

impl ClientSettings {
    /// Reads [`BASE_URL_ENV`] from the process environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::resolve(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    /// Uses `base_url` as given.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::resolve(Some(base_url))
    }

    fn resolve(value: Option<&str>) -> Result<Self, ClientError> {
        let base_url = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        };
        // Validate eagerly so a bad value is a startup error.
        TransportConfig::new(&base_url)?;
        debug!(base_url = %base_url, "resolved configuration service base URL");
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the transport configuration for these settings.
    pub fn transport_config(&self) -> Result<TransportConfig, ClientError> {
        TransportConfig::new(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_falls_back_to_default() {
        assert_eq!(
            ClientSettings::resolve(None).unwrap().base_url(),
            "http://localhost:8888"
        );
        assert_eq!(
            ClientSettings::resolve(Some("  ")).unwrap().base_url(),
            "http://localhost:8888"
        );
    }

    #[test]
    fn explicit_value_is_used() {
        let settings = ClientSettings::resolve(Some("https://config.internal:8443")).unwrap();
        assert_eq!(settings.base_url(), "https://config.internal:8443");
        assert_eq!(
            settings.transport_config().unwrap().base_url().host_str(),
            Some("config.internal")
        );
    }

    #[test]
    fn malformed_value_is_a_startup_error() {
        let err = ClientSettings::with_base_url("::not-a-url::").unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
    }
}
