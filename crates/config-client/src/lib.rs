//! Client access layer for the configuration service.
//!
//! Resolves application configuration by (application, profile, label)
//! coordinates through two API surfaces that share one transport:
//!
//! - [`ConfigApi`]: the normalized JSON query surface under `/api/config`.
//! - [`ConfigServerApi`]: the server's native YAML, Properties, and JSON
//!   endpoints.
//!
//! ## Architecture
//!
//! ```text
//! ConfigApi ───────┐
//!                  ├─► Dispatcher
//! ConfigServerApi ─┘       │
//!                          ├─► Interceptor::on_request
//!                          ├─► Transport::send (reqwest, 30 s timeout)
//!                          └─► Interceptor::on_response / on_error
//! ```
//!
//! The client is deliberately thin: no caching, no retries, no schema
//! validation. Every failure is logged once by the interceptor and returned.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use config_client::ConfigClient;
//! use config_model::ConfigCoordinate;
//!
//! let client = ConfigClient::from_env()?;
//! let coordinate = ConfigCoordinate::from_parts("orders-svc", "prod", None)?;
//! let url = client.config().get_config_value(&coordinate, "db.url").await?;
//! let yaml = client.server().get_config_yaml(&coordinate).await?;
//! ```

pub mod api;
pub mod interceptor;
pub mod native;
pub mod settings;
pub mod transport;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use config_model::ClientError;

pub use api::ConfigApi;
pub use interceptor::{Dispatcher, Interceptor, LoggingInterceptor};
pub use native::ConfigServerApi;
pub use settings::{ClientSettings, BASE_URL_ENV};
pub use transport::{
    HttpTransport, OutboundRequest, Transport, TransportConfig, TransportResponse,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};

/// Both API surfaces bound to one shared [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct ConfigClient {
    config: ConfigApi,
    server: ConfigServerApi,
}

impl ConfigClient {
    /// Builds a client from [`BASE_URL_ENV`] (or the default endpoint).
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_settings(&ClientSettings::from_env()?)
    }

    /// Builds a client from already-resolved settings.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(settings.transport_config()?)
    }

    /// Builds the HTTP transport from `config` with the logging interceptor.
    pub fn new(config: TransportConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_parts(
            Arc::new(transport),
            Arc::new(LoggingInterceptor),
        ))
    }

    /// Assembles a client around any transport and interceptor.
    pub fn with_parts(transport: Arc<dyn Transport>, interceptor: Arc<dyn Interceptor>) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(transport, interceptor));
        Self {
            config: ConfigApi::new(Arc::clone(&dispatcher)),
            server: ConfigServerApi::new(dispatcher),
        }
    }

    /// The normalized `/api/config` surface.
    pub fn config(&self) -> &ConfigApi {
        &self.config
    }

    /// The native config-server surface.
    pub fn server(&self) -> &ConfigServerApi {
        &self.server
    }
}
