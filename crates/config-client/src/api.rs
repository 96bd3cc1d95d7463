//! Normalized configuration API.
//!
//! JSON operations over the `/api/config` REST surface. The label always
//! travels in the path, never in the query string. Failure handling is left
//! entirely to the interceptor pipeline.

use std::sync::Arc;

use config_model::{ClientError, ConfigCoordinate};
use serde_json::Value;

use crate::interceptor::Dispatcher;
use crate::transport::OutboundRequest;

const CONFIG_ROOT: &str = "/api/config";

/// Operations addressing configuration by [`ConfigCoordinate`].
#[derive(Debug, Clone)]
pub struct ConfigApi {
    dispatcher: Arc<Dispatcher>,
}

impl ConfigApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// `GET /api/config/{application}/{profile}/{label}`
    ///
    /// Returns the full configuration document.
    pub async fn get_config(&self, coordinate: &ConfigCoordinate) -> Result<Value, ClientError> {
        self.get_json(OutboundRequest::get(coordinate_path(None, coordinate)))
            .await
    }

    /// `GET /api/config/sources/{application}/{profile}/{label}`
    ///
    /// Returns the ordered sources contributing to the merged configuration.
    pub async fn get_config_sources(
        &self,
        coordinate: &ConfigCoordinate,
    ) -> Result<Value, ClientError> {
        self.get_json(OutboundRequest::get(coordinate_path(
            Some("sources"),
            coordinate,
        )))
        .await
    }

    /// `GET /api/config/value/{application}/{profile}/{label}?key=`
    ///
    /// Returns the single resolved value for `key`.
    pub async fn get_config_value(
        &self,
        coordinate: &ConfigCoordinate,
        key: &str,
    ) -> Result<Value, ClientError> {
        let request =
            OutboundRequest::get(coordinate_path(Some("value"), coordinate)).query("key", key);
        self.get_json(request).await
    }

    /// `GET /api/config/search/{application}/{profile}/{label}?keyword=`
    pub async fn search_config(
        &self,
        coordinate: &ConfigCoordinate,
        keyword: &str,
    ) -> Result<Value, ClientError> {
        let request = OutboundRequest::get(coordinate_path(Some("search"), coordinate))
            .query("keyword", keyword);
        self.get_json(request).await
    }

    /// `POST /api/config/refresh`
    ///
    /// Asks the service to invalidate its cache. Sends no body and no query.
    pub async fn refresh_config(&self) -> Result<Value, ClientError> {
        self.get_json(OutboundRequest::post(format!("{CONFIG_ROOT}/refresh")))
            .await
    }

    /// `GET /api/config/health`
    pub async fn health(&self) -> Result<Value, ClientError> {
        self.get_json(OutboundRequest::get(format!("{CONFIG_ROOT}/health")))
            .await
    }

    async fn get_json(&self, request: OutboundRequest) -> Result<Value, ClientError> {
        self.dispatcher.dispatch(request).await?.into_json()
    }
}

/// Builds `/api/config[/{operation}]/{application}/{profile}/{label}`.
fn coordinate_path(operation: Option<&str>, coordinate: &ConfigCoordinate) -> String {
    let prefix = match operation {
        Some(op) => format!("{CONFIG_ROOT}/{op}"),
        None => CONFIG_ROOT.to_string(),
    };
    format!(
        "{prefix}/{}/{}/{}",
        coordinate.application(),
        coordinate.profile(),
        coordinate.label()
    )
}
