//! Native config-server API.
//!
//! The configuration server serves each document in several formats directly
//! from its root. YAML and Properties bodies are returned as raw text: those
//! calls opt out of JSON parsing per call with
//! [`ContentHandling::PassthroughText`], leaving the transport defaults alone.

use std::sync::Arc;

use config_model::{ClientError, ConfigCoordinate, ContentHandling};
use serde_json::Value;

use crate::interceptor::Dispatcher;
use crate::transport::OutboundRequest;

/// Format-specific retrieval straight from the configuration server.
#[derive(Debug, Clone)]
pub struct ConfigServerApi {
    dispatcher: Arc<Dispatcher>,
}

impl ConfigServerApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// `GET /{application}-{profile}.yml?label=`
    ///
    /// Returns the body byte-for-byte, even if it happens to be valid JSON.
    pub async fn get_config_yaml(
        &self,
        coordinate: &ConfigCoordinate,
    ) -> Result<String, ClientError> {
        self.get_text(coordinate, "yml").await
    }

    /// `GET /{application}-{profile}.properties?label=`
    ///
    /// Returns the body byte-for-byte.
    pub async fn get_config_properties(
        &self,
        coordinate: &ConfigCoordinate,
    ) -> Result<String, ClientError> {
        self.get_text(coordinate, "properties").await
    }

    /// `GET /{application}/{profile}/{label}`
    pub async fn get_config_json(
        &self,
        coordinate: &ConfigCoordinate,
    ) -> Result<Value, ClientError> {
        let path = format!(
            "/{}/{}/{}",
            coordinate.application(),
            coordinate.profile(),
            coordinate.label()
        );
        self.dispatcher
            .dispatch(OutboundRequest::get(path))
            .await?
            .into_json()
    }

    async fn get_text(
        &self,
        coordinate: &ConfigCoordinate,
        extension: &str,
    ) -> Result<String, ClientError> {
        let path = format!(
            "/{}-{}.{extension}",
            coordinate.application(),
            coordinate.profile()
        );
        let request = OutboundRequest::get(path)
            .query("label", coordinate.label().as_str())
            .content(ContentHandling::PassthroughText);
        self.dispatcher.dispatch(request).await?.into_text()
    }
}
