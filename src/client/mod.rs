//! Resource-scoped REST client.
//!
//! One [`ResourceClient`] is bound to one resource's base path,
//! `{origin}{/enterprise}/api/{version}/{resource}`, and exposes the five
//! calls the stores need. Requests go through a [`Transport`] so stores can
//! be exercised without a network.

mod error;
mod transport;

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::entity::EntityId;

pub use error::ClientError;
pub use transport::{ApiRequest, HttpTransport, Method, Transport};

pub const DEFAULT_API_VERSION: &str = "v1";

/// Endpoint options for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub api_version: String,
    pub enterprise: bool,
    /// Absolute URL that replaces the collection endpoint for `list()`.
    pub list_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            enterprise: false,
            list_url: None,
        }
    }
}

impl ClientOptions {
    /// Resolve options for `resource`: API-wide defaults overlaid with the
    /// resource's own entry, when present.
    pub fn from_config(config: &Config, resource: &str) -> Self {
        let mut options = Self {
            api_version: config.api.version.clone(),
            enterprise: config.api.enterprise,
            list_url: None,
        };

        if let Some(entry) = config.resource(resource) {
            if let Some(version) = &entry.version {
                options.api_version = version.clone();
            }
            if let Some(enterprise) = entry.enterprise {
                options.enterprise = enterprise;
            }
            options.list_url = entry.list_url.clone();
        }

        options
    }

    /// Path prefix for `resource`, e.g. `/enterprise/api/v1/conversations`.
    pub fn base_path(&self, resource: &str) -> String {
        let path = format!("/api/{}/{}", self.api_version, resource);
        if self.enterprise {
            format!("/enterprise{}", path)
        } else {
            path
        }
    }
}

/// HTTP accessor bound to one resource.
#[derive(Clone)]
pub struct ResourceClient {
    resource: String,
    base_url: String,
    list_url: Option<String>,
    transport: Arc<dyn Transport>,
}

impl ResourceClient {
    pub fn new(
        origin: &str,
        resource: &str,
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base_url = format!(
            "{}{}",
            origin.trim_end_matches('/'),
            options.base_path(resource)
        );

        Self {
            resource: resource.to_string(),
            base_url,
            list_url: options.list_url,
            transport,
        }
    }

    /// Build a client for `resource` using the API section of `config`.
    pub fn from_config(config: &Config, resource: &str, transport: Arc<dyn Transport>) -> Self {
        Self::new(
            &config.api.base_url,
            resource,
            ClientOptions::from_config(config, resource),
            transport,
        )
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Collection URL, without any list override applied.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn member_url(&self, id: &EntityId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// GET the collection endpoint (or the configured list override).
    pub async fn list(&self) -> Result<Value, ClientError> {
        let url = self
            .list_url
            .clone()
            .unwrap_or_else(|| self.base_url.clone());

        self.transport
            .send(ApiRequest {
                method: Method::Get,
                url,
                body: None,
            })
            .await
    }

    pub async fn show(&self, id: &EntityId) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest {
                method: Method::Get,
                url: self.member_url(id),
                body: None,
            })
            .await
    }

    pub async fn create(&self, data: Value) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest {
                method: Method::Post,
                url: self.base_url.clone(),
                body: Some(data),
            })
            .await
    }

    pub async fn update(&self, id: &EntityId, data: Value) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest {
                method: Method::Patch,
                url: self.member_url(id),
                body: Some(data),
            })
            .await
    }

    /// DELETE one entity. Any response body is discarded.
    pub async fn delete(&self, id: &EntityId) -> Result<(), ClientError> {
        self.transport
            .send(ApiRequest {
                method: Method::Delete,
                url: self.member_url(id),
                body: None,
            })
            .await
            .map(|_| ())
    }
}
