//! reqwest-backed [`BridgeTransport`].

use std::sync::Arc;
use std::time::Duration;

use hoo_app::ports::{BridgeRequest, BridgeTransport};
use hoo_domain::error::DeviceError;

use crate::config::BridgeHttpConfig;
use crate::error::BridgeHttpError;

/// Sends bridge requests as HTTP `GET`s below a base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpBridgeTransport {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl HttpBridgeTransport {
    /// Build a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeHttpError`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &BridgeHttpConfig) -> Result<Self, BridgeHttpError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').into(),
        })
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL `request` is sent to.
    #[must_use]
    pub fn url_for(&self, request: &BridgeRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }

    async fn get(&self, request: &BridgeRequest) -> Result<String, BridgeHttpError> {
        let url = self.url_for(request);
        tracing::debug!(%url, "bridge request");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BridgeHttpError::Status {
                status: status.as_u16(),
                path: request.path(),
            });
        }
        Ok(response.text().await?)
    }
}

impl BridgeTransport for HttpBridgeTransport {
    async fn send(&self, request: &BridgeRequest) -> Result<String, DeviceError> {
        self.get(request).await.map_err(|err| {
            tracing::warn!(request = %request, error = %err, "bridge request failed");
            err.into_domain()
        })
    }
}
