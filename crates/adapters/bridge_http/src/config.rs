//! HTTP bridge transport configuration.

use serde::Deserialize;

use crate::error::BridgeHttpError;

/// Configuration for the HTTP bridge transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeHttpConfig {
    /// Base URL every bridge path is appended to (e.g. `http://bridge.local/api`).
    pub base_url: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for BridgeHttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            timeout_secs: 5,
        }
    }
}

impl BridgeHttpConfig {
    /// Check that the base URL is an absolute HTTP(S) URL and the timeout is
    /// non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeHttpError::InvalidBaseUrl`] or
    /// [`BridgeHttpError::InvalidTimeout`].
    pub fn validate(&self) -> Result<(), BridgeHttpError> {
        let url = self.base_url.trim();
        let has_scheme = url.starts_with("http://") || url.starts_with("https://");
        if !has_scheme || url.contains('?') {
            return Err(BridgeHttpError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(BridgeHttpError::InvalidTimeout);
        }
        Ok(())
    }
}
