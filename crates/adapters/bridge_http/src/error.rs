//! HTTP bridge transport error types.

use hoo_domain::error::DeviceError;

/// Errors specific to the HTTP bridge transport.
#[derive(Debug, thiserror::Error)]
pub enum BridgeHttpError {
    /// The configured base URL cannot be used.
    #[error("invalid bridge base URL {0:?}")]
    InvalidBaseUrl(String),

    /// The configured timeout is zero.
    #[error("bridge timeout must be at least one second")]
    InvalidTimeout,

    /// reqwest could not build the client or complete the request.
    #[error("bridge request failed")]
    Request(#[from] reqwest::Error),

    /// The bridge answered with a non-success status.
    #[error("bridge answered {status} for {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path.
        path: String,
    },
}

impl BridgeHttpError {
    /// Convert into a [`DeviceError::TransportFailure`] for propagation
    /// across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> DeviceError {
        DeviceError::TransportFailure(Box::new(self))
    }
}

impl From<BridgeHttpError> for DeviceError {
    fn from(err: BridgeHttpError) -> Self {
        err.into_domain()
    }
}
