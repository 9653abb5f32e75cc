//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DeviceError`]
//! via `From`, so every capability operation surfaces one of a small set of
//! kinds to its caller.

use std::error::Error as StdError;

/// Base error for every light, motion and animation operation.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The underlying bridge call could not complete (network, timeout, 5xx).
    #[error("bridge transport failure")]
    TransportFailure(#[source] Box<dyn StdError + Send + Sync>),

    /// The bridge answered but the body did not have the expected shape.
    #[error("failed to decode bridge response")]
    DecodeFailure(#[source] serde_json::Error),

    /// The caller supplied a value outside its declared range.
    #[error("invalid value")]
    InvalidValue(#[from] ValidationError),

    /// A device referenced by name or number does not exist.
    #[error("device not found")]
    NotFound(#[from] NotFoundError),
}

impl DeviceError {
    /// Wrap any error as a [`DeviceError::TransportFailure`].
    pub fn transport(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::TransportFailure(err.into())
    }
}

impl From<serde_json::Error> for DeviceError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeFailure(err)
    }
}

/// A caller-supplied value violated a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An attribute value is above the attribute's maximum.
    #[error("{attribute} must be within 0..={max}, got {value}")]
    OutOfRange {
        attribute: &'static str,
        value: u32,
        max: u32,
    },

    /// A device name is empty.
    #[error("name must not be empty")]
    EmptyName,
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    /// The kind of device that was looked up (e.g. `"Light"`).
    pub kind: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}
