//! Application services: bridge-backed capability implementations and
//! use-cases.
//!
//! Each service accepts a [`BridgeTransport`](crate::ports::BridgeTransport)
//! implementation via a generic parameter (constructor injection), keeping
//! this layer decoupled from concrete adapters.

pub mod animation_dispatcher;
pub mod bridge_light;
pub mod bridge_motion;
pub mod device_registry;

#[cfg(test)]
pub(crate) mod test_support;

use serde::de::DeserializeOwned;

use hoo_domain::error::DeviceError;

use crate::ports::{BridgeRequest, BridgeTransport};

/// Issue `request` and decode its body as `T`.
async fn fetch<T, B>(transport: &B, request: &BridgeRequest) -> Result<T, DeviceError>
where
    T: DeserializeOwned,
    B: BridgeTransport,
{
    let body = transport.send(request).await?;
    serde_json::from_str(&body).map_err(|err| {
        tracing::warn!(%request, error = %err, "bridge returned an unexpected body");
        DeviceError::DecodeFailure(err)
    })
}
