//! Animation dispatcher: sends rotate, random, sleepy and stop commands to
//! the bridge.
//!
//! The dispatcher is stateless: each call carries its full parameter set and
//! issues exactly one remote call. It acts on lights by number and never
//! goes through [`Light`](crate::ports::Light) objects.

use hoo_domain::animation::AnimationRequest;
use hoo_domain::error::DeviceError;
use hoo_domain::id::LightNumber;

use crate::ports::{BridgeRequest, BridgeTransport};

/// Protocol client for bridge-side animations.
pub struct AnimationDispatcher<T> {
    transport: T,
}

impl<T: BridgeTransport> AnimationDispatcher<T> {
    /// Create a dispatcher backed by `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Cycle the targeted lights through a sequence of colours.
    ///
    /// Each colour is held for `hold_time` seconds with `transition_time`
    /// seconds of blending in between. A non-empty `hues` palette is consumed
    /// in order; otherwise the bridge chooses. No targets means all lights.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::TransportFailure`] if the bridge call fails.
    pub async fn rotate(
        &self,
        transition_time: u16,
        hold_time: u16,
        target_lights: impl IntoIterator<Item = LightNumber>,
        hues: Vec<u16>,
    ) -> Result<(), DeviceError> {
        let request = AnimationRequest::rotate(
            transition_time,
            hold_time,
            target_lights.into_iter().collect(),
            hues,
        );
        self.dispatch(&request).await
    }

    /// Assign pseudo-random colours to the targeted lights on every step.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::TransportFailure`] if the bridge call fails.
    pub async fn random(
        &self,
        transition_time: u16,
        hold_time: u16,
        target_lights: impl IntoIterator<Item = LightNumber>,
    ) -> Result<(), DeviceError> {
        let request =
            AnimationRequest::random(transition_time, hold_time, target_lights.into_iter().collect());
        self.dispatch(&request).await
    }

    /// Like [`random`](Self::random), restricted to calm blue hues.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::TransportFailure`] if the bridge call fails.
    pub async fn sleepy(
        &self,
        transition_time: u16,
        hold_time: u16,
        target_lights: impl IntoIterator<Item = LightNumber>,
    ) -> Result<(), DeviceError> {
        let request =
            AnimationRequest::sleepy(transition_time, hold_time, target_lights.into_iter().collect());
        self.dispatch(&request).await
    }

    /// Halt any in-progress animation.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::TransportFailure`] if the bridge call fails.
    pub async fn stop(&self) -> Result<(), DeviceError> {
        self.dispatch(&AnimationRequest::stop()).await
    }

    /// Encode and send an arbitrary animation request.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::TransportFailure`] if the bridge call fails.
    #[tracing::instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn dispatch(&self, request: &AnimationRequest) -> Result<(), DeviceError> {
        let encoded = BridgeRequest::animation(request);
        tracing::info!(request = %encoded, "dispatching animation");
        self.transport.send(&encoded).await?;
        Ok(())
    }
}
