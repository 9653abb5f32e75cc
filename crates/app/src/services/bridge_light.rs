//! Bridge-backed light: every operation is forwarded to the bridge, keyed
//! by the light's number.

use hoo_domain::color::Rgb;
use hoo_domain::error::DeviceError;
use hoo_domain::id::LightNumber;
use hoo_domain::light::{LightAttribute, LightRecord, LightState};

use super::fetch;
use crate::ports::{BridgeRequest, BridgeTransport, Light};

/// A [`Light`] whose source of truth is a bridge.
pub struct BridgeLight<T> {
    transport: T,
    name: String,
    number: LightNumber,
    state: LightState,
}

impl<T: BridgeTransport> BridgeLight<T> {
    /// Materialise a light from a bridge record.
    pub fn new(transport: T, record: LightRecord) -> Self {
        Self {
            transport,
            name: record.name,
            number: record.number,
            state: record.state,
        }
    }

    /// Snapshot of this light in wire form.
    #[must_use]
    pub fn to_record(&self) -> LightRecord {
        LightRecord {
            name: self.name.clone(),
            number: self.number,
            state: self.state.clone(),
        }
    }

    /// Send a control call whose response payload is not consumed.
    async fn propagate(&self, request: BridgeRequest) -> Result<(), DeviceError> {
        match self.transport.send(&request).await {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    light = %self.number,
                    %request,
                    error = %err,
                    "bridge did not acknowledge change, keeping local state"
                );
                Err(err)
            }
        }
    }
}

impl<T: BridgeTransport> Light for BridgeLight<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn number(&self) -> LightNumber {
        self.number
    }

    fn state(&self) -> &LightState {
        &self.state
    }

    #[tracing::instrument(skip(self), fields(light = %self.number))]
    async fn update(&mut self) -> Result<(), DeviceError> {
        let record: LightRecord = fetch(&self.transport, &BridgeRequest::get_light(self.number)).await?;
        self.state = record.state;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(light = %self.number))]
    async fn set_power(&mut self, on: bool) -> Result<(), DeviceError> {
        self.state.on = on;
        self.propagate(BridgeRequest::power(self.number, on)).await
    }

    #[tracing::instrument(skip(self), fields(light = %self.number))]
    async fn set_attribute(&mut self, attribute: LightAttribute, value: u32) -> Result<(), DeviceError> {
        self.state.set(attribute, value)?;
        self.propagate(BridgeRequest::set_attribute(self.number, attribute, value))
            .await
    }

    #[tracing::instrument(skip(self), fields(light = %self.number))]
    async fn set_transition_time(&mut self, deciseconds: u16) -> Result<(), DeviceError> {
        self.state.transition_time = deciseconds;
        self.propagate(BridgeRequest::transition_time(self.number, deciseconds))
            .await
    }

    #[tracing::instrument(skip(self), fields(light = %self.number))]
    async fn set_color(&mut self, color: Rgb) -> Result<(), DeviceError> {
        self.state.set_hsb(color.to_hsb());
        self.propagate(BridgeRequest::color(self.number, color)).await
    }
}
