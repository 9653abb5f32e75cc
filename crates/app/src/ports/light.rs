//! Light capability: the operations every light offers regardless of what
//! backs it.
//!
//! Two implementations exist: the bridge-backed
//! [`BridgeLight`](crate::services::bridge_light::BridgeLight) and the
//! simulated light of the virtual adapter. Callers choose one at
//! construction time and program against this trait.
//!
//! ## Optimistic mutation
//! Mutators write the new value into local state **before** propagating it.
//! A failed propagation is reported to the caller but never rolled back; the
//! next [`update`](Light::update) reconciles with the backing source.
//! Out-of-range values are rejected before any local write or remote call.

use std::future::Future;

use hoo_domain::color::Rgb;
use hoo_domain::error::DeviceError;
use hoo_domain::id::LightNumber;
use hoo_domain::light::{LightAttribute, LightState};

/// A controllable light.
pub trait Light: Send {
    /// Display name.
    fn name(&self) -> &str;

    /// Bridge-assigned number.
    fn number(&self) -> LightNumber;

    /// Last known state.
    fn state(&self) -> &LightState;

    /// Refresh [`state`](Self::state) from the backing source.
    ///
    /// On failure the previous state is kept.
    fn update(&mut self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Set `on` locally, then propagate it.
    fn set_power(&mut self, on: bool) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Validate `value`, write it locally, then propagate it in one call.
    ///
    /// Returns [`DeviceError::InvalidValue`] without touching anything when
    /// `value` is out of the attribute's range.
    fn set_attribute(
        &mut self,
        attribute: LightAttribute,
        value: u32,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Set how long (deciseconds) the next change takes to blend in, then
    /// propagate it.
    fn set_transition_time(
        &mut self,
        deciseconds: u16,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Convert `color` to hue/saturation/brightness, write all three locally,
    /// then propagate the RGB value in one call.
    fn set_color(&mut self, color: Rgb) -> impl Future<Output = Result<(), DeviceError>> + Send;

    fn turn_on(&mut self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.set_power(true)
    }

    fn turn_off(&mut self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.set_power(false)
    }

    /// Flip the power state.
    fn toggle(&mut self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        let on = !self.is_on();
        self.set_power(on)
    }

    /// Set hue, saturation and brightness in that order, one call each.
    ///
    /// All three values are checked first, so an out-of-range value leaves
    /// the light untouched and sends nothing.
    fn set_hsb(
        &mut self,
        hue: u32,
        saturation: u32,
        brightness: u32,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send {
        async move {
            let values = [hue, saturation, brightness];
            for (attribute, value) in LightAttribute::ALL.into_iter().zip(values) {
                attribute.validate(value)?;
            }
            for (attribute, value) in LightAttribute::ALL.into_iter().zip(values) {
                self.set_attribute(attribute, value).await?;
            }
            Ok(())
        }
    }

    fn set_hue(&mut self, hue: u32) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.set_attribute(LightAttribute::Hue, hue)
    }

    fn set_saturation(
        &mut self,
        saturation: u32,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.set_attribute(LightAttribute::Saturation, saturation)
    }

    fn set_brightness(
        &mut self,
        brightness: u32,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.set_attribute(LightAttribute::Brightness, brightness)
    }

    fn is_on(&self) -> bool {
        self.state().on
    }

    fn hue(&self) -> u16 {
        self.state().hue
    }

    fn saturation(&self) -> u8 {
        self.state().saturation
    }

    fn brightness(&self) -> u8 {
        self.state().brightness
    }
}
