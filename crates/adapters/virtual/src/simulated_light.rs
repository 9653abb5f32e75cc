//! Simulated light: all operations mutate local fields only.

use rand::Rng;

use hoo_app::ports::Light;
use hoo_domain::color::{Hsb, Rgb};
use hoo_domain::error::{DeviceError, ValidationError};
use hoo_domain::id::LightNumber;
use hoo_domain::light::{LightAttribute, LightRecord, LightState};

/// A [`Light`] with no external source of truth.
///
/// Never touches the network, so the rest of the system (and its tests) can
/// run without a reachable bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedLight {
    name: String,
    number: LightNumber,
    state: LightState,
}

impl SimulatedLight {
    /// Create a light that starts off with a random colour.
    pub fn new(name: impl Into<String>, number: LightNumber) -> Self {
        Self::with_rng(name, number, &mut rand::thread_rng())
    }

    /// Like [`new`](Self::new), drawing the initial colour from `rng`.
    ///
    /// Hue, saturation and brightness are uniform over their full ranges;
    /// the light starts off and reachable.
    pub fn with_rng<R: Rng + ?Sized>(name: impl Into<String>, number: LightNumber, rng: &mut R) -> Self {
        Self {
            name: name.into(),
            number,
            state: LightState {
                on: false,
                hue: rng.gen_range(0..=u16::MAX),
                saturation: rng.gen_range(0..=u8::MAX),
                brightness: rng.gen_range(0..=u8::MAX),
                reachable: true,
                ..LightState::default()
            },
        }
    }

    /// Adopt a record verbatim.
    #[must_use]
    pub fn from_record(record: LightRecord) -> Self {
        Self {
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

    /// Switch the light.
    pub fn apply_power(&mut self, on: bool) {
        self.state.on = on;
    }

    /// Set one attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] and leaves the light untouched
    /// when `value` does not fit.
    pub fn apply_attribute(&mut self, attribute: LightAttribute, value: u32) -> Result<(), ValidationError> {
        self.state.set(attribute, value)
    }

    /// Set the blend time (deciseconds) used for the next colour change.
    pub fn apply_transition_time(&mut self, deciseconds: u16) {
        self.state.transition_time = deciseconds;
    }

    /// Recolour the light. `None` keeps the current brightness.
    pub fn apply_color(&mut self, hue: u16, saturation: u8, brightness: Option<u8>) {
        self.state.set_hsb(Hsb {
            hue,
            saturation,
            brightness: brightness.unwrap_or(self.state.brightness),
        });
    }
}

impl Light for SimulatedLight {
    fn name(&self) -> &str {
        &self.name
    }

    fn number(&self) -> LightNumber {
        self.number
    }

    fn state(&self) -> &LightState {
        &self.state
    }

    async fn update(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    async fn set_power(&mut self, on: bool) -> Result<(), DeviceError> {
        self.apply_power(on);
        Ok(())
    }

    async fn set_attribute(&mut self, attribute: LightAttribute, value: u32) -> Result<(), DeviceError> {
        self.apply_attribute(attribute, value)?;
        Ok(())
    }

    async fn set_transition_time(&mut self, deciseconds: u16) -> Result<(), DeviceError> {
        self.apply_transition_time(deciseconds);
        Ok(())
    }

    async fn set_color(&mut self, color: Rgb) -> Result<(), DeviceError> {
        let hsb = color.to_hsb();
        self.apply_color(hsb.hue, hsb.saturation, Some(hsb.brightness));
        Ok(())
    }
}
