//! Light state: the observable values a bridge reports for one light.

use serde::{Deserialize, Serialize};

use super::LightAttribute;
use crate::color::Hsb;
use crate::error::ValidationError;

/// Observable state of a light.
///
/// Field names follow the bridge's JSON. Missing fields decode to their
/// defaults; a field of the wrong type fails to decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightState {
    pub on: bool,
    pub hue: u16,
    #[serde(rename = "sat")]
    pub saturation: u8,
    #[serde(rename = "bri")]
    pub brightness: u8,
    #[serde(rename = "xy")]
    pub color_xy: (f32, f32),
    #[serde(rename = "ct")]
    pub color_temperature: u16,
    pub effect: String,
    /// Deciseconds.
    #[serde(rename = "transitionTime")]
    pub transition_time: u16,
    /// Increments are applied by the bridge, never by this layer.
    pub hue_inc: i32,
    pub sat_inc: i16,
    pub bri_inc: i16,
    pub ct_inc: i32,
    pub xy_inc: (f32, f32),
    pub reachable: bool,
}

impl LightState {
    /// Whether the light is on and reachable, i.e. eligible for animations.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.on && self.reachable
    }

    /// Read an attribute as a raw value.
    #[must_use]
    pub fn get(&self, attribute: LightAttribute) -> u32 {
        match attribute {
            LightAttribute::Hue => u32::from(self.hue),
            LightAttribute::Saturation => u32::from(self.saturation),
            LightAttribute::Brightness => u32::from(self.brightness),
        }
    }

    /// Write an attribute after checking its range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] and leaves the state untouched
    /// when `value` does not fit the attribute.
    pub fn set(&mut self, attribute: LightAttribute, value: u32) -> Result<(), ValidationError> {
        let out_of_range = |_| attribute.out_of_range(value);
        match attribute {
            LightAttribute::Hue => self.hue = u16::try_from(value).map_err(out_of_range)?,
            LightAttribute::Saturation => {
                self.saturation = u8::try_from(value).map_err(out_of_range)?;
            }
            LightAttribute::Brightness => {
                self.brightness = u8::try_from(value).map_err(out_of_range)?;
            }
        }
        Ok(())
    }

    /// Overwrite hue, saturation and brightness together.
    pub fn set_hsb(&mut self, color: Hsb) {
        self.hue = color.hue;
        self.saturation = color.saturation;
        self.brightness = color.brightness;
    }
}
