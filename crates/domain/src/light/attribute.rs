//! Settable colour attributes and their declared ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A light attribute that can be set one call at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightAttribute {
    Hue,
    Saturation,
    Brightness,
}

impl LightAttribute {
    /// Every settable attribute, in wire order.
    pub const ALL: [Self; 3] = [Self::Hue, Self::Saturation, Self::Brightness];

    /// Inclusive upper bound of the attribute (the lower bound is always 0).
    #[must_use]
    pub const fn max(self) -> u32 {
        match self {
            Self::Hue => u16::MAX as u32,
            Self::Saturation | Self::Brightness => u8::MAX as u32,
        }
    }

    /// Query-string key the bridge expects for this attribute.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Hue => "hue",
            Self::Saturation => "sat",
            Self::Brightness => "bri",
        }
    }

    /// Human-readable attribute name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Brightness => "brightness",
        }
    }

    /// Look an attribute up by its query-string key.
    #[must_use]
    pub fn from_query_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.query_key() == key)
    }

    /// Check that `value` lies within `0..=max()`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when `value` exceeds the maximum.
    pub fn validate(self, value: u32) -> Result<u32, ValidationError> {
        if value > self.max() {
            return Err(self.out_of_range(value));
        }
        Ok(value)
    }

    pub(crate) fn out_of_range(self, value: u32) -> ValidationError {
        ValidationError::OutOfRange {
            attribute: self.name(),
            value,
            max: self.max(),
        }
    }
}

impl fmt::Display for LightAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
