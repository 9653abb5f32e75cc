//! Bridge-assigned light identifiers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identifier a bridge assigns to each light.
///
/// Unique within one registry snapshot. Ordered so target sets encode in a
/// deterministic order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LightNumber(u32);

impl LightNumber {
    /// Wrap a raw bridge number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Access the raw bridge number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for LightNumber {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl fmt::Display for LightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LightNumber {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
