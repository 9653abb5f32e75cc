//! Animation requests: bridge-side, multi-light timed colour sequences.
//!
//! A request is transient: it is built, encoded into one bridge call and
//! dropped. Every request carries its full parameter set; the bridge keeps
//! no session between calls.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::LightNumber;

/// Hue band used by the sleepy animation (blues and violets).
pub const SLEEPY_HUE_RANGE: std::ops::RangeInclusive<u16> = 35_000..=48_000;

/// Saturation band used by the random and sleepy animations.
pub const RANDOM_SATURATION_RANGE: std::ops::RangeInclusive<u8> = 200..=255;

/// What the bridge should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    /// Cycle the targeted lights through a sequence of colours.
    Rotate,
    /// Assign pseudo-random colours on every step.
    Random,
    /// Like [`Random`](Self::Random), restricted to [`SLEEPY_HUE_RANGE`].
    Sleepy,
    /// Halt whatever animation is running.
    Stop,
}

impl AnimationKind {
    /// Path segment the bridge routes this kind on.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::Random => "random",
            Self::Sleepy => "sleepy",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A single animation command with its complete parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub kind: AnimationKind,
    /// Seconds spent blending between two steps.
    pub transition_time: u16,
    /// Seconds each step is held.
    pub hold_time: u16,
    /// Lights to animate. Empty means every light.
    pub target_lights: BTreeSet<LightNumber>,
    /// Rotation palette, consumed in order. Empty lets the bridge choose.
    pub hues: Vec<u16>,
}

impl AnimationRequest {
    /// Build a rotate request.
    #[must_use]
    pub fn rotate(
        transition_time: u16,
        hold_time: u16,
        target_lights: BTreeSet<LightNumber>,
        hues: Vec<u16>,
    ) -> Self {
        Self {
            kind: AnimationKind::Rotate,
            transition_time,
            hold_time,
            target_lights,
            hues,
        }
    }

    /// Build a random request.
    #[must_use]
    pub fn random(transition_time: u16, hold_time: u16, target_lights: BTreeSet<LightNumber>) -> Self {
        Self {
            kind: AnimationKind::Random,
            transition_time,
            hold_time,
            target_lights,
            hues: Vec::new(),
        }
    }

    /// Build a sleepy request.
    #[must_use]
    pub fn sleepy(transition_time: u16, hold_time: u16, target_lights: BTreeSet<LightNumber>) -> Self {
        Self {
            kind: AnimationKind::Sleepy,
            ..Self::random(transition_time, hold_time, target_lights)
        }
    }

    /// Build a stop request.
    #[must_use]
    pub fn stop() -> Self {
        Self {
            kind: AnimationKind::Stop,
            transition_time: 0,
            hold_time: 0,
            target_lights: BTreeSet::new(),
            hues: Vec::new(),
        }
    }

    /// Whether the request addresses every light.
    #[must_use]
    pub fn targets_all(&self) -> bool {
        self.target_lights.is_empty()
    }

    /// Whether `number` is addressed by this request.
    #[must_use]
    pub fn targets(&self, number: LightNumber) -> bool {
        self.targets_all() || self.target_lights.contains(&number)
    }
}
