//! Motion sensor: a read-only presence detector reported by the bridge.

use serde::{Deserialize, Serialize};

/// Observable state of a motion sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotionState {
    pub presence: bool,
}

/// A motion sensor as reported by the bridge.
///
/// Sensors carry no number; the bridge identifies them by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionRecord {
    pub name: String,
    pub state: MotionState,
}
