//! Light: a bridge-controlled lamp with an observable [`LightState`].
//!
//! The bridge identifies each light by a [`LightNumber`](crate::id::LightNumber);
//! [`LightRecord`] is the `{name, number, state}` shape it returns for the
//! list and get calls.

mod attribute;
mod state;

pub use attribute::LightAttribute;
pub use state::LightState;

use serde::{Deserialize, Serialize};

use crate::id::LightNumber;

/// Query key carrying a light's transition time (deciseconds) on the state
/// call, alongside the [`LightAttribute`] keys.
pub const TRANSITION_TIME_QUERY_KEY: &str = "transitiontime";

/// A light as reported by the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRecord {
    pub name: String,
    #[serde(alias = "lightNumber")]
    pub number: LightNumber,
    pub state: LightState,
}
