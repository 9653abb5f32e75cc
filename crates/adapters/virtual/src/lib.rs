//! # hoo-adapter-virtual
//!
//! Virtual/demo adapter that stands in for real lighting hardware.
//!
//! ## Provided pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`SimulatedLight`] | The simulated [`Light`](hoo_app::ports::Light) variant: local state only, random initial colour |
//! | [`VirtualBridge`] | An in-memory bridge holding numbered simulated lights and motion sensors, able to run rotate/random/sleepy animations |
//!
//! The virtual bridge is what `hoo serve` exposes over HTTP, so the
//! bridge-backed devices can be exercised end-to-end without hardware.
//!
//! ## Dependency rule
//!
//! Depends on `hoo-app` (port traits) and `hoo-domain` only.

mod animation;
mod bridge;
mod simulated_light;

pub use bridge::VirtualBridge;
pub use simulated_light::SimulatedLight;
