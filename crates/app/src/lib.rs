//! # hoo-app
//!
//! Application layer: capability **ports** (traits) and the services built
//! on top of them.
//!
//! ## Responsibilities
//! - Define the **driven port** adapters must implement:
//!   - `BridgeTransport`: issue one GET-style call against a bridge
//! - Define the **capability ports** callers program against:
//!   - `Light`: update, switch and recolour one light
//!   - `Motion`: refresh and read one motion sensor
//! - Define the wire shape of every bridge call (`BridgeRequest`)
//! - Provide the bridge-backed services:
//!   - `BridgeLight` / `BridgeMotionSensor`: capability implementations keyed
//!     by bridge number or name
//!   - `DeviceRegistry`: bulk-loads and owns the devices of a session
//!   - `AnimationDispatcher`: encodes rotate/random/sleepy/stop commands
//!
//! ## Dependency rule
//! Depends on `hoo-domain` only (plus `serde` for decoding bridge bodies).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
