//! Port definitions: traits that adapters implement or callers drive.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the service layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod bridge;
pub mod light;
pub mod motion;

pub use bridge::{BridgeRequest, BridgeTransport};
pub use light::Light;
pub use motion::Motion;
