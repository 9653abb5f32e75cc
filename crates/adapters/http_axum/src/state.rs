//! Shared application state for axum handlers.

use hoo_adapter_virtual::VirtualBridge;

/// Application state shared across all axum handlers.
///
/// Cloning is cheap: the bridge is a shared handle.
#[derive(Clone, Default)]
pub struct AppState {
    /// The bridge every request acts on.
    pub bridge: VirtualBridge,
}

impl AppState {
    /// Serve `bridge`.
    #[must_use]
    pub fn new(bridge: VirtualBridge) -> Self {
        Self { bridge }
    }
}
