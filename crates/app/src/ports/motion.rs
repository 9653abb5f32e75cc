//! Motion capability: a read-only presence sensor.

use std::future::Future;

use hoo_domain::error::DeviceError;
use hoo_domain::motion::MotionState;

/// A readable motion sensor.
///
/// Motion sensors are read-only by definition; the only operation is a
/// refresh.
pub trait Motion: Send {
    /// Name the bridge identifies this sensor by.
    fn name(&self) -> &str;

    /// Last known state.
    fn state(&self) -> &MotionState;

    /// Refresh [`state`](Self::state) from the backing source.
    fn update(&mut self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Whether the sensor currently detects presence.
    fn presence(&self) -> bool {
        self.state().presence
    }
}
