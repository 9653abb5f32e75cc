//! Bridge-backed motion sensor.
//!
//! The bridge only exposes the full sensor collection, so a refresh fetches
//! every sensor and reconciles this one by name.

use hoo_domain::error::{DeviceError, NotFoundError};
use hoo_domain::motion::{MotionRecord, MotionState};

use super::fetch;
use crate::ports::{BridgeRequest, BridgeTransport, Motion};

/// A [`Motion`] sensor whose source of truth is a bridge.
pub struct BridgeMotionSensor<T> {
    transport: T,
    name: String,
    state: MotionState,
}

impl<T: BridgeTransport> BridgeMotionSensor<T> {
    /// Materialise a sensor from a bridge record.
    pub fn new(transport: T, record: MotionRecord) -> Self {
        Self {
            transport,
            name: record.name,
            state: record.state,
        }
    }

    /// Snapshot of this sensor in wire form.
    #[must_use]
    pub fn to_record(&self) -> MotionRecord {
        MotionRecord {
            name: self.name.clone(),
            state: self.state,
        }
    }
}

impl<T: BridgeTransport> Motion for BridgeMotionSensor<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &MotionState {
        &self.state
    }

    #[tracing::instrument(skip(self), fields(sensor = %self.name))]
    async fn update(&mut self) -> Result<(), DeviceError> {
        let records: Vec<MotionRecord> =
            fetch(&self.transport, &BridgeRequest::list_motion_sensors()).await?;
        let refreshed = records
            .into_iter()
            .find(|record| record.name == self.name)
            .ok_or_else(|| NotFoundError {
                kind: "MotionSensor",
                id: self.name.clone(),
            })?;
        self.state = refreshed.state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::StubTransport;

    fn sensor(transport: StubTransport, name: &str) -> BridgeMotionSensor<StubTransport> {
        BridgeMotionSensor::new(
            transport,
            MotionRecord {
                name: name.to_string(),
                state: MotionState { presence: false },
            },
        )
    }

    #[tokio::test]
    async fn should_reconcile_by_name() {
        let transport = StubTransport::default().respond(
            "/motion",
            r#"[
                {"name": "Kitchen", "state": {"presence": false}},
                {"name": "Hallway", "state": {"presence": true}}
            ]"#,
        );
        let mut hallway = sensor(transport.clone(), "Hallway");

        hallway.update().await.unwrap();

        assert!(hallway.presence());
        assert_eq!(transport.sent(), vec!["/motion"]);
    }

    #[tokio::test]
    async fn should_report_not_found_when_sensor_disappeared() {
        let transport = StubTransport::default().respond(
            "/motion",
            r#"[{"name": "Kitchen", "state": {"presence": true}}]"#,
        );
        let mut hallway = sensor(transport, "Hallway");

        let result = hallway.update().await;

        assert!(matches!(result, Err(DeviceError::NotFound(_))));
        assert!(!hallway.presence());
    }

    #[tokio::test]
    async fn should_keep_state_when_fetch_fails() {
        let mut hallway = sensor(StubTransport::failing(), "Hallway");

        let result = hallway.update().await;

        assert!(matches!(result, Err(DeviceError::TransportFailure(_))));
        assert!(!hallway.presence());
    }

    #[tokio::test]
    async fn should_report_decode_failure_for_bad_body() {
        let transport = StubTransport::default().respond("/motion", r#"{"not": "a list"}"#);
        let mut hallway = sensor(transport, "Hallway");

        let result = hallway.update().await;

        assert!(matches!(result, Err(DeviceError::DecodeFailure(_))));
    }

    #[test]
    fn should_expose_name_and_record() {
        let hallway = sensor(StubTransport::default(), "Hallway");
        assert_eq!(hallway.name(), "Hallway");
        assert_eq!(hallway.to_record().name, "Hallway");
    }
}
