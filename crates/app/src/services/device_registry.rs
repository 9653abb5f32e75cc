//! Device registry: owns the lights and motion sensors of a session.
//!
//! Collections are populated by one bulk fetch each and replaced wholesale on
//! every reload. A failed reload leaves the collection empty, never partial.

use hoo_domain::error::DeviceError;
use hoo_domain::id::LightNumber;
use hoo_domain::light::LightRecord;
use hoo_domain::motion::MotionRecord;

use super::bridge_light::BridgeLight;
use super::bridge_motion::BridgeMotionSensor;
use super::fetch;
use crate::ports::{BridgeRequest, BridgeTransport, Light, Motion};

/// Session-scoped owner of bridge-backed devices.
///
/// Every device receives a clone of the registry's transport, so `T` is
/// expected to be cheap to clone (a shared client handle).
pub struct DeviceRegistry<T> {
    transport: T,
    lights: Vec<BridgeLight<T>>,
    motion_sensors: Vec<BridgeMotionSensor<T>>,
}

impl<T: BridgeTransport + Clone> DeviceRegistry<T> {
    /// Create an empty registry backed by `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            lights: Vec::new(),
            motion_sensors: Vec::new(),
        }
    }

    /// Fetch every light and replace the owned collection.
    ///
    /// Lights keep the order the bridge returned them in; sort by
    /// [`Light::number`] when a stable order is needed.
    ///
    /// # Errors
    ///
    /// Propagates [`DeviceError::TransportFailure`] or
    /// [`DeviceError::DecodeFailure`]; the collection is then empty.
    #[tracing::instrument(skip(self))]
    pub async fn load_lights(&mut self) -> Result<&mut [BridgeLight<T>], DeviceError> {
        self.lights.clear();
        let records: Vec<LightRecord> = fetch(&self.transport, &BridgeRequest::list_lights()).await?;
        self.lights = records
            .into_iter()
            .map(|record| BridgeLight::new(self.transport.clone(), record))
            .collect();
        tracing::debug!(count = self.lights.len(), "loaded lights");
        Ok(&mut self.lights)
    }

    /// Fetch every motion sensor and replace the owned collection.
    ///
    /// # Errors
    ///
    /// Propagates [`DeviceError::TransportFailure`] or
    /// [`DeviceError::DecodeFailure`]; the collection is then empty.
    #[tracing::instrument(skip(self))]
    pub async fn load_motion_sensors(
        &mut self,
    ) -> Result<&mut [BridgeMotionSensor<T>], DeviceError> {
        self.motion_sensors.clear();
        let records: Vec<MotionRecord> =
            fetch(&self.transport, &BridgeRequest::list_motion_sensors()).await?;
        self.motion_sensors = records
            .into_iter()
            .map(|record| BridgeMotionSensor::new(self.transport.clone(), record))
            .collect();
        tracing::debug!(count = self.motion_sensors.len(), "loaded motion sensors");
        Ok(&mut self.motion_sensors)
    }

    /// Lights from the last successful load, in bridge order.
    #[must_use]
    pub fn lights(&self) -> &[BridgeLight<T>] {
        &self.lights
    }

    /// Look a light up by number.
    #[must_use]
    pub fn light(&self, number: LightNumber) -> Option<&BridgeLight<T>> {
        self.lights.iter().find(|light| light.number() == number)
    }

    /// Look a light up by number for mutation.
    pub fn light_mut(&mut self, number: LightNumber) -> Option<&mut BridgeLight<T>> {
        self.lights.iter_mut().find(|light| light.number() == number)
    }

    /// Lights that are on and reachable, in bridge order.
    pub fn active_lights(&self) -> impl Iterator<Item = &BridgeLight<T>> {
        self.lights.iter().filter(|light| light.state().is_active())
    }

    /// Motion sensors from the last successful load, in bridge order.
    #[must_use]
    pub fn motion_sensors(&self) -> &[BridgeMotionSensor<T>] {
        &self.motion_sensors
    }

    /// Look a motion sensor up by name for mutation.
    pub fn motion_sensor_mut(&mut self, name: &str) -> Option<&mut BridgeMotionSensor<T>> {
        self.motion_sensors
            .iter_mut()
            .find(|sensor| sensor.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::StubTransport;

    const THREE_LIGHTS: &str = r#"[
        {"name": "A", "number": 1, "state": {"on": false, "reachable": true}},
        {"name": "B", "number": 2, "state": {"on": false, "reachable": true}},
        {"name": "C", "number": 3, "state": {"on": true, "reachable": true}}
    ]"#;

    #[tokio::test]
    async fn should_load_lights_in_bridge_order() {
        let transport = StubTransport::default().respond(
            "/lights",
            r#"[
                {"name": "Z", "number": 9, "state": {}},
                {"name": "Y", "number": 2, "state": {}}
            ]"#,
        );
        let mut registry = DeviceRegistry::new(transport);

        let lights = registry.load_lights().await.unwrap();

        let numbers: Vec<u32> = lights.iter().map(|l| l.number().get()).collect();
        assert_eq!(numbers, vec![9, 2]);
    }

    #[tokio::test]
    async fn should_only_turn_on_the_addressed_light() {
        let transport = StubTransport::default().respond("/lights", THREE_LIGHTS);
        let mut registry = DeviceRegistry::new(transport.clone());
        registry.load_lights().await.unwrap();

        registry
            .light_mut(LightNumber::new(2))
            .unwrap()
            .turn_on()
            .await
            .unwrap();

        let names: Vec<&str> = registry.lights().iter().map(Light::name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(!registry.light(LightNumber::new(1)).unwrap().is_on());
        assert!(registry.light(LightNumber::new(2)).unwrap().is_on());
        assert!(registry.light(LightNumber::new(3)).unwrap().is_on());
        assert_eq!(transport.sent(), vec!["/lights", "/2/on"]);
    }

    #[tokio::test]
    async fn should_leave_collection_empty_when_reload_fails() {
        let transport = StubTransport::default().respond("/lights", THREE_LIGHTS);
        let mut registry = DeviceRegistry::new(transport.clone());
        registry.load_lights().await.unwrap();
        assert_eq!(registry.lights().len(), 3);

        transport.set_fail_all(true);
        let result = registry.load_lights().await;

        assert!(matches!(result, Err(DeviceError::TransportFailure(_))));
        assert!(registry.lights().is_empty());
    }

    #[tokio::test]
    async fn should_leave_collection_empty_when_body_is_malformed() {
        let transport = StubTransport::default().respond("/lights", r#"[{"name": "A"}]"#);
        let mut registry = DeviceRegistry::new(transport);

        let result = registry.load_lights().await;

        assert!(matches!(result, Err(DeviceError::DecodeFailure(_))));
        assert!(registry.lights().is_empty());
    }

    #[tokio::test]
    async fn should_list_only_active_lights() {
        let transport = StubTransport::default().respond("/lights", THREE_LIGHTS);
        let mut registry = DeviceRegistry::new(transport);
        registry.load_lights().await.unwrap();

        let active: Vec<&str> = registry.active_lights().map(Light::name).collect();

        assert_eq!(active, vec!["C"]);
    }

    #[tokio::test]
    async fn should_load_motion_sensors() {
        let transport = StubTransport::default().respond(
            "/motion",
            r#"[{"name": "Hallway", "state": {"presence": true}}]"#,
        );
        let mut registry = DeviceRegistry::new(transport);

        let sensors = registry.load_motion_sensors().await.unwrap();
        assert_eq!(sensors.len(), 1);
        assert!(sensors[0].presence());

        assert!(registry.motion_sensor_mut("Hallway").is_some());
        assert!(registry.motion_sensor_mut("Attic").is_none());
    }

    #[tokio::test]
    async fn should_leave_motion_sensors_empty_when_fetch_fails() {
        let mut registry = DeviceRegistry::new(StubTransport::failing());

        let result = registry.load_motion_sensors().await;

        assert!(result.is_err());
        assert!(registry.motion_sensors().is_empty());
    }
}
