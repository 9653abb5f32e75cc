//! In-memory bridge: numbered simulated lights, motion sensors and an
//! animation runner.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;

use hoo_app::ports::Light;
use hoo_domain::animation::{AnimationKind, AnimationRequest};
use hoo_domain::color::Rgb;
use hoo_domain::error::{DeviceError, NotFoundError, ValidationError};
use hoo_domain::id::LightNumber;
use hoo_domain::light::{LightAttribute, LightRecord};
use hoo_domain::motion::{MotionRecord, MotionState};

use crate::SimulatedLight;
use crate::animation::Animation;

#[derive(Default)]
struct Devices {
    lights: BTreeMap<LightNumber, SimulatedLight>,
    motion_sensors: Vec<MotionRecord>,
}

#[derive(Default)]
struct Inner {
    devices: Mutex<Devices>,
    animation: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn devices(&self) -> MutexGuard<'_, Devices> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compute and apply one animation step under a single lock.
    fn step<R: Rng + ?Sized>(&self, animation: &mut Animation, rng: &mut R) {
        let mut devices = self.devices();
        let frame = animation.next_frame(&devices.lights, rng);
        let transition = animation.transition_deciseconds();
        for (number, color) in frame {
            if let Some(light) = devices.lights.get_mut(&number) {
                light.apply_transition_time(transition);
                light.apply_color(color.hue, color.saturation, color.brightness);
            }
        }
    }
}

/// A bridge that lives in memory.
///
/// Cheap to clone; clones share the same devices. Lights are listed in
/// ascending number order. At most one animation runs at a time.
#[derive(Clone, Default)]
pub struct VirtualBridge {
    inner: Arc<Inner>,
}

impl VirtualBridge {
    /// Create an empty bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bridge with `count` randomly coloured lights numbered from 1.
    #[must_use]
    pub fn with_simulated_lights(count: u32) -> Self {
        let bridge = Self::new();
        {
            let mut devices = bridge.inner.devices();
            for n in 1..=count {
                let number = LightNumber::new(n);
                devices
                    .lights
                    .insert(number, SimulatedLight::new(format!("Light {n}"), number));
            }
        }
        bridge
    }

    /// Register a light, replacing any light with the same number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when the light has no name.
    pub fn add_light(&self, light: SimulatedLight) -> Result<(), ValidationError> {
        if light.name().trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.inner.devices().lights.insert(light.number(), light);
        Ok(())
    }

    /// Register a motion sensor, replacing any sensor with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `name` is blank.
    pub fn add_motion_sensor(&self, name: impl Into<String>, presence: bool) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let mut devices = self.inner.devices();
        devices.motion_sensors.retain(|sensor| sensor.name != name);
        devices.motion_sensors.push(MotionRecord {
            name,
            state: MotionState { presence },
        });
        Ok(())
    }

    /// Every light, in ascending number order.
    #[must_use]
    pub fn lights(&self) -> Vec<LightRecord> {
        self.inner
            .devices()
            .lights
            .values()
            .map(SimulatedLight::to_record)
            .collect()
    }

    /// One light.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] for an unknown number.
    pub fn light(&self, number: LightNumber) -> Result<LightRecord, DeviceError> {
        self.with_light(number, |light| Ok(light.to_record()))
    }

    /// Every motion sensor, in registration order.
    #[must_use]
    pub fn motion_sensors(&self) -> Vec<MotionRecord> {
        self.inner.devices().motion_sensors.clone()
    }

    /// Switch a light.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] for an unknown number.
    pub fn set_power(&self, number: LightNumber, on: bool) -> Result<LightRecord, DeviceError> {
        self.with_light(number, |light| {
            light.apply_power(on);
            Ok(light.to_record())
        })
    }

    /// Set one attribute of a light.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] for an unknown number and
    /// [`DeviceError::InvalidValue`] for an out-of-range value.
    pub fn set_attribute(
        &self,
        number: LightNumber,
        attribute: LightAttribute,
        value: u32,
    ) -> Result<LightRecord, DeviceError> {
        self.with_light(number, |light| {
            light.apply_attribute(attribute, value)?;
            Ok(light.to_record())
        })
    }

    /// Set how long the light's next change takes to blend in.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] for an unknown number.
    pub fn set_transition_time(&self, number: LightNumber, deciseconds: u16) -> Result<LightRecord, DeviceError> {
        self.with_light(number, |light| {
            light.apply_transition_time(deciseconds);
            Ok(light.to_record())
        })
    }

    /// Recolour a light from an RGB value.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] for an unknown number.
    pub fn set_color(&self, number: LightNumber, color: Rgb) -> Result<LightRecord, DeviceError> {
        let hsb = color.to_hsb();
        self.with_light(number, |light| {
            light.apply_color(hsb.hue, hsb.saturation, Some(hsb.brightness));
            Ok(light.to_record())
        })
    }

    /// Update what a motion sensor reports.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] for an unknown sensor.
    pub fn set_presence(&self, name: &str, presence: bool) -> Result<MotionRecord, DeviceError> {
        let mut devices = self.inner.devices();
        let sensor = devices
            .motion_sensors
            .iter_mut()
            .find(|sensor| sensor.name == name)
            .ok_or_else(|| NotFoundError {
                kind: "MotionSensor",
                id: name.to_string(),
            })?;
        sensor.state.presence = presence;
        Ok(sensor.clone())
    }

    /// Start `request`, replacing any running animation.
    ///
    /// A [`Stop`](AnimationKind::Stop) request only stops. Must be called
    /// from within a tokio runtime.
    pub fn start_animation(&self, request: &AnimationRequest) {
        // Held across abort, spawn and store so concurrent starts cannot
        // leave a runner without a handle.
        let mut slot = self.animation_slot();
        abort_runner(slot.take());
        if request.kind == AnimationKind::Stop {
            return;
        }

        let mut animation = Animation::plan(request, &self.inner.devices().lights);
        if animation.targets().is_empty() {
            tracing::info!(kind = %request.kind, "no active light to animate");
            return;
        }
        tracing::info!(
            kind = %request.kind,
            lights = animation.targets().len(),
            "starting animation"
        );

        let bridge: Weak<Inner> = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            loop {
                let Some(inner) = bridge.upgrade() else {
                    break;
                };
                inner.step(&mut animation, &mut rng);
                drop(inner);
                tokio::time::sleep(animation.step_duration()).await;
            }
        });
        *slot = Some(handle);
    }

    /// Abort the running animation, if any. Returns whether one was running.
    pub fn stop_animation(&self) -> bool {
        abort_runner(self.animation_slot().take())
    }

    /// Whether an animation is currently running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation_slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn animation_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .animation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn with_light<F>(&self, number: LightNumber, f: F) -> Result<LightRecord, DeviceError>
    where
        F: FnOnce(&mut SimulatedLight) -> Result<LightRecord, DeviceError>,
    {
        let mut devices = self.inner.devices();
        let light = devices.lights.get_mut(&number).ok_or_else(|| NotFoundError {
            kind: "Light",
            id: number.to_string(),
        })?;
        f(light)
    }
}

fn abort_runner(handle: Option<JoinHandle<()>>) -> bool {
    let Some(handle) = handle else {
        return false;
    };
    let running = !handle.is_finished();
    handle.abort();
    if running {
        tracing::info!("animation stopped");
    }
    running
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use hoo_domain::light::LightState;

    use super::*;

    fn lit(number: u32, brightness: u8) -> SimulatedLight {
        SimulatedLight::from_record(LightRecord {
            name: format!("L{number}"),
            number: LightNumber::new(number),
            state: LightState {
                on: true,
                reachable: true,
                brightness,
                ..LightState::default()
            },
        })
    }

    fn bridge_with(lights: Vec<SimulatedLight>) -> VirtualBridge {
        let bridge = VirtualBridge::new();
        for light in lights {
            bridge.add_light(light).unwrap();
        }
        bridge
    }

    #[test]
    fn should_number_simulated_lights_from_one() {
        let bridge = VirtualBridge::with_simulated_lights(3);
        let numbers: Vec<u32> = bridge.lights().iter().map(|l| l.number.get()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(bridge.lights().iter().all(|l| !l.state.on));
    }

    #[test]
    fn should_reject_light_without_name() {
        let bridge = VirtualBridge::new();
        let result = bridge.add_light(SimulatedLight::new(" ", LightNumber::new(1)));
        assert_eq!(result, Err(ValidationError::EmptyName));
    }

    #[test]
    fn should_report_not_found_for_unknown_light() {
        let bridge = VirtualBridge::with_simulated_lights(1);
        assert!(matches!(
            bridge.light(LightNumber::new(9)),
            Err(DeviceError::NotFound(_))
        ));
        assert!(matches!(
            bridge.set_power(LightNumber::new(9), true),
            Err(DeviceError::NotFound(_))
        ));
    }

    #[test]
    fn should_switch_and_recolour_light() {
        let bridge = VirtualBridge::with_simulated_lights(2);

        bridge.set_power(LightNumber::new(2), true).unwrap();
        let record = bridge
            .set_attribute(LightNumber::new(2), LightAttribute::Hue, 321)
            .unwrap();

        assert!(record.state.on);
        assert_eq!(record.state.hue, 321);
        assert!(!bridge.light(LightNumber::new(1)).unwrap().state.on);
    }

    #[test]
    fn should_reject_out_of_range_attribute() {
        let bridge = VirtualBridge::with_simulated_lights(1);
        let result = bridge.set_attribute(LightNumber::new(1), LightAttribute::Brightness, 256);
        assert!(matches!(result, Err(DeviceError::InvalidValue(_))));
    }

    #[test]
    fn should_track_motion_presence_by_name() {
        let bridge = VirtualBridge::new();
        bridge.add_motion_sensor("Hallway", false).unwrap();
        bridge.add_motion_sensor("Kitchen", false).unwrap();

        let kitchen = bridge.set_presence("Kitchen", true).unwrap();
        assert_eq!(kitchen.name, "Kitchen");

        let sensors = bridge.motion_sensors();
        assert_eq!(sensors.len(), 2);
        assert!(!sensors[0].state.presence);
        assert!(sensors[1].state.presence);
        assert!(matches!(
            bridge.set_presence("Attic", true),
            Err(DeviceError::NotFound(_))
        ));
    }

    #[test]
    fn should_recolour_from_rgb_and_set_transition_time() {
        let bridge = VirtualBridge::with_simulated_lights(1);
        let number = LightNumber::new(1);

        bridge.set_transition_time(number, 12).unwrap();
        let record = bridge.set_color(number, Rgb::new(255, 0, 0)).unwrap();

        assert_eq!(record.state.hue, 0);
        assert_eq!(record.state.saturation, 255);
        assert_eq!(record.state.brightness, 255);
        assert_eq!(record.state.transition_time, 12);
        assert!(matches!(
            bridge.set_color(LightNumber::new(2), Rgb::default()),
            Err(DeviceError::NotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn should_apply_random_colours_to_targeted_lights() {
        let bridge = bridge_with(vec![lit(1, 40), lit(2, 40)]);
        let targets: BTreeSet<LightNumber> = [LightNumber::new(1)].into_iter().collect();

        bridge.start_animation(&AnimationRequest::random(2, 3, targets));
        tokio::task::yield_now().await;

        let first = bridge.light(LightNumber::new(1)).unwrap().state;
        let second = bridge.light(LightNumber::new(2)).unwrap().state;
        assert!(first.saturation >= 200);
        assert_eq!(first.transition_time, 20);
        assert_eq!(first.brightness, 40);
        assert_eq!(second.saturation, 0);
        assert!(bridge.is_animating());

        assert!(bridge.stop_animation());
    }

    #[tokio::test(start_paused = true)]
    async fn should_step_rotation_after_transition_and_hold() {
        let bridge = bridge_with(vec![lit(1, 100), lit(2, 200)]);
        bridge.start_animation(&AnimationRequest::rotate(1, 1, BTreeSet::new(), vec![10, 20]));
        tokio::task::yield_now().await;

        assert_eq!(bridge.light(LightNumber::new(1)).unwrap().state.hue, 20);
        assert_eq!(bridge.light(LightNumber::new(1)).unwrap().state.brightness, 150);

        tokio::time::sleep(Duration::from_millis(2_100)).await;

        assert_eq!(bridge.light(LightNumber::new(1)).unwrap().state.hue, 10);
        assert_eq!(bridge.light(LightNumber::new(2)).unwrap().state.hue, 20);
        bridge.stop_animation();
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_running_animation() {
        let bridge = bridge_with(vec![lit(1, 10)]);
        bridge.start_animation(&AnimationRequest::random(0, 1, BTreeSet::new()));
        tokio::task::yield_now().await;

        bridge.start_animation(&AnimationRequest::stop());

        assert!(!bridge.is_animating());
        assert!(!bridge.stop_animation());
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_recolouring_light_switched_off_mid_animation() {
        let bridge = bridge_with(vec![lit(1, 40)]);
        bridge.start_animation(&AnimationRequest::random(0, 1, BTreeSet::new()));
        tokio::task::yield_now().await;

        bridge.set_power(LightNumber::new(1), false).unwrap();
        let frozen = bridge.light(LightNumber::new(1)).unwrap().state;
        tokio::time::sleep(Duration::from_millis(3_100)).await;

        assert_eq!(bridge.light(LightNumber::new(1)).unwrap().state, frozen);
        assert!(bridge.is_animating());
        bridge.stop_animation();
    }

    #[tokio::test(start_paused = true)]
    async fn should_recolour_light_switched_on_mid_animation() {
        let bridge = bridge_with(vec![lit(1, 40), lit(2, 40)]);
        bridge.set_power(LightNumber::new(2), false).unwrap();
        bridge.start_animation(&AnimationRequest::random(0, 1, BTreeSet::new()));
        tokio::task::yield_now().await;
        assert_eq!(bridge.light(LightNumber::new(2)).unwrap().state.saturation, 0);

        bridge.set_power(LightNumber::new(2), true).unwrap();
        tokio::time::sleep(Duration::from_millis(1_100)).await;

        assert!(bridge.light(LightNumber::new(2)).unwrap().state.saturation >= 200);
        bridge.stop_animation();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn should_leave_no_runner_behind_after_concurrent_restarts() {
        let bridge = bridge_with(vec![lit(1, 10), lit(2, 10)]);

        let starters: Vec<_> = (0..8)
            .map(|_| {
                let bridge = bridge.clone();
                tokio::task::spawn_blocking(move || {
                    for _ in 0..200 {
                        bridge.start_animation(&AnimationRequest::random(0, 0, BTreeSet::new()));
                    }
                })
            })
            .collect();
        for starter in starters {
            starter.await.unwrap();
        }

        assert!(bridge.stop_animation());
        tokio::time::sleep(Duration::from_millis(50)).await;
        let settled = bridge.lights();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(bridge.lights(), settled);
        assert!(!bridge.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_start_without_active_lights() {
        let bridge = VirtualBridge::with_simulated_lights(2);

        bridge.start_animation(&AnimationRequest::random(1, 1, BTreeSet::new()));

        assert!(!bridge.is_animating());
    }
}
