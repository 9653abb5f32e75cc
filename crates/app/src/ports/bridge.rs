//! Bridge port: the request shapes handed to the transport and the trait
//! that carries them.
//!
//! The core never talks to the network itself. It builds a [`BridgeRequest`]
//! (path segments plus query parameters) and hands it to a
//! [`BridgeTransport`], which answers with the raw response body or a
//! [`DeviceError::TransportFailure`].
//!
//! | Call | Path |
//! |------|------|
//! | list lights | `/lights` |
//! | get one light | `/light/{number}` |
//! | list motion sensors | `/motion` |
//! | turn on/off | `/{number}/on`, `/{number}/off` |
//! | set attribute | `/{number}/state?hue=…` (or `sat`, `bri`) |
//! | set transition time | `/{number}/state?transitiontime=…` |
//! | set RGB colour | `/{number}/color?r=…&g=…&b=…` |
//! | animations | `/{rotate,random,sleepy}/{t}/{h}?lights=…[&hues=…]`, `/stop` |

use std::fmt;
use std::future::Future;

use hoo_domain::animation::{AnimationKind, AnimationRequest};
use hoo_domain::color::Rgb;
use hoo_domain::error::DeviceError;
use hoo_domain::id::LightNumber;
use hoo_domain::light::{LightAttribute, TRANSITION_TIME_QUERY_KEY};

/// One GET-style call against the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl BridgeRequest {
    fn at<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            segments: segments.into_iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
        }
    }

    fn with_param(mut self, key: &'static str, value: String) -> Self {
        self.query.push((key, value));
        self
    }

    /// `GET /lights`
    #[must_use]
    pub fn list_lights() -> Self {
        Self::at(["lights"])
    }

    /// `GET /light/{number}`
    #[must_use]
    pub fn get_light(number: LightNumber) -> Self {
        Self::at(["light".to_string(), number.to_string()])
    }

    /// `GET /motion`
    #[must_use]
    pub fn list_motion_sensors() -> Self {
        Self::at(["motion"])
    }

    /// `GET /{number}/on` or `GET /{number}/off`
    #[must_use]
    pub fn power(number: LightNumber, on: bool) -> Self {
        let action = if on { "on" } else { "off" };
        Self::at([number.to_string(), action.to_string()])
    }

    /// `GET /{number}/state?{key}={value}`: exactly one attribute per call.
    #[must_use]
    pub fn set_attribute(number: LightNumber, attribute: LightAttribute, value: u32) -> Self {
        Self::at([number.to_string(), "state".to_string()])
            .with_param(attribute.query_key(), value.to_string())
    }

    /// `GET /{number}/state?transitiontime={deciseconds}`
    #[must_use]
    pub fn transition_time(number: LightNumber, deciseconds: u16) -> Self {
        Self::at([number.to_string(), "state".to_string()])
            .with_param(TRANSITION_TIME_QUERY_KEY, deciseconds.to_string())
    }

    /// `GET /{number}/color?r={red}&g={green}&b={blue}`
    #[must_use]
    pub fn color(number: LightNumber, color: Rgb) -> Self {
        Self::at([number.to_string(), "color".to_string()])
            .with_param("r", color.red.to_string())
            .with_param("g", color.green.to_string())
            .with_param("b", color.blue.to_string())
    }

    /// Encode an animation command.
    ///
    /// An empty target set omits the `lights` parameter entirely, which the
    /// bridge reads as "all lights". `hues` is only sent for rotations with a
    /// non-empty palette, in palette order.
    #[must_use]
    pub fn animation(request: &AnimationRequest) -> Self {
        if request.kind == AnimationKind::Stop {
            return Self::at([AnimationKind::Stop.path_segment()]);
        }

        let mut encoded = Self::at([
            request.kind.path_segment().to_string(),
            request.transition_time.to_string(),
            request.hold_time.to_string(),
        ]);
        if !request.target_lights.is_empty() {
            encoded = encoded.with_param("lights", join_csv(&request.target_lights));
        }
        if request.kind == AnimationKind::Rotate && !request.hues.is_empty() {
            encoded = encoded.with_param("hues", join_csv(&request.hues));
        }
        encoded
    }

    /// Path with a leading `/`, e.g. `/light/3`.
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    /// Encoded query string without the leading `?`, if any parameter is set.
    ///
    /// Values are plain numbers and comma-separated lists and are written
    /// verbatim.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        Some(pairs.join("&"))
    }

    /// Path followed by `?query` when parameters are present.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match self.query() {
            Some(query) => format!("{}?{query}", self.path()),
            None => self.path(),
        }
    }
}

impl fmt::Display for BridgeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_and_query())
    }
}

fn join_csv<'a, T>(values: impl IntoIterator<Item = &'a T>) -> String
where
    T: ToString + 'a,
{
    values
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Carries a [`BridgeRequest`] to a bridge.
///
/// Implementations live in adapter crates (e.g. `adapter_bridge_http`).
/// A non-error completion is success regardless of the body; the body is
/// returned verbatim so list/get callers can decode it.
pub trait BridgeTransport: Send + Sync {
    /// Issue one call and wait for its terminal outcome.
    ///
    /// Network errors, timeouts and non-success statuses are reported as
    /// [`DeviceError::TransportFailure`].
    fn send(
        &self,
        request: &BridgeRequest,
    ) -> impl Future<Output = Result<String, DeviceError>> + Send;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn lights(numbers: &[u32]) -> BTreeSet<LightNumber> {
        numbers.iter().copied().map(LightNumber::new).collect()
    }

    #[test]
    fn should_encode_device_paths() {
        assert_eq!(BridgeRequest::list_lights().to_string(), "/lights");
        assert_eq!(
            BridgeRequest::get_light(LightNumber::new(3)).to_string(),
            "/light/3"
        );
        assert_eq!(BridgeRequest::list_motion_sensors().to_string(), "/motion");
    }

    #[test]
    fn should_encode_power_paths() {
        let number = LightNumber::new(5);
        assert_eq!(BridgeRequest::power(number, true).to_string(), "/5/on");
        assert_eq!(BridgeRequest::power(number, false).to_string(), "/5/off");
    }

    #[test]
    fn should_encode_one_attribute_per_state_call() {
        let number = LightNumber::new(2);
        assert_eq!(
            BridgeRequest::set_attribute(number, LightAttribute::Brightness, 128).to_string(),
            "/2/state?bri=128"
        );
        assert_eq!(
            BridgeRequest::set_attribute(number, LightAttribute::Saturation, 7).to_string(),
            "/2/state?sat=7"
        );
        assert_eq!(
            BridgeRequest::set_attribute(number, LightAttribute::Hue, 65_535).to_string(),
            "/2/state?hue=65535"
        );
    }

    #[test]
    fn should_encode_transition_time_on_state_path() {
        let encoded = BridgeRequest::transition_time(LightNumber::new(6), 40);
        assert_eq!(encoded.to_string(), "/6/state?transitiontime=40");
    }

    #[test]
    fn should_encode_every_rgb_channel() {
        let encoded = BridgeRequest::color(LightNumber::new(1), Rgb::new(255, 0, 17));
        assert_eq!(encoded.path(), "/1/color");
        assert_eq!(encoded.query().as_deref(), Some("r=255&g=0&b=17"));
    }

    #[test]
    fn should_omit_lights_and_hues_when_targeting_all_without_palette() {
        let request = AnimationRequest::rotate(4, 10, BTreeSet::new(), Vec::new());
        let encoded = BridgeRequest::animation(&request);
        assert_eq!(encoded.to_string(), "/rotate/4/10");
        assert_eq!(encoded.query(), None);
        assert_eq!(encoded.path_and_query(), encoded.path());
    }

    #[test]
    fn should_encode_lights_then_hues_for_rotate() {
        let request = AnimationRequest::rotate(1, 2, lights(&[7, 3]), vec![100, 200]);
        let encoded = BridgeRequest::animation(&request);
        assert_eq!(encoded.path(), "/rotate/1/2");
        assert_eq!(encoded.query().as_deref(), Some("lights=3,7&hues=100,200"));
    }

    #[test]
    fn should_preserve_palette_order() {
        let request = AnimationRequest::rotate(1, 2, BTreeSet::new(), vec![300, 100, 200]);
        let encoded = BridgeRequest::animation(&request);
        assert_eq!(encoded.to_string(), "/rotate/1/2?hues=300,100,200");
    }

    #[test]
    fn should_encode_random_without_hues() {
        let mut request = AnimationRequest::random(3, 6, lights(&[1, 2]));
        request.hues = vec![5];
        let encoded = BridgeRequest::animation(&request);
        assert_eq!(encoded.to_string(), "/random/3/6?lights=1,2");
    }

    #[test]
    fn should_encode_random_for_all_lights_without_query() {
        let request = AnimationRequest::random(3, 6, BTreeSet::new());
        assert_eq!(BridgeRequest::animation(&request).to_string(), "/random/3/6");
    }

    #[test]
    fn should_encode_sleepy() {
        let request = AnimationRequest::sleepy(2, 8, lights(&[4]));
        assert_eq!(
            BridgeRequest::animation(&request).to_string(),
            "/sleepy/2/8?lights=4"
        );
    }

    #[test]
    fn should_encode_stop_without_parameters() {
        let mut request = AnimationRequest::stop();
        request.target_lights = lights(&[1]);
        assert_eq!(BridgeRequest::animation(&request).to_string(), "/stop");
    }
}
