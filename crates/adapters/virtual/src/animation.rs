//! Frame generation for the virtual bridge's animations.
//!
//! An [`Animation`] is built once from a request and the lights it targets,
//! then yields one [`Frame`] per step until the runner is aborted. Every
//! step looks at the lights again: a light switched off mid-animation is
//! left alone, and random and sleepy pick up lights switched on since.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;

use hoo_app::ports::Light;
use hoo_domain::animation::{
    AnimationKind, AnimationRequest, RANDOM_SATURATION_RANGE, SLEEPY_HUE_RANGE,
};
use hoo_domain::id::LightNumber;

use crate::SimulatedLight;

/// Shortest time between two steps, so zero-second requests do not spin.
const MIN_STEP: Duration = Duration::from_millis(100);

/// Colour assigned to one light by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Color {
    pub(crate) hue: u16,
    pub(crate) saturation: u8,
    /// `None` keeps the light's current brightness.
    pub(crate) brightness: Option<u8>,
}

/// Colours to apply in one step.
pub(crate) type Frame = Vec<(LightNumber, Color)>;

type Lights = BTreeMap<LightNumber, SimulatedLight>;

/// A running animation's plan.
#[derive(Debug)]
pub(crate) struct Animation {
    request: AnimationRequest,
    /// Lights that were targeted and active when the animation started.
    targets: Vec<LightNumber>,
    palette: Vec<Color>,
}

impl Animation {
    /// Plan `request` against the current lights.
    ///
    /// Only lights that are targeted **and** active (on and reachable) take
    /// part.
    pub(crate) fn plan(request: &AnimationRequest, lights: &Lights) -> Self {
        let selected: Vec<&SimulatedLight> = selected(request, lights).collect();

        let palette = if request.kind == AnimationKind::Rotate {
            rotation_palette(&selected, &request.hues)
        } else {
            Vec::new()
        };

        Self {
            request: request.clone(),
            targets: selected.iter().map(|light| light.number()).collect(),
            palette,
        }
    }

    /// Lights this animation drives.
    pub(crate) fn targets(&self) -> &[LightNumber] {
        &self.targets
    }

    /// Blend time stamped on every light a frame touches, in deciseconds.
    pub(crate) fn transition_deciseconds(&self) -> u16 {
        self.request.transition_time.saturating_mul(10)
    }

    /// Time between two frames: the blend followed by the hold.
    pub(crate) fn step_duration(&self) -> Duration {
        let secs = u64::from(self.request.transition_time) + u64::from(self.request.hold_time);
        Duration::from_secs(secs).max(MIN_STEP)
    }

    /// Produce the next step for the lights as they are now.
    ///
    /// Rotation keeps its starting line-up but skips lights that are no
    /// longer active, so the palette stays aligned with its slots.
    pub(crate) fn next_frame<R: Rng + ?Sized>(&mut self, lights: &Lights, rng: &mut R) -> Frame {
        match self.request.kind {
            AnimationKind::Rotate => {
                self.palette.rotate_right(1);
                self.targets
                    .iter()
                    .copied()
                    .zip(self.palette.iter().copied())
                    .filter(|(number, _)| lights.get(number).is_some_and(|l| l.state().is_active()))
                    .collect()
            }
            AnimationKind::Random => self.random_frame(lights, rng, 0..=u16::MAX),
            AnimationKind::Sleepy => self.random_frame(lights, rng, SLEEPY_HUE_RANGE),
            AnimationKind::Stop => Vec::new(),
        }
    }

    fn random_frame<R: Rng + ?Sized>(
        &self,
        lights: &Lights,
        rng: &mut R,
        hues: std::ops::RangeInclusive<u16>,
    ) -> Frame {
        selected(&self.request, lights)
            .map(|light| {
                let color = Color {
                    hue: rng.gen_range(hues.clone()),
                    saturation: rng.gen_range(RANDOM_SATURATION_RANGE),
                    brightness: None,
                };
                (light.number(), color)
            })
            .collect()
    }
}

fn selected<'a>(
    request: &'a AnimationRequest,
    lights: &'a Lights,
) -> impl Iterator<Item = &'a SimulatedLight> + 'a {
    lights
        .values()
        .filter(move |light| request.targets(light.number()) && light.state().is_active())
}

/// The colours a rotation cycles through.
///
/// With a palette, every hue is used at full saturation and the average
/// brightness of the selected lights. Without one, the lights' own colours
/// are rotated among them.
fn rotation_palette(selected: &[&SimulatedLight], hues: &[u16]) -> Vec<Color> {
    if hues.is_empty() {
        return selected
            .iter()
            .map(|light| Color {
                hue: light.hue(),
                saturation: light.saturation(),
                brightness: Some(light.brightness()),
            })
            .collect();
    }

    let brightness = average_brightness(selected);
    hues.iter()
        .map(|&hue| Color {
            hue,
            saturation: u8::MAX,
            brightness: Some(brightness),
        })
        .collect()
}

fn average_brightness(selected: &[&SimulatedLight]) -> u8 {
    if selected.is_empty() {
        return u8::MAX;
    }
    let sum: usize = selected.iter().map(|light| usize::from(light.brightness())).sum();
    u8::try_from(sum / selected.len()).unwrap_or(u8::MAX)
}
