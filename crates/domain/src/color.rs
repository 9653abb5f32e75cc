//! Colour spaces a caller may speak in, converted to the bridge's
//! hue/saturation/brightness scales.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    #[serde(rename = "r", default)]
    pub red: u8,
    #[serde(rename = "g", default)]
    pub green: u8,
    #[serde(rename = "b", default)]
    pub blue: u8,
}

/// A colour on the bridge's scales: hue `0..=65535`, the rest `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsb {
    pub hue: u16,
    pub saturation: u8,
    pub brightness: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Convert through HSV, scaling the hue circle onto `0..=65535`.
    ///
    /// Greys (all channels equal) map to hue 0 and saturation 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hsb(self) -> Hsb {
        let r = f64::from(self.red);
        let g = f64::from(self.green);
        let b = f64::from(self.blue);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let degrees = if delta == 0.0 {
            0.0
        } else if (max - r).abs() < f64::EPSILON {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max * 255.0 };

        Hsb {
            hue: (degrees / 360.0 * f64::from(u16::MAX)).round() as u16,
            saturation: saturation.round() as u8,
            brightness: max as u8,
        }
    }
}

impl From<Rgb> for Hsb {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_primaries_onto_hue_circle() {
        assert_eq!(
            Rgb::new(255, 0, 0).to_hsb(),
            Hsb {
                hue: 0,
                saturation: 255,
                brightness: 255
            }
        );
        assert_eq!(Rgb::new(0, 255, 0).to_hsb().hue, 21_845);
        assert_eq!(Rgb::new(0, 0, 255).to_hsb().hue, 43_690);
    }

    #[test]
    fn should_wrap_magenta_below_full_circle() {
        let hsb = Rgb::new(255, 0, 255).to_hsb();
        assert!((54_612..=54_613).contains(&hsb.hue));
        assert_eq!(hsb.saturation, 255);
    }

    #[test]
    fn should_map_greys_to_zero_saturation() {
        let grey = Rgb::new(128, 128, 128).to_hsb();
        assert_eq!(grey.hue, 0);
        assert_eq!(grey.saturation, 0);
        assert_eq!(grey.brightness, 128);
        assert_eq!(Rgb::default().to_hsb(), Hsb::default());
    }

    #[test]
    fn should_scale_saturation_by_brightest_channel() {
        let hsb = Rgb::new(200, 100, 100).to_hsb();
        assert_eq!(hsb.hue, 0);
        assert_eq!(hsb.saturation, 128);
        assert_eq!(hsb.brightness, 200);
    }

    #[test]
    fn should_default_missing_channels_to_zero() {
        let rgb: Rgb = serde_json::from_str(r#"{"g": 10}"#).unwrap();
        assert_eq!(rgb, Rgb::new(0, 10, 0));
    }
}
