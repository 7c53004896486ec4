//! How particles are painted: radius and a time/speed driven color.

use crate::color::{hsl_to_srgb, oklch_to_srgb, Hsl, OkLch, Srgb};
use crate::error::SimError;
use crate::host::DrawRequest;
use crate::particle::Particle;
use serde::{Deserialize, Serialize};

const COLOR_MODE_NAMES: &[&str] = &["hsl", "oklch", "white", "#rrggbb"];

/// Maps a particle's speed and the global time to a color.
///
/// The cyclic modes rotate the hue at `hue_rate` degrees per second and
/// shift it by `speed_gain` degrees per unit of speed, so fast particles
/// stand out from the slowly drifting background hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMode {
    Hsl {
        hue_rate: f64,
        speed_gain: f64,
        saturation: f64,
        lightness: f64,
    },
    OkLch {
        hue_rate: f64,
        speed_gain: f64,
        lightness: f64,
        chroma: f64,
    },
    Solid {
        color: Srgb,
    },
}

impl ColorMode {
    pub fn hsl() -> Self {
        ColorMode::Hsl {
            hue_rate: 40.0,
            speed_gain: 25.0,
            saturation: 1.0,
            lightness: 0.6,
        }
    }

    pub fn oklch() -> Self {
        ColorMode::OkLch {
            hue_rate: 40.0,
            speed_gain: 25.0,
            lightness: 0.75,
            chroma: 0.15,
        }
    }

    pub fn solid(color: Srgb) -> Self {
        ColorMode::Solid { color }
    }

    /// Parses `"hsl"`, `"oklch"`, `"white"`, or a hex color.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name.to_ascii_lowercase().as_str() {
            "hsl" => Ok(Self::hsl()),
            "oklch" => Ok(Self::oklch()),
            "white" => Ok(Self::solid(Srgb::WHITE)),
            other if other.starts_with('#') => Srgb::from_hex(other).map(Self::solid),
            other => Err(SimError::UnknownColorMode(other.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        COLOR_MODE_NAMES
    }

    pub fn color(&self, time: f64, speed: f64) -> Srgb {
        match *self {
            ColorMode::Hsl {
                hue_rate,
                speed_gain,
                saturation,
                lightness,
            } => hsl_to_srgb(Hsl {
                h: cyclic_hue(time, speed, hue_rate, speed_gain),
                s: saturation,
                l: lightness,
            }),
            ColorMode::OkLch {
                hue_rate,
                speed_gain,
                lightness,
                chroma,
            } => oklch_to_srgb(OkLch {
                l: lightness,
                c: chroma,
                h: cyclic_hue(time, speed, hue_rate, speed_gain),
            }),
            ColorMode::Solid { color } => color,
        }
    }
}

fn cyclic_hue(time: f64, speed: f64, hue_rate: f64, speed_gain: f64) -> f64 {
    (time * hue_rate + speed * speed_gain).rem_euclid(360.0)
}

/// Radius and color mode for every particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleStyle {
    pub radius: f64,
    pub color: ColorMode,
}

impl ParticleStyle {
    pub fn new(radius: f64, color: ColorMode) -> Self {
        Self { radius, color }
    }

    pub fn draw_request(&self, particle: &Particle, time: f64) -> DrawRequest {
        DrawRequest {
            x: particle.position.x,
            y: particle.position.y,
            radius: self.radius,
            color: self.color.color(time, particle.speed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn from_name_parses_known_modes() {
        assert_eq!(ColorMode::from_name("hsl").unwrap(), ColorMode::hsl());
        assert_eq!(ColorMode::from_name("OKLCH").unwrap(), ColorMode::oklch());
        assert_eq!(
            ColorMode::from_name("white").unwrap(),
            ColorMode::solid(Srgb::WHITE)
        );
        assert_eq!(
            ColorMode::from_name("#000000").unwrap(),
            ColorMode::solid(Srgb::BLACK)
        );
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert!(matches!(
            ColorMode::from_name("plaid"),
            Err(SimError::UnknownColorMode(_))
        ));
        assert!(matches!(
            ColorMode::from_name("#12"),
            Err(SimError::InvalidColor(_))
        ));
    }

    #[test]
    fn hue_cycles_with_time() {
        let mode = ColorMode::hsl();
        let a = mode.color(0.0, 0.0);
        let b = mode.color(4.0, 0.0);
        let c = mode.color(4.0 + 360.0 / 40.0, 0.0);
        assert_ne!(a, b);
        assert!((b.r - c.r).abs() < 1e-9 && (b.g - c.g).abs() < 1e-9 && (b.b - c.b).abs() < 1e-9);
    }

    #[test]
    fn speed_shifts_hue() {
        let mode = ColorMode::oklch();
        assert_ne!(mode.color(1.0, 0.0), mode.color(1.0, 3.0));
    }

    #[test]
    fn solid_ignores_time_and_speed() {
        let mode = ColorMode::solid(Srgb::WHITE);
        assert_eq!(mode.color(5.0, 10.0), Srgb::WHITE);
    }

    #[test]
    fn draw_request_carries_position_and_radius() {
        let style = ParticleStyle::new(1.4, ColorMode::solid(Srgb::WHITE));
        let p = Particle::new(0, DVec2::new(12.5, 3.0), DVec2::new(1.0, 0.0));
        let req = style.draw_request(&p, 0.0);
        assert_eq!((req.x, req.y, req.radius), (12.5, 3.0, 1.4));
        assert_eq!(req.color, Srgb::WHITE);
    }

    #[test]
    fn color_mode_serde_is_tagged() {
        let json = serde_json::to_value(ColorMode::hsl()).unwrap();
        assert_eq!(json["mode"], "hsl");
        let back: ColorMode = serde_json::from_value(json).unwrap();
        assert_eq!(back, ColorMode::hsl());
    }
}
