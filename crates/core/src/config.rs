//! Construction-time configuration for a simulation.
//!
//! A [`SimConfig`] is validated once, before any particle exists. JSON
//! overrides are lenient: a missing or wrongly-typed key keeps the current
//! value, so a partial override object is always usable.

use crate::color::Srgb;
use crate::error::SimError;
use crate::style::{ColorMode, ParticleStyle};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Velocity damping factor `base + amplitude · sin(frequency · t)`.
///
/// A non-zero amplitude makes the system alternately gain and shed energy
/// instead of settling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damping {
    pub base: f64,
    pub amplitude: f64,
    pub frequency: f64,
}

impl Damping {
    pub fn constant(base: f64) -> Self {
        Self {
            base,
            amplitude: 0.0,
            frequency: 0.0,
        }
    }

    pub fn oscillating(base: f64, amplitude: f64, frequency: f64) -> Self {
        Self {
            base,
            amplitude,
            frequency,
        }
    }

    pub fn factor(&self, time: f64) -> f64 {
        self.base + self.amplitude * (self.frequency * time).sin()
    }

    /// Checks that the factor stays within (0, 1] for every `t`.
    pub fn validate(&self) -> Result<(), SimError> {
        let ok = self.base.is_finite()
            && self.amplitude.is_finite()
            && self.frequency.is_finite()
            && self.amplitude >= 0.0
            && self.base > 0.0
            && self.base <= 1.0
            && self.base - self.amplitude > 0.0
            && self.base + self.amplitude <= 1.0;
        if ok {
            Ok(())
        } else {
            Err(SimError::InvalidDamping {
                base: self.base,
                amplitude: self.amplitude,
            })
        }
    }
}

/// How acceleration is turned into a velocity change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Multiply by the real elapsed seconds since the previous tick.
    Elapsed,
    /// Multiply by a constant gain, independent of frame timing.
    FixedGain(f64),
}

/// Everything needed to build a simulation besides its force modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub particle_count: usize,
    pub max_speed: f64,
    pub damping: Damping,
    pub step: StepMode,
    pub style: ParticleStyle,
    /// Opacity of the black wash over previous frames, in [0, 1].
    pub trail_fade: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 1200,
            max_speed: 16.0,
            damping: Damping::constant(0.99),
            step: StepMode::Elapsed,
            style: ParticleStyle::new(1.4, ColorMode::solid(Srgb::WHITE)),
            trail_fade: 0.12,
        }
    }
}

impl SimConfig {
    /// Rejects configurations that could produce NaNs at runtime.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.particle_count == 0 {
            return Err(SimError::InvalidParticleCount);
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(SimError::InvalidMaxSpeed(self.max_speed));
        }
        self.damping.validate()?;
        if let StepMode::FixedGain(gain) = self.step {
            if !(gain.is_finite() && gain > 0.0) {
                return Err(SimError::InvalidStep(gain));
            }
        }
        if !(0.0..=1.0).contains(&self.trail_fade) {
            return Err(SimError::InvalidTrailFade(self.trail_fade));
        }
        if !(self.style.radius.is_finite() && self.style.radius >= 0.0) {
            return Err(SimError::InvalidRadius(self.style.radius));
        }
        Ok(())
    }

    /// Overlays values from a JSON object.
    ///
    /// Recognized keys: `particle_count`, `max_speed`, `damping_base`,
    /// `damping_amplitude`, `damping_frequency`, `fixed_gain`,
    /// `particle_radius`, `trail_fade`. `trail_fade` is clamped to [0, 1].
    /// The result is not validated; call [`validate`](Self::validate).
    pub fn apply_json(&mut self, params: &Value) {
        self.particle_count = param_usize(params, "particle_count", self.particle_count);
        self.max_speed = param_f64(params, "max_speed", self.max_speed);
        self.damping.base = param_f64(params, "damping_base", self.damping.base);
        self.damping.amplitude = param_f64(params, "damping_amplitude", self.damping.amplitude);
        self.damping.frequency = param_f64(params, "damping_frequency", self.damping.frequency);
        if let Some(gain) = params.get("fixed_gain").and_then(Value::as_f64) {
            self.step = StepMode::FixedGain(gain);
        }
        self.style.radius = param_f64(params, "particle_radius", self.style.radius);
        self.trail_fade = param_f64(params, "trail_fade", self.trail_fade).clamp(0.0, 1.0);
    }
}

fn param_f64(params: &Value, name: &str, current: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(current)
}

fn param_usize(params: &Value, name: &str, current: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_particles_rejected() {
        let config = SimConfig {
            particle_count: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidParticleCount)
        ));
    }

    #[test]
    fn non_positive_max_speed_rejected() {
        for max_speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                max_speed,
                ..SimConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(SimError::InvalidMaxSpeed(_))),
                "max_speed {max_speed} accepted"
            );
        }
    }

    #[test]
    fn damping_range_must_stay_in_unit_interval() {
        assert!(Damping::constant(1.0).validate().is_ok());
        assert!(Damping::oscillating(0.96, 0.02, 2.2).validate().is_ok());
        assert!(Damping::constant(0.0).validate().is_err());
        assert!(Damping::constant(1.01).validate().is_err());
        assert!(Damping::oscillating(0.99, 0.02, 1.0).validate().is_err());
        assert!(Damping::oscillating(0.05, 0.05, 1.0).validate().is_err());
        assert!(Damping::oscillating(0.9, -0.01, 1.0).validate().is_err());
    }

    #[test]
    fn damping_factor_oscillates_around_base() {
        let d = Damping::oscillating(0.96, 0.02, 1.0);
        assert!((d.factor(0.0) - 0.96).abs() < 1e-12);
        assert!((d.factor(std::f64::consts::FRAC_PI_2) - 0.98).abs() < 1e-12);
    }

    #[test]
    fn fixed_gain_must_be_positive() {
        let config = SimConfig {
            step: StepMode::FixedGain(0.0),
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidStep(_))));
    }

    #[test]
    fn trail_fade_outside_unit_interval_rejected() {
        for trail_fade in [-0.1, 1.5, f64::NAN] {
            let config = SimConfig {
                trail_fade,
                ..SimConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(SimError::InvalidTrailFade(_))),
                "trail_fade {trail_fade} accepted"
            );
        }
        for trail_fade in [0.0, 1.0] {
            let config = SimConfig {
                trail_fade,
                ..SimConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn negative_or_non_finite_radius_rejected() {
        for radius in [-1.0, f64::NAN, f64::INFINITY] {
            let mut config = SimConfig::default();
            config.style.radius = radius;
            assert!(
                matches!(config.validate(), Err(SimError::InvalidRadius(_))),
                "radius {radius} accepted"
            );
        }
        let mut config = SimConfig::default();
        config.style.radius = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn apply_json_overrides_known_keys() {
        let mut config = SimConfig::default();
        config.apply_json(&json!({
            "particle_count": 4,
            "max_speed": 6.0,
            "damping_base": 0.98,
            "damping_amplitude": 0.01,
            "damping_frequency": 0.5,
            "fixed_gain": 0.05,
            "particle_radius": 2,
            "trail_fade": 3.0,
        }));
        assert_eq!(config.particle_count, 4);
        assert_eq!(config.max_speed, 6.0);
        assert_eq!(config.damping, Damping::oscillating(0.98, 0.01, 0.5));
        assert_eq!(config.step, StepMode::FixedGain(0.05));
        assert_eq!(config.style.radius, 2.0);
        assert_eq!(config.trail_fade, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn apply_json_ignores_wrong_types_and_unknown_keys() {
        let mut config = SimConfig::default();
        let before = config.clone();
        config.apply_json(&json!({
            "particle_count": -5,
            "max_speed": "fast",
            "gravity": 9.81,
        }));
        assert_eq!(config, before);
    }

    #[test]
    fn apply_json_on_non_object_is_noop() {
        let mut config = SimConfig::default();
        config.apply_json(&json!([1, 2, 3]));
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn config_json_round_trip() {
        let config = SimConfig {
            step: StepMode::FixedGain(0.05),
            ..SimConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
