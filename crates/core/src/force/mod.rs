//! Force modules: independent, time-varying acceleration generators.
//!
//! A [`ForceModule`] maps a particle snapshot, the simulation time, and the
//! current bounds to an acceleration. Modules never touch particle state;
//! any private state they carry (moving centers, attractor placement) is
//! updated only in [`ForceModule::prepare`], once per tick.
//!
//! Every inverse-distance term adds a softening constant to the squared
//! distance before dividing, so no module can produce an infinite force.

mod attractor;
mod radial;
mod turbulence;
mod wave;

pub use attractor::{Attractor, MultiAttractor, Orbiter, OrbitingCenters, DEFAULT_ATTRACTOR_COUNT};
pub use radial::{Breathing, Vortex};
pub use turbulence::{IndexJitter, PerlinDrift, TrigNoise};
pub use wave::{Swirl, TravelingWave};

use crate::bounds::Bounds;
use crate::particle::Particle;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// One additive acceleration term of the particle dynamics.
pub trait ForceModule: Send {
    /// Short identifier used for toggling and listing.
    fn name(&self) -> &str;

    /// Called once per tick before any particle is evaluated.
    fn prepare(&mut self, _time: f64, _bounds: Bounds) {}

    /// Acceleration contributed to `particle` at `time`.
    fn acceleration(&self, particle: &Particle, time: f64, bounds: Bounds) -> DVec2;
}

/// `amplitude * sin(frequency * t + phase)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
}

impl Oscillator {
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn value(&self, time: f64) -> f64 {
        self.amplitude * (self.frequency * time + self.phase).sin()
    }
}

/// A point that traces a Lissajous curve around a normalized anchor.
///
/// Anchor and excursion are fractions of the bounds, so the path scales with
/// the surface on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterPath {
    pub anchor: DVec2,
    pub excursion: DVec2,
    pub frequency: DVec2,
    pub phase: DVec2,
}

impl CenterPath {
    /// A stationary point at the normalized `anchor`.
    pub fn fixed(anchor: DVec2) -> Self {
        Self {
            anchor,
            excursion: DVec2::ZERO,
            frequency: DVec2::ZERO,
            phase: DVec2::ZERO,
        }
    }

    /// `x` follows a sine and `y` a cosine of their own frequencies.
    pub fn sin_cos(anchor: DVec2, excursion: DVec2, frequency: DVec2) -> Self {
        Self {
            anchor,
            excursion,
            frequency,
            phase: DVec2::new(0.0, FRAC_PI_2),
        }
    }

    /// `x` follows a cosine and `y` a sine.
    pub fn cos_sin(anchor: DVec2, excursion: DVec2, frequency: DVec2) -> Self {
        Self {
            anchor,
            excursion,
            frequency,
            phase: DVec2::new(FRAC_PI_2, 0.0),
        }
    }

    /// Position in surface coordinates at `time`.
    pub fn position(&self, time: f64, bounds: Bounds) -> DVec2 {
        let swing = DVec2::new(
            (self.frequency.x * time + self.phase.x).sin(),
            (self.frequency.y * time + self.phase.y).sin(),
        );
        bounds.scale(self.anchor + swing * self.excursion)
    }
}

/// `delta / (|delta|² + softening)`.
///
/// The magnitude `d / (d² + ε)` peaks at `1 / (2√ε)` when `d = √ε`, so a
/// pull scaled by `s` never exceeds `|s| / (2√ε)`.
pub fn softened_pull(delta: DVec2, softening: f64) -> DVec2 {
    delta / (delta.length_squared() + softening)
}

/// Upper bound on `|s · softened_pull(_, softening)|`.
pub fn softened_pull_bound(strength: f64, softening: f64) -> f64 {
    strength.abs() / (2.0 * softening.sqrt())
}
